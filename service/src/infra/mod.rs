//! Infrastructure implementations.

pub mod media;
pub mod store;

#[cfg(feature = "fs")]
pub use self::{media::FsMedia, store::JsonFiles};
pub use self::{media::Media, store::Store};
