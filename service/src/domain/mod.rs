//! Domain definitions.

pub mod inquiry;
pub mod property;

pub use self::{inquiry::Inquiry, property::Property};
