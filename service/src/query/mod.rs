//! [`Query`] definition.

pub mod inquiries;
pub mod properties;
pub mod property;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;
