//! Read-side definitions.

pub mod property;
