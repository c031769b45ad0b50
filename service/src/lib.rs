//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

#[cfg(doc)]
use infra::{Media, Store};

pub use self::{command::Command, query::Query};

/// Domain service.
///
/// Generic over its [`Store`] (whole-document persistence) and [`Media`]
/// (uploaded files) ports.
#[derive(Clone, Debug)]
pub struct Service<Db, Fs> {
    /// [`Store`] of this [`Service`].
    database: Db,

    /// [`Media`] storage of this [`Service`].
    media: Fs,
}

impl<Db, Fs> Service<Db, Fs> {
    /// Creates a new [`Service`] with the provided ports.
    pub fn new(database: Db, media: Fs) -> Self {
        Self { database, media }
    }

    /// Returns the [`Store`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns the [`Media`] storage of this [`Service`].
    #[must_use]
    pub fn media(&self) -> &Fs {
        &self.media
    }
}
