//! Document [`Store`]-related implementations.

#[cfg(feature = "fs")]
pub mod json;

use derive_more::{Display, Error as StdError, From};

use crate::domain::{Inquiry, Property};

#[cfg(feature = "fs")]
pub use self::json::JsonFiles;

/// Document store operation.
pub use common::Handler as Store;

/// Collection persisted as a single whole-file JSON document.
pub trait Collection {
    /// File name of the backing document.
    const FILE_NAME: &'static str;
}

impl Collection for Property {
    const FILE_NAME: &'static str = "properties.json";
}

impl Collection for Inquiry {
    const FILE_NAME: &'static str = "clients.json";
}

/// [`Store`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "fs")]
    /// [`JsonFiles`] error.
    Json(json::Error),
}
