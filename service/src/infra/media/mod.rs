//! [`Media`] storage-related implementations.

#[cfg(feature = "fs")]
pub mod fs;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "fs")]
pub use self::fs::FsMedia;

/// Media storage operation.
pub use common::Handler as Media;

/// Uploaded file to be persisted.
#[derive(Clone, Debug)]
pub struct Upload {
    /// Original file name of the upload, possibly empty.
    ///
    /// HTML forms submit an empty part for file inputs left blank; such
    /// uploads are skipped instead of being stored.
    pub file_name: String,

    /// Raw bytes of the upload.
    pub bytes: Vec<u8>,

    /// [`Kind`] of the upload.
    pub kind: Kind,
}

/// Kind of a persisted media file, naming the subdirectory (and public URL
/// segment) it's stored under.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    /// Property images and floor plans.
    Images,

    /// Property video files.
    Videos,
}

/// [`Media`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "fs")]
    /// [`FsMedia`] error.
    Fs(fs::Error),
}
