//! Filesystem-backed [`Media`] storage.

use std::{
    ffi::OsStr,
    io,
    path::{Component, Path, PathBuf},
};

use common::operations::{Persist, Remove};
use derive_more::{Display, Error as StdError, From};
use tokio::fs;
use tracerr::Traced;
use tracing as log;
use uuid::Uuid;

use crate::domain::property::MediaUrl;

use super::{Kind, Media, Upload};

/// Route under which the uploads directory is publicly served.
const PUBLIC_BASE: &str = "/static/uploads";

/// [`FsMedia`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory the uploaded files are kept in.
    pub dir: PathBuf,
}

/// [`Media`] storage writing uploads under a local directory tree served
/// at [`PUBLIC_BASE`].
#[derive(Clone, Debug)]
pub struct FsMedia {
    /// Directory the uploaded files are kept in.
    dir: PathBuf,
}

impl FsMedia {
    /// Creates a new [`FsMedia`] storage, making sure its directory tree
    /// exists.
    ///
    /// # Errors
    ///
    /// Errors if the directories cannot be created.
    pub fn new(config: &Config) -> Result<Self, Traced<Error>> {
        for kind in [Kind::Images, Kind::Videos] {
            std::fs::create_dir_all(config.dir.join(kind.to_string()))
                .map_err(|e| tracerr::new!(Error::Io(e)))?;
        }
        Ok(Self {
            dir: config.dir.clone(),
        })
    }

    /// Maps a public [`MediaUrl`] back to the on-disk path it serves.
    ///
    /// [`None`] is returned for URLs outside [`PUBLIC_BASE`] or attempting
    /// to step outside the uploads tree.
    fn resolve(&self, url: &MediaUrl) -> Option<PathBuf> {
        let url: &str = url.as_ref();
        let rel = Path::new(
            url.strip_prefix(PUBLIC_BASE)?.strip_prefix('/')?,
        );
        rel.components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.dir.join(rel))
    }
}

impl Media<Persist<Upload>> for FsMedia {
    type Ok = Option<MediaUrl>;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Persist(upload): Persist<Upload>,
    ) -> Result<Self::Ok, Self::Err> {
        if upload.file_name.is_empty() {
            return Ok(None);
        }

        let ext = Path::new(&upload.file_name)
            .extension()
            .and_then(OsStr::to_str)
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let name = format!("{}{ext}", Uuid::new_v4());

        fs::write(
            self.dir.join(upload.kind.to_string()).join(&name),
            &upload.bytes,
        )
        .await
        .map_err(|e| tracerr::new!(super::Error::from(Error::Io(e))))?;

        #[expect(unsafe_code, reason = "generated URL matches the format")]
        let url = unsafe {
            MediaUrl::new_unchecked(format!(
                "{PUBLIC_BASE}/{}/{name}",
                upload.kind,
            ))
        };
        Ok(Some(url))
    }
}

impl Media<Remove<MediaUrl>> for FsMedia {
    type Ok = ();
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Remove(url): Remove<MediaUrl>,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(path) = self.resolve(&url) else {
            log::warn!("`{url}` doesn't point into the uploads tree");
            return Ok(());
        };
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // A file already gone is as removed as it gets.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(tracerr::new!(super::Error::from(Error::Io(e))))
            }
        }
    }
}

/// [`FsMedia`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Filesystem failure.
    #[display("filesystem operation failed: {_0}")]
    Io(io::Error),
}

#[cfg(test)]
mod spec {
    use common::operations::{Persist, Remove};

    use crate::{domain::property::MediaUrl, infra::Media as _};

    use super::{Config, FsMedia, Kind, Upload};

    fn media(dir: &std::path::Path) -> FsMedia {
        FsMedia::new(&Config {
            dir: dir.to_owned(),
        })
        .unwrap()
    }

    fn upload(file_name: &str) -> Upload {
        Upload {
            file_name: file_name.to_owned(),
            bytes: vec![1, 2, 3],
            kind: Kind::Images,
        }
    }

    #[tokio::test]
    async fn persists_under_generated_name_keeping_extension() {
        let dir = tempfile::tempdir().unwrap();
        let media = media(dir.path());

        let url = media
            .execute(Persist(upload("facade.jpg")))
            .await
            .unwrap()
            .unwrap();

        let url_str: &str = url.as_ref();
        assert!(url_str.starts_with("/static/uploads/images/"));
        assert!(url_str.ends_with(".jpg"));
        assert!(!url_str.contains("facade"), "original name is discarded");

        let name = url_str.rsplit('/').next().unwrap();
        let stored =
            std::fs::read(dir.path().join("images").join(name)).unwrap();
        assert_eq!(stored, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn empty_file_name_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let media = media(dir.path());
        assert!(media
            .execute(Persist(upload("")))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn removes_persisted_file() {
        let dir = tempfile::tempdir().unwrap();
        let media = media(dir.path());

        let url = media
            .execute(Persist(upload("plan.png")))
            .await
            .unwrap()
            .unwrap();
        media.execute(Remove(url.clone())).await.unwrap();

        let url_str: &str = url.as_ref();
        let name = url_str.rsplit('/').next().unwrap();
        assert!(!dir.path().join("images").join(name).exists());
    }

    #[tokio::test]
    async fn removing_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let media = media(dir.path());
        let url =
            MediaUrl::new("/static/uploads/images/gone.jpg").unwrap();
        media.execute(Remove(url)).await.unwrap();
    }

    #[tokio::test]
    async fn refuses_to_step_outside_uploads_tree() {
        let dir = tempfile::tempdir().unwrap();
        let media = media(dir.path());
        let outside = dir.path().join("secret.txt");
        std::fs::write(&outside, b"keep me").unwrap();

        let url = MediaUrl::new("/static/uploads/images/../secret.txt")
            .unwrap();
        media.execute(Remove(url)).await.unwrap();
        assert!(outside.exists());

        let foreign = MediaUrl::new("/static/other/file.jpg").unwrap();
        media.execute(Remove(foreign)).await.unwrap();
    }
}
