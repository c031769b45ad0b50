//! Whole-file JSON document [`Store`].

use std::{io, path::PathBuf};

use common::operations::{Load, Save};
use derive_more::{Display, Error as StdError, From};
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracerr::Traced;
use tracing as log;

use super::{Collection, Store};

/// [`JsonFiles`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory the JSON documents are kept in.
    pub dir: PathBuf,
}

/// [`Store`] keeping each [`Collection`] as a single pretty-printed JSON
/// document on disk.
///
/// Every [`Save`] overwrites the whole document in place, without locking
/// or an atomic rename: concurrent writers race, and the last one wins
/// silently.
#[derive(Clone, Debug)]
pub struct JsonFiles {
    /// Directory the JSON documents are kept in.
    dir: PathBuf,
}

impl JsonFiles {
    /// Creates a new [`JsonFiles`] store, making sure its directory exists.
    ///
    /// # Errors
    ///
    /// Errors if the directory cannot be created.
    pub fn new(config: &Config) -> Result<Self, Traced<Error>> {
        std::fs::create_dir_all(&config.dir)
            .map_err(|e| tracerr::new!(Error::Io(e)))?;
        Ok(Self {
            dir: config.dir.clone(),
        })
    }
}

impl<C> Store<Load<C>> for JsonFiles
where
    C: Collection + DeserializeOwned,
{
    type Ok = Vec<C>;
    type Err = Traced<super::Error>;

    async fn execute(&self, _: Load<C>) -> Result<Self::Ok, Self::Err> {
        let path = self.dir.join(C::FILE_NAME);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => {
                // An unreadable document is indistinguishable from "no data
                // yet" for callers; it's surfaced in logs only.
                log::warn!("cannot read `{}`: {e}", path.display());
                return Ok(Vec::new());
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                log::warn!(
                    "cannot parse `{}`, treating as empty: {e}",
                    path.display(),
                );
                Ok(Vec::new())
            }
        }
    }
}

impl<C> Store<Save<Vec<C>>> for JsonFiles
where
    C: Collection + Serialize,
{
    type Ok = ();
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Save(records): Save<Vec<C>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = self.dir.join(C::FILE_NAME);
        // `serde_json` leaves non-ASCII characters unescaped, matching the
        // legacy documents.
        let json = serde_json::to_vec_pretty(&records).map_err(|e| {
            tracerr::new!(super::Error::from(Error::Serialize(e)))
        })?;
        fs::write(&path, json)
            .await
            .map_err(|e| tracerr::new!(super::Error::from(Error::Io(e))))
    }
}

/// [`JsonFiles`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Filesystem failure.
    #[display("filesystem operation failed: {_0}")]
    Io(io::Error),

    /// Failed to serialize a [`Collection`].
    #[display("cannot serialize collection: {_0}")]
    Serialize(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use common::operations::{Load, Save};

    use crate::{
        domain::Property,
        infra::Store as _,
    };

    use super::{Config, JsonFiles};

    fn store(dir: &std::path::Path) -> JsonFiles {
        JsonFiles::new(&Config {
            dir: dir.to_owned(),
        })
        .unwrap()
    }

    fn property(id: i64, title: &str) -> Property {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "location": "Teruel",
            "price": "95.000 €",
            "type": "piso",
            "operation": "venta",
            "surface": 70,
            "bedrooms": 2,
            "bathrooms": 1,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn absent_document_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let loaded: Vec<Property> =
            store.execute(Load::new()).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn corrupted_document_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        std::fs::write(dir.path().join("properties.json"), b"{not json")
            .unwrap();
        let loaded: Vec<Property> =
            store.execute(Load::new()).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn saved_records_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store
            .execute(Save(vec![property(1, "Uno"), property(2, "Dos")]))
            .await
            .unwrap();
        let loaded: Vec<Property> =
            store.execute(Load::new()).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].id, 2.into());
    }

    #[tokio::test]
    async fn document_is_pretty_printed_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store
            .execute(Save(vec![property(1, "Ático en Alcañiz")]))
            .await
            .unwrap();
        let raw = std::fs::read_to_string(dir.path().join("properties.json"))
            .unwrap();
        assert!(raw.contains('\n'), "expected indented output");
        assert!(raw.contains("Ático en Alcañiz"), "expected raw UTF-8");
    }

    /// Two writers loading the same state and saving one after another end
    /// up with the second save only: the first one is silently discarded.
    /// This asserts the documented last-writer-wins limitation, not a
    /// guarantee.
    #[tokio::test]
    async fn concurrent_writers_lose_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        store.execute(Save(vec![property(1, "Original")])).await.unwrap();

        let mut first: Vec<Property> =
            store.execute(Load::new()).await.unwrap();
        let mut second: Vec<Property> =
            store.execute(Load::new()).await.unwrap();

        first[0] = property(1, "First writer");
        second[0] = property(1, "Second writer");

        store.execute(Save(first)).await.unwrap();
        store.execute(Save(second)).await.unwrap();

        let survived: Vec<Property> =
            store.execute(Load::new()).await.unwrap();
        assert_eq!(survived[0].title.to_string(), "Second writer");
    }
}
