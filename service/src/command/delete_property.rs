//! [`Command`] for deleting a [`Property`].

use common::operations::{Load, Remove, Save};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{property, Property},
    infra::{media, store, Media, Store},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Property`] and its stored media files.
#[derive(Clone, Copy, Debug)]
pub struct DeleteProperty {
    /// ID of the [`Property`] to delete.
    pub id: property::Id,
}

/// Outcome of a successful [`DeleteProperty`] execution.
#[derive(Clone, Debug)]
pub struct Deleted {
    /// The removed [`Property`].
    pub property: Property,

    /// [`MediaUrl`]s whose backing files could not be removed.
    ///
    /// Media cleanup is best-effort: the deletion itself succeeds
    /// regardless, and the failures are reported here instead of being
    /// silently dropped.
    ///
    /// [`MediaUrl`]: property::MediaUrl
    pub failed_cleanups: Vec<property::MediaUrl>,
}

impl<Db, Fs> Command<DeleteProperty> for Service<Db, Fs>
where
    Db: Store<Load<Property>, Ok = Vec<Property>, Err = Traced<store::Error>>
        + Store<Save<Vec<Property>>, Ok = (), Err = Traced<store::Error>>,
    Fs: Media<
        Remove<property::MediaUrl>,
        Ok = (),
        Err = Traced<media::Error>,
    >,
{
    type Ok = Deleted;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteProperty { id } = cmd;

        let mut properties = self
            .database()
            .execute(Load::new())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let index = properties
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| tracerr::new!(E::PropertyNotExists(id)))?;
        let property = properties.remove(index);

        let mut failed_cleanups = Vec::new();
        for url in property.media_urls().cloned().collect::<Vec<_>>() {
            if let Err(e) = self.media().execute(Remove(url.clone())).await {
                log::warn!("cannot remove `{url}`: {e}");
                failed_cleanups.push(url);
            }
        }

        self.database()
            .execute(Save(properties))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(Deleted {
            property,
            failed_cleanups,
        })
    }
}

/// Error of [`DeleteProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),
}
