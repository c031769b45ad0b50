//! [`Command`] for deleting an [`Inquiry`].

use common::operations::{Load, Save};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{inquiry, Inquiry},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for deleting all [`Inquiry`] records with the given ID.
///
/// An unknown ID is a no-op rather than an error.
#[derive(Clone, Debug)]
pub struct DeleteInquiry {
    /// ID of the [`Inquiry`] records to delete.
    pub id: inquiry::Id,
}

impl<Db, Fs> Command<DeleteInquiry> for Service<Db, Fs>
where
    Db: Store<Load<Inquiry>, Ok = Vec<Inquiry>, Err = Traced<store::Error>>
        + Store<Save<Vec<Inquiry>>, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteInquiry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteInquiry { id } = cmd;

        let mut inquiries = self
            .database()
            .execute(Load::new())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        inquiries.retain(|i| i.id != id);

        self.database()
            .execute(Save(inquiries))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteInquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),
}
