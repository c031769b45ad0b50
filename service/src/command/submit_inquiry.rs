//! [`Command`] for submitting a new [`Inquiry`].

use common::{
    operations::{Load, Save},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{inquiry, Inquiry},
    infra::{store, Store},
    Service,
};

use super::Command;

/// [`Command`] for recording a client-submitted [`Inquiry`].
#[derive(Clone, Debug)]
pub struct SubmitInquiry {
    /// Submitted [`Payload`].
    ///
    /// [`Payload`]: inquiry::Payload
    pub payload: inquiry::Payload,
}

impl<Db, Fs> Command<SubmitInquiry> for Service<Db, Fs>
where
    Db: Store<Load<Inquiry>, Ok = Vec<Inquiry>, Err = Traced<store::Error>>
        + Store<Save<Vec<Inquiry>>, Ok = (), Err = Traced<store::Error>>,
{
    type Ok = Inquiry;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitInquiry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitInquiry { payload } = cmd;

        let mut inquiries = self
            .database()
            .execute(Load::new())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let inquiry = Inquiry {
            id: inquiry::Id::new(),
            kind: payload.kind(),
            created_at: DateTime::now_local().coerce(),
            data: payload,
        };

        inquiries.push(inquiry.clone());
        self.database()
            .execute(Save(inquiries))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(inquiry)
    }
}

/// Error of [`SubmitInquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Store`] error.
    #[display("`Store` operation failed: {_0}")]
    Store(store::Error),
}
