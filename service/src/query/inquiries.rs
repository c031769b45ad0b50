//! [`Query`] related to [`Inquiry`] records.

use common::operations::Load;
use tracerr::Traced;

use crate::{
    domain::Inquiry,
    infra::{store, Store},
    Service,
};

use super::Query;

/// Queries all the recorded [`Inquiry`] submissions.
#[derive(Clone, Copy, Debug, Default)]
pub struct List;

impl<Db, Fs> Query<List> for Service<Db, Fs>
where
    Db: Store<Load<Inquiry>, Ok = Vec<Inquiry>, Err = Traced<store::Error>>,
{
    type Ok = Vec<Inquiry>;
    type Err = Traced<store::Error>;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Load::new())
            .await
            .map_err(tracerr::wrap!())
    }
}
