//! [`Query`] related to a single [`Property`].

use common::operations::Load;
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{store, Store},
    Service,
};

use super::Query;

/// Queries a [`Property`] by its ID.
///
/// A linear scan over the loaded catalog; [`None`] means the ID is
/// unknown.
#[derive(Clone, Copy, Debug)]
pub struct ById(pub property::Id);

impl<Db, Fs> Query<ById> for Service<Db, Fs>
where
    Db: Store<Load<Property>, Ok = Vec<Property>, Err = Traced<store::Error>>,
{
    type Ok = Option<Property>;
    type Err = Traced<store::Error>;

    async fn execute(&self, ById(id): ById) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .database()
            .execute(Load::new())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .find(|p| p.id == id))
    }
}
