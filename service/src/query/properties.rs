//! [`Query`] related to multiple [`Property`]s.

use common::operations::Load;
use tracerr::Traced;

use crate::{
    domain::Property,
    infra::{store, Store},
    read,
    Service,
};

use super::Query;

/// Queries the [`Property`]s satisfying a [`Filter`], featured ones first.
///
/// [`Filter`]: read::property::list::Filter
#[derive(Clone, Debug, Default)]
pub struct List {
    /// [`Filter`] to apply.
    ///
    /// [`Filter`]: read::property::list::Filter
    pub filter: read::property::list::Filter,
}

impl<Db, Fs> Query<List> for Service<Db, Fs>
where
    Db: Store<Load<Property>, Ok = Vec<Property>, Err = Traced<store::Error>>,
{
    type Ok = Vec<Property>;
    type Err = Traced<store::Error>;

    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        let List { filter } = query;

        let mut properties = self
            .database()
            .execute(Load::new())
            .await
            .map_err(tracerr::wrap!())?;

        properties.retain(|p| filter.matches(p));
        // Stable sort: storage order is preserved within each group. This is
        // a display ordering only, nothing is written back.
        properties.sort_by_key(|p| !p.featured);

        Ok(properties)
    }
}
