//! [`Query`] definition.

pub mod clients;
pub mod dashboard;
pub mod inventory;
pub mod products;
pub mod reports;
pub mod sales;
pub mod users;

use std::hash::Hash;

use common::operations::Perform;
use tracerr::Traced;

use crate::{
    api::Endpoint,
    cache::Key,
    infra::{gateway, Backend},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] performing an [`Endpoint`] call through the [`QueryCache`].
///
/// [`QueryCache`]: crate::cache::QueryCache
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct BackendQuery<E>(pub E);

impl<B, E> Query<BackendQuery<E>> for Service<B>
where
    B: Backend<Perform<E>, Ok = E::Output, Err = Traced<gateway::Error>>,
    E: Endpoint + Hash + 'static,
    E::Output: Clone + Send + Sync + 'static,
{
    type Ok = E::Output;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        BackendQuery(endpoint): BackendQuery<E>,
    ) -> Result<Self::Ok, Self::Err> {
        let key = Key::of(&endpoint);
        self.cache()
            .fetch(key, || self.backend().execute(Perform(endpoint)))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] performing an [`Endpoint`] call bypassing the [`QueryCache`].
///
/// [`QueryCache`]: crate::cache::QueryCache
#[derive(Clone, Copy, Debug)]
pub struct Uncached<E>(pub E);

impl<B, E> Query<Uncached<E>> for Service<B>
where
    B: Backend<Perform<E>, Ok = E::Output, Err = Traced<gateway::Error>>,
    E: Endpoint,
{
    type Ok = E::Output;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Uncached(endpoint): Uncached<E>,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(Perform(endpoint))
            .await
            .map_err(tracerr::wrap!())
    }
}
