//! [`Command`] definition.

pub mod create_user_session;
pub mod delete_user_session;
pub mod submit_sale;

use common::operations::Perform;
use tracerr::Traced;
use tracing as log;

use crate::{
    api::{clients, inventory, invite_codes, products, users, Endpoint},
    infra::{gateway, Backend},
    session::storage,
    Service,
};

/// [`Command`] of the [`Service`].
pub use common::Handler as Command;

pub use self::{
    create_user_session::CreateUserSession,
    delete_user_session::DeleteUserSession, submit_sale::SubmitSale,
};

/// [`Command`] performing a mutating [`Endpoint`] call.
///
/// Once succeeded, the cached queries of every resource listed in
/// [`Endpoint::INVALIDATES`] are dropped.
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct BackendCommand<E>(pub E);

impl<B, E> Command<BackendCommand<E>> for Service<B>
where
    B: Backend<Perform<E>, Ok = E::Output, Err = Traced<gateway::Error>>,
    E: Endpoint,
{
    type Ok = E::Output;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        BackendCommand(endpoint): BackendCommand<E>,
    ) -> Result<Self::Ok, Self::Err> {
        let out = self
            .backend()
            .execute(Perform(endpoint))
            .await
            .map_err(tracerr::wrap!())?;

        log::info!("`{} {}` succeeded", E::METHOD, E::RESOURCE);
        for resource in E::INVALIDATES {
            _ = self.cache().invalidate(resource);
        }

        Ok(out)
    }
}

/// Registers a new [`Client`].
///
/// [`Client`]: crate::domain::Client
pub type CreateClient = BackendCommand<clients::Create>;

/// Replaces the data of a [`Client`].
///
/// [`Client`]: crate::domain::Client
pub type UpdateClient = BackendCommand<clients::Update>;

/// Removes a [`Client`].
///
/// [`Client`]: crate::domain::Client
pub type DeleteClient = BackendCommand<clients::Delete>;

/// Registers a new [`Product`].
///
/// [`Product`]: crate::domain::Product
pub type CreateProduct = BackendCommand<products::Create>;

/// Replaces the data of a [`Product`].
///
/// [`Product`]: crate::domain::Product
pub type UpdateProduct = BackendCommand<products::Update>;

/// Removes a [`Product`].
///
/// [`Product`]: crate::domain::Product
pub type DeleteProduct = BackendCommand<products::Delete>;

/// Registers a new [`User`].
///
/// [`User`]: crate::domain::User
pub type CreateUser = BackendCommand<users::Create>;

/// Partially updates a [`User`].
///
/// [`User`]: crate::domain::User
pub type UpdateUser = BackendCommand<users::Update>;

/// Registers a new inventory [`Movement`].
///
/// [`Movement`]: crate::domain::Movement
pub type CreateInventoryMovement = BackendCommand<inventory::Create>;

/// Issues a new [`InviteCode`].
///
/// [`InviteCode`]: crate::domain::InviteCode
pub type CreateInviteCode = BackendCommand<invite_codes::Create>;

/// Logs the failure of persisting a [`Session`] change.
///
/// The in-memory [`Session`] is already changed, so the failure only affects
/// the next launch.
///
/// [`Session`]: crate::session::Session
fn log_persistence_failure(result: Result<(), Traced<storage::Error>>) {
    if let Err(e) = result {
        log::warn!("failed to persist `Session`: {e}");
    }
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use common::Handler as _;
    use http::StatusCode;

    use crate::{
        api::{clients, Endpoint as _},
        domain::client,
        query::{self, BackendQuery},
        testing::{client_json, service, Scripted},
    };

    use super::{BackendCommand, DeleteClient};

    #[tokio::test]
    async fn mutation_invalidates_cached_queries() {
        let transport = Arc::new(Scripted::default());
        for _ in 0..3 {
            transport.respond(StatusCode::OK, &client_json("c1"));
        }
        let svc = service(&transport);

        let get: query::clients::Get = BackendQuery(clients::Get("c1".into()));
        _ = svc.execute(get.clone()).await.unwrap();
        _ = svc.execute(get.clone()).await.unwrap();
        assert_eq!(transport.requests().len(), 1);

        _ = svc
            .execute(BackendCommand(clients::Create(client::Input {
                name: "Rosa".parse().unwrap(),
                document: "20123456789".parse().unwrap(),
                address: None,
                phone: "987654321".parse().unwrap(),
                email: None,
            })))
            .await
            .unwrap();
        _ = svc.execute(get).await.unwrap();

        let reqs = transport.requests();
        assert_eq!(reqs.len(), 3);
        assert_eq!(reqs[1].method, clients::Create::METHOD);
        assert_eq!(reqs[2].path, "/clients/c1");
    }

    #[tokio::test]
    async fn failed_mutation_keeps_cache() {
        let transport = Arc::new(Scripted::default());
        transport.respond(StatusCode::OK, &client_json("c1"));
        transport.respond(StatusCode::INTERNAL_SERVER_ERROR, &serde_json::json!({}));
        let svc = service(&transport);

        let get: query::clients::Get = BackendQuery(clients::Get("c1".into()));
        _ = svc.execute(get.clone()).await.unwrap();
        let delete: DeleteClient = BackendCommand(clients::Delete("c1".into()));
        assert!(svc.execute(delete).await.is_err());
        _ = svc.execute(get).await.unwrap();

        assert_eq!(transport.requests().len(), 2);
    }
}
