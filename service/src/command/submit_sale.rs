//! [`Command`] for registering a [`Sale`] out of an order [`Draft`].

use common::operations::Perform;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Sale;
use crate::{
    api::{sales, Endpoint as _},
    domain::sale,
    infra::{gateway, Backend},
    order::{Draft, ValidationError},
    Service,
};

use super::Command;

/// [`Command`] for registering a [`Sale`] out of an order [`Draft`].
///
/// The [`Draft`] is discarded once the [`Sale`] is registered, and kept as is
/// otherwise.
#[derive(Debug)]
pub struct SubmitSale<'d>(pub &'d mut Draft);

impl<B> Command<SubmitSale<'_>> for Service<B>
where
    B: Backend<
        Perform<sales::Create>,
        Ok = sale::Created,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = sale::Id;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SubmitSale(draft): SubmitSale<'_>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let new = draft.to_sale().map_err(tracerr::from_and_wrap!(=> E))?;
        let total = new.total_amount;

        let sale::Created { id } = self
            .backend()
            .execute(Perform(sales::Create(new)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Sale(id: {id})` registered for {total}");
        draft.clear();
        for resource in sales::Create::INVALIDATES {
            _ = self.cache().invalidate(resource);
        }

        Ok(id)
    }
}

/// Error of [`SubmitSale`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Draft`] is not complete.
    #[display("{_0}")]
    Validation(ValidationError),

    /// [`Sale`] failed to be registered.
    #[display("Failed to register the sale: {_0}")]
    Submission(gateway::Error),
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use common::Handler as _;
    use http::StatusCode;

    use crate::{
        domain::Product,
        infra::transport,
        order::{Draft, ValidationError},
        testing::{product_json, service, Scripted},
    };

    use super::{ExecutionError, SubmitSale};

    fn draft() -> Draft {
        let product: Product =
            serde_json::from_value(product_json("p1", 150.0, 100.0, false))
                .unwrap();
        let mut draft = Draft::new();
        draft.set_client(Some("c1".into()));
        _ = draft.add_item(&product, 2, 1, None, None).unwrap();
        draft
    }

    #[tokio::test]
    async fn posts_validated_sale() {
        let transport = Arc::new(Scripted::default());
        transport.respond(StatusCode::CREATED, &serde_json::json!({"id": "s1"}));
        let svc = service(&transport);
        let mut draft = draft();

        let id = svc.execute(SubmitSale(&mut draft)).await.unwrap();

        assert_eq!(id.as_ref(), "s1");
        assert!(draft.items().is_empty());
        assert!(draft.client().is_none());
        let reqs = transport.requests();
        assert_eq!(reqs[0].path, "/sales");
        assert_eq!(
            reqs[0].body.as_ref().unwrap()["totalAmount"],
            serde_json::json!(200.0),
        );
    }

    #[tokio::test]
    async fn invalid_draft_is_not_sent() {
        let transport = Arc::new(Scripted::default());
        let svc = service(&transport);
        let mut draft = draft();
        draft.set_client(None);

        let err = svc.execute(SubmitSale(&mut draft)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Validation(ValidationError::ClientMissing),
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_submission_error() {
        let transport = Arc::new(Scripted::default());
        transport.fail(transport::Error::Unavailable("refused".into()));
        let svc = service(&transport);
        let mut draft = draft();

        let err = svc.execute(SubmitSale(&mut draft)).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Submission(_)));
        assert_eq!(draft.items().len(), 1);
        assert_eq!(transport.requests().len(), 1);
    }
}
