//! Auth [`Gateway`] to the REST API.

use common::{operations::Perform, Handler};
use derive_more::{Display, Error as StdError, From};
use http::{
    header::{InvalidHeaderValue, AUTHORIZATION},
    HeaderMap, HeaderValue, StatusCode,
};
use serde::Deserialize;
use tracerr::Traced;
use tracing as log;

use crate::{
    api::Endpoint,
    navigation::{Navigator, Route},
    session,
};

use super::{transport, Request, Response, Transport};

/// Gateway performing [`Endpoint`] calls over a [`Transport`] on behalf of
/// the current [`session::Session`].
///
/// Every call carries the bearer [`session::Token`] (if any). Once the
/// backend rejects it, the [`session::Store`] is cleared and the
/// [`Navigator`] is redirected to [`Route::Login`].
#[derive(Clone, Debug)]
pub struct Gateway<T> {
    /// [`Transport`] delivering the requests.
    transport: T,

    /// [`session::Store`] providing the bearer [`session::Token`].
    session: session::Store,

    /// [`Navigator`] to redirect on authorization failures.
    navigator: Navigator,
}

impl<T> Gateway<T> {
    /// Creates a new [`Gateway`] with the provided parameters.
    #[must_use]
    pub const fn new(
        transport: T,
        session: session::Store,
        navigator: Navigator,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
        }
    }

    /// Returns the [`session::Store`] of this [`Gateway`].
    #[must_use]
    pub const fn session(&self) -> &session::Store {
        &self.session
    }

    /// Returns the [`Navigator`] of this [`Gateway`].
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Forgets the rejected [`session::Session`] and leads to
    /// [`Route::Login`].
    fn sign_out(&self) {
        log::warn!("`Session` was rejected by the backend, signing out");
        if let Err(e) = self.session.clear() {
            log::error!("failed to remove persisted `Session`: {e}");
        }
        self.navigator.redirect(Route::Login);
    }
}

impl<T, E> Handler<Perform<E>> for Gateway<T>
where
    T: Transport<Request, Ok = Response, Err = Traced<transport::Error>>,
    E: Endpoint,
{
    type Ok = E::Output;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Perform(endpoint): Perform<E>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.session.token() {
            let value =
                HeaderValue::try_from(format!("Bearer {}", token.as_ref()))
                    .map_err(tracerr::from_and_wrap!(=> Error))?;
            _ = headers.insert(AUTHORIZATION, value);
        }

        let req = Request {
            method: E::METHOD,
            path: endpoint.path(),
            query: endpoint.query(),
            headers,
            body: endpoint
                .body()
                .map_err(Error::Encode)
                .map_err(tracerr::wrap!())?,
        };
        let path = req.path.clone();

        let Response { status, body } = self
            .transport
            .execute(req)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;

        if status.is_success() {
            return endpoint
                .decode(body)
                .map_err(Error::Decode)
                .map_err(tracerr::wrap!());
        }

        log::debug!("`{path}` responded with `{status}`");

        Err(tracerr::new!(match status {
            StatusCode::UNAUTHORIZED => {
                self.sign_out();
                Error::Unauthorized
            }
            StatusCode::NOT_FOUND => {
                Error::NotFound(message(&body).unwrap_or(path))
            }
            _ => Error::Status {
                status,
                message: message(&body),
            },
        }))
    }
}

/// Extracts the `{"message": "..."}` of an error response body.
fn message(body: &[u8]) -> Option<String> {
    /// Error response body.
    #[derive(Deserialize)]
    struct Body {
        /// Human-readable error message.
        message: String,
    }

    serde_json::from_slice::<Body>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// [`Gateway`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`session::Token`] cannot be put into a header.
    #[display("Invalid `Authorization` header: {_0}")]
    Header(InvalidHeaderValue),

    /// [`Endpoint`] body cannot be serialized.
    #[display("Failed to encode request body: {_0}")]
    #[from(ignore)]
    Encode(serde_json::Error),

    /// [`Transport`] failed.
    #[display("{_0}")]
    Transport(transport::Error),

    /// Backend rejected the [`session::Session`].
    #[display("Session has expired, please sign in again")]
    Unauthorized,

    /// Requested resource doesn't exist.
    #[display("Not found: {_0}")]
    #[from(ignore)]
    NotFound(#[error(not(source))] String),

    /// Backend responded with an unexpected status.
    #[display(
        "Backend responded with `{status}`{}",
        message.as_ref().map(|m| format!(": {m}")).unwrap_or_default(),
    )]
    Status {
        /// [`StatusCode`] of the response.
        status: StatusCode,

        /// Message of the response, if any.
        message: Option<String>,
    },

    /// Response body doesn't match the [`Endpoint`] expectations.
    #[display("Failed to decode response body: {_0}")]
    #[from(ignore)]
    Decode(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use common::{operations::Perform, Handler as _};
    use http::StatusCode;

    use crate::{
        api::{clients, sessions},
        navigation::{Navigator, Route},
        session::{storage::Memory, Store, Token},
        testing::{client_json, Scripted},
    };

    use super::{Error, Gateway};

    fn gateway(transport: &Arc<Scripted>) -> Gateway<Arc<Scripted>> {
        Gateway::new(
            Arc::clone(transport),
            Store::restore(Memory::default()),
            Navigator::new(Route::Clients),
        )
    }

    #[tokio::test]
    async fn sends_bearer_token_when_present() {
        let transport = Arc::new(Scripted::default());
        transport.respond(StatusCode::OK, &client_json("c1"));
        transport.respond(StatusCode::OK, &client_json("c1"));
        let gw = gateway(&transport);

        _ = gw.execute(Perform(clients::Get("c1".into()))).await.unwrap();
        gw.session().set(None, Token::new("abc").unwrap()).unwrap();
        let client =
            gw.execute(Perform(clients::Get("c1".into()))).await.unwrap();

        assert_eq!(client.id.as_ref(), "c1");
        let reqs = transport.requests();
        assert_eq!(reqs[0].path, "/clients/c1");
        assert!(reqs[0].headers.get("authorization").is_none());
        assert_eq!(reqs[1].headers["authorization"], "Bearer abc");
    }

    #[tokio::test]
    async fn unauthorized_clears_session_and_redirects() {
        let transport = Arc::new(Scripted::default());
        transport.respond(StatusCode::UNAUTHORIZED, &serde_json::json!({}));
        let gw = gateway(&transport);
        gw.session().set(None, Token::new("abc").unwrap()).unwrap();
        let mut route = gw.navigator().subscribe();

        let err = gw.execute(Perform(sessions::Me)).await.unwrap_err();

        assert!(matches!(err.as_ref(), Error::Unauthorized));
        assert!(gw.session().token().is_none());
        assert!(gw.session().user().is_none());
        assert!(route.has_changed().unwrap());
        assert_eq!(*route.borrow_and_update(), Route::Login);
    }

    #[tokio::test]
    async fn surfaces_backend_messages() {
        let transport = Arc::new(Scripted::default());
        transport.respond(
            StatusCode::NOT_FOUND,
            &serde_json::json!({"message": "Client not found"}),
        );
        transport.respond(
            StatusCode::UNPROCESSABLE_ENTITY,
            &serde_json::json!({"message": "Document already taken"}),
        );
        transport.respond(StatusCode::BAD_GATEWAY, &serde_json::json!(null));
        let gw = gateway(&transport);

        let err = gw
            .execute(Perform(clients::Get("c9".into())))
            .await
            .unwrap_err();
        assert!(
            matches!(err.as_ref(), Error::NotFound(m) if m == "Client not found"),
        );

        let err = gw
            .execute(Perform(clients::Get("c9".into())))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_ref().to_string(),
            "Backend responded with `422 Unprocessable Entity`: \
             Document already taken",
        );

        let err = gw
            .execute(Perform(clients::Get("c9".into())))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            Error::Status { status, message: None }
                if *status == StatusCode::BAD_GATEWAY,
        ));
        assert_eq!(gw.navigator().current(), Route::Clients);
    }

    #[tokio::test]
    async fn propagates_transport_failures() {
        let transport = Arc::new(Scripted::default());
        transport.fail(crate::infra::transport::Error::Timeout);
        let gw = gateway(&transport);
        gw.session().set(None, Token::new("abc").unwrap()).unwrap();

        let err = gw.execute(Perform(sessions::Me)).await.unwrap_err();

        assert!(matches!(err.as_ref(), Error::Transport(_)));
        assert!(gw.session().token().is_some());
    }
}
