//! Test helpers shared across modules.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use http::StatusCode;
use tracerr::Traced;

use crate::{
    infra::{transport, Gateway, Request, Response},
    navigation::{Navigator, Route},
    session::{storage::Memory, Store, Token},
    Config, Service,
};

/// [`Service`] over a [`Scripted`] transport with an empty [`Session`],
/// showing [`Route::Login`].
///
/// [`Session`]: crate::session::Session
pub(crate) fn service(
    transport: &Arc<Scripted>,
) -> Service<Gateway<Arc<Scripted>>> {
    let session = Store::restore(Memory::default());
    let navigator = Navigator::new(Route::Login);
    Service::new(
        Config::default(),
        Gateway::new(Arc::clone(transport), session.clone(), navigator.clone()),
        session,
        navigator,
    )
}

/// Unsigned JWT with the provided `exp` claim.
pub(crate) fn jwt(exp: i64) -> Token {
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[derive(serde::Serialize)]
    struct Claims {
        sub: &'static str,
        exp: i64,
    }

    Token::new(
        encode(
            &Header::default(),
            &Claims { sub: "u1", exp },
            &EncodingKey::from_secret(b"whatever"),
        )
        .unwrap(),
    )
    .unwrap()
}

/// JSON of a user as the backend returns it.
pub(crate) fn user_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "Ana Torres",
        "email": "ana@gas.pe",
        "role": "ADMIN",
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z",
    })
}

/// JSON of a client as the backend returns it.
pub(crate) fn client_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Client {id}"),
        "document": "12345678",
        "phone": "987654321",
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z",
    })
}

/// JSON of a product as the backend returns it.
pub(crate) fn product_json(
    id: &str,
    base_price: f64,
    empty_cylinder_price: f64,
    negotiable: bool,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Balón {id}"),
        "basePrice": base_price,
        "emptyCylinderPrice": empty_cylinder_price,
        "allowPriceNegotiation": negotiable,
        "allowCylinderNegotiation": negotiable,
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z",
    })
}

/// [`Transport`] replaying scripted [`Response`]s in order and recording
/// the received [`Request`]s.
///
/// [`Transport`]: crate::infra::Transport
#[derive(Debug, Default)]
pub(crate) struct Scripted {
    /// Outcomes to replay.
    outcomes: Mutex<VecDeque<Result<Response, transport::Error>>>,

    /// Received [`Request`]s.
    requests: Mutex<Vec<Request>>,

    /// Delay of every [`Response`].
    latency: Mutex<Option<Duration>>,
}

impl Scripted {
    /// Schedules a JSON [`Response`].
    pub(crate) fn respond(&self, status: StatusCode, body: &serde_json::Value) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(Response {
                status,
                body: serde_json::to_vec(body).unwrap(),
            }));
    }

    /// Schedules a [`transport::Error`].
    pub(crate) fn fail(&self, err: transport::Error) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(err));
    }

    /// Delays every following [`Response`] by the provided [`Duration`].
    pub(crate) fn delay(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(latency);
    }

    /// Returns the received [`Request`]s.
    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl common::Handler<Request> for Scripted {
    type Ok = Response;
    type Err = Traced<transport::Error>;

    async fn execute(&self, req: Request) -> Result<Self::Ok, Self::Err> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req.clone());
        let latency =
            *self.latency.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {req:?}"))
            .map_err(tracerr::wrap!())
    }
}
