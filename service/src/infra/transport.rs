//! [`Transport`]-related definitions.

use derive_more::{Display, Error as StdError};

use crate::api::Params;

/// Transport delivering raw [`Request`]s to the backend.
pub use common::Handler as Transport;

/// Raw HTTP request to the backend.
#[derive(Clone, Debug)]
pub struct Request {
    /// HTTP method of this [`Request`].
    pub method: http::Method,

    /// Path of this [`Request`] relatively to the API base URL.
    pub path: String,

    /// Query-string parameters of this [`Request`].
    pub query: Params,

    /// Headers of this [`Request`].
    pub headers: http::HeaderMap,

    /// JSON body of this [`Request`], if any.
    pub body: Option<serde_json::Value>,
}

/// Raw HTTP response of the backend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    /// HTTP status of this [`Response`].
    pub status: http::StatusCode,

    /// Body of this [`Response`].
    pub body: Vec<u8>,
}

/// [`Transport`] error.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// Backend cannot be reached.
    #[display("Backend is unreachable: {_0}")]
    Unavailable(#[error(not(source))] String),

    /// Backend didn't respond in time.
    #[display("Backend did not respond in time")]
    Timeout,

    /// Any other failure of delivering a [`Request`].
    #[display("HTTP request failed: {_0}")]
    Failed(#[error(not(source))] String),
}
