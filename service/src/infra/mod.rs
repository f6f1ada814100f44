//! Infrastructure layer.

pub mod gateway;
#[cfg(feature = "http")]
pub mod http;
pub mod transport;

pub use self::{
    gateway::Gateway,
    transport::{Request, Response, Transport},
};
#[cfg(feature = "http")]
pub use self::http::Http;

/// Backend performing [`Endpoint`] calls.
///
/// [`Endpoint`]: crate::api::Endpoint
pub use common::Handler as Backend;
