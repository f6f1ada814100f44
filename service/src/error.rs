//! Classification of the [`Service`] errors.
//!
//! [`Service`]: crate::Service

use derive_more::Display;
use http::StatusCode;
use tracerr::Traced;

use crate::{
    command::{create_user_session, submit_sale},
    infra::{gateway, transport},
    order,
};

/// Kind of failure, deciding how it's presented and recovered from.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Input is rejected, either locally or by the backend. Recovered by
    /// correcting the input.
    #[display("validation")]
    Validation,

    /// Backend cannot be reached or responded unexpectedly. Recovered by
    /// retrying.
    #[display("transport")]
    Transport,

    /// [`Session`] is absent or rejected. Recovered by signing in.
    ///
    /// [`Session`]: crate::session::Session
    #[display("auth")]
    Auth,

    /// Requested resource doesn't exist. Recovered by going back to the list.
    #[display("not found")]
    NotFound,
}

/// Error with a known [`Kind`].
pub trait Classify {
    /// Returns the [`Kind`] of this error.
    fn kind(&self) -> Kind;
}

impl<E: Classify> Classify for Traced<E> {
    fn kind(&self) -> Kind {
        self.as_ref().kind()
    }
}

impl Classify for transport::Error {
    fn kind(&self) -> Kind {
        Kind::Transport
    }
}

impl Classify for gateway::Error {
    fn kind(&self) -> Kind {
        match self {
            Self::Encode(_) => Kind::Validation,
            Self::Header(_) | Self::Unauthorized => Kind::Auth,
            Self::NotFound(_) => Kind::NotFound,
            Self::Transport(e) => e.kind(),
            Self::Decode(_) => Kind::Transport,
            Self::Status { status, .. } => match *status {
                StatusCode::FORBIDDEN => Kind::Auth,
                s if s.is_client_error() => Kind::Validation,
                _ => Kind::Transport,
            },
        }
    }
}

impl Classify for order::ValidationError {
    fn kind(&self) -> Kind {
        Kind::Validation
    }
}

impl Classify for create_user_session::ExecutionError {
    fn kind(&self) -> Kind {
        match self {
            Self::Backend(e) => e.kind(),
        }
    }
}

impl Classify for submit_sale::ExecutionError {
    fn kind(&self) -> Kind {
        match self {
            Self::Validation(e) => e.kind(),
            Self::Submission(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod spec {
    use http::StatusCode;

    use crate::{
        command::submit_sale,
        infra::{gateway, transport},
        order,
    };

    use super::{Classify as _, Kind};

    fn status(status: StatusCode) -> gateway::Error {
        gateway::Error::Status {
            status,
            message: None,
        }
    }

    #[test]
    fn classifies_gateway_errors() {
        assert_eq!(gateway::Error::Unauthorized.kind(), Kind::Auth);
        assert_eq!(
            gateway::Error::NotFound("/clients/c9".into()).kind(),
            Kind::NotFound,
        );
        assert_eq!(
            gateway::Error::Transport(transport::Error::Timeout).kind(),
            Kind::Transport,
        );
        assert_eq!(status(StatusCode::FORBIDDEN).kind(), Kind::Auth);
        assert_eq!(
            status(StatusCode::UNPROCESSABLE_ENTITY).kind(),
            Kind::Validation,
        );
        assert_eq!(status(StatusCode::BAD_GATEWAY).kind(), Kind::Transport);
    }

    #[test]
    fn classifies_through_wrappers() {
        let local = tracerr::new!(submit_sale::ExecutionError::from(
            order::ValidationError::ItemsEmpty,
        ));
        assert_eq!(local.kind(), Kind::Validation);

        let remote = submit_sale::ExecutionError::Submission(
            gateway::Error::Transport(transport::Error::Unavailable(
                "refused".into(),
            )),
        );
        assert_eq!(remote.kind(), Kind::Transport);
    }
}
