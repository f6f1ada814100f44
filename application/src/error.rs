//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    error::Classify as _,
    infra::{gateway, transport},
    ErrorKind,
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[kind = $kind:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            kind: ::service::ErrorKind::$kind,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Notice shown to the user once a page fails.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`ErrorKind`] of this [`Error`].
    pub kind: ErrorKind,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] of the provided [`ErrorKind`] with a message
    /// known only at runtime.
    #[must_use]
    pub fn new(code: Code, kind: ErrorKind, msg: &impl ToString) -> Self {
        Self {
            code,
            kind,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self::new("INTERNAL_ERROR", ErrorKind::Transport, msg)
    }

    /// Returns the formatted backtrace of this [`Error`], if any.
    #[must_use]
    pub fn trace(&self) -> Option<String> {
        self.backtrace.as_ref().map(|trace| {
            trace
                .iter()
                .format_with("\n", |frame, f| f(&format_args!("{frame}")))
                .to_string()
        })
    }
}

/// Returns the `sysexits.h` status the process ends with after an [`Error`]
/// of the provided [`ErrorKind`].
#[must_use]
pub const fn exit_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Validation => 65,
        ErrorKind::NotFound => 66,
        ErrorKind::Transport => 69,
        ErrorKind::Auth => 77,
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            kind,
            backtrace: _,
            message,
        } = self;

        write!(f, "[{code}] {message} ({kind} error)")
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for transport::Error {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("BACKEND_UNAVAILABLE", self.kind(), self))
    }
}

impl AsError for gateway::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "SESSION_EXPIRED"]
                #[kind = Auth]
                #[message = "Session has expired, please sign in again"]
                SessionExpired,
            }
        }

        match self {
            Self::Transport(e) => e.try_as_error(),
            Self::Unauthorized => Some(Error::SessionExpired.into()),
            Self::NotFound(msg) => {
                Some(crate::Error::new("NOT_FOUND", self.kind(), msg))
            }
            Self::Status {
                message: Some(msg), ..
            } => Some(crate::Error::new("BACKEND_REJECTED", self.kind(), msg)),
            Self::Status { message: None, .. } => Some(crate::Error::new(
                "BACKEND_REJECTED",
                self.kind(),
                self,
            )),
            Self::Header(_) | Self::Encode(_) | Self::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        infra::{gateway, transport},
        ErrorKind,
    };

    use super::{exit_status, AsError as _};

    #[test]
    fn surfaces_backend_message() {
        let err = gateway::Error::Status {
            status: http::StatusCode::UNPROCESSABLE_ENTITY,
            message: Some("Document already taken".into()),
        }
        .into_error();

        assert_eq!(err.code, "BACKEND_REJECTED");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "[BACKEND_REJECTED] Document already taken (validation error)",
        );
    }

    #[test]
    fn keeps_trace_of_wrapped_errors() {
        let err = tracerr::new!(gateway::Error::Transport(
            transport::Error::Timeout,
        ))
        .into_error();

        assert_eq!(err.kind, ErrorKind::Transport);
        assert!(err.trace().is_some());
        assert_eq!(exit_status(err.kind), 69);
    }
}
