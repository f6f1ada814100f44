//! [`Context`]-related definitions.

use std::cell::Cell;

use service::{navigation::Route, ErrorKind};
use tracing as log;

use crate::{define_error, Error, Service};

/// Application context of a single page.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// [`ErrorKind`] of the last reported [`Error`].
    failure: Cell<Option<ErrorKind>>,
}

impl Context {
    /// Creates a new [`Context`] over the provided [`Service`].
    #[must_use]
    pub const fn new(service: Service) -> Self {
        Self {
            service,
            failure: Cell::new(None),
        }
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub const fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the [`ErrorKind`] of the last reported [`Error`], if any.
    #[must_use]
    pub fn failure(&self) -> Option<ErrorKind> {
        self.failure.get()
    }

    /// Returns a function reporting an [`Error`] of this [`Context`].
    ///
    /// A [`ErrorKind::NotFound`] leads back to the list owning the current
    /// [`Route`].
    pub fn error(&self) -> impl Fn(Error) -> Error + '_ {
        |err| {
            self.failure.set(Some(err.kind));
            if err.kind == ErrorKind::NotFound {
                self.service.navigator().not_found();
            }
            err
        }
    }

    /// Opens the provided [`Route`], if the current session allows it.
    ///
    /// # Errors
    ///
    /// If the [`Route`] requires signing in.
    pub fn enter(&self, route: Route) -> Result<Route, Error> {
        define_error! {
            enum Error {
                #[code = "SIGN_IN_REQUIRED"]
                #[kind = Auth]
                #[message = "Sign in to open this page"]
                SignInRequired,
            }
        }

        let shown = self
            .service
            .navigator()
            .navigate(route.clone(), &self.service.session().get());
        log::debug!("requested `{route}`, showing `{shown}`");

        if shown == Route::Login && !route.is_public() {
            return Err((self.error())(Error::SignInRequired.into()));
        }
        Ok(shown)
    }
}
