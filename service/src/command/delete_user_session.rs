//! [`Command`] for deleting the current [`Session`].

use std::convert::Infallible;

use tracing as log;

#[cfg(doc)]
use crate::session::Session;
use crate::{navigation::Route, Service};

use super::{log_persistence_failure, Command};

/// [`Command`] for deleting the current [`Session`] and leading to
/// [`Route::Login`].
///
/// Deleting an absent [`Session`] is a no-op.
#[derive(Clone, Copy, Debug)]
pub struct DeleteUserSession;

impl<B> Command<DeleteUserSession> for Service<B> {
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        _: DeleteUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        if let Some(user) = self.session().user() {
            log::info!("`User(id: {})` signed out", user.id);
        }

        log_persistence_failure(self.session().clear());
        self.cache().clear();
        self.navigator().redirect(Route::Login);

        Ok(())
    }
}
