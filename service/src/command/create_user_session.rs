//! [`Command`] for creating a [`Session`].

use common::operations::Perform;
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::session::{Session, Token};
use crate::{
    api::sessions,
    domain::{contact::Email, user::Password, User},
    infra::{gateway, Backend},
    navigation::Route,
    Service,
};

use super::{log_persistence_failure, Command};

/// [`Command`] for creating a [`Session`] by [`User`] credentials.
///
/// The issued [`Token`] is stored before the [`User`] profile is requested,
/// so the profile request is already authenticated.
#[derive(Clone, Debug)]
pub struct CreateUserSession {
    /// [`Email`] of a [`User`].
    pub email: Email,

    /// [`Password`] of a [`User`].
    pub password: SecretBox<Password>,
}

impl<B> Command<CreateUserSession> for Service<B>
where
    B: Backend<
            Perform<sessions::Create>,
            Ok = sessions::Created,
            Err = Traced<gateway::Error>,
        > + Backend<Perform<sessions::Me>, Ok = User, Err = Traced<gateway::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUserSession { email, password } = cmd;
        let sessions::Created { token, user } = self
            .backend()
            .execute(Perform(sessions::Create { email, password }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.cache().clear();
        log_persistence_failure(self.session().set(user.clone(), token));

        let user = match user {
            Some(user) => user,
            None => {
                let user = self
                    .backend()
                    .execute(Perform(sessions::Me))
                    .await
                    .map_err(|e| {
                        log_persistence_failure(self.session().clear());
                        e
                    })
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                log_persistence_failure(self.session().set_user(user.clone()));
                user
            }
        };

        log::info!("`User(id: {})` signed in", user.id);
        _ = self
            .navigator()
            .navigate(Route::Home, &self.session().get());

        Ok(user)
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Backend call failed.
    #[display("{_0}")]
    Backend(gateway::Error),
}

impl ExecutionError {
    /// Indicates whether the credentials were rejected.
    #[must_use]
    pub const fn is_wrong_credentials(&self) -> bool {
        matches!(self, Self::Backend(gateway::Error::Unauthorized))
    }
}
