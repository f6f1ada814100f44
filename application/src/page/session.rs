//! Sign-in related pages.

use futures::TryFutureExt as _;
use secrecy::SecretBox;
use service::{
    api::sessions,
    command::{create_user_session, CreateUserSession, DeleteUserSession},
    domain::{contact::Email, user::Password, User},
    navigation::Route,
    query::{self, Uncached},
    Command as _,
};

use crate::{define_error, AsError, Context, Error};

/// Signs in and shows the signed in [`User`].
pub(super) async fn login(
    ctx: &Context,
    email: Email,
    password: Password,
) -> Result<String, Error> {
    let user = ctx
        .service()
        .execute(CreateUserSession {
            email,
            password: SecretBox::new(Box::new(password)),
        })
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .await?;

    Ok(format!("Signed in as {}.\n", describe(&user)))
}

/// Signs out.
pub(super) async fn logout(ctx: &Context) -> String {
    match ctx.service().execute(DeleteUserSession).await {
        Ok(()) => "Signed out.\n".into(),
        Err(never) => match never {},
    }
}

/// Shows the signed in [`User`], as the backend knows them now.
pub(super) async fn me(ctx: &Context) -> Result<String, Error> {
    _ = ctx.enter(Route::Home)?;

    let me: query::users::Me = Uncached(sessions::Me);
    let user = ctx
        .service()
        .execute(me)
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .await?;

    let expiry = ctx
        .service()
        .session()
        .token()
        .and_then(|t| t.expires_at())
        .map_or_else(
            || "without expiration".to_owned(),
            |at| format!("until {at}"),
        );
    Ok(format!("{}, signed in {expiry}.\n", describe(&user)))
}

/// Describes the provided [`User`] in a single line.
fn describe(user: &User) -> String {
    format!("{} <{}> ({})", user.name, user.email, user.role)
}

impl AsError for create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[kind = Auth]
                #[message = "Provided credentials do not match any user"]
                WrongCredentials,
            }
        }

        if self.is_wrong_credentials() {
            return Some(Error::WrongCredentials.into());
        }
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}
