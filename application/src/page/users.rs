//! [`User`] pages.
//!
//! [`User`]: service::domain::User

use futures::TryFutureExt as _;
use secrecy::SecretBox;
use service::{
    api::users,
    command::{BackendCommand, CreateUser, UpdateUser},
    domain::user,
    navigation::Route,
    query::{self, BackendQuery},
    read::user::list::Filter,
    Command as _,
};

use crate::{
    args::{self, Browse},
    define_error, AsError, Context, Error,
};

use super::{browse, render_listing, table::Table};

/// Shows the provided [`User`] page.
///
/// [`User`]: service::domain::User
pub(super) async fn show(
    ctx: &Context,
    page: args::Users,
) -> Result<String, Error> {
    define_error! {
        enum Error {
            #[code = "NOTHING_TO_UPDATE"]
            #[kind = Validation]
            #[message = "Provide at least one field to update"]
            NothingToUpdate,
        }
    }

    _ = ctx.enter(Route::Users)?;

    match page {
        args::Users::List(Browse { search, pages, retry }) => {
            let listing = browse(ctx, Filter { search }, pages, retry, |s| {
                let list: query::users::List = BackendQuery(users::List(s));
                ctx.service().execute(list).map_err(AsError::into_error)
            })
            .await?;

            let mut table = Table::new(["ID", "Name", "Email", "Role"]);
            for u in listing.items() {
                table.row([
                    u.id.to_string(),
                    u.name.to_string(),
                    u.email.to_string(),
                    u.role.to_string(),
                ]);
            }
            Ok(render_listing(&listing, table))
        }
        args::Users::Create {
            name,
            email,
            password,
            role,
        } => {
            let create: CreateUser = BackendCommand(users::Create(user::New {
                name,
                email,
                password: SecretBox::new(Box::new(password)),
                role,
            }));
            let user = ctx
                .service()
                .execute(create)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(format!("User `{}` registered as {}.\n", user.id, user.role))
        }
        args::Users::Update {
            id,
            name,
            email,
            password,
            role,
        } => {
            let patch = user::Patch {
                name,
                email,
                role,
                password: password.map(|p| SecretBox::new(Box::new(p))),
            };
            if patch.is_empty() {
                return Err((ctx.error())(Error::NothingToUpdate.into()));
            }

            let update: UpdateUser = BackendCommand(users::Update { id, patch });
            let user = ctx
                .service()
                .execute(update)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(format!("User `{}` updated.\n", user.id))
        }
    }
}
