//! [`InviteCode`] page.
//!
//! [`InviteCode`]: service::domain::InviteCode

use common::DateTime;
use futures::TryFutureExt as _;
use service::{
    api::invite_codes,
    command::{BackendCommand, CreateInviteCode},
    navigation::Route,
    Command as _,
};

use crate::{AsError, Context, Error};

/// Issues a new [`InviteCode`] expiring at the provided [`DateTime`].
///
/// [`InviteCode`]: service::domain::InviteCode
pub(super) async fn create(
    ctx: &Context,
    expires_at: Option<DateTime>,
) -> Result<String, Error> {
    _ = ctx.enter(Route::Users)?;

    let create: CreateInviteCode = BackendCommand(invite_codes::Create {
        expires_at: expires_at.map(DateTime::coerce),
    });
    let invite = ctx
        .service()
        .execute(create)
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .await?;

    let expiry = invite
        .expires_at
        .map_or_else(|| "never expires".to_owned(), |at| format!("expires {at}"));
    Ok(format!("Invite code `{}` issued, {expiry}.\n", invite.code))
}
