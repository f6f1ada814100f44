//! [`Client`] pages.

use futures::TryFutureExt as _;
use service::{
    api::clients,
    command::{BackendCommand, CreateClient, DeleteClient, UpdateClient},
    domain::Client,
    navigation::Route,
    query::{self, BackendQuery},
    read::client::list::Filter,
    Command as _,
};

use crate::{
    args::{self, Browse},
    AsError, Context, Error,
};

use super::{browse, render_listing, table::Table};

/// Shows the provided [`Client`] page.
pub(super) async fn show(
    ctx: &Context,
    page: args::Clients,
) -> Result<String, Error> {
    match page {
        args::Clients::List(Browse { search, pages, retry }) => {
            _ = ctx.enter(Route::Clients)?;
            let listing = browse(ctx, Filter { search }, pages, retry, |s| {
                let list: query::clients::List = BackendQuery(clients::List(s));
                ctx.service().execute(list).map_err(AsError::into_error)
            })
            .await?;

            let mut table = Table::new(["ID", "Name", "Document", "Phone"]);
            for c in listing.items() {
                table.row([
                    c.id.to_string(),
                    c.name.to_string(),
                    format!("{} {}", c.document.kind(), c.document),
                    c.phone.to_string(),
                ]);
            }
            Ok(render_listing(&listing, table))
        }
        args::Clients::Show { id } => {
            _ = ctx.enter(Route::Client(id.clone()))?;
            let get: query::clients::Get = BackendQuery(clients::Get(id));
            let client = ctx
                .service()
                .execute(get)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(describe(&client))
        }
        args::Clients::Create(input) => {
            _ = ctx.enter(Route::Clients)?;
            let create: CreateClient = BackendCommand(clients::Create(input.into()));
            let client = ctx
                .service()
                .execute(create)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(format!("Client registered.\n{}", describe(&client)))
        }
        args::Clients::Update { id, input } => {
            _ = ctx.enter(Route::Client(id.clone()))?;
            let update: UpdateClient = BackendCommand(clients::Update {
                id,
                input: input.into(),
            });
            let client = ctx
                .service()
                .execute(update)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(format!("Client updated.\n{}", describe(&client)))
        }
        args::Clients::Delete { id } => {
            _ = ctx.enter(Route::Client(id.clone()))?;
            let delete: DeleteClient = BackendCommand(clients::Delete(id.clone()));
            ctx.service()
                .execute(delete)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            ctx.service().navigator().redirect(Route::Clients);
            Ok(format!("Client `{id}` removed.\n"))
        }
    }
}

/// Describes the provided [`Client`] in detail.
fn describe(client: &Client) -> String {
    let mut table = Table::new(["Field", "Value"]);
    table.row(["ID".to_owned(), client.id.to_string()]);
    table.row(["Name".to_owned(), client.name.to_string()]);
    table.row([
        "Document".to_owned(),
        format!("{} {}", client.document.kind(), client.document),
    ]);
    table.row(["Phone".to_owned(), client.phone.to_string()]);
    table.row([
        "Address".to_owned(),
        client.address.clone().unwrap_or_else(|| "-".to_owned()),
    ]);
    table.row([
        "Email".to_owned(),
        client
            .email
            .as_ref()
            .map_or_else(|| "-".to_owned(), ToString::to_string),
    ]);
    table.row(["Registered".to_owned(), client.created_at.to_string()]);
    table.to_string()
}
