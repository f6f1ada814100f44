//! Inventory [`Movement`] pages.
//!
//! [`Movement`]: service::domain::Movement

use futures::TryFutureExt as _;
use service::{
    api::inventory,
    command::{BackendCommand, CreateInventoryMovement},
    domain::inventory::New,
    navigation::Route,
    query::{self, BackendQuery},
    read::inventory::list::Filter,
    Command as _,
};

use crate::{
    args::{self, Browse},
    AsError, Context, Error,
};

use super::{browse, render_listing, table::Table};

/// Shows the provided inventory page.
pub(super) async fn show(
    ctx: &Context,
    page: args::Inventory,
) -> Result<String, Error> {
    _ = ctx.enter(Route::Inventory)?;

    match page {
        args::Inventory::List {
            browse: Browse { search, pages, retry },
            product,
        } => {
            let filter = Filter {
                product_id: product,
                search,
            };
            let listing = browse(ctx, filter, pages, retry, |s| {
                let list: query::inventory::List =
                    BackendQuery(inventory::List(s));
                ctx.service().execute(list).map_err(AsError::into_error)
            })
            .await?;

            let mut table = Table::new([
                "Date", "Product", "Type", "Quantity", "Change", "Description",
            ]);
            for m in listing.items() {
                table.row([
                    m.created_at.to_string(),
                    m.product.name.to_string(),
                    m.kind.to_string(),
                    m.quantity.to_string(),
                    format!("{:+}", m.kind.delta(m.quantity)),
                    m.description.clone().unwrap_or_default(),
                ]);
            }
            Ok(render_listing(&listing, table))
        }
        args::Inventory::Add {
            product,
            kind,
            quantity,
            description,
        } => {
            let create: CreateInventoryMovement =
                BackendCommand(inventory::Create(New {
                    product_id: product,
                    kind,
                    quantity,
                    description,
                }));
            let movement = ctx
                .service()
                .execute(create)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(format!(
                "Registered {} of {} unit(s) of `{}`.\n",
                movement.kind, movement.quantity, movement.product.name,
            ))
        }
    }
}
