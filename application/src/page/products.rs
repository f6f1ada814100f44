//! [`Product`] pages.

use futures::TryFutureExt as _;
use service::{
    api::products,
    command::{BackendCommand, CreateProduct, DeleteProduct, UpdateProduct},
    domain::Product,
    navigation::Route,
    query::{self, BackendQuery},
    read::product::list::Filter,
    Command as _,
};

use crate::{
    args::{self, Browse},
    AsError, Context, Error,
};

use super::{browse, render_listing, table::Table};

/// Shows the provided [`Product`] page.
pub(super) async fn show(
    ctx: &Context,
    page: args::Products,
) -> Result<String, Error> {
    match page {
        args::Products::List(Browse { search, pages, retry }) => {
            _ = ctx.enter(Route::Products)?;
            let listing = browse(ctx, Filter { search }, pages, retry, |s| {
                let list: query::products::List =
                    BackendQuery(products::List(s));
                ctx.service().execute(list).map_err(AsError::into_error)
            })
            .await?;

            let mut table =
                Table::new(["ID", "Name", "Price", "Empty cylinder", "Negotiable"]);
            for p in listing.items() {
                table.row([
                    p.id.to_string(),
                    p.name.to_string(),
                    p.base_price.to_string(),
                    p.empty_cylinder_price.to_string(),
                    negotiable(p).to_owned(),
                ]);
            }
            Ok(render_listing(&listing, table))
        }
        args::Products::Show { id } => {
            _ = ctx.enter(Route::Products)?;
            let get: query::products::Get = BackendQuery(products::Get(id));
            let product = ctx
                .service()
                .execute(get)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(describe(&product))
        }
        args::Products::Create(input) => {
            _ = ctx.enter(Route::Products)?;
            let create: CreateProduct =
                BackendCommand(products::Create(input.into()));
            let product = ctx
                .service()
                .execute(create)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(format!("Product registered.\n{}", describe(&product)))
        }
        args::Products::Update { id, input } => {
            _ = ctx.enter(Route::Products)?;
            let update: UpdateProduct = BackendCommand(products::Update {
                id,
                input: input.into(),
            });
            let product = ctx
                .service()
                .execute(update)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(format!("Product updated.\n{}", describe(&product)))
        }
        args::Products::Delete { id } => {
            _ = ctx.enter(Route::Products)?;
            let delete: DeleteProduct =
                BackendCommand(products::Delete(id.clone()));
            ctx.service()
                .execute(delete)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(format!("Product `{id}` removed.\n"))
        }
    }
}

/// Describes which prices of the provided [`Product`] may be negotiated.
fn negotiable(product: &Product) -> &'static str {
    match (
        product.allow_price_negotiation,
        product.allow_cylinder_negotiation,
    ) {
        (true, true) => "price, cylinder",
        (true, false) => "price",
        (false, true) => "cylinder",
        (false, false) => "-",
    }
}

/// Describes the provided [`Product`] in detail.
fn describe(product: &Product) -> String {
    let mut table = Table::new(["Field", "Value"]);
    table.row(["ID".to_owned(), product.id.to_string()]);
    table.row(["Name".to_owned(), product.name.to_string()]);
    table.row(["Price".to_owned(), product.base_price.to_string()]);
    table.row([
        "Empty cylinder".to_owned(),
        product.empty_cylinder_price.to_string(),
    ]);
    table.row(["Negotiable".to_owned(), negotiable(product).to_owned()]);
    table.to_string()
}
