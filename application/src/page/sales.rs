//! [`Sale`] pages.

use futures::TryFutureExt as _;
use service::{
    api::{products, sales},
    command::{submit_sale, SubmitSale},
    domain::Sale,
    error::Classify as _,
    navigation::Route,
    order::{self, Draft},
    query::{self, BackendQuery},
    read::sale::list::Filter,
    Command as _,
};

use crate::{
    args::{self, Browse, Item},
    AsError, Context, Error,
};

use super::{browse, render_listing, table::Table};

/// Shows the provided [`Sale`] page.
pub(super) async fn show(
    ctx: &Context,
    page: args::Sales,
) -> Result<String, Error> {
    match page {
        args::Sales::List {
            browse: Browse { search, pages, retry },
            client,
        } => {
            _ = ctx.enter(Route::Sales)?;
            let filter = Filter {
                search,
                client_id: client,
            };
            let listing = browse(ctx, filter, pages, retry, |s| {
                let list: query::sales::List = BackendQuery(sales::List(s));
                ctx.service().execute(list).map_err(AsError::into_error)
            })
            .await?;

            let mut table = Table::new([
                "ID", "Code", "Client", "Total", "Payment", "Status", "Date",
            ]);
            for s in listing.items() {
                table.row([
                    s.id.to_string(),
                    s.code.to_string(),
                    s.client.name.to_string(),
                    s.total_amount.to_string(),
                    s.payment_method.to_string(),
                    s.status.to_string(),
                    s.created_at.date().to_string(),
                ]);
            }
            Ok(render_listing(&listing, table))
        }
        args::Sales::Show { id } => {
            _ = ctx.enter(Route::Sale(id.clone()))?;
            let get: query::sales::Get = BackendQuery(sales::Get(id));
            let sale = ctx
                .service()
                .execute(get)
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            Ok(describe(&sale))
        }
        args::Sales::New {
            client,
            payment,
            items,
        } => {
            _ = ctx.enter(Route::NewSale)?;

            let mut draft = Draft::new();
            draft.set_client(Some(client));
            draft.set_payment_method(payment);
            for item in items {
                add(ctx, &mut draft, item).await?;
            }
            let summary = summarize(&draft);

            let id = ctx
                .service()
                .execute(SubmitSale(&mut draft))
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .await?;
            ctx.service().navigator().redirect(Route::Sale(id.clone()));

            Ok(format!("{summary}\nSale `{id}` registered.\n"))
        }
    }
}

/// Adds the provided [`Item`] to the [`Draft`], resolving its product.
async fn add(ctx: &Context, draft: &mut Draft, item: Item) -> Result<(), Error> {
    let Item {
        product,
        sold,
        returned,
        price,
        cylinder_price,
    } = item;

    let get: query::products::Get = BackendQuery(products::Get(product));
    let product = ctx
        .service()
        .execute(get)
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .await?;

    _ = draft
        .add_item(&product, sold, returned, price, cylinder_price)
        .map_err(AsError::into_error)
        .map_err(ctx.error())?;
    Ok(())
}

/// Renders the lines and the total of the provided [`Draft`].
fn summarize(draft: &Draft) -> String {
    let mut table = Table::new([
        "Product", "Sold", "Returned", "Price", "Cylinder", "Subtotal",
    ]);
    for line in draft.items() {
        table.row([
            line.product.name.to_string(),
            line.sold_quantity.to_string(),
            line.returned_quantity.to_string(),
            line.price().to_string(),
            line.cylinder_price().to_string(),
            line.subtotal().to_string(),
        ]);
    }
    format!(
        "{table}\nTotal: {} ({})\n",
        draft.total(),
        draft.payment_method(),
    )
}

/// Describes the provided [`Sale`] in detail.
fn describe(sale: &Sale) -> String {
    let mut items = Table::new([
        "Product", "Sold", "Returned", "Price", "Cylinder", "Subtotal",
    ]);
    for item in &sale.items {
        items.row([
            item.product.name.to_string(),
            item.sold_quantity.to_string(),
            item.returned_quantity.to_string(),
            item.price.to_string(),
            item.cylinder_price.to_string(),
            item.subtotal().to_string(),
        ]);
    }
    format!(
        "Sale {} ({})\nClient: {}\nSeller: {}\nDate: {}\nPayment: {}\n\n\
         {items}\nTotal: {}\n",
        sale.code,
        sale.status,
        sale.client.name,
        sale.user.name,
        sale.created_at,
        sale.payment_method,
        sale.total_amount,
    )
}

impl AsError for order::ValidationError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::new("INVALID_ORDER", self.kind(), self))
    }
}

impl AsError for submit_sale::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Validation(e) => e.try_as_error(),
            Self::Submission(e) => {
                let mut err = e.try_as_error()?;
                err.message = format!("Failed to register the sale: {}", err.message);
                Some(err)
            }
        }
    }
}
