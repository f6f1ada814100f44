//! [`Dashboard`] page.

use futures::TryFutureExt as _;
use service::{
    api::dashboard,
    domain::report::Dashboard,
    navigation::Route,
    query::{self, BackendQuery},
    Query as _,
};

use crate::{AsError, Context, Error};

use super::table::Table;

/// Shows the [`Dashboard`].
pub(super) async fn show(ctx: &Context) -> Result<String, Error> {
    _ = ctx.enter(Route::Dashboard)?;

    let get: query::dashboard::Get = BackendQuery(dashboard::Get);
    let Dashboard {
        total_revenue,
        sales_count,
        clients_count,
        products_count,
        recent_sales,
        daily_revenue,
    } = ctx
        .service()
        .execute(get)
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .await?;

    let mut out = format!(
        "Revenue: {total_revenue}\nSales: {sales_count}\n\
         Clients: {clients_count}\nProducts: {products_count}\n",
    );

    if !daily_revenue.is_empty() {
        let mut table = Table::new(["Day", "Revenue"]);
        for day in &daily_revenue {
            table.row([day.date.to_string(), day.total.to_string()]);
        }
        out.push_str(&format!("\n{table}"));
    }

    if !recent_sales.is_empty() {
        let mut table = Table::new(["Code", "Client", "Total", "Payment"]);
        for s in &recent_sales {
            table.row([
                s.code.to_string(),
                s.client.name.to_string(),
                s.total_amount.to_string(),
                s.payment_method.to_string(),
            ]);
        }
        out.push_str(&format!("\nRecent sales\n{table}"));
    }

    Ok(out)
}
