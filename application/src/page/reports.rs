//! Sales report page.

use futures::TryFutureExt as _;
use service::{
    api::reports,
    domain::report::Filter,
    navigation::Route,
    query::{self, BackendQuery, Uncached},
    Query as _,
};
use tracing as log;

use crate::{args::Report, AsError, Context, Error};

use super::table::Table;

/// Shows the sales report, or writes its spreadsheet into a file.
pub(super) async fn show(ctx: &Context, report: Report) -> Result<String, Error> {
    _ = ctx.enter(Route::Reports)?;

    let Report {
        from,
        to,
        client,
        user,
        payment,
        export,
    } = report;
    let filter = Filter {
        from,
        to,
        client_id: client,
        user_id: user,
        payment_method: payment,
    };

    if let Some(path) = export {
        let export: query::reports::ExportSales =
            Uncached(reports::ExportSales(filter));
        let bytes = ctx
            .service()
            .execute(export)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .await?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| {
                Error::new(
                    "EXPORT_FAILED",
                    service::ErrorKind::Validation,
                    &format!("Failed to write `{}`: {e}", path.display()),
                )
            })
            .map_err(ctx.error())?;
        log::info!("exported {} bytes to `{}`", bytes.len(), path.display());
        return Ok(format!("Report written to `{}`.\n", path.display()));
    }

    let sales: query::reports::Sales = BackendQuery(reports::Sales(filter));
    let report = ctx
        .service()
        .execute(sales)
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .await?;

    let mut table = Table::new(["Code", "Date", "Client", "Seller", "Payment", "Total"]);
    for s in &report.items {
        table.row([
            s.code.to_string(),
            s.created_at.date().to_string(),
            s.client.name.to_string(),
            s.user.name.to_string(),
            s.payment_method.to_string(),
            s.total_amount.to_string(),
        ]);
    }

    let mut totals = Table::new(["Payment", "Total"]);
    for (method, total) in report.totals_by_payment_method() {
        totals.row([method.to_string(), total.to_string()]);
    }

    Ok(format!(
        "{table}\n{totals}\n{} sale(s), {} in total.\n",
        report.count,
        report.total_amount,
    ))
}
