//! [`Query`] collection related to reports.

#[cfg(doc)]
use crate::Query;
use crate::api::reports;

use super::{BackendQuery, Uncached};

/// Queries a [`SalesReport`].
///
/// [`SalesReport`]: crate::domain::report::SalesReport
pub type Sales = BackendQuery<reports::Sales>;

/// Downloads the spreadsheet of a [`SalesReport`].
///
/// [`SalesReport`]: crate::domain::report::SalesReport
pub type ExportSales = Uncached<reports::ExportSales>;
