//! Aggregated read models: [`Dashboard`] and [`SalesReport`].

use common::{datetime::Date, Money};
use serde::{Deserialize, Serialize};

use super::{client, sale, user, Sale};

/// Overview of the business activity.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Revenue of all the completed [`Sale`]s.
    pub total_revenue: Money,

    /// Number of registered [`Sale`]s.
    pub sales_count: u64,

    /// Number of registered clients.
    pub clients_count: u64,

    /// Number of registered products.
    pub products_count: u64,

    /// Latest [`Sale`]s.
    #[serde(default)]
    pub recent_sales: Vec<Sale>,

    /// Revenue per day, for charting.
    #[serde(default)]
    pub daily_revenue: Vec<DailyRevenue>,
}

/// Revenue of a single day.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DailyRevenue {
    /// Day of the revenue.
    pub date: Date,

    /// Revenue of the day.
    pub total: Money,
}

/// Filter of a [`SalesReport`]. Unset fields don't restrict the report.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Filter {
    /// First day included.
    pub from: Option<Date>,

    /// Last day included.
    pub to: Option<Date>,

    /// Only [`Sale`]s of this client.
    pub client_id: Option<client::Id>,

    /// Only [`Sale`]s registered by this user.
    pub user_id: Option<user::Id>,

    /// Only [`Sale`]s paid this way.
    pub payment_method: Option<sale::PaymentMethod>,
}

/// Sales over a period of time.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    /// [`Sale`]s matching the [`Filter`].
    pub items: Vec<Sale>,

    /// Sum of the [`Sale`]s totals.
    pub total_amount: Money,

    /// Number of [`Sale`]s matching the [`Filter`].
    #[serde(default)]
    pub count: u64,
}

impl SalesReport {
    /// Returns the [`SalesReport::total_amount`] broken down by payment
    /// method, in declaration order of [`sale::PaymentMethod`].
    #[must_use]
    pub fn totals_by_payment_method(&self) -> Vec<(sale::PaymentMethod, Money)> {
        sale::PaymentMethod::ALL
            .iter()
            .map(|&method| {
                let total = self
                    .items
                    .iter()
                    .filter(|s| s.payment_method == method)
                    .map(|s| s.total_amount)
                    .sum();
                (method, total)
            })
            .collect()
    }
}
