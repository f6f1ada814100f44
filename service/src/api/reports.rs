//! `/reports` endpoints.

use crate::domain::report::{Filter, SalesReport};

use super::{json, Endpoint, Params};

/// Query-string parameters of a report [`Filter`].
fn params(filter: &Filter) -> Params {
    Params::default()
        .with_opt("from", filter.from)
        .with_opt("to", filter.to)
        .with_opt("clientId", filter.client_id.as_ref())
        .with_opt("userId", filter.user_id.as_ref())
        .with_opt("paymentMethod", filter.payment_method)
}

/// `GET /reports/sales`: the [`SalesReport`] matching a [`Filter`].
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Sales(pub Filter);

impl Endpoint for Sales {
    type Output = SalesReport;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "reports";

    fn path(&self) -> String {
        "/reports/sales".into()
    }

    fn query(&self) -> Params {
        params(&self.0)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `GET /reports/sales/export`: the spreadsheet of the [`SalesReport`]
/// matching a [`Filter`], as raw bytes.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ExportSales(pub Filter);

impl Endpoint for ExportSales {
    type Output = Vec<u8>;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "reports";

    fn path(&self) -> String {
        "/reports/sales/export".into()
    }

    fn query(&self) -> Params {
        params(&self.0)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        Ok(body)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        api::Endpoint as _,
        domain::{report::Filter, sale::PaymentMethod},
    };

    use super::{ExportSales, Sales};

    #[test]
    fn omits_unset_filters() {
        let report = Sales(Filter {
            from: Some("2024-05-01".parse().unwrap()),
            payment_method: Some(PaymentMethod::Cash),
            ..Filter::default()
        });

        assert_eq!(
            report.query().pairs(),
            [
                ("from", "2024-05-01".to_owned()),
                ("paymentMethod", "CASH".to_owned()),
            ],
        );
        assert!(Sales::default().query().pairs().is_empty());
    }

    #[test]
    fn export_keeps_raw_bytes() {
        let bytes = ExportSales::default()
            .decode(vec![0x50, 0x4b, 0x03, 0x04])
            .unwrap();
        assert_eq!(bytes, [0x50, 0x4b, 0x03, 0x04]);
    }
}
