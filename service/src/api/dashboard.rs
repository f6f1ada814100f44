//! `/dashboard` endpoint.

use crate::domain::report::Dashboard;

use super::{json, Endpoint};

/// `GET /dashboard`: the business activity overview.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Get;

impl Endpoint for Get {
    type Output = Dashboard;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "dashboard";

    fn path(&self) -> String {
        "/dashboard".into()
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}
