//! `/invite-codes` endpoint.

use serde::Serialize;

use crate::domain::{invite::ExpirationDateTime, InviteCode};

use super::{body, json, Endpoint};

/// `POST /invite-codes`: issues a new [`InviteCode`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Create {
    /// Expiration of the issued [`InviteCode`], if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<ExpirationDateTime>,
}

impl Endpoint for Create {
    type Output = InviteCode;

    const METHOD: http::Method = http::Method::POST;
    const RESOURCE: &'static str = "invite-codes";

    fn path(&self) -> String {
        "/invite-codes".into()
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        body(self)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

#[cfg(test)]
mod spec {
    use crate::api::Endpoint as _;

    use super::Create;

    #[test]
    fn never_expiring_code_sends_empty_body() {
        assert_eq!(
            Create::default().body().unwrap().unwrap(),
            serde_json::json!({}),
        );
    }
}
