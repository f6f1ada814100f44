//! `/inventory-movements` endpoints.

use crate::{
    domain::{inventory, Movement},
    read::inventory::list::{Page, Selector},
};

use super::{body, json, Endpoint, Params};

/// `GET /inventory-movements`: a [`Page`] of [`Movement`]s.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct List(pub Selector);

impl Endpoint for List {
    type Output = Page;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "inventory-movements";

    fn path(&self) -> String {
        "/inventory-movements".into()
    }

    fn query(&self) -> Params {
        Params::default()
            .paginate(self.0.arguments)
            .with_opt("productId", self.0.filter.product_id.as_ref())
            .with_search("search", self.0.filter.search.as_deref())
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `POST /inventory-movements`: registers a new [`Movement`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Create(pub inventory::New);

impl Endpoint for Create {
    type Output = Movement;

    const METHOD: http::Method = http::Method::POST;
    const RESOURCE: &'static str = "inventory-movements";
    const INVALIDATES: &'static [&'static str] =
        &["inventory-movements", "products", "dashboard"];

    fn path(&self) -> String {
        "/inventory-movements".into()
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        body(&self.0)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        api::Endpoint as _,
        domain::inventory::{Kind, New},
    };

    use super::Create;

    #[test]
    fn create_body_uses_type_field() {
        let req = Create(New {
            product_id: "p1".into(),
            kind: Kind::Out,
            quantity: 3,
            description: None,
        });

        assert_eq!(
            req.body().unwrap().unwrap(),
            serde_json::json!({"productId": "p1", "type": "OUT", "quantity": 3}),
        );
    }
}
