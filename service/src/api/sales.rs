//! `/sales` endpoints.

use urlencoding::encode;

use crate::{
    domain::{sale, Sale},
    read::sale::list::{Page, Selector},
};

use super::{body, json, Endpoint, Params};

/// `GET /sales`: a [`Page`] of [`Sale`]s.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct List(pub Selector);

impl Endpoint for List {
    type Output = Page;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "sales";

    fn path(&self) -> String {
        "/sales".into()
    }

    fn query(&self) -> Params {
        Params::default()
            .paginate(self.0.arguments)
            .with_search("search", self.0.filter.search.as_deref())
            .with_opt("clientId", self.0.filter.client_id.as_ref())
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `GET /sales/:id`: a single [`Sale`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Get(pub sale::Id);

impl Endpoint for Get {
    type Output = Sale;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "sales";

    fn path(&self) -> String {
        format!("/sales/{}", encode(self.0.as_ref()))
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `POST /sales`: registers a new [`Sale`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Create(pub sale::New);

impl Endpoint for Create {
    type Output = sale::Created;

    const METHOD: http::Method = http::Method::POST;
    const RESOURCE: &'static str = "sales";
    const INVALIDATES: &'static [&'static str] =
        &["sales", "dashboard", "reports", "inventory-movements"];

    fn path(&self) -> String {
        "/sales".into()
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
    use common::{pagination::Arguments, Money};

    use crate::{
        api::Endpoint as _,
        domain::sale::{New, NewItem, PaymentMethod},
        read::sale::list::{Filter, Selector},
    };

    use super::{Create, Get, List};

    #[test]
    fn list_filters_by_client() {
        let list = List(Selector {
            arguments: Arguments::first(20).unwrap(),
            filter: Filter {
                search: None,
                client_id: Some("c1".into()),
            },
        });

        assert_eq!(
            list.query().pairs(),
            [
                ("page", "1".to_owned()),
                ("pageSize", "20".to_owned()),
                ("clientId", "c1".to_owned()),
            ],
        );
    }

    #[test]
    fn get_encodes_id() {
        assert_eq!(Get("s 1/2".into()).path(), "/sales/s%201%2F2");
    }

    #[test]
    fn create_body_omits_unset_negotiation() {
        let req = Create(New {
            client_id: "c1".into(),
            payment_method: PaymentMethod::Yape,
            items: vec![NewItem {
                product_id: "p1".into(),
                sold_quantity: 2,
                returned_quantity: 1,
                negotiated_price: None,
                negotiated_cylinder_price: Some(Money::from_cents(9_000)),
            }],
            total_amount: Money::from_cents(21_000),
        });

        assert_eq!(
            req.body().unwrap().unwrap(),
            serde_json::json!({
                "clientId": "c1",
                "paymentMethod": "YAPE",
                "items": [{
                    "productId": "p1",
                    "soldQuantity": 2,
                    "returnedQuantity": 1,
                    "negotiatedCylinderPrice": 90.0,
                }],
                "totalAmount": 210.0,
            }),
        );

        let created = req.decode(br#"{"id": "s9"}"#.to_vec()).unwrap();
        assert_eq!(created.id.as_ref(), "s9");
    }
}
