//! `/clients` endpoints.

use urlencoding::encode;

use crate::{
    domain::{client, Client},
    read::client::list::{Page, Selector},
};

use super::{body, json, Endpoint, Params};

/// `GET /clients`: a [`Page`] of [`Client`]s.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct List(pub Selector);

impl Endpoint for List {
    type Output = Page;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "clients";

    fn path(&self) -> String {
        "/clients".into()
    }

    fn query(&self) -> Params {
        Params::default()
            .paginate(self.0.arguments)
            .with_search("search", self.0.filter.search.as_deref())
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `GET /clients/:id`: a single [`Client`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Get(pub client::Id);

impl Endpoint for Get {
    type Output = Client;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "clients";

    fn path(&self) -> String {
        format!("/clients/{}", encode(self.0.as_ref()))
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `POST /clients`: registers a new [`Client`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Create(pub client::Input);

impl Endpoint for Create {
    type Output = Client;

    const METHOD: http::Method = http::Method::POST;
    const RESOURCE: &'static str = "clients";
    const INVALIDATES: &'static [&'static str] = &["clients", "dashboard"];

    fn path(&self) -> String {
        "/clients".into()
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        body(&self.0)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `PUT /clients/:id`: replaces the data of a [`Client`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Update {
    /// ID of the [`Client`] to update.
    pub id: client::Id,

    /// New data of the [`Client`].
    pub input: client::Input,
}

impl Endpoint for Update {
    type Output = Client;

    const METHOD: http::Method = http::Method::PUT;
    const RESOURCE: &'static str = "clients";
    const INVALIDATES: &'static [&'static str] = &["clients", "sales"];

    fn path(&self) -> String {
        format!("/clients/{}", encode(self.id.as_ref()))
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        body(&self.input)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `DELETE /clients/:id`: removes a [`Client`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Delete(pub client::Id);

impl Endpoint for Delete {
    type Output = ();

    const METHOD: http::Method = http::Method::DELETE;
    const RESOURCE: &'static str = "clients";
    const INVALIDATES: &'static [&'static str] = &["clients", "dashboard"];

    fn path(&self) -> String {
        format!("/clients/{}", encode(self.0.as_ref()))
    }

    fn decode(&self, _: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::Arguments;

    use crate::{
        api::Endpoint as _,
        read::client::list::{Filter, Selector},
    };

    use super::{Delete, Get, List};

    #[test]
    fn list_query() {
        let list = List(Selector {
            arguments: Arguments::new(2, 10).unwrap(),
            filter: Filter {
                search: Some("rosa".into()),
            },
        });

        assert_eq!(list.path(), "/clients");
        assert_eq!(
            list.query().pairs(),
            [
                ("page", "2".to_owned()),
                ("pageSize", "10".to_owned()),
                ("search", "rosa".to_owned()),
            ],
        );
    }

    #[test]
    fn decodes_page() {
        let page = List(Selector {
            arguments: Arguments::first(10).unwrap(),
            filter: Filter::default(),
        })
        .decode(br#"{"items": [], "total": 0}"#.to_vec())
        .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(Get("c1".into()).path(), "/clients/c1");
    }

    #[test]
    fn id_stays_within_its_path_segment() {
        assert_eq!(
            Get("../users?page=1".into()).path(),
            "/clients/..%2Fusers%3Fpage%3D1",
        );
        assert_eq!(Delete("a/b".into()).path(), "/clients/a%2Fb");
    }
}
