//! `/products` endpoints.

use urlencoding::encode;

use crate::{
    domain::{product, Product},
    read::product::list::{Page, Selector},
};

use super::{body, json, Endpoint, Params};

/// `GET /products`: a [`Page`] of [`Product`]s.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct List(pub Selector);

impl Endpoint for List {
    type Output = Page;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "products";

    fn path(&self) -> String {
        "/products".into()
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

/// `GET /products/:id`: a single [`Product`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Get(pub product::Id);

impl Endpoint for Get {
    type Output = Product;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "products";

    fn path(&self) -> String {
        format!("/products/{}", encode(self.0.as_ref()))
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `POST /products`: registers a new [`Product`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Create(pub product::Input);

impl Endpoint for Create {
    type Output = Product;

    const METHOD: http::Method = http::Method::POST;
    const RESOURCE: &'static str = "products";
    const INVALIDATES: &'static [&'static str] = &["products", "dashboard"];

    fn path(&self) -> String {
        "/products".into()
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        body(&self.0)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `PUT /products/:id`: replaces the data of a [`Product`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Update {
    /// ID of the [`Product`] to update.
    pub id: product::Id,

    /// New data of the [`Product`].
    pub input: product::Input,
}

impl Endpoint for Update {
    type Output = Product;

    const METHOD: http::Method = http::Method::PUT;
    const RESOURCE: &'static str = "products";
    const INVALIDATES: &'static [&'static str] =
        &["products", "inventory-movements"];

    fn path(&self) -> String {
        format!("/products/{}", encode(self.id.as_ref()))
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        body(&self.input)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `DELETE /products/:id`: removes a [`Product`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Delete(pub product::Id);

impl Endpoint for Delete {
    type Output = ();

    const METHOD: http::Method = http::Method::DELETE;
    const RESOURCE: &'static str = "products";
    const INVALIDATES: &'static [&'static str] = &["products", "dashboard"];

    fn path(&self) -> String {
        format!("/products/{}", encode(self.0.as_ref()))
    }

    fn decode(&self, _: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        Ok(())
    }
}
