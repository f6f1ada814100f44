//! `/users` endpoints.

use urlencoding::encode;

use crate::{
    domain::{user, User},
    read::user::list::{Page, Selector},
};

use super::{body, json, Endpoint, Params};

/// `GET /users`: a [`Page`] of [`User`]s.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct List(pub Selector);

impl Endpoint for List {
    type Output = Page;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "users";

    fn path(&self) -> String {
        "/users".into()
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

/// `POST /users`: registers a new [`User`].
#[derive(Clone, Debug)]
pub struct Create(pub user::New);

impl Endpoint for Create {
    type Output = User;

    const METHOD: http::Method = http::Method::POST;
    const RESOURCE: &'static str = "users";
    const INVALIDATES: &'static [&'static str] = &["users"];

    fn path(&self) -> String {
        "/users".into()
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        body(&self.0)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `PATCH /users/:id`: partially updates a [`User`].
#[derive(Clone, Debug)]
pub struct Update {
    /// ID of the [`User`] to update.
    pub id: user::Id,

    /// Changes to apply.
    pub patch: user::Patch,
}

impl Endpoint for Update {
    type Output = User;

    const METHOD: http::Method = http::Method::PATCH;
    const RESOURCE: &'static str = "users";
    const INVALIDATES: &'static [&'static str] = &["users", "me"];

    fn path(&self) -> String {
        format!("/users/{}", encode(self.id.as_ref()))
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        body(&self.patch)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}
