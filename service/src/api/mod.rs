//! Explicit request/response records of the REST API endpoints.

pub mod clients;
pub mod dashboard;
pub mod inventory;
pub mod invite_codes;
pub mod products;
pub mod reports;
pub mod sales;
pub mod sessions;
pub mod users;

use common::pagination::Arguments;
use serde::de::DeserializeOwned;

/// REST API endpoint.
pub trait Endpoint {
    /// Decoded response of this [`Endpoint`].
    type Output;

    /// HTTP method of this [`Endpoint`].
    const METHOD: http::Method;

    /// Resource this [`Endpoint`] belongs to, used for grouping cached
    /// responses.
    const RESOURCE: &'static str;

    /// Resources whose cached responses become stale once this [`Endpoint`]
    /// succeeds.
    const INVALIDATES: &'static [&'static str] = &[];

    /// Returns the path of this [`Endpoint`] relatively to the API base URL.
    fn path(&self) -> String;

    /// Returns the query-string parameters of this [`Endpoint`].
    fn query(&self) -> Params {
        Params::default()
    }

    /// Returns the JSON body of this [`Endpoint`], if any.
    ///
    /// # Errors
    ///
    /// If the body cannot be serialized.
    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        Ok(None)
    }

    /// Decodes the successful response body of this [`Endpoint`].
    ///
    /// # Errors
    ///
    /// If the body doesn't match the expected shape.
    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error>;
}

/// Decodes a JSON response body.
///
/// # Errors
///
/// If the body doesn't match the expected shape.
pub fn json<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Serializes a JSON request body.
///
/// # Errors
///
/// If the `value` cannot be serialized.
pub fn body<T: serde::Serialize>(
    value: &T,
) -> Result<Option<serde_json::Value>, serde_json::Error> {
    serde_json::to_value(value).map(Some)
}

/// Query-string parameters of an [`Endpoint`].
///
/// Unset values are omitted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    /// Adds the provided parameter.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    /// Adds the provided parameter if it's set.
    #[must_use]
    pub fn with_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Adds the provided search term if it's not blank.
    #[must_use]
    pub fn with_search(self, key: &'static str, term: Option<&str>) -> Self {
        self.with_opt(key, term.map(str::trim).filter(|t| !t.is_empty()))
    }

    /// Adds the `page` and `pageSize` pagination parameters.
    #[must_use]
    pub fn paginate(self, args: Arguments) -> Self {
        self.with("page", args.page())
            .with("pageSize", args.page_size())
    }

    /// Returns the parameters as key-value pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}
