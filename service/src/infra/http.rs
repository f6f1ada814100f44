//! [`reqwest`]-based [`Transport`] implementation.

use std::time::Duration;

use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use super::Transport;
use super::{transport, Request, Response};

/// [`Http`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash.
    pub base_url: String,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// HTTP [`Transport`] over [`reqwest`].
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest::Client`].
    client: reqwest::Client,

    /// Base URL of the REST API.
    base_url: String,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying [`reqwest::Client`] cannot be built.
    pub fn new(conf: &Config) -> Result<Self, Traced<transport::Error>> {
        use transport::Error as E;

        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Ok(Self {
            client,
            base_url: conf.base_url.trim_end_matches('/').to_owned(),
        })
    }
}

impl common::Handler<Request> for Http {
    type Ok = Response;
    type Err = Traced<transport::Error>;

    async fn execute(&self, req: Request) -> Result<Self::Ok, Self::Err> {
        use transport::Error as E;

        let Request {
            method,
            path,
            query,
            headers,
            body,
        } = req;

        let url = format!("{}{path}", self.base_url);
        log::debug!("{method} {url}");

        let mut builder = self
            .client
            .request(method, url)
            .headers(headers)
            .query(query.pairs());
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))?
            .to_vec();

        log::debug!("responded with `{status}`");

        Ok(Response { status, body })
    }
}

impl From<reqwest::Error> for transport::Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Unavailable(e.to_string())
        } else {
            Self::Failed(e.to_string())
        }
    }
}
