//! Service contains the business logic of the back-office client: domain
//! models, the order composition and listing engines, the auth gateway and
//! the query cache.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod cache;
pub mod command;
pub mod domain;
pub mod error;
pub mod infra;
pub mod listing;
pub mod navigation;
pub mod order;
pub mod query;
pub mod read;
pub mod session;
#[cfg(test)]
mod testing;

use std::time::Duration;

use smart_default::SmartDefault;

#[cfg(doc)]
use infra::Backend;

pub use self::{
    cache::QueryCache, command::Command, error::Kind as ErrorKind,
    query::Query,
};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Age after which a cached query result is refetched.
    #[default(Duration::from_secs(30))]
    pub stale_time: Duration,

    /// Number of items requested per page of a [`listing::Listing`].
    #[default(20)]
    pub page_size: u32,

    /// Quiet period after the last search term change before a
    /// [`listing::Listing`] is reset.
    #[default(Duration::from_millis(400))]
    pub debounce: Duration,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<B> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Backend`] of this [`Service`].
    backend: B,

    /// Current [`session::Session`].
    session: session::Store,

    /// [`navigation::Route`] being shown.
    navigator: navigation::Navigator,

    /// Cached query results.
    cache: QueryCache,
}

impl<B> Service<B> {
    /// Creates a new [`Service`] with the provided parameters.
    ///
    /// The `session` and `navigator` are expected to be the ones the
    /// `backend` signs out through.
    #[must_use]
    pub fn new(
        config: Config,
        backend: B,
        session: session::Store,
        navigator: navigation::Navigator,
    ) -> Self {
        Self {
            cache: QueryCache::new(config.stale_time),
            config,
            backend,
            session,
            navigator,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Backend`] of this [`Service`].
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns [`session::Store`] of this [`Service`].
    #[must_use]
    pub const fn session(&self) -> &session::Store {
        &self.session
    }

    /// Returns [`navigation::Navigator`] of this [`Service`].
    #[must_use]
    pub const fn navigator(&self) -> &navigation::Navigator {
        &self.navigator
    }

    /// Returns [`QueryCache`] of this [`Service`].
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Creates a new [`listing::Listing`] of the provided `filter`, sized
    /// as configured.
    ///
    /// [`None`] is returned if the configured page size is zero.
    #[must_use]
    pub fn listing<T, F>(&self, filter: F) -> Option<listing::Listing<T, F>>
    where
        T: domain::Identify,
    {
        listing::Listing::new(filter, self.config.page_size)
    }

    /// Creates a new [`listing::Debouncer`] of search terms, waiting as
    /// configured.
    #[must_use]
    pub const fn debouncer<T>(&self) -> listing::Debouncer<T> {
        listing::Debouncer::new(self.config.debounce)
    }
}
