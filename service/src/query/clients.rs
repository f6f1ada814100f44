//! [`Query`] collection related to [`Client`]s.
//!
//! [`Client`]: crate::domain::Client

#[cfg(doc)]
use crate::Query;
use crate::api::clients;

use super::BackendQuery;

/// Queries a single [`Client`] by its ID.
///
/// [`Client`]: crate::domain::Client
pub type Get = BackendQuery<clients::Get>;

/// Queries a page of [`Client`]s.
///
/// [`Client`]: crate::domain::Client
pub type List = BackendQuery<clients::List>;
