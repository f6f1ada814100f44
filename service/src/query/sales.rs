//! [`Query`] collection related to [`Sale`]s.
//!
//! [`Sale`]: crate::domain::Sale

#[cfg(doc)]
use crate::Query;
use crate::api::sales;

use super::BackendQuery;

/// Queries a single [`Sale`] by its ID.
///
/// [`Sale`]: crate::domain::Sale
pub type Get = BackendQuery<sales::Get>;

/// Queries a page of [`Sale`]s.
///
/// [`Sale`]: crate::domain::Sale
pub type List = BackendQuery<sales::List>;
