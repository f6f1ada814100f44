//! [`Query`] collection related to [`Product`]s.
//!
//! [`Product`]: crate::domain::Product

#[cfg(doc)]
use crate::Query;
use crate::api::products;

use super::BackendQuery;

/// Queries a single [`Product`] by its ID.
///
/// [`Product`]: crate::domain::Product
pub type Get = BackendQuery<products::Get>;

/// Queries a page of [`Product`]s.
///
/// [`Product`]: crate::domain::Product
pub type List = BackendQuery<products::List>;
