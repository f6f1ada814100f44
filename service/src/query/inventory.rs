//! [`Query`] collection related to inventory [`Movement`]s.
//!
//! [`Movement`]: crate::domain::Movement

#[cfg(doc)]
use crate::Query;
use crate::api::inventory;

use super::BackendQuery;

/// Queries a page of inventory [`Movement`]s.
///
/// [`Movement`]: crate::domain::Movement
pub type List = BackendQuery<inventory::List>;
