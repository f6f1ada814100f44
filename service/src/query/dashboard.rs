//! [`Query`] of the [`Dashboard`].
//!
//! [`Dashboard`]: crate::domain::report::Dashboard

#[cfg(doc)]
use crate::Query;
use crate::api::dashboard;

use super::BackendQuery;

/// Queries the [`Dashboard`].
///
/// [`Dashboard`]: crate::domain::report::Dashboard
pub type Get = BackendQuery<dashboard::Get>;
