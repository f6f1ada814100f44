//! [`Query`] collection related to [`User`]s.
//!
//! [`User`]: crate::domain::User

#[cfg(doc)]
use crate::Query;
use crate::api::{sessions, users};

use super::{BackendQuery, Uncached};

/// Queries a page of [`User`]s.
///
/// [`User`]: crate::domain::User
pub type List = BackendQuery<users::List>;

/// Queries the profile of the signed in [`User`].
///
/// [`User`]: crate::domain::User
pub type Me = Uncached<sessions::Me>;
