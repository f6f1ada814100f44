//! [`InviteCode`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use super::User;

/// Code allowing a new [`User`] to sign up.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCode {
    /// [`Code`] to hand out.
    pub code: Code,

    /// [`DateTime`] after which this [`InviteCode`] is no longer accepted.
    ///
    /// [`None`] means it never expires.
    #[serde(default)]
    pub expires_at: Option<ExpirationDateTime>,

    /// [`DateTime`] when this [`InviteCode`] was created.
    pub created_at: CreationDateTime,
}

impl InviteCode {
    /// Indicates whether this [`InviteCode`] may still be used.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.expires_at
            .map_or(true, |e| common::DateTime::now() < e.coerce())
    }
}

/// Value of an [`InviteCode`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Code(String);

/// [`DateTime`] when an [`InviteCode`] was created.
pub type CreationDateTime = DateTimeOf<(InviteCode, unit::Creation)>;

/// [`DateTime`] when an [`InviteCode`] expires.
pub type ExpirationDateTime = DateTimeOf<(InviteCode, unit::Expiration)>;
