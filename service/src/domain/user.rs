//! [`User`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::AsRef;
use secrecy::{zeroize::Zeroize, CloneableSecret, ExposeSecret as _, SecretBox};
use serde::{Deserialize, Serialize, Serializer};

use super::{
    contact::{Email, Name},
    define_id,
};

/// Member of the staff operating the system.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Email`] of this [`User`], used to log in.
    pub email: Email,

    /// [`Role`] of this [`User`].
    pub role: Role,

    /// [`DateTime`] when this [`User`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`User`] was last updated.
    pub updated_at: UpdateDateTime,
}

impl User {
    /// Indicates whether this [`User`] may manage other [`User`]s.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

define_id!(User);

/// Short reference to a [`User`] embedded into other entities.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Summary {
    /// ID of the referenced [`User`].
    pub id: Id,

    /// [`Name`] of the referenced [`User`].
    pub name: Name,
}

define_kind! {
    #[doc = "Role of a [`User`]."]
    enum Role {
        #[doc = "May manage users, products and invite codes."]
        Admin = 1,

        #[doc = "May register sales and inventory movements."]
        Member = 2,
    }
}

/// Password of a [`User`].
#[derive(AsRef, Clone, Eq, PartialEq)]
#[as_ref(str)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        !password.is_empty() && password.len() <= 128
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

impl std::str::FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Serializes a secret [`Password`] into a request body.
///
/// # Errors
///
/// Never errors on its own, only propagates [`Serializer`] errors.
pub fn serialize_password<S>(
    password: &SecretBox<Password>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(password.expose_secret().as_ref())
}

/// Serializes an optional secret [`Password`] into a request body.
///
/// # Errors
///
/// Never errors on its own, only propagates [`Serializer`] errors.
pub fn serialize_optional_password<S>(
    password: &Option<SecretBox<Password>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match password {
        Some(p) => serialize_password(p, serializer),
        None => serializer.serialize_none(),
    }
}

/// Data of a new [`User`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// [`Name`] of the new [`User`].
    pub name: Name,

    /// [`Email`] of the new [`User`].
    pub email: Email,

    /// [`Password`] of the new [`User`].
    #[serde(serialize_with = "serialize_password")]
    pub password: SecretBox<Password>,

    /// [`Role`] of the new [`User`].
    pub role: Role,
}

/// Partial update of a [`User`]. Unset fields are left untouched.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    /// New [`Name`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,

    /// New [`Email`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,

    /// New [`Role`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// New [`Password`].
    #[serde(
        serialize_with = "serialize_optional_password",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<SecretBox<Password>>,
}

impl Patch {
    /// Indicates whether this [`Patch`] changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            name,
            email,
            role,
            password,
        } = self;
        name.is_none() && email.is_none() && role.is_none() && password.is_none()
    }
}

/// [`DateTime`] when a [`User`] was created.
pub type CreationDateTime = DateTimeOf<(User, unit::Creation)>;

/// [`DateTime`] when a [`User`] was last updated.
pub type UpdateDateTime = DateTimeOf<(User, unit::Update)>;
