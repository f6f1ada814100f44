//! Domain definitions.
//!
//! Every entity has exactly one canonical schema here, validated when it
//! crosses the API boundary.

pub mod client;
pub mod contact;
pub mod inventory;
pub mod invite;
pub mod product;
pub mod report;
pub mod sale;
pub mod user;

pub use self::{
    client::Client, inventory::Movement, invite::InviteCode, product::Product,
    sale::Sale, user::User,
};

/// Entity with a stable identity.
pub trait Identify {
    /// Type of the identity.
    type Id: Clone + std::fmt::Debug + Eq + std::hash::Hash;

    /// Returns the identity of this entity.
    fn id(&self) -> Self::Id;
}

/// Defines an opaque string ID of an entity.
macro_rules! define_id {
    ($entity:ident) => {
        #[doc = concat!("ID of a [`", stringify!($entity), "`].")]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::serde::Deserialize,
            ::derive_more::Display,
            Eq,
            ::derive_more::From,
            Hash,
            ::derive_more::Into,
            Ord,
            PartialEq,
            PartialOrd,
            ::serde::Serialize,
        )]
        #[as_ref(str)]
        #[from(String, &str)]
        #[serde(transparent)]
        pub struct Id(String);

        impl ::std::str::FromStr for Id {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(concat!("empty `", stringify!($entity), "` ID"));
                }
                Ok(Self(s.to_owned()))
            }
        }

        impl $crate::domain::Identify for $entity {
            type Id = Id;

            fn id(&self) -> Self::Id {
                self.id.clone()
            }
        }
    };
}

pub(crate) use define_id;
