//! Contact details shared by [`Client`]s and [`User`]s.
//!
//! [`Client`]: crate::domain::Client
//! [`User`]: crate::domain::User

use std::sync::LazyLock;

use derive_more::{AsRef, Display};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Defines a validated string value deserialized through its constructor.
macro_rules! validated_string {
    ($name:ident) => {
        impl $name {
            /// Creates a new value if the given `value` is valid.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }

        impl TryFrom<String> for $name {
            type Error = &'static str;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use validated_string;

/// Display name of a person or an item.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

validated_string!(Name);

impl Name {
    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

/// Email address.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

validated_string!(Email);

impl Email {
    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

/// Phone number.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

validated_string!(Phone);

impl Phone {
    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format: an optional `+`
        /// followed by 6 to 15 digits, optionally grouped with spaces or
        /// dashes.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?\d(?:[\s-]?\d){5,14}$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Name, Phone};

    #[test]
    fn name() {
        assert!(Name::new("Distribuidora Norte").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" padded ").is_none());
    }

    #[test]
    fn email() {
        assert!(Email::new("ventas@gas.pe").is_some());
        assert!(Email::new("ventas@gas").is_none());
        assert!(Email::new("no spaces@gas.pe").is_none());
    }

    #[test]
    fn phone() {
        assert!(Phone::new("987654321").is_some());
        assert!(Phone::new("+51 987 654 321").is_some());
        assert!(Phone::new("01-234-5678").is_some());
        assert!(Phone::new("12345").is_none());
        assert!(Phone::new("phone").is_none());
    }

    #[test]
    fn validated_on_deserialize() {
        assert!(serde_json::from_str::<Name>("\"\"").is_err());
        assert!(serde_json::from_str::<Email>("\"x\"").is_err());
        assert_eq!(
            AsRef::<str>::as_ref(&serde_json::from_str::<Phone>("\"987654321\"").unwrap()),
            "987654321",
        );
    }
}
