//! Inventory [`Movement`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use serde::{Deserialize, Serialize};

use super::{define_id, product};
#[cfg(doc)]
use super::Product;

/// Stock movement of a [`Product`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    /// ID of this [`Movement`].
    pub id: Id,

    /// Moved [`Product`].
    pub product: product::Summary,

    /// [`Kind`] of this [`Movement`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// Number of moved units.
    pub quantity: u32,

    /// Free-form reason of this [`Movement`].
    #[serde(default)]
    pub description: Option<String>,

    /// [`DateTime`] when this [`Movement`] was registered.
    pub created_at: CreationDateTime,
}

define_id!(Movement);

define_kind! {
    #[doc = "Direction of a [`Movement`]."]
    enum Kind {
        #[doc = "Units entering the stock."]
        In = 1,

        #[doc = "Units leaving the stock."]
        Out = 2,
    }
}

impl Kind {
    /// Returns the signed stock delta of moving `quantity` units.
    #[must_use]
    pub fn delta(self, quantity: u32) -> i64 {
        match self {
            Self::In => i64::from(quantity),
            Self::Out => -i64::from(quantity),
        }
    }
}

/// Data of a [`Movement`] being registered.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// ID of the moved [`Product`].
    pub product_id: product::Id,

    /// [`Kind`] of the [`Movement`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// Number of moved units. Must not be zero.
    pub quantity: u32,

    /// Free-form reason of the [`Movement`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// [`DateTime`] when a [`Movement`] was registered.
pub type CreationDateTime = DateTimeOf<(Movement, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Kind, New};

    #[test]
    fn delta() {
        assert_eq!(Kind::In.delta(5), 5);
        assert_eq!(Kind::Out.delta(5), -5);
    }

    #[test]
    fn serializes_kind_as_type() {
        let new = New {
            product_id: "p1".into(),
            kind: Kind::Out,
            quantity: 3,
            description: None,
        };
        assert_eq!(
            serde_json::to_string(&new).unwrap(),
            r#"{"productId":"p1","type":"OUT","quantity":3}"#,
        );
    }
}
