//! [`Product`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use serde::{Deserialize, Serialize};

use super::{contact::Name, define_id};

/// Product sold by the business (a gas cylinder of some size).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// ID of this [`Product`].
    pub id: Id,

    /// [`Name`] of this [`Product`].
    pub name: Name,

    /// Standard price of a single unit of this [`Product`].
    pub base_price: Money,

    /// Amount deducted from a sale for every returned empty cylinder.
    pub empty_cylinder_price: Money,

    /// Indicator whether [`Product::base_price`] may be negotiated per sale.
    #[serde(default)]
    pub allow_price_negotiation: bool,

    /// Indicator whether [`Product::empty_cylinder_price`] may be negotiated
    /// per sale.
    #[serde(default)]
    pub allow_cylinder_negotiation: bool,

    /// [`DateTime`] when this [`Product`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Product`] was last updated.
    pub updated_at: UpdateDateTime,
}

define_id!(Product);

/// Short reference to a [`Product`] embedded into other entities.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Summary {
    /// ID of the referenced [`Product`].
    pub id: Id,

    /// [`Name`] of the referenced [`Product`].
    pub name: Name,
}

impl From<&Product> for Summary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
        }
    }
}

/// Data of a [`Product`] being created or updated.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// [`Name`] of the [`Product`].
    pub name: Name,

    /// Standard unit price of the [`Product`].
    pub base_price: Money,

    /// Empty cylinder price of the [`Product`].
    pub empty_cylinder_price: Money,

    /// Whether the unit price may be negotiated.
    pub allow_price_negotiation: bool,

    /// Whether the empty cylinder price may be negotiated.
    pub allow_cylinder_negotiation: bool,
}

/// [`DateTime`] when a [`Product`] was created.
pub type CreationDateTime = DateTimeOf<(Product, unit::Creation)>;

/// [`DateTime`] when a [`Product`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Product, unit::Update)>;
