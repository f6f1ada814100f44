//! [`Sale`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use super::{client, define_id, product, user};
#[cfg(doc)]
use super::{Client, Product, User};

/// Registered sale. Immutable once created.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// ID of this [`Sale`].
    pub id: Id,

    /// Sequential display number of this [`Sale`].
    pub code: Code,

    /// [`Client`] who bought.
    pub client: client::Summary,

    /// [`User`] who sold.
    pub user: user::Summary,

    /// Sold [`Item`]s, in the order they were added.
    pub items: Vec<Item>,

    /// Total amount charged.
    pub total_amount: Money,

    /// [`PaymentMethod`] used.
    pub payment_method: PaymentMethod,

    /// [`Status`] of this [`Sale`].
    pub status: Status,

    /// [`DateTime`] when this [`Sale`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Sale`] was last updated.
    pub updated_at: UpdateDateTime,
}

define_id!(Sale);

/// Sequential display number of a [`Sale`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[display("#{_0:06}")]
#[serde(transparent)]
pub struct Code(u64);

/// Line of a registered [`Sale`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Sold [`Product`].
    pub product: product::Summary,

    /// Number of full cylinders sold.
    pub sold_quantity: u32,

    /// Number of empty cylinders returned.
    pub returned_quantity: u32,

    /// Unit price applied.
    pub price: Money,

    /// Empty cylinder price applied.
    pub cylinder_price: Money,
}

impl Item {
    /// Returns the amount this [`Item`] contributes to the [`Sale`] total.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.price * self.sold_quantity
            - self.cylinder_price * self.returned_quantity
    }
}

define_kind! {
    #[doc = "Payment method of a [`Sale`]."]
    enum PaymentMethod {
        #[doc = "Paid in cash."]
        Cash = 1,

        #[doc = "Paid through the Yape mobile wallet."]
        Yape = 2,
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Cash
    }
}

define_kind! {
    #[doc = "Status of a [`Sale`]."]
    enum Status {
        #[doc = "Sale is registered and counted."]
        Completed = 1,

        #[doc = "Sale was cancelled and is not counted."]
        Cancelled = 2,
    }
}

/// Line of a [`Sale`] being registered.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    /// ID of the sold [`Product`].
    pub product_id: product::Id,

    /// Number of full cylinders sold.
    pub sold_quantity: u32,

    /// Number of empty cylinders returned.
    pub returned_quantity: u32,

    /// Negotiated unit price, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiated_price: Option<Money>,

    /// Negotiated empty cylinder price, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiated_cylinder_price: Option<Money>,
}

/// Data of a [`Sale`] being registered.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// ID of the buying [`Client`].
    pub client_id: client::Id,

    /// [`PaymentMethod`] used.
    pub payment_method: PaymentMethod,

    /// Lines of the [`Sale`].
    pub items: Vec<NewItem>,

    /// Total amount computed client-side.
    pub total_amount: Money,
}

/// Backend acknowledgement of a registered [`Sale`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Created {
    /// ID of the registered [`Sale`].
    pub id: Id,
}

/// [`DateTime`] when a [`Sale`] was created.
pub type CreationDateTime = DateTimeOf<(Sale, unit::Creation)>;

/// [`DateTime`] when a [`Sale`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Sale, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::{Code, PaymentMethod, Sale};

    #[test]
    fn code_display() {
        assert_eq!(Code::from(42).to_string(), "#000042");
    }

    #[test]
    fn payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Yape).unwrap(),
            "\"YAPE\"",
        );
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
    }

    #[test]
    fn deserializes_sale() {
        let sale: Sale = serde_json::from_str(
            r#"{
                "id": "s1",
                "code": 7,
                "client": {"id": "c1", "name": "Bodega Rosa"},
                "user": {"id": "u1", "name": "Ana"},
                "items": [{
                    "product": {"id": "p1", "name": "Balón 10kg"},
                    "soldQuantity": 2,
                    "returnedQuantity": 1,
                    "price": 150,
                    "cylinderPrice": 100
                }],
                "totalAmount": 200,
                "paymentMethod": "CASH",
                "status": "COMPLETED",
                "createdAt": "2024-05-01T10:00:00.000Z",
                "updatedAt": "2024-05-01T10:00:00.000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(sale.code.to_string(), "#000007");
        assert_eq!(sale.items[0].subtotal(), sale.total_amount);
    }
}
