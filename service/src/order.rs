//! Composition of a [`Sale`] order before it's registered.
//!
//! [`Sale`]: crate::domain::Sale

use common::Money;
use derive_more::{Display, Error};
use tracing as log;

use crate::domain::{
    client, product,
    sale::{self, PaymentMethod},
    Product,
};

/// Line of a [`Draft`].
///
/// Prices are resolved once the line is added: a negotiated price is kept
/// only if the [`Product`] allows negotiating it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineItem {
    /// Sold [`Product`].
    pub product: product::Summary,

    /// Number of full cylinders sold.
    pub sold_quantity: u32,

    /// Number of empty cylinders returned.
    pub returned_quantity: u32,

    /// Honored negotiated unit price, if any.
    pub negotiated_price: Option<Money>,

    /// Honored negotiated empty cylinder price, if any.
    pub negotiated_cylinder_price: Option<Money>,

    /// [`Product::base_price`] at the moment of adding.
    base_price: Money,

    /// [`Product::empty_cylinder_price`] at the moment of adding.
    empty_cylinder_price: Money,
}

impl LineItem {
    /// Returns the unit price this [`LineItem`] is charged with.
    #[must_use]
    pub fn price(&self) -> Money {
        self.negotiated_price.unwrap_or(self.base_price)
    }

    /// Returns the empty cylinder price this [`LineItem`] is credited with.
    #[must_use]
    pub fn cylinder_price(&self) -> Money {
        self.negotiated_cylinder_price
            .unwrap_or(self.empty_cylinder_price)
    }

    /// Returns the subtotal of this [`LineItem`].
    ///
    /// Negative subtotal represents a net return.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.price() * self.sold_quantity
            - self.cylinder_price() * self.returned_quantity
    }

    /// Returns the subtotal of this [`LineItem`], or [`None`] if it
    /// overflows.
    fn checked_subtotal(&self) -> Option<Money> {
        let returned =
            self.cylinder_price().checked_mul(self.returned_quantity)?;
        self.price().checked_mul(self.sold_quantity)?.checked_sub(returned)
    }
}

impl From<&LineItem> for sale::NewItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            sold_quantity: item.sold_quantity,
            returned_quantity: item.returned_quantity,
            negotiated_price: item.negotiated_price,
            negotiated_cylinder_price: item.negotiated_cylinder_price,
        }
    }
}

/// In-progress [`Sale`] order.
///
/// [`Sale`]: crate::domain::Sale
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Draft {
    /// Buying client, if chosen.
    client: Option<client::Id>,

    /// [`PaymentMethod`] of the order.
    payment_method: PaymentMethod,

    /// Lines in insertion order.
    items: Vec<LineItem>,
}

impl Draft {
    /// Creates a new empty [`Draft`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new [`LineItem`] of the provided [`Product`].
    ///
    /// Negotiated prices are ignored unless the [`Product`] allows them, in
    /// which case its standard prices apply.
    ///
    /// # Errors
    ///
    /// With [`ValidationError`] if nothing is sold or returned, an honored
    /// negotiated price is negative, or the amounts are too large to be
    /// summed up. The [`Draft`] is left untouched then.
    pub fn add_item(
        &mut self,
        product: &Product,
        sold_quantity: u32,
        returned_quantity: u32,
        negotiated_price: Option<Money>,
        negotiated_cylinder_price: Option<Money>,
    ) -> Result<&LineItem, ValidationError> {
        if sold_quantity == 0 && returned_quantity == 0 {
            return Err(ValidationError::EmptyQuantities);
        }

        let negotiated_price = honor(
            negotiated_price,
            product.allow_price_negotiation,
            &product.name,
        )?;
        let negotiated_cylinder_price = honor(
            negotiated_cylinder_price,
            product.allow_cylinder_negotiation,
            &product.name,
        )?;

        let item = LineItem {
            product: product.into(),
            sold_quantity,
            returned_quantity,
            negotiated_price,
            negotiated_cylinder_price,
            base_price: product.base_price,
            empty_cylinder_price: product.empty_cylinder_price,
        };

        // Absolute subtotals must sum up without overflow, so the total of
        // any remaining lines fits too.
        let subtotal = item
            .checked_subtotal()
            .ok_or(ValidationError::AmountTooLarge)?;
        _ = self
            .items
            .iter()
            .map(|i| i.subtotal().abs())
            .try_fold(subtotal.abs(), Money::checked_add)
            .ok_or(ValidationError::AmountTooLarge)?;

        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the [`LineItem`] at the provided position, shifting the
    /// following ones.
    ///
    /// Returns [`None`] if there is no such [`LineItem`].
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Returns the [`LineItem`]s in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the total of this [`Draft`].
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Returns the chosen client.
    #[must_use]
    pub const fn client(&self) -> Option<&client::Id> {
        self.client.as_ref()
    }

    /// Chooses the buying client.
    pub fn set_client(&mut self, client: Option<client::Id>) {
        self.client = client;
    }

    /// Returns the [`PaymentMethod`] of this [`Draft`].
    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Chooses the [`PaymentMethod`].
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Discards everything added to this [`Draft`].
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Builds the [`sale::New`] to register out of this [`Draft`].
    ///
    /// # Errors
    ///
    /// With [`ValidationError`] if no client is chosen or no [`LineItem`] is
    /// added.
    pub fn to_sale(&self) -> Result<sale::New, ValidationError> {
        let client_id =
            self.client.clone().ok_or(ValidationError::ClientMissing)?;
        if self.items.is_empty() {
            return Err(ValidationError::ItemsEmpty);
        }

        Ok(sale::New {
            client_id,
            payment_method: self.payment_method,
            items: self.items.iter().map(Into::into).collect(),
            total_amount: self.total(),
        })
    }
}

/// Keeps the `negotiated` price only if negotiation is `allowed`.
fn honor(
    negotiated: Option<Money>,
    allowed: bool,
    product: &impl Display,
) -> Result<Option<Money>, ValidationError> {
    match negotiated {
        Some(price) if !allowed => {
            log::debug!(
                "`{product}` doesn't allow negotiation, ignoring `{price}`",
            );
            Ok(None)
        }
        Some(price) if price.is_negative() => {
            Err(ValidationError::NegativePrice)
        }
        Some(_) | None => Ok(negotiated),
    }
}

/// Error of composing a [`Draft`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// Neither sold nor returned quantity is set.
    #[display("Enter a sold or returned quantity")]
    EmptyQuantities,

    /// Negotiated price is below zero.
    #[display("Negotiated price cannot be negative")]
    NegativePrice,

    /// Line amount doesn't fit into the order total.
    #[display("Amount is too large")]
    AmountTooLarge,

    /// No client is chosen.
    #[display("Choose a client")]
    ClientMissing,

    /// No line is added.
    #[display("Add at least one product")]
    ItemsEmpty,
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{domain::Product, testing::product_json};

    use super::{Draft, ValidationError};

    fn product(base: f64, cylinder: f64, negotiable: bool) -> Product {
        serde_json::from_value(product_json("p1", base, cylinder, negotiable))
            .unwrap()
    }

    fn soles(amount: i64) -> Money {
        Money::from_cents(amount * 100)
    }

    #[test]
    fn sold_minus_returned() {
        let mut draft = Draft::new();
        let item = draft
            .add_item(&product(150.0, 100.0, false), 2, 1, None, None)
            .unwrap();

        assert_eq!(item.subtotal(), soles(200));
        assert_eq!(draft.total(), soles(200));
    }

    #[test]
    fn ignores_disallowed_negotiation() {
        let mut draft = Draft::new();
        let item = draft
            .add_item(
                &product(150.0, 100.0, false),
                2,
                1,
                Some(soles(120)),
                Some(soles(90)),
            )
            .unwrap();

        assert_eq!(item.negotiated_price, None);
        assert_eq!(item.price(), soles(150));
        assert_eq!(item.subtotal(), soles(200));
    }

    #[test]
    fn honors_allowed_negotiation() {
        let mut draft = Draft::new();
        let item = draft
            .add_item(
                &product(150.0, 100.0, true),
                2,
                1,
                Some(soles(120)),
                None,
            )
            .unwrap();

        assert_eq!(item.price(), soles(120));
        assert_eq!(item.cylinder_price(), soles(100));
        assert_eq!(item.subtotal(), soles(140));
    }

    #[test]
    fn rejects_empty_quantities_without_mutation() {
        let mut draft = Draft::new();
        let p = product(150.0, 100.0, true);

        assert_eq!(
            draft.add_item(&p, 0, 0, None, None).unwrap_err(),
            ValidationError::EmptyQuantities,
        );
        assert_eq!(
            draft.add_item(&p, 1, 0, Some(soles(-1)), None).unwrap_err(),
            ValidationError::NegativePrice,
        );
        assert!(draft.items().is_empty());
    }

    #[test]
    fn rejects_overflowing_amounts_without_mutation() {
        let mut draft = Draft::new();
        let p = product(150.0, 100.0, true);
        let max: Money = "79228162514264337593543950335".parse().unwrap();

        assert_eq!(
            draft.add_item(&p, 2, 0, Some(max), None).unwrap_err(),
            ValidationError::AmountTooLarge,
        );
        assert!(draft.items().is_empty());

        _ = draft.add_item(&p, 1, 0, Some(max), None).unwrap();
        assert_eq!(
            draft.add_item(&p, 1, 0, None, None).unwrap_err(),
            ValidationError::AmountTooLarge,
        );
        assert_eq!(
            draft.add_item(&p, 0, 1, None, Some(max)).unwrap_err(),
            ValidationError::AmountTooLarge,
        );
        assert_eq!(draft.items().len(), 1);
        assert_eq!(draft.total(), max);
    }

    #[test]
    fn net_return_is_negative() {
        let mut draft = Draft::new();
        _ = draft
            .add_item(&product(150.0, 100.0, false), 0, 3, None, None)
            .unwrap();

        assert_eq!(draft.total(), soles(-300));
    }

    #[test]
    fn total_is_sum_of_subtotals() {
        let mut draft = Draft::new();
        let a = product(150.0, 100.0, false);
        let b = product(42.5, 0.33, true);
        for (sold, returned) in [(2, 1), (0, 4), (7, 0), (3, 3)] {
            _ = draft.add_item(&a, sold, returned, None, None).unwrap();
            _ = draft
                .add_item(&b, returned, sold, Some(Money::from_cents(4_199)), None)
                .unwrap();
        }

        let sum: Money = draft.items().iter().map(|i| i.subtotal()).sum();
        assert_eq!(draft.total(), sum);
    }

    #[test]
    fn removes_by_position() {
        let mut draft = Draft::new();
        let p = product(10.0, 5.0, false);
        for sold in 1..=3 {
            _ = draft.add_item(&p, sold, 0, None, None).unwrap();
        }

        assert_eq!(draft.remove_item(1).unwrap().sold_quantity, 2);
        assert!(draft.remove_item(5).is_none());
        assert_eq!(
            draft
                .items()
                .iter()
                .map(|i| i.sold_quantity)
                .collect::<Vec<_>>(),
            [1, 3],
        );
        assert_eq!(draft.total(), soles(40));
    }

    #[test]
    fn sale_requires_client_and_items() {
        let mut draft = Draft::new();
        assert_eq!(draft.to_sale().unwrap_err(), ValidationError::ClientMissing);

        draft.set_client(Some("c1".into()));
        assert_eq!(draft.to_sale().unwrap_err(), ValidationError::ItemsEmpty);

        _ = draft
            .add_item(&product(150.0, 100.0, false), 2, 1, None, None)
            .unwrap();
        let sale = draft.to_sale().unwrap();
        assert_eq!(sale.total_amount, soles(200));
        assert_eq!(sale.items.len(), 1);

        draft.clear();
        assert!(draft.client().is_none());
        assert!(draft.items().is_empty());
    }
}
