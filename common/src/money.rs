//! [`Money`]-related definitions.

use std::{fmt, iter, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in [`Money::CURRENCY`].
///
/// Arithmetic is performed on the raw [`Decimal`] amount. Rounding to
/// [`Money::SCALE`] digits only happens when displaying.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Money(Decimal);

impl Money {
    /// [`Currency`] of every [`Money`] amount.
    pub const CURRENCY: Currency = Currency::Pen;

    /// Number of fractional digits of the minor currency unit.
    pub const SCALE: u32 = 2;

    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Money`] out of the provided amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates a new [`Money`] out of the provided amount of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, Self::SCALE))
    }

    /// Returns the raw amount of this [`Money`].
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Money`] is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value of this [`Money`].
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Adds the provided [`Money`], returning [`None`] on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Subtracts the provided [`Money`], returning [`None`] on overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Multiplies by the provided quantity, returning [`None`] on overflow.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Returns this [`Money`] rounded to the minor currency unit.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(self.0.round_dp_with_strategy(
            Self::SCALE,
            RoundingStrategy::MidpointAwayFromZero,
        ))
    }

    /// Parses [`Money`] out of a localized input, the way a masked currency
    /// input field does: every non-digit character is stripped and the last
    /// two digits are treated as cents.
    ///
    /// A leading `-` (before the first digit) makes the amount negative.
    ///
    /// This is the inverse of [`Money`]'s [`Display`] implementation.
    ///
    /// # Errors
    ///
    /// If the input contains no digits or too many of them.
    ///
    /// [`Display`]: fmt::Display
    pub fn parse_localized(input: &str) -> Result<Self, ParseError> {
        let negative = input
            .chars()
            .take_while(|c| !c.is_ascii_digit())
            .any(|c| c == '-');
        let digits = input
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();
        if digits.is_empty() {
            return Err(ParseError::NoDigits);
        }
        let cents =
            digits.parse::<i64>().map_err(|_| ParseError::TooLarge)?;

        Ok(Self::from_cents(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Money {
    /// Formats this [`Money`] in Peruvian Spanish locale: `S/ 1,234.56`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let abs = rounded.abs();
        let units = abs.trunc();
        let cents = ((abs - units) * Decimal::ONE_HUNDRED)
            .to_u8()
            .unwrap_or_default();

        let units = units.to_string();
        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, digit) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        write!(
            f,
            "{sign}{} {grouped}.{cents:02}",
            Self::CURRENCY.symbol(),
        )
    }
}

impl FromStr for Money {
    type Err = ParseError;

    /// Parses a plain decimal amount (`150`, `150.5`, `1,234.56`),
    /// optionally prefixed with the currency symbol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, s),
        };
        let s = s
            .strip_prefix(Self::CURRENCY.symbol())
            .unwrap_or(s)
            .trim()
            .replace(',', "");

        let amount =
            Decimal::from_str(&s).map_err(|_| ParseError::InvalidAmount)?;
        Ok(Self(if negative { -amount } else { amount }))
    }
}

/// Error of parsing [`Money`].
#[derive(Clone, Copy, Debug, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    /// Input contains no digits.
    #[display("no digits in `Money` input")]
    NoDigits,

    /// Input amount doesn't fit into [`Money`].
    #[display("`Money` amount is too large")]
    TooLarge,

    /// Input is not a decimal number.
    #[display("invalid `Money` amount")]
    InvalidAmount,
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl ops::Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl ops::Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

impl<'a> iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Peruvian Sol."]
        Pen = 1,
    }
}

impl Currency {
    /// Returns the display symbol of this [`Currency`].
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pen => "S/",
        }
    }
}

mod serde {
    //! Module providing integration with [`serde`] crate.
    //!
    //! [`Money`] travels as a JSON number.

    use std::{fmt, str::FromStr as _};

    use rust_decimal::{
        prelude::{FromPrimitive as _, ToPrimitive as _},
        Decimal,
    };
    use serde::{
        de::{self, Visitor},
        ser, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::Money;

    impl Serialize for Money {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let amount = self.0.to_f64().ok_or_else(|| {
                ser::Error::custom("`Money` amount is not representable")
            })?;
            serializer.serialize_f64(amount)
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(MoneyVisitor)
        }
    }

    /// [`Visitor`] accepting numbers and numeric strings.
    struct MoneyVisitor;

    impl Visitor<'_> for MoneyVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a monetary amount")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Money(Decimal::from(v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Money(Decimal::from(v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Decimal::from_f64(v)
                .map(|d| Money(d.normalize()))
                .ok_or_else(|| E::custom(format!("invalid amount: {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Decimal::from_str(v)
                .map(Money)
                .map_err(|e| E::custom(format!("invalid amount `{v}`: {e}")))
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn money(s: &str) -> Money {
        Money::new(s.parse::<Decimal>().unwrap())
    }

    #[test]
    fn displays_in_peruvian_locale() {
        assert_eq!(money("1234.56").to_string(), "S/ 1,234.56");
        assert_eq!(money("150").to_string(), "S/ 150.00");
        assert_eq!(money("0.5").to_string(), "S/ 0.50");
        assert_eq!(money("1234567.891").to_string(), "S/ 1,234,567.89");
        assert_eq!(money("-200").to_string(), "-S/ 200.00");
        assert_eq!(money("0.004").to_string(), "S/ 0.00");
        assert_eq!(money("-0.004").to_string(), "S/ 0.00");
        assert_eq!(money("2.675").to_string(), "S/ 2.68");
    }

    #[test]
    fn display_does_not_alter_amount() {
        let m = money("10.005");
        _ = m.to_string();
        assert_eq!(m.amount(), "10.005".parse::<Decimal>().unwrap());
    }

    #[test]
    fn parses_localized_back() {
        for s in ["1234.56", "150", "0.5", "-200", "1234567.89"] {
            let m = money(s);
            assert_eq!(Money::parse_localized(&m.to_string()).unwrap(), m);
        }

        assert_eq!(Money::parse_localized("150").unwrap(), money("1.50"));
        assert_eq!(Money::parse_localized("S/ 1,2").unwrap(), money("0.12"));
        assert!(Money::parse_localized("S/ ").is_err());
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("150").unwrap(), money("150"));
        assert_eq!(Money::from_str("150.5").unwrap(), money("150.5"));
        assert_eq!(Money::from_str("S/ 1,234.56").unwrap(), money("1234.56"));
        assert_eq!(Money::from_str("-S/ 20.00").unwrap(), money("-20"));

        assert!(Money::from_str("S/").is_err());
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn arithmetic() {
        let total: Money =
            [money("150") * 2, -(money("100") * 1)].into_iter().sum();
        assert_eq!(total, money("200"));
        assert!((money("10") - money("25")).is_negative());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn checked_arithmetic_detects_overflow() {
        let max = Money::new(Decimal::MAX);

        assert_eq!(money("150").checked_mul(2), Some(money("300")));
        assert_eq!(max.checked_mul(2), None);
        assert_eq!(max.checked_add(money("1")), None);
        assert_eq!((-max).checked_sub(money("1")), None);
        assert_eq!(money("-7.5").abs(), money("7.5"));
    }

    #[test]
    fn serde_as_number() {
        let m: Money = serde_json::from_str("150.5").unwrap();
        assert_eq!(m, money("150.5"));

        let m: Money = serde_json::from_str("100").unwrap();
        assert_eq!(m, money("100"));

        let m: Money = serde_json::from_str("\"12.30\"").unwrap();
        assert_eq!(m, money("12.3"));

        assert_eq!(serde_json::to_string(&money("12.5")).unwrap(), "12.5");
    }
}
