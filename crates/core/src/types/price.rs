//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are always non-negative. Arithmetic on prices (line totals, cart
//! totals) stays in `Decimal` so `10.00 × 2 + 5.50` is exactly `25.50`.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing or parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input contained no digits after cleaning.
    #[error("price is empty")]
    Empty,
    /// The cleaned input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// Above [`Price::MAX_LISTED`].
    #[error("price {0} exceeds the largest listable price")]
    TooLarge(Decimal),
}

/// A non-negative monetary amount in the store currency.
///
/// Serializes as a decimal string (`"19.99"`) and accepts either a string
/// or a JSON number when deserializing.
///
/// ```
/// use rust_decimal::Decimal;
/// use techpulse_core::Price;
///
/// let price = Price::parse_text("₹1,299.00").unwrap();
/// assert_eq!(price.amount(), Decimal::new(129_900, 2));
/// assert_eq!(price.to_string(), "$1299.00");
///
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest price a product may carry: 1,000,000,000.
    pub const MAX_LISTED: Self = Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Parse a human-formatted price such as `"$1,299.99"`, `"₹ 499"` or
    /// `"Rs. 1,299/-"`.
    ///
    /// Everything before the first digit is treated as a currency prefix and
    /// everything after the last digit as a suffix. A `-` in the prefix
    /// negates the amount, and a `.` ending a non-alphabetic prefix is the
    /// decimal point (`"$.99"`). Between the first and last digit only
    /// digits, `.`, `,` and spaces are allowed; commas and spaces are
    /// dropped as thousands separators.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no digits, the number is malformed,
    /// negative, or above [`Self::MAX_LISTED`].
    pub fn parse_text(input: &str) -> Result<Self, PriceError> {
        let invalid = || PriceError::Invalid(input.to_owned());

        let first = input.find(|c: char| c.is_ascii_digit()).ok_or(PriceError::Empty)?;
        let last = input
            .rfind(|c: char| c.is_ascii_digit())
            .ok_or(PriceError::Empty)?;
        let prefix = input.get(..first).ok_or_else(invalid)?.trim_end();
        let body = input.get(first..=last).ok_or_else(invalid)?;

        let mut number = String::with_capacity(body.len() + 2);
        if prefix.contains('-') {
            number.push('-');
        }
        if let Some(head) = prefix.strip_suffix('.')
            && !head.chars().last().is_some_and(char::is_alphabetic)
        {
            number.push_str("0.");
        }
        for c in body.chars() {
            match c {
                '0'..='9' | '.' => number.push(c),
                ',' | ' ' | '\u{a0}' | '\u{202f}' => {}
                _ => return Err(invalid()),
            }
        }

        let amount = Decimal::from_str(&number).map_err(|_| invalid())?;
        Self::listed(amount)
    }

    /// Parse a JSON number's text, which may use exponent notation
    /// (`"1.5e16"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a number, or the amount is
    /// negative or above [`Self::MAX_LISTED`].
    pub fn parse_number(text: &str) -> Result<Self, PriceError> {
        let amount = if text.contains(['e', 'E']) {
            Decimal::from_scientific(text)
        } else {
            Decimal::from_str(text)
        }
        .map_err(|_| PriceError::Invalid(text.to_owned()))?;
        Self::listed(amount)
    }

    /// A price that may be listed on a product.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is negative or above [`Self::MAX_LISTED`].
    pub fn listed(amount: Decimal) -> Result<Self, PriceError> {
        let price = Self::new(amount)?;
        if price > Self::MAX_LISTED {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(price)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The total for `quantity` units at this price.
    ///
    /// Saturates at `Decimal::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_text(s)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at `Decimal::MAX`.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_strips_symbols_and_separators() {
        assert_eq!(
            Price::parse_text("$1,299.99").expect("parse").amount(),
            Decimal::new(129_999, 2)
        );
        assert_eq!(
            Price::parse_text(" ₹ 499 ").expect("parse").amount(),
            Decimal::from(499)
        );
        assert_eq!(
            Price::parse_text("USD 12.50").expect("parse").amount(),
            Decimal::new(1250, 2)
        );
    }

    #[test]
    fn test_parse_text_rejects_garbage() {
        assert_eq!(Price::parse_text("free"), Err(PriceError::Empty));
        assert!(matches!(
            Price::parse_text("1.2.3"),
            Err(PriceError::Invalid(_))
        ));
        assert!(matches!(
            Price::parse_text("-5.00"),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_parse_text_handles_rupee_prefixes_and_suffixes() {
        for text in ["Rs. 1,299", "Rs.1,299", "rs 1,299/-", "INR 1,299.00", "1,299 INR"] {
            assert_eq!(
                Price::parse_text(text).expect(text).amount(),
                Decimal::from(1299),
                "{text}"
            );
        }
        assert_eq!(
            Price::parse_text("$.99").expect("leading point").amount(),
            Decimal::new(99, 2)
        );
        assert_eq!(
            Price::parse_text("1 29 999").expect("spaced").amount(),
            Decimal::from(129_999)
        );
    }

    #[test]
    fn test_parse_text_rejects_letters_inside_number() {
        assert!(matches!(
            Price::parse_text("12abc34"),
            Err(PriceError::Invalid(_))
        ));
        assert!(matches!(
            Price::parse_text("1.5e16"),
            Err(PriceError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_number_reads_exponent_form() {
        assert_eq!(
            Price::parse_number("1.5e3").expect("exponent").amount(),
            Decimal::from(1500)
        );
        assert_eq!(
            Price::parse_number("19.99").expect("plain").amount(),
            Decimal::new(1999, 2)
        );
        assert!(matches!(
            Price::parse_number("1.5e16"),
            Err(PriceError::TooLarge(_))
        ));
    }

    #[test]
    fn test_listed_prices_are_bounded() {
        assert!(Price::listed(Decimal::from(1_000_000_000)).is_ok());
        assert!(matches!(
            Price::listed(Decimal::from(1_000_000_001)),
            Err(PriceError::TooLarge(_))
        ));
        assert!(matches!(
            Price::parse_text("$2,000,000,000"),
            Err(PriceError::TooLarge(_))
        ));
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let max = Price::new(Decimal::MAX).expect("price");
        assert_eq!(max.times(2).amount(), Decimal::MAX);
        assert_eq!((max + max).amount(), Decimal::MAX);
        let total: Price = [max, max, max].into_iter().sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }

    #[test]
    fn test_zero_is_allowed() {
        let price = Price::parse_text("-0.00").expect("zero");
        assert_eq!(price, Price::ZERO);
    }

    #[test]
    fn test_times_and_sum() {
        let a = Price::from_cents(1000).expect("price");
        let b = Price::from_cents(550).expect("price");
        let total: Price = [a.times(2), b.times(1)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::new(2550, 2));
        assert_eq!(total.to_string(), "$25.50");
    }

    #[test]
    fn test_serde_accepts_number_and_string() {
        let from_number: Price = serde_json::from_str("19.99").expect("number");
        let from_string: Price = serde_json::from_str("\"19.99\"").expect("string");
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<Price>("-1").is_err());
    }
}
