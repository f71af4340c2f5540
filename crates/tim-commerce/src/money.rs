//! Money type and the storefront currency formatter.
//!
//! Amounts are kept in minor units (ngwee for Kwacha) so that cart totals
//! never accumulate floating-point error. Display strings group thousands
//! and always show two decimals: `K1,234.50`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CommerceError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Zambian Kwacha.
    #[default]
    ZMW,
    USD,
    EUR,
    GBP,
    ZAR,
}

impl Currency {
    /// Get the currency code (e.g., "ZMW").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ZMW => "ZMW",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::ZAR => "ZAR",
        }
    }

    /// Get the currency symbol (e.g., "K").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::ZMW => "K",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::ZAR => "R",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "ZMW" => Some(Currency::ZMW),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "ZAR" => Some(Currency::ZAR),
            _ => None,
        }
    }

    /// Format a decimal amount, e.g. `1234.5` -> `"K1,234.50"`.
    ///
    /// Negative amounts put the sign after the symbol (`K-0.50`), including
    /// ones that round to zero. Non-finite input never panics; it renders as
    /// the symbol followed by `NaN`, `Infinity` or `-Infinity`.
    pub fn format(&self, amount: f64) -> String {
        let symbol = self.symbol();
        if amount.is_nan() {
            return format!("{}NaN", symbol);
        }
        if amount.is_infinite() {
            let sign = if amount < 0.0 { "-" } else { "" };
            return format!("{}{}Infinity", symbol, sign);
        }

        let fixed = format!("{:.2}", amount.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        // Negative amounts keep their sign even when they round to zero.
        let sign = if amount < 0.0 { "-" } else { "" };
        format!("{}{}{}.{}", symbol, sign, group_thousands(whole), fraction)
    }

    /// Format raw text such as a form value or a stored price.
    ///
    /// Numeric text is formatted like [`Currency::format`]; anything else is
    /// returned behind the symbol unchanged.
    pub fn format_raw(&self, text: &str) -> String {
        match text.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => self.format(amount),
            _ => format!("{}{}", self.symbol(), text),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| CommerceError::UnknownCurrency(s.to_string()))
    }
}

/// Format an amount in the storefront currency (Kwacha).
pub fn format(amount: f64) -> String {
    Currency::default().format(amount)
}

/// Format raw text in the storefront currency (Kwacha).
pub fn format_raw(text: &str) -> String {
    Currency::default().format_raw(text)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a whole-unit Kwacha amount, as used by catalog prices.
    ///
    /// ```
    /// use tim_commerce::money::Money;
    /// assert_eq!(Money::kwacha(1200).amount_cents, 120_000);
    /// ```
    pub fn kwacha(amount: i64) -> Self {
        Self::new(amount.saturating_mul(100), Currency::ZMW)
    }

    /// Create a Money value from a decimal amount.
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * 100.0).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "K1,200.00").
    pub fn display(&self) -> String {
        self.currency.format(self.to_decimal())
    }

    /// Try to add another Money value, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        ))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        ))
    }

    /// Multiply by a quantity.
    pub fn multiply(&self, factor: u32) -> Money {
        Money::new(
            self.amount_cents.saturating_mul(i64::from(factor)),
            self.currency,
        )
    }

    /// Sum Money values, failing on the first currency mismatch.
    pub fn sum<'a>(
        iter: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.into_iter().try_fold(Money::zero(currency), |acc, m| {
            acc.try_add(m).ok_or_else(|| CommerceError::CurrencyMismatch {
                expected: currency.to_string(),
                got: m.currency.to_string(),
            })
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter storing Kwacha amounts as plain JSON numbers (`1200`,
/// `19.99`), the shape the storefront pages read and write.
pub mod as_major {
    use super::{Currency, Money};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        if money.amount_cents % 100 == 0 {
            serializer.serialize_i64(money.amount_cents / 100)
        } else {
            serializer.serialize_f64(money.to_decimal())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("price must be a finite number"));
        }
        Ok(Money::from_decimal(amount, Currency::ZMW))
    }

    /// Same as the parent module for optional amounts (`null` when absent).
    pub mod option {
        use super::{Currency, Money};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => super::serialize(m, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            let amount = Option::<f64>::deserialize(deserializer)?;
            match amount {
                Some(a) if a.is_finite() => Ok(Some(Money::from_decimal(a, Currency::ZMW))),
                Some(_) => Err(serde::de::Error::custom("price must be a finite number")),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format(1234.5), "K1,234.50");
        assert_eq!(format(1_234_567.0), "K1,234,567.00");
        assert_eq!(format(950.0), "K950.00");
        assert_eq!(format(0.0), "K0.00");
    }

    #[test]
    fn test_format_rounds_to_two_decimals() {
        assert_eq!(format(19.999), "K20.00");
        assert_eq!(format(0.126), "K0.13");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format(-1234.5), "K-1,234.50");
        assert_eq!(format(-0.001), "K-0.00");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format(f64::NAN), "KNaN");
        assert_eq!(format(f64::INFINITY), "KInfinity");
        assert_eq!(format(f64::NEG_INFINITY), "K-Infinity");
    }

    #[test]
    fn test_format_raw() {
        assert_eq!(format_raw("2500"), "K2,500.00");
        assert_eq!(format_raw(" 12.5 "), "K12.50");
        assert_eq!(format_raw("free"), "Kfree");
        assert_eq!(format_raw("inf"), "Kinf");
    }

    #[test]
    fn test_other_currency_symbol() {
        assert_eq!(Currency::USD.format(49.99), "$49.99");
        assert_eq!(Currency::from_code("zmw"), Some(Currency::ZMW));
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::kwacha(1200).display(), "K1,200.00");
        assert_eq!(Money::new(1999, Currency::ZMW).to_string(), "K19.99");
    }

    #[test]
    fn test_money_sum_and_multiply() {
        let lines = [Money::kwacha(100).multiply(2), Money::kwacha(50)];
        let total = Money::sum(&lines, Currency::ZMW).unwrap();
        assert_eq!(total, Money::kwacha(250));
    }

    #[test]
    fn test_money_sum_currency_mismatch() {
        let lines = [Money::kwacha(1), Money::new(100, Currency::USD)];
        assert!(matches!(
            Money::sum(&lines, Currency::ZMW),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_as_major_shapes() {
        #[derive(Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_major")]
            price: Money,
            #[serde(with = "as_major::option", default)]
            was: Option<Money>,
        }

        let json = serde_json::to_string(&Row {
            price: Money::kwacha(100),
            was: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"price":100,"was":null}"#);

        let row: Row = serde_json::from_str(r#"{"price":19.99}"#).unwrap();
        assert_eq!(row.price.amount_cents, 1999);
        assert!(row.was.is_none());
    }
}
