//! Prices.
//!
//! The feed and the stored cart carry plain decimal numbers. Amounts keep
//! that number unchanged so ordering and the stored cart see the real
//! price; display rounds to minor units (fils, halalas, cents).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Minor units per major unit. Every supported currency uses two places.
const MINOR_PER_MAJOR: i64 = 100;

/// Currency the catalog is priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// UAE dirham.
    #[default]
    AED,
    /// Saudi riyal.
    SAR,
    /// Qatari riyal.
    QAR,
    USD,
    EUR,
}

impl Currency {
    /// ISO 4217 code, as printed before amounts.
    pub fn code(self) -> &'static str {
        match self {
            Currency::AED => "AED",
            Currency::SAR => "SAR",
            Currency::QAR => "QAR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AED" => Ok(Currency::AED),
            "SAR" => Ok(Currency::SAR),
            "QAR" => Ok(Currency::QAR),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount in a currency.
///
/// Holds the amount exactly as the feed states it; rounding to minor units
/// happens only for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Money {
    amount: f64,
    pub currency: Currency,
}

impl Money {
    /// Wrap a decimal amount as found in JSON.
    ///
    /// ```
    /// use atelier_commerce::money::{Currency, Money};
    /// assert_eq!(Money::from_major(49.99, Currency::AED).minor_units(), 4999);
    /// ```
    pub fn from_major(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// The amount as given, for JSON output and comparisons.
    pub fn to_major(self) -> f64 {
        self.amount
    }

    /// Amount rounded to the nearest minor unit.
    pub fn minor_units(self) -> i64 {
        (self.amount * MINOR_PER_MAJOR as f64).round() as i64
    }

    /// Order by exact amount; currencies are not compared.
    pub fn cmp_amount(&self, other: &Money) -> Ordering {
        self.amount.total_cmp(&other.amount)
    }

    /// Amount without the currency code: "100" when whole, else "99.50".
    pub fn display_amount(self) -> String {
        let minor = self.minor_units();
        let whole = minor / MINOR_PER_MAJOR;
        let fraction = (minor % MINOR_PER_MAJOR).abs();
        if fraction == 0 {
            whole.to_string()
        } else if minor < 0 && whole == 0 {
            format!("-0.{:02}", fraction)
        } else {
            format!("{}.{:02}", whole, fraction)
        }
    }

    /// Amount with the currency code, e.g. "AED 100".
    pub fn display(self) -> String {
        format!("{} {}", self.currency.code(), self.display_amount())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_units_round() {
        assert_eq!(Money::from_major(100.0, Currency::AED).minor_units(), 10000);
        assert_eq!(Money::from_major(0.1 + 0.2, Currency::AED).minor_units(), 30);
        assert_eq!(Money::from_major(65.5, Currency::AED).to_major(), 65.5);
    }

    #[test]
    fn test_sub_minor_amounts_are_kept() {
        let high = Money::from_major(10.004, Currency::AED);
        let low = Money::from_major(10.001, Currency::AED);
        assert_eq!(high.to_major(), 10.004);
        assert_eq!(low.cmp_amount(&high), Ordering::Less);
        assert_eq!(high.display(), "AED 10");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_major(100.0, Currency::AED).display(), "AED 100");
        assert_eq!(Money::from_major(99.5, Currency::AED).display(), "AED 99.50");
        assert_eq!(Money::from_major(0.05, Currency::SAR).to_string(), "SAR 0.05");
        assert_eq!(Money::from_major(-2.5, Currency::AED).display_amount(), "-2.50");
        assert_eq!(Money::from_major(-0.05, Currency::AED).display_amount(), "-0.05");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!("aed".parse::<Currency>(), Ok(Currency::AED));
        assert_eq!(" QAR ".parse::<Currency>(), Ok(Currency::QAR));
        assert!("XYZ".parse::<Currency>().is_err());
        assert_eq!(serde_json::to_string(&Currency::SAR).unwrap(), "\"SAR\"");
    }
}
