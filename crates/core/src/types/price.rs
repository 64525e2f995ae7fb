//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog API serves prices as bare JSON numbers, so `Price` serializes
//! to its amount and deserializes from either a bare number or a full
//! `{amount, currencyCode}` object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PriceRepr", into = "Decimal")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rubles, not kopecks).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "₽199.00"), rounded to 2 decimal places.
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.amount
    }
}

/// Wire forms a price may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Amount(Decimal),
    Full {
        amount: Decimal,
        #[serde(rename = "currencyCode", default)]
        currency_code: CurrencyCode,
    },
}

impl From<PriceRepr> for Price {
    fn from(repr: PriceRepr) -> Self {
        match repr {
            PriceRepr::Amount(amount) => Self::new(amount, CurrencyCode::default()),
            PriceRepr::Full {
                amount,
                currency_code,
            } => Self::new(amount, currency_code),
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    RUB,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol used when rendering prices.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::RUB => "₽",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }
}
