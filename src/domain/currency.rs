//! Currency
//!
//! Closed set of currencies the ledger supports. Each variant carries its
//! display metadata, its digital decimal precision, and whether physical
//! cash settlement must be rounded to whole units.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro
    Eur,
    /// US dollar
    Usd,
    /// Argentine peso
    Ars,
}

impl Currency {
    /// All supported currencies, in declaration order.
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Ars];

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Ars => "ARS",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Eur => "Euro",
            Currency::Usd => "US Dollar",
            Currency::Ars => "Peso Argentino",
        }
    }

    /// Display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "US$",
            Currency::Ars => "$",
        }
    }

    /// Number of decimal digits for digital amounts.
    pub fn decimals(&self) -> u32 {
        match self {
            Currency::Eur | Currency::Usd | Currency::Ars => 2,
        }
    }

    /// Whether physical-cash settlement rounds to whole units.
    /// Peso cash has no circulating sub-unit coinage.
    pub fn cash_rounded(&self) -> bool {
        matches!(self, Currency::Ars)
    }

    /// Parse an ISO code.
    pub fn from_code(code: &str) -> Result<Self, DomainError> {
        match code {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "ARS" => Ok(Currency::Ars),
            other => Err(DomainError::InvalidFormat {
                expected: "one of EUR, USD, ARS",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
