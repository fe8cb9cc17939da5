//! Exchange Rate
//!
//! Directional (source currency → target currency, rate) pair used to
//! convert Money. Rates are normalized to 8 fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::DomainError;

/// Fractional digits a rate is normalized to.
pub const RATE_SCALE: u32 = 8;

/// A validated, directional exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawExchangeRate", try_from = "RawExchangeRate")]
pub struct ExchangeRate {
    source: Currency,
    target: Currency,
    rate: Decimal,
}

/// Wire shape. Deserialization routes back through [`ExchangeRate::new`].
#[derive(Serialize, Deserialize)]
#[serde(rename = "ExchangeRate")]
struct RawExchangeRate {
    source: Currency,
    target: Currency,
    rate: Decimal,
}

impl From<ExchangeRate> for RawExchangeRate {
    fn from(rate: ExchangeRate) -> Self {
        Self {
            source: rate.source,
            target: rate.target,
            rate: rate.rate,
        }
    }
}

impl TryFrom<RawExchangeRate> for ExchangeRate {
    type Error = DomainError;

    fn try_from(raw: RawExchangeRate) -> Result<Self, Self::Error> {
        ExchangeRate::new(raw.source, raw.target, raw.rate)
    }
}

impl ExchangeRate {
    /// Create a new rate with validation.
    ///
    /// # Errors
    /// - `DomainError::InvalidRate` if `rate <= 0`
    /// - `DomainError::SameCurrency` if `source == target`
    pub fn new(source: Currency, target: Currency, rate: Decimal) -> Result<Self, DomainError> {
        if rate <= Decimal::ZERO {
            return Err(DomainError::InvalidRate(rate));
        }
        if source == target {
            return Err(DomainError::SameCurrency(source));
        }

        Ok(Self {
            source,
            target,
            rate: rate.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointNearestEven),
        })
    }

    /// Currency this rate converts from.
    pub fn source(&self) -> Currency {
        self.source
    }

    /// Currency this rate converts to.
    pub fn target(&self) -> Currency {
        self.target
    }

    /// The normalized rate.
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// The opposite direction: currencies swapped, rate inverted and
    /// re-normalized to 8 fractional digits.
    pub fn invert(&self) -> Result<ExchangeRate, DomainError> {
        let inverse = Decimal::ONE
            .checked_div(self.rate)
            .ok_or(DomainError::InvalidRate(self.rate))?;
        ExchangeRate::new(self.target, self.source, inverse)
    }

    /// True if this rate converts from `source` to `target`, in that
    /// direction.
    pub fn applies_to(&self, source: Currency, target: Currency) -> bool {
        self.source == source && self.target == target
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.source, self.target, self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_non_positive_rate_rejected() {
        assert!(matches!(
            ExchangeRate::new(Currency::Eur, Currency::Usd, Decimal::ZERO),
            Err(DomainError::InvalidRate(_))
        ));
        assert!(matches!(
            ExchangeRate::new(Currency::Eur, Currency::Usd, dec!(-1.1)),
            Err(DomainError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_same_currency_rejected() {
        let result = ExchangeRate::new(Currency::Usd, Currency::Usd, dec!(1));
        assert!(matches!(result, Err(DomainError::SameCurrency(Currency::Usd))));
    }

    #[test]
    fn test_rate_normalized_to_eight_digits() {
        let rate = ExchangeRate::new(Currency::Eur, Currency::Usd, dec!(1.123456789)).unwrap();
        assert_eq!(rate.rate(), dec!(1.12345679));
    }

    #[test]
    fn test_invert_swaps_direction() {
        let rate = ExchangeRate::new(Currency::Eur, Currency::Usd, dec!(1.25)).unwrap();
        let inverted = rate.invert().unwrap();

        assert_eq!(inverted.source(), Currency::Usd);
        assert_eq!(inverted.target(), Currency::Eur);
        assert_eq!(inverted.rate(), dec!(0.8));
    }

    #[test]
    fn test_double_inversion_within_tolerance() {
        let rate = ExchangeRate::new(Currency::Usd, Currency::Ars, dec!(1043.75321)).unwrap();
        let round_trip = rate.invert().unwrap().invert().unwrap();

        assert_eq!(round_trip.source(), Currency::Usd);
        assert_eq!(round_trip.target(), Currency::Ars);

        // 8-digit rounding of the inverse is amplified by rate² on the
        // way back, so the tolerance scales with the rate
        let tolerance = dec!(0.01);
        let diff = (round_trip.rate() - rate.rate()).abs();
        assert!(diff <= tolerance, "diff {diff} exceeds tolerance");
    }

    #[test]
    fn test_deserialization_rejects_invalid_rate() {
        let negative: Result<ExchangeRate, _> = serde_json::from_str(
            r#"{"source":"EUR","target":"USD","rate":"-1.08"}"#,
        );
        assert!(negative.is_err());

        let same: Result<ExchangeRate, _> = serde_json::from_str(
            r#"{"source":"USD","target":"USD","rate":"1"}"#,
        );
        assert!(same.is_err());

        let rate = ExchangeRate::new(Currency::Eur, Currency::Usd, dec!(1.08)).unwrap();
        let json = serde_json::to_string(&rate).unwrap();
        let back: ExchangeRate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rate);
    }

    #[test]
    fn test_applies_to_is_directional() {
        let rate = ExchangeRate::new(Currency::Eur, Currency::Usd, dec!(1.08)).unwrap();

        assert!(rate.applies_to(Currency::Eur, Currency::Usd));
        assert!(!rate.applies_to(Currency::Usd, Currency::Eur));
        assert!(!rate.applies_to(Currency::Eur, Currency::Ars));
    }
}
