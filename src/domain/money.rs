//! Money
//!
//! Immutable (amount, currency) value type with safe arithmetic.
//! All operations validate currencies and produce a fresh value; amounts
//! are kept at a high internal scale with banker's rounding, and never go
//! negative.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::exchange_rate::ExchangeRate;
use super::DomainError;

/// Internal scale for stored amounts (fractional digits).
pub const INTERNAL_SCALE: u32 = 10;

/// A validated monetary value.
///
/// # Invariants
/// - `amount >= 0` always; construction from a negative amount fails
/// - amount is normalized to [`INTERNAL_SCALE`] fractional digits using
///   round-half-to-even
///
/// Two values are equal iff their currencies match and their amounts agree
/// at the currency's native precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "RawMoney", try_from = "RawMoney")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

/// Wire shape. Deserialization routes back through [`Money::new`] so a
/// persisted record cannot smuggle in a negative or unnormalized amount.
#[derive(Serialize, Deserialize)]
#[serde(rename = "Money")]
struct RawMoney {
    amount: Decimal,
    currency: Currency,
}

impl From<Money> for RawMoney {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount,
            currency: money.currency,
        }
    }
}

impl TryFrom<RawMoney> for Money {
    type Error = DomainError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Money::new(raw.amount, raw.currency)
    }
}

impl Money {
    /// Create a new Money with validation.
    ///
    /// # Errors
    /// `DomainError::InvalidAmount` if `amount < 0`.
    pub fn new(amount: Decimal, currency: Currency) -> Result<Self, DomainError> {
        if amount < Decimal::ZERO {
            return Err(DomainError::InvalidAmount(format!(
                "amount must not be negative (got {amount})"
            )));
        }

        Ok(Self {
            amount: Self::rescale(amount),
            currency,
        })
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// The normalized amount, at the internal scale.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The amount re-scaled to the currency's native decimal digits.
    pub fn native_amount(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(self.currency.decimals(), RoundingStrategy::MidpointNearestEven)
    }

    /// The currency of this value.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add another value of the same currency.
    pub fn add(&self, other: &Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or(DomainError::Overflow)?;
        Money::new(sum, self.currency)
    }

    /// Subtract another value of the same currency.
    ///
    /// # Errors
    /// `DomainError::InsufficientFunds` if the result would be negative.
    pub fn subtract(&self, other: &Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(other)?;
        if self.amount < other.amount {
            return Err(DomainError::insufficient_funds(other.amount, self.amount));
        }
        Money::new(self.amount - other.amount, self.currency)
    }

    /// Multiply by a non-negative scalar.
    pub fn multiply(&self, scalar: Decimal) -> Result<Money, DomainError> {
        if scalar < Decimal::ZERO {
            return Err(DomainError::InvalidAmount(format!(
                "multiplier must not be negative (got {scalar})"
            )));
        }
        let product = self
            .amount
            .checked_mul(scalar)
            .ok_or(DomainError::Overflow)?;
        Money::new(product, self.currency)
    }

    /// Divide by a strictly positive scalar.
    pub fn divide(&self, scalar: Decimal) -> Result<Money, DomainError> {
        if scalar <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount(format!(
                "divisor must be positive (got {scalar})"
            )));
        }
        let quotient = self
            .amount
            .checked_div(scalar)
            .ok_or(DomainError::Overflow)?;
        Money::new(quotient, self.currency)
    }

    /// `self > other`, currencies must match.
    pub fn gt(&self, other: &Money) -> Result<bool, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    /// `self >= other`, currencies must match.
    pub fn ge(&self, other: &Money) -> Result<bool, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount >= other.amount)
    }

    /// `self < other`, currencies must match.
    pub fn lt(&self, other: &Money) -> Result<bool, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount < other.amount)
    }

    /// `self <= other`, currencies must match.
    pub fn le(&self, other: &Money) -> Result<bool, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount <= other.amount)
    }

    /// True if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// True if the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Convert to the rate's target currency.
    ///
    /// The result is re-scaled to the target currency's native decimals,
    /// or to whole units when the target requires cash rounding.
    ///
    /// # Errors
    /// `DomainError::RateMismatch` unless `rate.source() == self.currency`.
    pub fn convert(&self, rate: &ExchangeRate) -> Result<Money, DomainError> {
        if rate.source() != self.currency {
            return Err(DomainError::RateMismatch {
                rate_source: rate.source(),
                money_currency: self.currency,
            });
        }

        let target = rate.target();
        let raw = self
            .amount
            .checked_mul(rate.rate())
            .ok_or(DomainError::Overflow)?;
        let decimals = if target.cash_rounded() {
            0
        } else {
            target.decimals()
        };
        let converted = raw.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);

        Money::new(converted, target)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::currency_mismatch(
                self.currency,
                other.currency,
            ));
        }
        Ok(())
    }

    fn rescale(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(INTERNAL_SCALE, RoundingStrategy::MidpointNearestEven)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.native_amount() == other.native_amount()
    }
}

impl Eq for Money {}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency.symbol(), self.native_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eur(amount: Decimal) -> Money {
        Money::new(amount, Currency::Eur).unwrap()
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = Money::new(dec!(-0.01), Currency::Usd);
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn test_construction_normalizes_to_internal_scale() {
        // 12 fractional digits, midpoint rounds to even at digit 10
        let money = Money::new(dec!(1.000000000050), Currency::Eur).unwrap();
        assert_eq!(money.amount(), dec!(1.0000000000));
    }

    #[test]
    fn test_add_same_currency() {
        let sum = eur(dec!(10.50)).add(&eur(dec!(4.25))).unwrap();
        assert_eq!(sum, eur(dec!(14.75)));
    }

    #[test]
    fn test_add_zero_is_identity() {
        let m = eur(dec!(99.99));
        assert_eq!(m.add(&Money::zero(Currency::Eur)).unwrap(), m);
    }

    #[test]
    fn test_subtract_self_is_zero() {
        let m = eur(dec!(42.42));
        assert!(m.subtract(&m).unwrap().is_zero());
    }

    #[test]
    fn test_subtract_below_zero_fails() {
        let result = eur(dec!(5)).subtract(&eur(dec!(5.01)));
        assert!(matches!(result, Err(DomainError::InsufficientFunds { .. })));
    }

    #[test]
    fn test_cross_currency_arithmetic_fails_for_every_pair() {
        for a in Currency::ALL {
            for b in Currency::ALL {
                if a == b {
                    continue;
                }
                let x = Money::new(dec!(1), a).unwrap();
                let y = Money::new(dec!(1), b).unwrap();
                assert!(matches!(
                    x.add(&y),
                    Err(DomainError::CurrencyMismatch { .. })
                ));
                assert!(matches!(
                    x.subtract(&y),
                    Err(DomainError::CurrencyMismatch { .. })
                ));
                assert!(matches!(
                    x.gt(&y),
                    Err(DomainError::CurrencyMismatch { .. })
                ));
            }
        }
    }

    #[test]
    fn test_multiply_and_divide() {
        let m = eur(dec!(10));
        assert_eq!(m.multiply(dec!(2.5)).unwrap(), eur(dec!(25)));
        assert_eq!(m.divide(dec!(4)).unwrap(), eur(dec!(2.5)));
    }

    #[test]
    fn test_multiply_negative_scalar_fails() {
        let result = eur(dec!(10)).multiply(dec!(-1));
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn test_divide_by_zero_fails() {
        let result = eur(dec!(10)).divide(Decimal::ZERO);
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn test_comparisons() {
        let small = eur(dec!(1));
        let big = eur(dec!(2));

        assert!(big.gt(&small).unwrap());
        assert!(big.ge(&big).unwrap());
        assert!(small.lt(&big).unwrap());
        assert!(small.le(&small).unwrap());
    }

    #[test]
    fn test_equality_at_native_precision() {
        // Differ only beyond the currency's 2 decimals
        let a = eur(dec!(10.001));
        let b = eur(dec!(10.002));
        assert_eq!(a, b);

        let c = eur(dec!(10.01));
        assert_ne!(a, c);
    }

    #[test]
    fn test_equality_requires_same_currency() {
        let e = Money::new(dec!(10), Currency::Eur).unwrap();
        let u = Money::new(dec!(10), Currency::Usd).unwrap();
        assert_ne!(e, u);
    }

    #[test]
    fn test_convert_rescales_to_target_decimals() {
        let rate = ExchangeRate::new(Currency::Eur, Currency::Usd, dec!(1.0856)).unwrap();
        let converted = eur(dec!(100)).convert(&rate).unwrap();

        assert_eq!(converted.currency(), Currency::Usd);
        assert_eq!(converted.amount(), dec!(108.56));
    }

    #[test]
    fn test_convert_to_peso_rounds_to_whole_units() {
        let rate = ExchangeRate::new(Currency::Usd, Currency::Ars, dec!(1043.75)).unwrap();
        let converted = Money::new(dec!(1.5), Currency::Usd)
            .unwrap()
            .convert(&rate)
            .unwrap();

        assert_eq!(converted.currency(), Currency::Ars);
        // 1565.625 rounds to a whole peso
        assert_eq!(converted.amount(), dec!(1566));
    }

    #[test]
    fn test_convert_wrong_direction_fails() {
        let rate = ExchangeRate::new(Currency::Usd, Currency::Eur, dec!(0.92)).unwrap();
        let result = eur(dec!(100)).convert(&rate);
        assert!(matches!(result, Err(DomainError::RateMismatch { .. })));
    }

    #[test]
    fn test_deserialization_rejects_negative_amount() {
        let result: Result<Money, _> =
            serde_json::from_str(r#"{"amount":"-5","currency":"USD"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialization_normalizes_like_construction() {
        let money: Money =
            serde_json::from_str(r#"{"amount":"1.000000000050","currency":"EUR"}"#).unwrap();
        assert_eq!(money.amount(), dec!(1.0000000000));
    }

    #[test]
    fn test_serde_round_trip_preserves_value_and_currency() {
        let m = Money::new(dec!(1234.5678), Currency::Usd).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();

        assert_eq!(back.amount(), m.amount());
        assert_eq!(back.currency(), Currency::Usd);
        assert!(json.contains("USD"));
    }
}
