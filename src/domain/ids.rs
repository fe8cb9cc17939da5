//! Identifiers
//!
//! Validated, self-describing identifier types. Construction only goes
//! through validating factories; the raw string is never accepted
//! unchecked. New identifiers are synthesized from an injected
//! [`NumberSource`] so generation is deterministic under test, and account
//! check digits go through a pluggable [`CheckDigitScheme`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::DomainError;

/// Source of sequence numbers for identifier generation.
///
/// Production code injects [`ThreadRngSource`]; tests inject a fixed or
/// counting source.
pub trait NumberSource {
    /// Next number in `0..bound`. `bound` is always > 0.
    fn next_below(&mut self, bound: u64) -> u64;
}

/// [`NumberSource`] backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl NumberSource for ThreadRngSource {
    fn next_below(&mut self, bound: u64) -> u64 {
        use rand::Rng;
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Check-digit algorithm for account numbers.
///
/// Numbers already in circulation were issued without verifiable digits,
/// so [`CuentaId::parse`] uses [`Permissive`]; strict call sites pass
/// [`Luhn2`] to [`CuentaId::parse_with`]. Generation always computes real
/// digits with the scheme it is given.
pub trait CheckDigitScheme {
    /// Compute the two check digits for a digit-string payload.
    fn compute(&self, payload: &str) -> String;

    /// Verify check digits against a payload.
    fn verify(&self, payload: &str, check: &str) -> bool {
        self.compute(payload) == check
    }
}

/// Accepts any check digits. Matches legacy issuance.
#[derive(Debug, Default, Clone, Copy)]
pub struct Permissive;

impl CheckDigitScheme for Permissive {
    fn compute(&self, _payload: &str) -> String {
        "00".to_string()
    }

    fn verify(&self, _payload: &str, _check: &str) -> bool {
        true
    }
}

/// Two chained Luhn digits: the first over the payload, the second over
/// the payload extended by the first.
#[derive(Debug, Default, Clone, Copy)]
pub struct Luhn2;

impl CheckDigitScheme for Luhn2 {
    fn compute(&self, payload: &str) -> String {
        let first = luhn_check_digit(payload.bytes());
        let second = luhn_check_digit(payload.bytes().chain(std::iter::once(first + b'0')));
        format!("{}{}", first, second)
    }
}

/// Standard Luhn check digit over an ASCII-digit byte sequence.
fn luhn_check_digit(digits: impl DoubleEndedIterator<Item = u8>) -> u8 {
    let mut sum: u32 = 0;
    for (i, byte) in digits.rev().enumerate() {
        let mut d = u32::from(byte - b'0');
        if i % 2 == 0 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    ((10 - (sum % 10)) % 10) as u8
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Two ASCII digits at `offset`, as a number.
fn two_digits_at(s: &str, offset: usize) -> u8 {
    let b = s.as_bytes();
    (b[offset] - b'0') * 10 + (b[offset + 1] - b'0')
}

// =============================================================================
// ClienteId
// =============================================================================

const CLIENTE_PATTERN: &str = "CLI- followed by 8 digits";
const CLIENTE_LEN: usize = 12;

/// Customer identifier: `CLI-` + 8 digits.
///
/// The digits embed the issuing branch (positions 1-2) and registration
/// year (positions 3-4, offset by 2000).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClienteId(String);

impl ClienteId {
    /// Parse and validate a customer identifier.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if value.len() != CLIENTE_LEN
            || !value.starts_with("CLI-")
            || !is_digits(&value[4..])
        {
            return Err(DomainError::InvalidFormat {
                expected: CLIENTE_PATTERN,
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Issuing branch, from the first two digits.
    pub fn branch_code(&self) -> u8 {
        two_digits_at(&self.0, 4)
    }

    /// Registration year, from digits three and four plus 2000.
    pub fn registration_year(&self) -> i32 {
        2000 + i32::from(two_digits_at(&self.0, 6))
    }
}

impl fmt::Display for ClienteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClienteId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClienteId> for String {
    fn from(id: ClienteId) -> Self {
        id.0
    }
}

// =============================================================================
// CuentaId
// =============================================================================

const CUENTA_PATTERN: &str =
    "ARG + 3-digit bank + 4-digit branch + 2-digit type + 11-digit sequence + 2 check digits";
const CUENTA_LEN: usize = 25;

/// Bank codes accepted on account numbers.
const ALLOWED_BANK_CODES: [&str; 8] = [
    "007", "011", "014", "017", "034", "072", "191", "285",
];

/// Account identifier: `ARG` + bank (3) + branch (4) + account type (2) +
/// sequence (11) + check digits (2).
///
/// The account-type code determines the account currency:
/// 00-09 peso, 10-19 US dollar, 20-29 euro.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CuentaId(String);

impl CuentaId {
    /// Parse with the permissive check-digit scheme.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Self::parse_with(value, &Permissive)
    }

    /// Parse, verifying check digits with the given scheme.
    pub fn parse_with(
        value: &str,
        scheme: &dyn CheckDigitScheme,
    ) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidFormat {
            expected: CUENTA_PATTERN,
            value: value.to_string(),
        };

        if value.len() != CUENTA_LEN || !value.starts_with("ARG") || !is_digits(&value[3..]) {
            return Err(invalid());
        }

        let bank = &value[3..6];
        if !ALLOWED_BANK_CODES.contains(&bank) {
            return Err(invalid());
        }

        let account_type = two_digits_at(value, 10);
        if account_type > 29 {
            return Err(invalid());
        }

        let payload = &value[3..23];
        let check = &value[23..25];
        if !scheme.verify(payload, check) {
            return Err(invalid());
        }

        Ok(Self(value.to_string()))
    }

    /// Synthesize a new account identifier.
    ///
    /// The currency picks the account-type code (peso 00, USD 10, EUR 20),
    /// the sequence comes from `source`, and the check digits from
    /// `scheme`.
    pub fn generate(
        bank_code: &str,
        branch_code: &str,
        currency: Currency,
        source: &mut dyn NumberSource,
        scheme: &dyn CheckDigitScheme,
    ) -> Result<Self, DomainError> {
        if bank_code.len() != 3
            || !is_digits(bank_code)
            || !ALLOWED_BANK_CODES.contains(&bank_code)
        {
            return Err(DomainError::InvalidFormat {
                expected: "allow-listed 3-digit bank code",
                value: bank_code.to_string(),
            });
        }
        if branch_code.len() != 4 || !is_digits(branch_code) {
            return Err(DomainError::InvalidFormat {
                expected: "4-digit branch code",
                value: branch_code.to_string(),
            });
        }

        let type_code = match currency {
            Currency::Ars => "00",
            Currency::Usd => "10",
            Currency::Eur => "20",
        };
        let sequence = source.next_below(100_000_000_000);
        let payload = format!("{bank_code}{branch_code}{type_code}{sequence:011}");
        let check = scheme.compute(&payload);

        Ok(Self(format!("ARG{payload}{check}")))
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bank code.
    pub fn bank_code(&self) -> &str {
        &self.0[3..6]
    }

    /// Branch code.
    pub fn branch_code(&self) -> &str {
        &self.0[6..10]
    }

    /// Account-type code.
    pub fn account_type(&self) -> u8 {
        two_digits_at(&self.0, 10)
    }

    /// Currency deduced from the account-type code.
    pub fn currency(&self) -> Currency {
        match self.account_type() {
            0..=9 => Currency::Ars,
            10..=19 => Currency::Usd,
            // 20..=29; anything above is rejected at parse
            _ => Currency::Eur,
        }
    }
}

impl fmt::Display for CuentaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CuentaId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CuentaId> for String {
    fn from(id: CuentaId) -> Self {
        id.0
    }
}

// =============================================================================
// TransaccionId
// =============================================================================

const TRANSACCION_PATTERN: &str = "TXN-YYYY-NNNNNNN (4-digit year, 7-digit sequence)";
const TRANSACCION_LEN: usize = 16;

/// Transaction identifier: `TXN-` + 4-digit year + `-` + 7-digit sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransaccionId(String);

impl TransaccionId {
    /// Parse and validate a transaction identifier.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let well_formed = value.len() == TRANSACCION_LEN
            && value.is_ascii()
            && value.starts_with("TXN-")
            && value.as_bytes()[8] == b'-'
            && is_digits(&value[4..8])
            && is_digits(&value[9..]);

        if !well_formed {
            return Err(DomainError::InvalidFormat {
                expected: TRANSACCION_PATTERN,
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Synthesize a new transaction identifier for the given year.
    pub fn generate(year: i32, source: &mut dyn NumberSource) -> Result<Self, DomainError> {
        if !(1000..=9999).contains(&year) {
            return Err(DomainError::InvalidFormat {
                expected: "4-digit year",
                value: year.to_string(),
            });
        }
        let sequence = source.next_below(10_000_000);
        Ok(Self(format!("TXN-{year}-{sequence:07}")))
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Year embedded in the identifier.
    pub fn year(&self) -> i32 {
        i32::from(two_digits_at(&self.0, 4)) * 100 + i32::from(two_digits_at(&self.0, 6))
    }

    /// The identifier's digits with prefix and separators stripped.
    /// Stable for the life of the identifier.
    pub fn digits(&self) -> String {
        format!("{}{}", &self.0[4..8], &self.0[9..])
    }
}

impl fmt::Display for TransaccionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TransaccionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TransaccionId> for String {
    fn from(id: TransaccionId) -> Self {
        id.0
    }
}
