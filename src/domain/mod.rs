//! Domain module
//!
//! Core value types and business rules: currencies, money arithmetic,
//! exchange rates, and validated identifiers.

pub mod currency;
pub mod error;
pub mod exchange_rate;
pub mod ids;
pub mod money;

pub use currency::Currency;
pub use error::DomainError;
pub use exchange_rate::ExchangeRate;
pub use ids::{
    CheckDigitScheme, ClienteId, CuentaId, Luhn2, NumberSource, Permissive, ThreadRngSource,
    TransaccionId,
};
pub use money::Money;
