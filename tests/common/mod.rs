//! Common test utilities

use std::sync::Once;

use banca_core::domain::ids::{Luhn2, NumberSource};
use banca_core::{Account, ClienteId, CuentaId, Currency, Customer, Money, TransaccionId};
use rust_decimal::Decimal;

static TRACING: Once = Once::new();

/// Install a test subscriber once per binary. Honors RUST_LOG.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Deterministic counting source for identifier generation.
pub struct CountingSource(pub u64);

impl NumberSource for CountingSource {
    fn next_below(&mut self, bound: u64) -> u64 {
        let value = self.0 % bound;
        self.0 += 1;
        value
    }
}

pub fn cliente(n: u32) -> ClienteId {
    ClienteId::parse(&format!("CLI-{n:08}")).expect("valid cliente id")
}

pub fn new_cuenta(currency: Currency, source: &mut CountingSource) -> CuentaId {
    CuentaId::generate("017", "0001", currency, source, &Luhn2).expect("valid cuenta id")
}

pub fn txn_id(seq: u32) -> TransaccionId {
    TransaccionId::parse(&format!("TXN-2026-{seq:07}")).expect("valid transaccion id")
}

pub fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::Usd).expect("valid money")
}

pub fn funded_usd_account(
    owner: &ClienteId,
    source: &mut CountingSource,
    amount: Decimal,
) -> Account {
    let id = new_cuenta(Currency::Usd, source);
    Account::open_with_balance(id, owner.clone(), usd(amount)).expect("matching currency")
}

pub fn customer(n: u32) -> Customer {
    Customer::new(cliente(n), format!("Customer {n}"), format!("customer{n}@example.com"))
        .expect("valid customer")
}
