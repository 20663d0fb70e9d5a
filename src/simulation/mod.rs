pub mod address;
pub mod random;
pub mod synthetic;

pub use random::{RandomSource, RngSource};
pub use synthetic::{BalanceSnapshot, TradeOutcome};
