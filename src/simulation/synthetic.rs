//! Synthetic financial data. Nothing here touches a real chain or
//! account: every value is a cosmetic random draw.

use super::random::RandomSource;

const WALLET_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const HEX_ALPHABET: &[u8] = b"0123456789abcdef";
const DIGITS: &[u8] = b"0123456789";

pub const WALLET_BODY_LEN: usize = 40;
pub const TX_HASH_BODY_LEN: usize = 64;
pub const TRADE_ID_LEN: usize = 8;

pub const TRADE_PNL_RANGE: (f64, f64) = (-50.0, 150.0);
pub const ETH_BALANCE_RANGE: (f64, f64) = (0.5, 5.0);
pub const ETH_USD_RATE_RANGE: (f64, f64) = (1800.0, 2200.0);
pub const PROFIT_RANGE: (f64, f64) = (0.0, 2.5);

fn random_string(rng: &mut dyn RandomSource, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.index(alphabet.len())] as char)
        .collect()
}

/// `0x` followed by 40 characters from `[a-z0-9]`.
pub fn wallet_address(rng: &mut dyn RandomSource) -> String {
    format!("0x{}", random_string(rng, WALLET_ALPHABET, WALLET_BODY_LEN))
}

/// `0x` followed by 64 lowercase hex characters.
pub fn transaction_hash(rng: &mut dyn RandomSource) -> String {
    format!("0x{}", random_string(rng, HEX_ALPHABET, TX_HASH_BODY_LEN))
}

/// 8 decimal digits; leading zeros allowed.
pub fn trade_id(rng: &mut dyn RandomSource) -> String {
    random_string(rng, DIGITS, TRADE_ID_LEN)
}

/// Result of one simulated trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    pub trade_id: String,
    pub pnl: f64,
}

impl TradeOutcome {
    /// Zero counts as a loss.
    pub fn is_profit(&self) -> bool {
        self.pnl > 0.0
    }
}

pub fn simulate_trade(rng: &mut dyn RandomSource) -> TradeOutcome {
    let trade_id = trade_id(rng);
    let pnl = rng.uniform(TRADE_PNL_RANGE.0, TRADE_PNL_RANGE.1);
    TradeOutcome { trade_id, pnl }
}

/// A made-up account balance, recomputed on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSnapshot {
    /// Rounded to 4 decimal places.
    pub eth: f64,
    pub usd: f64,
    pub profit_eth: f64,
}

pub fn simulate_balance(rng: &mut dyn RandomSource) -> BalanceSnapshot {
    let eth = round_to(rng.uniform(ETH_BALANCE_RANGE.0, ETH_BALANCE_RANGE.1), 4);
    let usd = eth * rng.uniform(ETH_USD_RATE_RANGE.0, ETH_USD_RATE_RANGE.1);
    let profit_eth = rng.uniform(PROFIT_RANGE.0, PROFIT_RANGE.1);
    BalanceSnapshot {
        eth,
        usd,
        profit_eth,
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
