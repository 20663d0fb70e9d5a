use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Per-user "is trading active" flags.
///
/// Entries are created on the first toggle and live for the rest of the
/// process. A user without an entry is considered stopped. The only write
/// path is [`TradingFlags::toggle`], so a flag can only alternate.
#[derive(Clone, Default)]
pub struct TradingFlags {
    inner: Arc<Mutex<HashMap<i64, bool>>>,
}

impl TradingFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the user's flag and return the new value.
    pub async fn toggle(&self, user_id: i64) -> bool {
        let mut flags = self.inner.lock().await;
        let flag = flags.entry(user_id).or_insert(false);
        *flag = !*flag;
        tracing::debug!(user_id, active = *flag, "Trading flag toggled");
        *flag
    }

    pub async fn is_active(&self, user_id: i64) -> bool {
        let flags = self.inner.lock().await;
        flags.get(&user_id).copied().unwrap_or(false)
    }
}
