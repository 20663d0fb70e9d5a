use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{interval, Instant};

use crate::simulation::address::is_valid_withdrawal_address;

/// Dialogues are scoped to one user inside one chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogueKey {
    pub chat_id: i64,
    pub user_id: i64,
}

impl DialogueKey {
    pub fn new(chat_id: i64, user_id: i64) -> Self {
        Self { chat_id, user_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    Idle,
    AwaitingAddress { entered_at: Instant },
}

/// Inputs that can move the withdrawal dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueInput<'a> {
    /// The `withdraw` button was pressed.
    Withdraw,
    /// Free text that is not a slash command.
    Text(&'a str),
    /// The `/cancel` command.
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueOutcome {
    /// Entered (or re-entered) the address prompt.
    Prompted,
    /// Text did not look like an address; still awaiting.
    AddressRejected,
    /// Address accepted (trimmed); the dialogue is over.
    AddressAccepted(String),
    /// Cancelled from the address prompt.
    Cancelled,
    /// Input arrived while idle; not ours to handle.
    Ignored,
}

impl DialogueState {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, DialogueState::AwaitingAddress { .. })
    }

    /// Pure transition function of the withdrawal dialogue.
    pub fn transition(self, input: DialogueInput<'_>, now: Instant) -> (Self, DialogueOutcome) {
        match (self, input) {
            (_, DialogueInput::Withdraw) => (
                DialogueState::AwaitingAddress { entered_at: now },
                DialogueOutcome::Prompted,
            ),
            (DialogueState::AwaitingAddress { .. }, DialogueInput::Text(text)) => {
                let address = text.trim();
                if is_valid_withdrawal_address(address) {
                    (
                        DialogueState::Idle,
                        DialogueOutcome::AddressAccepted(address.to_string()),
                    )
                } else {
                    (self, DialogueOutcome::AddressRejected)
                }
            }
            (DialogueState::AwaitingAddress { .. }, DialogueInput::Cancel) => {
                (DialogueState::Idle, DialogueOutcome::Cancelled)
            }
            (DialogueState::Idle, DialogueInput::Text(_) | DialogueInput::Cancel) => {
                (DialogueState::Idle, DialogueOutcome::Ignored)
            }
        }
    }

    fn is_expired(&self, now: Instant, ttl: Option<Duration>) -> bool {
        match (self, ttl) {
            (DialogueState::AwaitingAddress { entered_at }, Some(ttl)) => {
                now.saturating_duration_since(*entered_at) >= ttl
            }
            _ => false,
        }
    }
}

/// Process-lifetime store of dialogue states. Only non-idle states are
/// kept; a missing key means `Idle`.
#[derive(Clone)]
pub struct DialogueStore {
    inner: Arc<Mutex<HashMap<DialogueKey, DialogueState>>>,
    ttl: Option<Duration>,
}

impl DialogueStore {
    /// `ttl = None` keeps a dialogue until it is completed or cancelled.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Apply one input atomically and return what happened.
    pub async fn apply(&self, key: DialogueKey, input: DialogueInput<'_>) -> DialogueOutcome {
        self.apply_with_previous(key, input).await.1
    }

    /// Like [`apply`](Self::apply), also returning the state that was
    /// replaced so the caller can [`restore`](Self::restore) it.
    pub async fn apply_with_previous(
        &self,
        key: DialogueKey,
        input: DialogueInput<'_>,
    ) -> (DialogueState, DialogueOutcome) {
        let mut states = self.inner.lock().await;
        let now = Instant::now();

        let current = match states.get(&key) {
            Some(state) if state.is_expired(now, self.ttl) => {
                tracing::info!(
                    chat_id = key.chat_id,
                    user_id = key.user_id,
                    "Withdrawal dialogue expired"
                );
                DialogueState::Idle
            }
            Some(state) => *state,
            None => DialogueState::Idle,
        };

        let (next, outcome) = current.transition(input, now);
        Self::put(&mut states, key, next);
        (current, outcome)
    }

    /// Put back a state returned by [`apply_with_previous`](Self::apply_with_previous).
    pub async fn restore(&self, key: DialogueKey, state: DialogueState) {
        let mut states = self.inner.lock().await;
        Self::put(&mut states, key, state);
    }

    fn put(states: &mut HashMap<DialogueKey, DialogueState>, key: DialogueKey, state: DialogueState) {
        if state.is_awaiting() {
            states.insert(key, state);
        } else {
            states.remove(&key);
        }
        metrics::gauge!("dialogues_awaiting_address").set(states.len() as f64);
    }

    pub async fn awaiting_count(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn state(&self, key: DialogueKey) -> DialogueState {
        let states = self.inner.lock().await;
        match states.get(&key) {
            Some(state) if !state.is_expired(Instant::now(), self.ttl) => *state,
            _ => DialogueState::Idle,
        }
    }

    /// Drop expired dialogues. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut states = self.inner.lock().await;
        let now = Instant::now();
        let before = states.len();
        states.retain(|_, state| !state.is_expired(now, self.ttl));
        let removed = before - states.len();
        if removed > 0 {
            metrics::gauge!("dialogues_awaiting_address").set(states.len() as f64);
        }
        removed
    }
}

/// Periodically purge expired dialogues. Only useful when a TTL is set.
pub async fn run_dialogue_sweeper(store: DialogueStore, every: Duration) {
    let mut ticker = interval(every);
    ticker.tick().await; // consume the first immediate tick

    loop {
        ticker.tick().await;
        let removed = store.purge_expired().await;
        if removed > 0 {
            tracing::debug!(removed, "Purged expired withdrawal dialogues");
        }
    }
}
