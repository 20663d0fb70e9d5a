pub mod callbacks;
pub mod commands;
pub mod dispatch;
pub mod keyboards;
pub mod messages;
pub mod transport;

pub use transport::ChatTransport;

use std::sync::{Arc, Mutex, PoisonError};

use crate::errors::BotError;
use crate::models::{MessageRef, Reply};
use crate::simulation::RandomSource;
use crate::state::{DialogueKey, DialogueState, DialogueStore, TradingFlags};

/// The demo trading dialogue handler. One instance serves every chat.
pub struct DemoBot {
    transport: Arc<dyn ChatTransport>,
    trading: TradingFlags,
    dialogues: DialogueStore,
    rng: Mutex<Box<dyn RandomSource>>,
    explorer_host: String,
}

impl DemoBot {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        rng: Box<dyn RandomSource>,
        dialogues: DialogueStore,
        explorer_host: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            trading: TradingFlags::new(),
            dialogues,
            rng: Mutex::new(rng),
            explorer_host: explorer_host.into(),
        }
    }

    pub fn trading(&self) -> &TradingFlags {
        &self.trading
    }

    pub fn dialogues(&self) -> &DialogueStore {
        &self.dialogues
    }

    /// Run `f` with exclusive access to the random source. The lock is
    /// never held across an await point.
    fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RandomSource) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **rng)
    }

    async fn send(&self, chat_id: i64, reply: &Reply) -> Result<(), BotError> {
        self.transport.send(chat_id, reply).await?;
        Ok(())
    }

    async fn send_menu(&self, chat_id: i64) -> Result<(), BotError> {
        self.send(chat_id, &messages::welcome()).await
    }

    async fn edit(&self, target: MessageRef, reply: &Reply) -> Result<(), BotError> {
        match self.transport.edit(target, reply).await.map_err(BotError::from) {
            Err(e) if e.is_message_not_modified() => {
                tracing::debug!(
                    chat_id = target.chat_id,
                    message_id = target.message_id,
                    "Message already shows this content"
                );
                Ok(())
            }
            other => other,
        }
    }

    /// A dialogue step only counts once its reply reached the user; on a
    /// failed delivery the replaced state is put back.
    async fn keep_if_delivered(
        &self,
        key: DialogueKey,
        previous: DialogueState,
        delivery: Result<(), BotError>,
    ) -> Result<(), BotError> {
        if delivery.is_err() {
            self.dialogues.restore(key, previous).await;
            tracing::warn!(
                chat_id = key.chat_id,
                user_id = key.user_id,
                "Reply not delivered, dialogue step rolled back"
            );
        }
        delivery
    }
}
