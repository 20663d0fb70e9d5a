use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use teloxide::{ApiError, RequestError};

use ethdemo_bot::bot::{ChatTransport, DemoBot};
use ethdemo_bot::errors::BotError;
use ethdemo_bot::models::{ButtonPress, MessageRef, Reply};
use ethdemo_bot::simulation::{RandomSource, RngSource};
use ethdemo_bot::state::{DialogueKey, DialogueStore};

#[allow(dead_code)]
pub const BOT_USERNAME: &str = "EthDemoBot";

/// Message id of the menu message every button press points at.
#[allow(dead_code)]
pub const MENU_MESSAGE_ID: i32 = 55;

/// Everything the bot pushed to the transport, in order.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Sent {
    Message { chat_id: i64, reply: Reply },
    Edit { target: MessageRef, reply: Reply },
    Answer(String),
}

impl Sent {
    #[allow(dead_code)]
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Sent::Message { reply, .. } | Sent::Edit { reply, .. } => Some(reply),
            Sent::Answer(_) => None,
        }
    }
}

/// Records delivered replies. Sends and edits can be switched to fail the
/// way Telegram rejects a message; failed deliveries are not recorded.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    fail_sends: AtomicBool,
    fail_edits: AtomicBool,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    pub fn len(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn fail_edits(&self, fail: bool) {
        self.fail_edits.store(fail, Ordering::SeqCst);
    }

    fn rejection() -> RequestError {
        RequestError::Api(ApiError::Unknown(
            "Bad Request: can't parse entities".into(),
        ))
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, chat_id: i64, reply: &Reply) -> Result<(), RequestError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(Self::rejection());
        }
        self.sent.lock().unwrap().push(Sent::Message {
            chat_id,
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn edit(&self, target: MessageRef, reply: &Reply) -> Result<(), RequestError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(Self::rejection());
        }
        self.sent.lock().unwrap().push(Sent::Edit {
            target,
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), RequestError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Answer(callback_id.to_string()));
        Ok(())
    }
}

/// Plays back fixed uniform draws; alphabet picks always take index 0.
#[allow(dead_code)]
pub struct ScriptedRandom {
    uniforms: VecDeque<f64>,
}

#[allow(dead_code)]
impl ScriptedRandom {
    pub fn new(uniforms: impl IntoIterator<Item = f64>) -> Self {
        Self {
            uniforms: uniforms.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.uniforms
            .pop_front()
            .map_or(low, |v| v.clamp(low, high))
    }

    fn index(&mut self, _len: usize) -> usize {
        0
    }
}

#[allow(dead_code)]
pub fn build_bot(rng: Box<dyn RandomSource>) -> (Arc<DemoBot>, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let bot = DemoBot::new(
        transport.clone(),
        rng,
        DialogueStore::new(None),
        "etherscan.io",
    );
    (Arc::new(bot), transport)
}

#[allow(dead_code)]
pub fn seeded_bot(seed: u64) -> (Arc<DemoBot>, Arc<RecordingTransport>) {
    build_bot(Box::new(RngSource::seeded(seed)))
}

/// A text message (command or free text) from `user_id` in `chat_id`.
#[allow(dead_code)]
pub async fn say(bot: &DemoBot, chat_id: i64, user_id: i64, text: &str) -> Result<(), BotError> {
    bot.handle_message(DialogueKey::new(chat_id, user_id), text, BOT_USERNAME)
        .await
}

/// A press of the menu button carrying `data` in `chat_id`.
#[allow(dead_code)]
pub fn press(chat_id: i64, user_id: i64, data: &str) -> ButtonPress {
    ButtonPress {
        id: format!("cb-{user_id}-{data}"),
        user_id,
        data: Some(data.to_string()),
        message: Some(MessageRef {
            chat_id,
            message_id: MENU_MESSAGE_ID,
        }),
    }
}

/// Contents of every `<code>` span in an HTML reply.
#[allow(dead_code)]
pub fn code_spans(text: &str) -> Vec<&str> {
    text.split("<code>")
        .skip(1)
        .filter_map(|rest| rest.split("</code>").next())
        .collect()
}
