//! teloxide wiring: the handler tree and the dispatcher around [`DemoBot`].
//!
//! The dispatcher's default distribution runs updates of one chat strictly
//! in order and different chats in parallel.

use std::sync::Arc;

use metrics::counter;
use teloxide::dispatching::{DefaultKey, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Me;

use super::DemoBot;
use crate::errors::BotError;
use crate::models::{ButtonPress, MessageRef};
use crate::state::DialogueKey;

/// Messages and button presses; every other update kind falls through to
/// the dispatcher's default handler.
pub fn schema() -> UpdateHandler<BotError> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

pub fn build_dispatcher(bot: Bot, demo: Arc<DemoBot>) -> Dispatcher<Bot, BotError, DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![demo])
        .default_handler(|_| async {
            tracing::trace!("Skipping unsupported update kind");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("Update handling failed"))
        .enable_ctrlc_handler()
        .build()
}

/// Detach a callback query from the Bot API types.
pub fn button_press(query: &CallbackQuery) -> ButtonPress {
    ButtonPress {
        id: query.id.to_string(),
        user_id: query.from.id.0 as i64,
        data: query.data.clone(),
        message: query.message.as_ref().map(|message| MessageRef {
            chat_id: message.chat().id.0,
            message_id: message.id().0,
        }),
    }
}

async fn on_message(msg: Message, me: Me, demo: Arc<DemoBot>) -> Result<(), BotError> {
    counter!("updates_received_total").increment(1);

    let Some(text) = msg.text() else {
        return Ok(());
    };
    // Channel posts and anonymous admins carry no user
    let Some(user) = msg.from.as_ref() else {
        tracing::debug!(chat_id = msg.chat.id.0, "Message without sender ignored");
        return Ok(());
    };

    let key = DialogueKey::new(msg.chat.id.0, user.id.0 as i64);
    demo.handle_message(key, text, me.username())
        .await
        .inspect_err(count_failure)
}

async fn on_callback(query: CallbackQuery, demo: Arc<DemoBot>) -> Result<(), BotError> {
    counter!("updates_received_total").increment(1);

    demo.handle_callback(button_press(&query))
        .await
        .inspect_err(count_failure)
}

fn count_failure(_: &BotError) {
    counter!("handler_errors_total").increment(1);
}
