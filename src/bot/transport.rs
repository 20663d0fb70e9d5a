use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{LinkPreviewOptions, MessageId};
use teloxide::RequestError;

use crate::models::{MessageRef, Reply};

/// Outbound side of the chat platform, as seen by the handlers.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, chat_id: i64, reply: &Reply) -> Result<(), RequestError>;

    /// Replace the text (and keyboard) of a message the bot sent earlier.
    async fn edit(&self, target: MessageRef, reply: &Reply) -> Result<(), RequestError>;

    /// Acknowledge a button press so the client stops its loading indicator.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), RequestError>;
}

fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait]
impl ChatTransport for Bot {
    async fn send(&self, chat_id: i64, reply: &Reply) -> Result<(), RequestError> {
        let mut request = self.send_message(ChatId(chat_id), reply.text.clone());
        if let Some(mode) = reply.parse_mode {
            request = request.parse_mode(mode);
        }
        if let Some(keyboard) = &reply.keyboard {
            request = request.reply_markup(keyboard.clone());
        }
        if reply.disable_preview {
            request = request.link_preview_options(no_preview());
        }
        request.await?;
        Ok(())
    }

    async fn edit(&self, target: MessageRef, reply: &Reply) -> Result<(), RequestError> {
        let mut request = self.edit_message_text(
            ChatId(target.chat_id),
            MessageId(target.message_id),
            reply.text.clone(),
        );
        if let Some(mode) = reply.parse_mode {
            request = request.parse_mode(mode);
        }
        if let Some(keyboard) = &reply.keyboard {
            request = request.reply_markup(keyboard.clone());
        }
        if reply.disable_preview {
            request = request.link_preview_options(no_preview());
        }
        request.await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), RequestError> {
        self.answer_callback_query(callback_id.to_string()).await?;
        Ok(())
    }
}
