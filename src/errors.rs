use teloxide::RequestError;

/// Errors raised while handling a single update. The dispatcher logs them
/// and moves on to the next update.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("transport error: {0}")]
    Transport(#[from] RequestError),

    #[error("unrecognized callback action: {0:?}")]
    UnknownAction(String),
}

impl BotError {
    /// Telegram refuses edits that would leave a message unchanged.
    pub fn is_message_not_modified(&self) -> bool {
        matches!(
            self,
            BotError::Transport(RequestError::Api(teloxide::ApiError::MessageNotModified))
        )
    }
}
