use teloxide::types::{InlineKeyboardMarkup, ParseMode};

/// A rendered bot message, independent of whether it is sent as a new
/// message or edited into an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<InlineKeyboardMarkup>,
    pub disable_preview: bool,
}

impl Reply {
    /// Text with HTML markup. Interpolated user input must be escaped.
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: Some(ParseMode::Html),
            keyboard: None,
            disable_preview: false,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
            keyboard: None,
            disable_preview: false,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn without_preview(mut self) -> Self {
        self.disable_preview = true;
        self
    }
}
