use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::models::Action;

/// Main menu: two buttons per row, Balance alone on the last row.
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(Action::ALL.chunks(2).map(|row| {
        row.iter()
            .map(|action| InlineKeyboardButton::callback(action.label(), action.callback_data()))
            .collect::<Vec<_>>()
    }))
}
