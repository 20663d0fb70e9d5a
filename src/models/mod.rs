pub mod reply;

pub use reply::Reply;

use std::fmt;

use teloxide::utils::command::BotCommands;

// ---------------------------------------------------------------------------
// Action: callback data carried by the menu buttons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Deposit,
    Trade,
    ToggleTrading,
    Withdraw,
    Balance,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Deposit,
        Action::Trade,
        Action::ToggleTrading,
        Action::Withdraw,
        Action::Balance,
    ];

    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "deposit" => Some(Action::Deposit),
            "trade" => Some(Action::Trade),
            "toggle_trading" => Some(Action::ToggleTrading),
            "withdraw" => Some(Action::Withdraw),
            "balance" => Some(Action::Balance),
            _ => None,
        }
    }

    pub fn callback_data(&self) -> &'static str {
        match self {
            Action::Deposit => "deposit",
            Action::Trade => "trade",
            Action::ToggleTrading => "toggle_trading",
            Action::Withdraw => "withdraw",
            Action::Balance => "balance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Deposit => "💰 Deposit",
            Action::Trade => "📈 Trade",
            Action::ToggleTrading => "⏯️ Start/Stop Trading",
            Action::Withdraw => "💸 Withdraw",
            Action::Balance => "📊 Balance",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.callback_data())
    }
}

// ---------------------------------------------------------------------------
// Command: slash commands typed by the user
// ---------------------------------------------------------------------------

#[derive(BotCommands, Debug, Clone, Copy, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "ETH Demo Trading Bot commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show this help message")]
    Help,
    #[command(description = "Check your balance")]
    Balance,
    #[command(description = "Check trading status")]
    Status,
    #[command(description = "Cancel the current operation")]
    Cancel,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Balance => "balance",
            Command::Status => "status",
            Command::Cancel => "cancel",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ButtonPress: a menu button press, detached from the Bot API types
// ---------------------------------------------------------------------------

/// The bot message a button was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPress {
    /// Callback query id, needed to answer the press.
    pub id: String,
    pub user_id: i64,
    pub data: Option<String>,
    /// `None` when the message is not available (inline mode).
    pub message: Option<MessageRef>,
}
