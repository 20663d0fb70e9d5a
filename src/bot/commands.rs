use chrono::Local;
use metrics::counter;
use teloxide::utils::command::BotCommands;

use super::{messages, DemoBot};
use crate::errors::BotError;
use crate::models::Command;
use crate::simulation::synthetic;
use crate::state::{DialogueInput, DialogueKey, DialogueOutcome};

impl DemoBot {
    /// Handle a text message. Slash commands are parsed against the bot's
    /// username; anything else is free text for the withdrawal dialogue.
    pub async fn handle_message(
        &self,
        key: DialogueKey,
        text: &str,
        bot_username: &str,
    ) -> Result<(), BotError> {
        if !text.starts_with('/') {
            return self.handle_text(key, text).await;
        }

        match Command::parse(text, bot_username) {
            Ok(command) => self.handle_command(command, key).await,
            // Unknown commands, or commands meant for another bot
            Err(e) => {
                tracing::debug!(chat_id = key.chat_id, error = ?e, "Command ignored");
                Ok(())
            }
        }
    }

    async fn handle_command(&self, command: Command, key: DialogueKey) -> Result<(), BotError> {
        let DialogueKey { chat_id, user_id } = key;
        tracing::info!(user_id, chat_id, %command, "Command received");
        counter!("commands_total", "command" => command.name()).increment(1);

        match command {
            Command::Start => self.send_menu(chat_id).await,
            Command::Help => self.send(chat_id, &messages::help()).await,
            Command::Status => {
                let active = self.trading.is_active(user_id).await;
                self.send(chat_id, &messages::status(active, user_id, Local::now()))
                    .await
            }
            Command::Balance => {
                let snapshot = self.with_rng(synthetic::simulate_balance);
                self.send(chat_id, &messages::balance(&snapshot)).await
            }
            Command::Cancel => {
                let (previous, outcome) = self
                    .dialogues
                    .apply_with_previous(key, DialogueInput::Cancel)
                    .await;
                if outcome != DialogueOutcome::Cancelled {
                    tracing::debug!(user_id, chat_id, "Nothing to cancel");
                    return Ok(());
                }

                tracing::info!(user_id, chat_id, "Withdrawal cancelled");
                let delivery = self.send(chat_id, &messages::cancelled()).await;
                self.keep_if_delivered(key, previous, delivery).await?;
                self.send_menu(chat_id).await
            }
        }
    }

    /// Free text only matters while the user is entering a withdrawal address.
    async fn handle_text(&self, key: DialogueKey, text: &str) -> Result<(), BotError> {
        let DialogueKey { chat_id, user_id } = key;

        let (previous, outcome) = self
            .dialogues
            .apply_with_previous(key, DialogueInput::Text(text))
            .await;

        match outcome {
            DialogueOutcome::AddressRejected => {
                counter!("invalid_addresses_total").increment(1);
                tracing::info!(user_id, chat_id, "Invalid withdrawal address");
                self.send(chat_id, &messages::invalid_address()).await
            }
            DialogueOutcome::AddressAccepted(address) => {
                let tx_hash = self.with_rng(synthetic::transaction_hash);
                let receipt = messages::withdrawal_receipt(&address, &tx_hash, &self.explorer_host);

                let delivery = self.send(chat_id, &receipt).await;
                self.keep_if_delivered(key, previous, delivery).await?;

                counter!("withdrawals_completed_total").increment(1);
                tracing::info!(user_id, chat_id, tx_hash = %tx_hash, "Demo withdrawal completed");
                self.send_menu(chat_id).await
            }
            _ => {
                tracing::trace!(user_id, chat_id, "Free text outside a dialogue ignored");
                Ok(())
            }
        }
    }
}
