use metrics::counter;

use super::{messages, DemoBot};
use crate::errors::BotError;
use crate::models::{Action, ButtonPress};
use crate::simulation::synthetic;
use crate::state::{DialogueInput, DialogueKey};

impl DemoBot {
    /// Handle a menu button press. The press is always answered first.
    pub async fn handle_callback(&self, press: ButtonPress) -> Result<(), BotError> {
        if let Err(e) = self.transport.answer_callback(&press.id).await {
            tracing::warn!(error = %e, callback_id = %press.id, "Failed to answer callback query");
        }

        let user_id = press.user_id;
        let data = press.data.as_deref().unwrap_or_default();
        let Some(action) = Action::from_callback_data(data) else {
            counter!("callback_actions_total", "action" => "unknown").increment(1);
            return Err(BotError::UnknownAction(data.to_string()));
        };
        counter!("callback_actions_total", "action" => action.callback_data()).increment(1);

        let Some(target) = press.message else {
            tracing::warn!(user_id, %action, "Callback without an accessible message, nothing to edit");
            return Ok(());
        };
        let chat_id = target.chat_id;

        tracing::info!(user_id, chat_id, %action, "Menu action");

        let reply = match action {
            Action::Deposit => messages::deposit(&self.with_rng(synthetic::wallet_address)),
            Action::Trade => {
                let outcome = self.with_rng(synthetic::simulate_trade);
                tracing::debug!(
                    user_id,
                    trade_id = %outcome.trade_id,
                    pnl = outcome.pnl,
                    "Simulated trade"
                );
                messages::trade(&outcome)
            }
            Action::ToggleTrading => {
                let active = self.trading.toggle(user_id).await;
                tracing::info!(user_id, active, "Trading toggled");
                messages::trading_toggled(active)
            }
            Action::Withdraw => {
                let key = DialogueKey::new(chat_id, user_id);
                let (previous, _) = self
                    .dialogues
                    .apply_with_previous(key, DialogueInput::Withdraw)
                    .await;
                let delivery = self.edit(target, &messages::withdraw_prompt()).await;
                return self.keep_if_delivered(key, previous, delivery).await;
            }
            Action::Balance => messages::balance(&self.with_rng(synthetic::simulate_balance)),
        };

        self.edit(target, &reply).await
    }
}
