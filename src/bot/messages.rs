//! Message texts. Everything except the invalid-address and cancellation
//! notices is HTML; user-supplied text goes through [`escape`] first.

use chrono::{DateTime, TimeZone};
use teloxide::utils::html::escape;

use crate::models::Reply;
use crate::simulation::address::{explorer_tx_url, shorten_address, shorten_hash};
use crate::simulation::{BalanceSnapshot, TradeOutcome};

use super::keyboards::main_menu;

pub fn welcome() -> Reply {
    Reply::html(
        "🤖 <b>Welcome to ETH Demo Trading Bot</b>\n\n\
         Select an option below to get started:\n\
         • Deposit: Get ETH deposit address\n\
         • Trade: Execute demo trades\n\
         • Start/Stop: Control trading\n\
         • Withdraw: Withdraw profits\n\
         • Balance: Check your balance\n\n\
         <i>This is a demo trading bot for educational purposes only.</i>",
    )
    .with_keyboard(main_menu())
}

pub fn deposit(wallet_address: &str) -> Reply {
    Reply::html(format!(
        "📍 <b>ETH Deposit Address</b>\n\n\
         <code>{wallet_address}</code>\n\n\
         ✅ Send ETH to this address to fund your account.\n\
         ⚠️ Only send ETH to this address.\n\n\
         <i>Demo address - Not a real wallet</i>"
    ))
}

pub fn trade(outcome: &TradeOutcome) -> Reply {
    if outcome.is_profit() {
        Reply::html(format!(
            "✅ <b>Trade Executed Successfully!</b>\n\n\
             Trade ID: <code>{}</code>\n\
             Profit: +${:.2}\n\n\
             <i>Hurry! I'm going into the ETH market now to make more profit for you!</i> 🚀",
            outcome.trade_id, outcome.pnl
        ))
    } else {
        Reply::html(format!(
            "⚠️ <b>Trade Executed with Loss</b>\n\n\
             Trade ID: <code>{}</code>\n\
             Loss: ${:.2}\n\n\
             <i>Market conditions are challenging. I'll adjust the strategy.</i>",
            outcome.trade_id,
            outcome.pnl.abs()
        ))
    }
}

pub fn trading_toggled(active: bool) -> Reply {
    let (status, verb, activity) = if active {
        ("ACTIVE 🟢", "started", "actively trading")
    } else {
        ("STOPPED 🔴", "stopped", "inactive")
    };

    Reply::html(format!(
        "🔄 <b>Trading Status Updated</b>\n\n\
         Status: <b>{status}</b>\n\n\
         Trading has been {verb}.\n\
         Your bot is now {activity}."
    ))
}

pub fn withdraw_prompt() -> Reply {
    Reply::html(
        "💳 <b>Withdraw ETH</b>\n\n\
         Please enter your Ethereum wallet address to withdraw 10 ETH profit:\n\n\
         Format: <code>0x...</code> (42 characters)\n\
         <i>Example: 0x71C7656EC7ab88b098defB751B7401B5f6d8976F</i>",
    )
}

pub fn balance(snapshot: &BalanceSnapshot) -> Reply {
    Reply::html(format!(
        "📊 <b>Account Balance</b>\n\n\
         • ETH Balance: <code>{:.4} ETH</code>\n\
         • USD Value: <code>${:.2}</code>\n\
         • Total Profit: <code>{:.4} ETH</code>\n\
         • Account Status: <code>ACTIVE</code>\n\n\
         <i>Demo balances - Not real funds</i>",
        snapshot.eth, snapshot.usd, snapshot.profit_eth
    ))
}

pub fn invalid_address() -> Reply {
    Reply::plain(
        "❌ Invalid ETH address format. Please enter a valid Ethereum address \
         starting with '0x' (42 characters total).\n\n\
         Try again:",
    )
}

/// The address is user input: only its shape was checked, so it is
/// truncated first and escaped afterwards.
pub fn withdrawal_receipt(address: &str, tx_hash: &str, explorer_host: &str) -> Reply {
    Reply::html(format!(
        "🎉 <b>Withdrawal Successful!</b>\n\n\
         ✅ 10 ETH profit is coming your way!\n\n\
         • Recipient: <code>{}</code>\n\
         • Amount: 10 ETH\n\
         • Transaction: <a href=\"{}\">{}</a>\n\
         • Estimated Time: 5-10 minutes\n\n\
         <i>Congratulations! Your profit will arrive soon.</i> 🚀\n\
         <i>Note: This is a demo transaction.</i>",
        escape(&shorten_address(address)),
        explorer_tx_url(explorer_host, tx_hash),
        shorten_hash(tx_hash),
    ))
    .without_preview()
}

pub fn cancelled() -> Reply {
    Reply::plain("Operation cancelled.")
}

pub fn help() -> Reply {
    Reply::html(
        "🤖 <b>ETH Demo Trading Bot Help</b>\n\n\
         <b>Commands:</b>\n\
         /start - Start the bot\n\
         /help - Show this help message\n\
         /balance - Check your balance\n\
         /status - Check trading status\n\
         /cancel - Cancel the current operation\n\n\
         <b>Features:</b>\n\
         • Demo ETH trading simulation\n\
         • Virtual deposit/withdrawal\n\
         • Trading start/stop control\n\
         • Balance tracking\n\n\
         <i>This is an educational demo only.</i>",
    )
}

pub fn status<Tz>(active: bool, user_id: i64, now: DateTime<Tz>) -> Reply
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let status = if active { "🟢 ACTIVE" } else { "🔴 STOPPED" };
    Reply::html(format!(
        "📈 <b>Trading Status</b>\n\n\
         Status: {status}\n\
         User ID: <code>{user_id}</code>\n\
         Last update: {}\n\n\
         <i>Use Start/Stop button to control trading.</i>",
        now.format("%Y-%m-%d %H:%M:%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use teloxide::types::ParseMode;

    #[test]
    fn test_welcome_lists_every_action() {
        let reply = welcome();
        for label in ["Deposit", "Trade", "Start/Stop", "Withdraw", "Balance"] {
            assert!(reply.text.contains(label), "missing {label}");
        }
        assert!(reply.keyboard.is_some());
        assert_eq!(reply.parse_mode, Some(ParseMode::Html));
    }

    #[test]
    fn test_trade_profit_and_loss_formatting() {
        let win = trade(&TradeOutcome {
            trade_id: "01234567".into(),
            pnl: 12.5,
        });
        assert!(win.text.contains("Profit: +$12.50"));
        assert!(win.text.contains("<code>01234567</code>"));

        let loss = trade(&TradeOutcome {
            trade_id: "76543210".into(),
            pnl: -7.5,
        });
        assert!(loss.text.contains("Loss: $7.50"));
        assert!(loss.text.contains("with Loss"));
    }

    #[test]
    fn test_toggle_texts() {
        assert!(trading_toggled(true).text.contains("<b>ACTIVE 🟢</b>"));
        assert!(trading_toggled(true).text.contains("actively trading"));
        assert!(trading_toggled(false).text.contains("STOPPED"));
        assert!(trading_toggled(false).text.contains("inactive"));
    }

    #[test]
    fn test_receipt_truncates_and_links() {
        let address = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
        let hash = format!("0x{}", "ab".repeat(32));
        let reply = withdrawal_receipt(address, &hash, "etherscan.io");

        assert!(reply.text.contains("<code>0x71C7656E...f6d8976F</code>"));
        assert!(reply.text.contains(&format!(
            "<a href=\"https://etherscan.io/tx/{hash}\">0xababababababab...</a>"
        )));
        assert!(reply.disable_preview);
        assert!(!reply.text.contains(address));
    }

    #[test]
    fn test_receipt_escapes_markup_in_address() {
        // Passes the shape check: 0x prefix, 42 characters
        let address = format!("0x<i>&{}", "a".repeat(36));
        assert_eq!(address.chars().count(), 42);

        let reply = withdrawal_receipt(&address, &format!("0x{}", "0".repeat(64)), "etherscan.io");

        assert!(reply
            .text
            .contains("<code>0x&lt;i&gt;&amp;aaaa...aaaaaaaa</code>"));
        assert!(!reply.text.contains("<i>&"));
        assert_eq!(
            reply.text.matches("<code>").count(),
            reply.text.matches("</code>").count()
        );
    }

    #[test]
    fn test_status_renders_flag_and_time() {
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let reply = status(false, 42, now);
        assert!(reply.text.contains("🔴 STOPPED"));
        assert!(reply.text.contains("User ID: <code>42</code>"));
        assert!(reply.text.contains("Last update: 2024-05-06 07:08:09"));
    }

    #[test]
    fn test_plain_notices_have_no_parse_mode() {
        assert!(invalid_address().parse_mode.is_none());
        assert!(cancelled().parse_mode.is_none());
        assert!(balance(&BalanceSnapshot {
            eth: 1.5,
            usd: 3000.0,
            profit_eth: 0.25,
        })
        .text
        .contains("<code>1.5000 ETH</code>"));
    }
}
