pub mod dialogue;
pub mod trading;

pub use dialogue::{DialogueInput, DialogueKey, DialogueOutcome, DialogueState, DialogueStore};
pub use trading::TradingFlags;
