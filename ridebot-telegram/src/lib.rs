//! # ridebot-telegram
//!
//! Telegram layer: env config, [`ridebot_core::Bot`] implementation over
//! teloxide, and the REPL runner. Handles only connectivity and
//! handler-chain execution; dialogue and storage live in their own crates.

mod config;
mod runner;
mod sender;

pub use config::BotConfig;
pub use runner::run_repl;
pub use sender::TelegramSender;
