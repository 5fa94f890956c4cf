//! Minimal config: token, database path, optional API URL and log file.
//! Loaded from the environment (`BOT_TOKEN`, `DATABASE_URL`, `TELEGRAM_API_URL`,
//! `LOG_FILE`); call `dotenvy::dotenv()` first to honor a `.env` file.

use anyhow::Result;
use std::env;

pub struct BotConfig {
    pub bot_token: String,
    pub database_url: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl BotConfig {
    /// Loads from environment variables: `BOT_TOKEN` required, the rest
    /// optional. `DATABASE_URL` defaults to a local SQLite file.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:ridebot.db".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL").ok();
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            database_url,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds the teloxide Bot, pointing it at a custom API URL when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url) => Ok(bot.set_api_url(url.parse()?)),
            None => Ok(bot),
        }
    }
}
