//! ridebot binary: load config and archive, seed the record store, run the
//! Telegram REPL.

use std::sync::Arc;

use anyhow::Result;
use ridebot_chain::{HandlerChain, LoggingMiddleware};
use ridebot_core::init_tracing;
use ridebot_engine::DialogueEngine;
use ridebot_store::{RecordStore, SqliteArchive};
use ridebot_telegram::{run_repl, BotConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;
    init_tracing(config.log_file.as_deref())?;

    let archive = Arc::new(SqliteArchive::new(&config.database_url).await?);
    let store = Arc::new(RecordStore::load(archive).await?);

    let engine = Arc::new(DialogueEngine::new(store));
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_handler(engine);

    info!(database_url = %config.database_url, "Starting ridebot");
    let bot = config.build_bot()?;
    run_repl(bot, chain).await
}
