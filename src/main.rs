//! Ledgerbot main entry point
//!
//! Console mode: updates are read from stdin, one per line, for a
//! single chat. A plain line is a text message; `btn:<token>` presses
//! the button carrying that token.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;

use ledgerbot_bot::{scheduler, ChatId, ChatRef, ConsoleTransport, Engine, Payload, Update};
use ledgerbot_config::{Config, ConfigError};
use ledgerbot_store::{initialize, CategoryRegistry, LedgerStore, MemorySheets, StoreRef};

#[derive(Parser, Debug)]
#[command(name = "ledgerbot")]
#[command(version = "0.1.0")]
#[command(about = "A conversational expense-tracking assistant", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = match Config::load(args.config.clone()) {
            Ok(config) => config,
            Err(ConfigError::FileNotFound { path }) => {
                log::warn!("config file {} not found, using defaults", path);
                Config::default()
            }
            Err(err) => return Err(err.into()),
        };
        let tz = config.tz()?;
        log::info!(
            "config loaded: timezone={}, scheduler={}",
            config.timezone,
            config.scheduler.enable
        );

        let store: StoreRef = Arc::new(MemorySheets::new());
        initialize(&store).await?;

        let ledger = Arc::new(LedgerStore::new(store.clone(), tz));
        let categories = Arc::new(CategoryRegistry::new(store));
        let chat: ChatRef = Arc::new(ConsoleTransport);

        if config.scheduler.enable {
            tokio::spawn(scheduler::run(ledger.clone(), chat.clone(), tz));
        }

        let engine = Engine::new(ledger, categories, chat, tz, config.listing.limit);

        println!("ledgerbot console. Send /help for the menu, Ctrl-D to quit.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            let payload = match line.strip_prefix("btn:") {
                Some(token) => Payload::Button(token.to_string()),
                None => Payload::Text(line),
            };
            let update = Update {
                chat: ChatId(1),
                user_id: "1".to_string(),
                display_name: "Console".to_string(),
                payload,
            };
            if let Err(err) = engine.dispatch(update).await {
                log::error!("update failed: {}", err);
            }
        }
        Ok(())
    })
}
