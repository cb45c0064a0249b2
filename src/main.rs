use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod db;
mod models;
mod screen;
mod services;
mod utils;

use api::cbr::CbrClient;
use commands::Flow;
use config::Config;
use db::ClientRateStore;
use screen::DollarRateScreen;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let filter = match "dollar_rate=info".parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("💵 Starting dollar rate...");

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    info!("Opening settings store {}...", cfg.store_path);
    let store = db::init_store(&cfg.store_path);

    let client = match CbrClient::with_base_url(cfg.base_url.clone(), cfg.http_timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create CBR client: {}", e);
            return;
        }
    };

    let (mut screen, mut events) = DollarRateScreen::new(
        client,
        cfg.currency_code.clone(),
        ClientRateStore::new(store),
        cfg.reminder_time,
    );
    screen.load(utils::today());

    println!("{}", commands::render_rate(&screen));
    println!("Type `$help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                screen.apply(event);
                println!("{}", commands::render_rate(&screen));
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        break;
                    }
                };

                let (flow, output) = commands::handle_line(&mut screen, &line, utils::today());
                if !output.is_empty() {
                    println!("{}", output);
                }
                if flow == Flow::Quit {
                    break;
                }
            }
        }
    }

    screen.close();
    info!("Dollar rate screen closed");
}
