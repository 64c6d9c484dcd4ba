mod app;

use std::fs::{self, OpenOptions};

use anyhow::Result;
use tracing_subscriber::{prelude::*, EnvFilter};

use st_core::{
    catalog,
    config::{self, AppConfig},
    GameLoop, GameState,
};

use crate::app::TerminalConsole;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let mut console = TerminalConsole::new()?;
    if let Err(err) = app::print_intro(&mut console, config.starting_credits) {
        console.restore()?;
        return Err(err);
    }

    let state = GameState::new(config.starting_credits, catalog::starting_catalog());
    let mut game = GameLoop::new(state, console, config.turn_delay());
    let result = game.run().await;

    let (_state, mut console) = game.into_parts();
    console.restore()?;
    result
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("st.log");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The TUI owns stdout, so logs go to the file only.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
