//! Product Console - terminal front end for the product REST API
//!
//! Run: cargo run -p product-console
//!
//! Configuration comes from the environment (a `.env` file is loaded first):
//! `PRODUCT_API_URL`, `PRODUCT_API_KEY`, `PRODUCT_API_TIMEOUT_SECS`,
//! `PRODUCT_CONSOLE_EXPORT` and the logger variables in [`logger::LogSettings`].

mod app;
mod logger;
mod ui;

use std::io;
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use product_client::{ClientConfig, ProductApi};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::logger::{LogSettings, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Keep the guard alive so file logs are flushed on exit
    let _guard = init_logger(&LogSettings::from_env());

    let config = ClientConfig::from_env();
    tracing::info!("Using product API at {}", config.base_url);
    if config.api_key.is_none() {
        tracing::warn!("PRODUCT_API_KEY not set, create/update/delete will be rejected");
    }
    let api: Arc<dyn ProductApi> = Arc::new(config.build_http_client()?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api, config.base_url.clone());
    let res = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
