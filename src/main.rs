use std::fs::OpenOptions;
use std::sync::Mutex;

use tickerscope::ScopeError;
use tickerscope::config::fetch_config;

#[tokio::main]
async fn main() -> Result<(), ScopeError> {
    let app_config = fetch_config()?;

    // The terminal belongs to the dashboard, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&app_config.log_file)
        .map_err(|e| {
            ScopeError::Io(format!(
                "failed to open log file {}: {e}",
                app_config.log_file.display()
            ))
        })?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    tickerscope::tui::run(app_config).await
}
