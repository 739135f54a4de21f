// cfbrisk entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the HTTP API client
// 4. Create mpsc channels
// 5. Spawn the app orchestrator task
// 6. Run the TUI until the user quits
// 7. Wait briefly for the orchestrator to wind down

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use risk_core::api::{HttpRiskApi, RiskApi};
use risk_core::config;
use risk_tui::{app, tui};
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("cfbrisk starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: api={}, timeout={}s, {} static exclusions",
        config.api.base_url,
        config.api.timeout_secs,
        config.moves.excluded_territories.len()
    );

    let api: Arc<dyn RiskApi> =
        Arc::new(HttpRiskApi::from_config(&config.api).context("failed to build API client")?);

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (fetch_tx, fetch_rx) = mpsc::channel(64);

    let default_day = config.view.default_day;
    let app_state = app::AppState::new(config, api, fetch_tx);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, fetch_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // Blocks until the user quits; dropping cmd_tx afterwards also stops the
    // orchestrator if the TUI exited on an error.
    if let Err(e) = tui::run(ui_rx, cmd_tx, default_day).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("cfbrisk shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("cfbrisk.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("risk_tui=info,risk_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
