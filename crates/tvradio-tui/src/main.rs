mod action;
mod app;
mod fetch;
mod layout;
mod pages;
mod remote;
mod theme;
mod widgets;

use tvradio_core::catalog::Catalog;
use tvradio_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = tvradio_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("tvradio.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // The terminal belongs to the UI, so logs go to a file. RUST_LOG overrides.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("tvradio log: {}", log_path.display());

    tracing::info!("tvradio starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("config: {} (using defaults)", e);
            Config::default()
        }
    };
    tracing::info!(
        "remote platform: {}, page size {}",
        config.remote.platform.label(),
        config.catalog.page_size
    );

    let catalog = Catalog::bundled()?;
    tracing::info!(
        "catalogue: {} stations, {} countries",
        catalog.stations.len(),
        catalog.countries.len()
    );

    // ── Run TUI ──────────────────────────────────────────────────────────────
    app::App::new(config, catalog).run().await?;

    Ok(())
}
