//! Adiposcope: adult obesity assessment
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use adiposcope::adapters::sanitize::SanitizingMakeWriter;
use adiposcope::config::AppConfig;
use adiposcope::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Logs on the terminal would corrupt the TUI (alternate screen).
    let use_file = config.log_mode.uses_file(std::io::stdout().is_terminal());

    let (writer, _guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces as an open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("opening log file {}", config.log_file.display()))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Adiposcope...");

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Adiposcope shutdown complete.");
    Ok(())
}
