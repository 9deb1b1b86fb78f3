mod cli;
use cli::{parse_cli_mode, run_command, CliMode, USAGE};
mod tui;
use tui::{check_or_setup_auth, run_tui};

use std::sync::Arc;

use countday::{settings::SettingsStore, storage::config::Config, Session, SharedStore, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    if cli_mode == CliMode::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::load_or_create()?;
    let defaults = config.open_defaults()?;
    let settings = SettingsStore::new(defaults.clone()).load().await;

    let session = if cli_mode.needs_authentication() {
        match check_or_setup_auth(defaults.as_ref(), &settings).await {
            Ok(session) => session,
            Err(e) => {
                eprintln!("Authentication error: {}", e);
                tracing::error!("Authentication failed: {}", e);
                return Ok(());
            }
        }
    } else {
        Session::load(defaults.as_ref(), &settings).await
    };

    match cli_mode {
        CliMode::Tui => run_tui(&config, &settings, session, SharedStore::new(defaults)).await?,
        mode => run_command(mode, &config, settings, defaults, Arc::new(SystemClock)).await?,
    }

    Ok(())
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "countday.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("countday started");
}
