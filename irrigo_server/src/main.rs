use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use irrigo_config::{Config, FilesCfg, Logging};
use irrigo_core::{
    CentroidModel, ContactMessage, CsvStore, PredictionHistory, PumpController, SensorReading,
};
use irrigo_server::cli::{Cli, Commands, DEFAULT_CONFIG_PATH, FILE_GUARD};
use irrigo_server::{AppState, build_router};
use irrigo_traits::CropModel;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let cfg = load_config(&cli)?;
    init_tracing(&cli, &cfg.logging)?;
    cfg.validate().wrap_err("invalid configuration")?;

    match cli.cmd.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => serve(cfg, bind).await,
        Commands::SelfCheck => self_check(&cfg),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let (path, explicit) = match &cli.config {
        Some(p) => (p.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    if !path.exists() {
        if explicit {
            eyre::bail!("config file not found: {}", path.display());
        }
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = irrigo_config::load_toml(&content)
        .wrap_err_with(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

fn init_tracing(cli: &Cli, logging: &Logging) -> Result<()> {
    // RUST_LOG wins over --log-level, which wins over [logging].level.
    let directives = logging
        .level
        .clone()
        .filter(|_| cli.log_level == "info")
        .unwrap_or_else(|| cli.log_level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let console = if cli.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let file_layer = match &logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "irrigo.log".into());
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("init tracing: {e}"))
}

fn load_model(files: &FilesCfg) -> Result<Option<Arc<dyn CropModel + Send + Sync>>> {
    let Some(path) = files.model.as_ref() else {
        return Ok(None);
    };
    if !path.exists() {
        warn!(path = %path.display(), "crop model file not found; prediction disabled");
        return Ok(None);
    }
    let rows = irrigo_config::load_model_csv(path)?;
    let model = CentroidModel::from_rows(rows)?;
    info!(path = %path.display(), centroids = model.len(), "crop model loaded");
    Ok(Some(Arc::new(model)))
}

fn build_state(cfg: &Config) -> Result<AppState> {
    let sensor_log: CsvStore<SensorReading> = CsvStore::open(&cfg.files.sensor_log)?;
    let message_log: CsvStore<ContactMessage> = CsvStore::open(&cfg.files.message_log)?;
    let model = load_model(&cfg.files)?;
    Ok(AppState::new(
        PumpController::new(cfg.pump.moisture_threshold),
        PredictionHistory::new(cfg.history.capacity),
        sensor_log,
        message_log,
        model,
        cfg.server.max_body_bytes,
    ))
}

async fn serve(cfg: Config, bind_override: Option<SocketAddr>) -> Result<()> {
    let bind: SocketAddr = match bind_override {
        Some(addr) => addr,
        None => cfg
            .server
            .bind
            .parse()
            .map_err(|e| eyre::eyre!("parse server.bind {}: {e}", cfg.server.bind))?,
    };

    let state = build_state(&cfg)?;
    let app = build_router(state);

    let listener = TcpListener::bind(bind)
        .await
        .wrap_err_with(|| format!("bind {bind}"))?;
    info!(%bind, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("serve")?;
    info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

fn self_check(cfg: &Config) -> Result<()> {
    let _sensor: CsvStore<SensorReading> = CsvStore::open(&cfg.files.sensor_log)?;
    let _messages: CsvStore<ContactMessage> = CsvStore::open(&cfg.files.message_log)?;
    let model = load_model(&cfg.files)?;
    if model.is_none() {
        warn!("self-check: prediction engine unavailable");
    }
    println!("self-check ok");
    Ok(())
}
