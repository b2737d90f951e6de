//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Config path used when `--config` is not given; a missing file here
/// falls back to built-in defaults instead of erroring.
pub const DEFAULT_CONFIG_PATH: &str = "etc/irrigo.toml";

#[derive(Parser, Debug)]
#[command(
    name = "irrigo",
    version,
    about = "Irrigation telemetry and crop recommendation service"
)]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute (defaults to serve)
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Override [server].bind from the config
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },
    /// Quick health check (config, record logs, model load)
    SelfCheck,
}
