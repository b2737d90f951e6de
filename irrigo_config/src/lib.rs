#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and crop-model CSV parsing for the irrigation service.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The model CSV loader enforces headers and rejects malformed rows
//!   before the rows are turned into a runtime classifier.
use serde::Deserialize;

/// Crop model CSV schema.
///
/// Expected headers:
/// label,n,p,k,temperature,humidity,ph,rainfall
///
/// Example:
/// label,n,p,k,temperature,humidity,ph,rainfall
/// rice,79.9,47.6,39.9,23.7,82.3,6.4,236.2
#[derive(Debug, Deserialize, Clone)]
pub struct ModelRow {
    pub label: String,
    pub n: f32,
    pub p: f32,
    pub k: f32,
    pub temperature: f32,
    pub humidity: f32,
    pub ph: f32,
    pub rainfall: f32,
}

impl ModelRow {
    /// Feature columns in classifier order.
    pub fn features(&self) -> [f32; 7] {
        [
            self.n,
            self.p,
            self.k,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerCfg {
    /// Listen address, e.g. "0.0.0.0:5000"
    pub bind: String,
    /// Request body cap in bytes for the HTTP layer
    pub max_body_bytes: usize,
}

impl Default for ServerCfg {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            max_body_bytes: 32 * 1024,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FilesCfg {
    /// Append-only telemetry log
    pub sensor_log: std::path::PathBuf,
    /// Append-only contact-message log
    pub message_log: std::path::PathBuf,
    /// Crop model CSV; when the file is absent the prediction endpoint
    /// reports the engine as unavailable instead of failing startup.
    pub model: Option<std::path::PathBuf>,
}

impl Default for FilesCfg {
    fn default() -> Self {
        Self {
            sensor_log: "sensor_data.csv".into(),
            message_log: "messages.csv".into(),
            model: Some("crop_model.csv".into()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct PumpCfg {
    /// Pump turns ON strictly below this moisture reading
    pub moisture_threshold: i32,
}

impl Default for PumpCfg {
    fn default() -> Self {
        Self {
            moisture_threshold: 500,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct HistoryCfg {
    /// Maximum retained prediction records
    pub capacity: usize,
}

impl Default for HistoryCfg {
    fn default() -> Self {
        Self { capacity: 5 }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub server: ServerCfg,
    pub files: FilesCfg,
    pub pump: PumpCfg,
    pub history: HistoryCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Server
        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            eyre::bail!(
                "server.bind must be a socket address, got: {}",
                self.server.bind
            );
        }
        if self.server.max_body_bytes < 1024 {
            eyre::bail!("server.max_body_bytes must be >= 1024");
        }

        // Pump
        if self.pump.moisture_threshold <= 0 {
            eyre::bail!("pump.moisture_threshold must be > 0");
        }

        // History
        if self.history.capacity == 0 {
            eyre::bail!("history.capacity must be >= 1");
        }
        if self.history.capacity > 100 {
            eyre::bail!("history.capacity is unreasonably large (>100)");
        }

        // Files
        if self.files.sensor_log == self.files.message_log {
            eyre::bail!("files.sensor_log and files.message_log must differ");
        }

        // Logging
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !matches!(rotation, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}

pub fn load_model_csv(path: &std::path::Path) -> eyre::Result<Vec<ModelRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open model CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = [
        "label",
        "n",
        "p",
        "k",
        "temperature",
        "humidity",
        "ph",
        "rainfall",
    ];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "model CSV must have headers 'label,n,p,k,temperature,humidity,ph,rainfall', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<ModelRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }

    Ok(rows)
}
