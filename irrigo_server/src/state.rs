//! Shared process state handed to every handler.

use std::sync::Arc;

use irrigo_core::{ContactMessage, CsvStore, PredictionHistory, PumpController, SensorReading};
use irrigo_traits::CropModel;
use tokio::sync::Mutex;

/// Pump status, prediction history, and the two record stores, built once
/// at startup and cloned into every handler. Mutex-protected: concurrent
/// requests see consistent state and store appends are serialized within
/// the process.
#[derive(Clone)]
pub struct AppState {
    pub pump: Arc<Mutex<PumpController>>,
    pub history: Arc<Mutex<PredictionHistory>>,
    pub sensor_log: Arc<Mutex<CsvStore<SensorReading>>>,
    pub message_log: Arc<Mutex<CsvStore<ContactMessage>>>,
    /// Absent when the model file is not configured or does not exist;
    /// the predict endpoint then short-circuits with a fixed message.
    pub model: Option<Arc<dyn CropModel + Send + Sync>>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(
        pump: PumpController,
        history: PredictionHistory,
        sensor_log: CsvStore<SensorReading>,
        message_log: CsvStore<ContactMessage>,
        model: Option<Arc<dyn CropModel + Send + Sync>>,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            pump: Arc::new(Mutex::new(pump)),
            history: Arc::new(Mutex::new(history)),
            sensor_log: Arc::new(Mutex::new(sensor_log)),
            message_log: Arc::new(Mutex::new(message_log)),
            model,
            max_body_bytes,
        }
    }
}
