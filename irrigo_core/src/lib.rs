#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core domain logic for the irrigation service (transport-agnostic).
//!
//! This crate holds everything the HTTP layer calls into. The engine seam
//! goes through `irrigo_traits::CropModel`, so the classifier stays a
//! black box to the rest of the system.
//!
//! ## Architecture
//!
//! - **Pump control**: hard moisture threshold, no hysteresis (`pump`)
//! - **Bounded history**: newest-first prediction list, capped (`history`)
//! - **Record store**: append-only CSV logs with fixed headers (`store`)
//! - **Soil adjustment**: fixed per-soil multiplicative factors (`soil`)
//! - **Prediction engine**: nearest-centroid classifier (`model`)
//!
//! Everything here is synchronous and testable without a network.

pub mod error;
pub mod history;
pub mod mocks;
pub mod model;
pub mod pump;
pub mod soil;
pub mod store;

pub use error::{EngineError, StoreError};
pub use history::{DEFAULT_HISTORY_CAPACITY, PredictionHistory, PredictionRecord};
pub use model::CentroidModel;
pub use pump::{DEFAULT_MOISTURE_THRESHOLD, PumpController, PumpStatus};
pub use soil::{SoilType, adjust_features};
pub use store::{ContactMessage, CsvStore, Record, SensorReading};
