//! Test and helper models for irrigo_core

use std::sync::{Mutex, PoisonError};

use irrigo_traits::{CropModel, FEATURE_COUNT};

/// A model that records every feature vector it is asked to classify and
/// always answers with the same label; useful for asserting what callers
/// actually feed the engine.
#[derive(Debug, Default)]
pub struct StubModel {
    label: String,
    calls: Mutex<Vec<[f32; FEATURE_COUNT]>>,
}

impl StubModel {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every feature vector seen so far, in call order.
    pub fn calls(&self) -> Vec<[f32; FEATURE_COUNT]> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CropModel for StubModel {
    fn predict(
        &self,
        features: &[f32; FEATURE_COUNT],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*features);
        Ok(self.label.clone())
    }
}

/// A model that always errors; useful when driving the failure path.
pub struct FailingModel;

impl CropModel for FailingModel {
    fn predict(
        &self,
        _features: &[f32; FEATURE_COUNT],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("model offline")))
    }
}
