//! Nearest-centroid crop classifier.
//!
//! Each row of the model CSV contributes one labeled centroid; prediction
//! returns the label of the centroid closest (squared Euclidean distance)
//! to the soil-adjusted feature vector. The trait seam keeps this
//! swappable for a heavier classifier.

use irrigo_config::ModelRow;
use irrigo_traits::{CropModel, FEATURE_COUNT};

use crate::error::{EngineError, Report, Result};

#[derive(Debug, Clone)]
struct Centroid {
    label: String,
    features: [f32; FEATURE_COUNT],
}

#[derive(Debug, Clone)]
pub struct CentroidModel {
    centroids: Vec<Centroid>,
}

impl CentroidModel {
    /// Build a model from parsed CSV rows. Requires at least one row;
    /// every row needs a non-empty label and finite features.
    pub fn from_rows(rows: Vec<ModelRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Report::new(EngineError::EmptyModel));
        }
        let mut centroids = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            if row.label.trim().is_empty() {
                return Err(Report::new(EngineError::EmptyLabel(idx + 1)));
            }
            let features = row.features();
            if features.iter().any(|x| !x.is_finite()) {
                return Err(Report::new(EngineError::NonFiniteFeature(idx + 1)));
            }
            centroids.push(Centroid {
                label: row.label,
                features,
            });
        }
        Ok(Self { centroids })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
}

impl TryFrom<Vec<ModelRow>> for CentroidModel {
    type Error = Report;
    fn try_from(rows: Vec<ModelRow>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

#[inline]
fn squared_distance(a: &[f32; FEATURE_COUNT], b: &[f32; FEATURE_COUNT]) -> f32 {
    let mut acc = 0.0f32;
    for i in 0..FEATURE_COUNT {
        let d = a[i] - b[i];
        acc += d * d;
    }
    acc
}

impl CropModel for CentroidModel {
    fn predict(
        &self,
        features: &[f32; FEATURE_COUNT],
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut best: Option<(f32, &Centroid)> = None;
        for c in &self.centroids {
            let d = squared_distance(features, &c.features);
            match best {
                Some((best_d, _)) if d >= best_d => {}
                _ => best = Some((d, c)),
            }
        }
        let Some((_, c)) = best else {
            return Err(Box::new(EngineError::EmptyModel));
        };
        Ok(c.label.clone())
    }
}
