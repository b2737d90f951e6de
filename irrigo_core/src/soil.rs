//! Soil types and the per-soil feature adjustment.

use std::fmt;
use std::str::FromStr;

use irrigo_traits::FEATURE_COUNT;

use crate::error::InvalidSoilType;

/// Soil classes the prediction form accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilType {
    Sandy,
    Loamy,
    Clay,
    Black,
    Red,
}

impl SoilType {
    pub const ALL: [SoilType; 5] = [
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Clay,
        SoilType::Black,
        SoilType::Red,
    ];

    /// Multiplicative adjustment applied to every numeric feature
    /// before the vector reaches the crop model.
    #[inline]
    pub fn factor(self) -> f32 {
        match self {
            SoilType::Sandy => 0.9,
            SoilType::Loamy => 1.0,
            SoilType::Clay => 0.85,
            SoilType::Black => 0.95,
            SoilType::Red => 0.88,
        }
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            SoilType::Sandy => "sandy",
            SoilType::Loamy => "loamy",
            SoilType::Clay => "clay",
            SoilType::Black => "black",
            SoilType::Red => "red",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoilType {
    type Err = InvalidSoilType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandy" => Ok(SoilType::Sandy),
            "loamy" => Ok(SoilType::Loamy),
            "clay" => Ok(SoilType::Clay),
            "black" => Ok(SoilType::Black),
            "red" => Ok(SoilType::Red),
            other => Err(InvalidSoilType(other.to_string())),
        }
    }
}

/// Scale the feature vector element-wise by the soil factor.
#[inline]
pub fn adjust_features(features: &[f32; FEATURE_COUNT], soil: SoilType) -> [f32; FEATURE_COUNT] {
    features.map(|x| x * soil.factor())
}
