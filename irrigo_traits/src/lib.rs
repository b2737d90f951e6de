/// Number of numeric features a crop model consumes:
/// N, P, K, temperature, humidity, pH, rainfall.
pub const FEATURE_COUNT: usize = 7;

/// Black-box crop classifier: a soil-adjusted feature vector in, a crop
/// label out. Implementations decide what "closest crop" means; callers
/// only rely on this seam so the engine stays swappable.
pub trait CropModel {
    fn predict(
        &self,
        features: &[f32; FEATURE_COUNT],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
