use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(String),
    #[error("header mismatch: expected '{expected}', got '{actual}'")]
    HeaderMismatch { expected: String, actual: String },
    #[error("malformed row {row}: {message}")]
    MalformedRow { row: usize, message: String },
}

#[derive(Debug, Error, Clone)]
pub enum EngineError {
    #[error("model has no centroid rows")]
    EmptyModel,
    #[error("model row {0} has an empty label")]
    EmptyLabel(usize),
    #[error("model row {0} has a non-finite feature")]
    NonFiniteFeature(usize),
}

#[derive(Debug, Error, Clone)]
#[error("invalid pump status: {0}")]
pub struct InvalidPumpStatus(pub String);

#[derive(Debug, Error, Clone)]
#[error("invalid soil type: {0}")]
pub struct InvalidSoilType(pub String);

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
