use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrialModelError {
    #[error("invalid trial JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported field selector '{0}'")]
    UnknownSelector(String),
    #[error("unknown filter dimension '{0}'")]
    UnknownDimension(String),
}

pub type Result<T> = std::result::Result<T, TrialModelError>;
