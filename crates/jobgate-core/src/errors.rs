/// Failures surfaced by the risk gate and decision record engines.
///
/// Every variant is recoverable at the call site by correcting the input or
/// the configuration; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum JobGateError {
    /// Malformed job data or an unusable signal set.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Out-of-range thresholds, rejected when the engine is constructed.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl JobGateError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, JobGateError>;
