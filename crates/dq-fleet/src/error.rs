use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("fleet config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FleetResult<T> = Result<T, FleetError>;
