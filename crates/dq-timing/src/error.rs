use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimingError {
    #[error("timing table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TimingResult<T> = Result<T, TimingError>;
