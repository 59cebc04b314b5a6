//! Toolkit error type.
//!
//! Sub-crates define their own error enums and either convert into `CoreError`
//! via `From` impls or keep them separate. The simulation pipeline itself is
//! infallible: every malformed input it can meet is absorbed into a
//! documented fallback, so only boundary crates (loaders, report writers)
//! carry error types at all.

use thiserror::Error;

/// The top-level error type for `dq-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("registry error: {0}")]
    Registry(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `dq-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
