//! Error types shared across RegionWatch crates.

use std::path::PathBuf;

/// Boxed error returned by a failing transition callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for RegionWatch operations.
#[derive(Debug, thiserror::Error)]
pub enum RegionwatchError {
    /// A region was rejected because its in-point lies after its out-point
    /// (or is not a number). The region set is left untouched.
    #[error("Can not create region with in > out (in: {in_point}, out: {out_point})")]
    InvalidRegion { in_point: f64, out_point: f64 },

    /// A transition callback failed. Events queued after the failing one
    /// were not delivered.
    #[error("Callback for {event} failed: {source}")]
    Callback {
        event: String,
        #[source]
        source: CallbackError,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using RegionwatchError.
pub type RegionwatchResult<T> = Result<T, RegionwatchError>;

impl RegionwatchError {
    pub fn invalid_region(in_point: f64, out_point: f64) -> Self {
        Self::InvalidRegion {
            in_point,
            out_point,
        }
    }

    pub fn callback(event: impl Into<String>, source: impl Into<CallbackError>) -> Self {
        Self::Callback {
            event: event.into(),
            source: source.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error is the atomic rejection of a malformed region.
    pub fn is_invalid_region(&self) -> bool {
        matches!(self, Self::InvalidRegion { .. })
    }
}
