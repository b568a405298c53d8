use std::io;

/// Errors raised at the boundary of the geometry core: configuration and
/// input documents. The geometric builders themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, GeometryError>;
