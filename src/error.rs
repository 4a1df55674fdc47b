use thiserror::Error;

/// Rejected finder configuration or search input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinderError
{
    #[error("Invalid {name}: {value} (must be finite and positive)")]
    InvalidStep { name: &'static str, value: f64 },
    #[error("Invalid path length: {0}")]
    InvalidPathLength(f64),
    #[error("Query point ({x}, {y}) is not finite")]
    NonFiniteQuery { x: f64, y: f64 },
    #[error("Path transform is not invertible")]
    SingularTransform,
}

/// Failure to build a path from a textual description
#[derive(Debug, Error)]
pub enum PathError
{
    #[error("Failed to open file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse path description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Syntax error at \"{0}\"")]
    Syntax(String),
    #[error("Start point {0} is not finite")]
    InvalidStart(crate::coords::Point),
    #[error("Invalid segment {index}: {reason}")]
    InvalidSegment { index: usize, reason: String },
}

/// Failure to load a finder configuration file
#[derive(Debug, Error)]
pub enum ConfigError
{
    #[error("Failed to open file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] FinderError),
}
