// ABOUTME: Error types for loading and parsing report files
// ABOUTME: Wraps I/O and serde failures raised while reading reports

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report file not found: {path}")]
    NotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
