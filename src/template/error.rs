// ABOUTME: Error types for token registration and template rendering
// ABOUTME: Only caller mistakes are errors; missing data never is

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Invalid token name '{name}': {reason}")]
    InvalidToken { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, TemplateError>;
