// ABOUTME: Main library module for the crashplate crash report renderer
// ABOUTME: Exports metadata providers, the report model and the template renderer

pub mod cli;
pub mod info;
pub mod report;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use info::{AppAttributes, EnvironmentInfo, InfoError, MetadataSnapshot};
pub use report::{GeneralInfo, Report, SerializableException};
pub use template::{TemplateError, TemplateRenderer, TokenRegistry};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
