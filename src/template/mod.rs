// ABOUTME: Token substitution for crash report templates
// ABOUTME: Provides the token registry, render context and single-pass renderer

pub mod context;
pub mod error;
pub mod renderer;
pub mod tokens;

pub use context::RenderContext;
pub use error::{Result, TemplateError};
pub use renderer::{substitute, TemplateRenderer};
pub use tokens::{TokenRegistry, TokenValue, BUILTIN_TOKENS};
