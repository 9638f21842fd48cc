// ABOUTME: Error types for environment metadata lookups
// ABOUTME: Failures are cloneable so a cached lookup result can be handed out repeatedly

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfoError {
    #[error("Failed to get hostname: {message}")]
    HostnameLookup { message: String },

    #[error("Failed to resolve addresses for host '{host}': {message}")]
    AddressResolution { host: String, message: String },

    #[error("No IPv4 address found for host '{host}'")]
    NoAddress { host: String },

    #[error("Identity lookup failed: {message}")]
    IdentityLookup { message: String },
}

pub type Result<T> = std::result::Result<T, InfoError>;
