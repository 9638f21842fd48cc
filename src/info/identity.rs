// ABOUTME: Current user identity lookup with an environment fallback
// ABOUTME: Produces a domain-qualified account name and never fails

use std::env;
use tracing::debug;

use super::error::{InfoError, Result};

/// Resolve the user identity, trying `primary` then `secondary`, then giving up
/// with an empty string. Empty results count as failures.
pub fn resolve_identity<P, S>(primary: P, secondary: S) -> String
where
    P: FnOnce() -> Result<String>,
    S: FnOnce() -> Result<String>,
{
    let non_empty = |result: Result<String>, source: &str| match result {
        Ok(name) if !name.is_empty() => Some(name),
        Ok(_) => {
            debug!("{} identity lookup returned an empty name", source);
            None
        }
        Err(e) => {
            debug!("{} identity lookup failed: {}", source, e);
            None
        }
    };

    non_empty(primary(), "OS")
        .or_else(|| non_empty(secondary(), "Environment"))
        .unwrap_or_default()
}

/// `domain\user` as reported by the operating system.
pub fn os_identity() -> Result<String> {
    let user = whoami::fallible::username().map_err(|e| InfoError::IdentityLookup {
        message: e.to_string(),
    })?;
    let domain = whoami::fallible::hostname().map_err(|e| InfoError::IdentityLookup {
        message: e.to_string(),
    })?;
    Ok(qualify(&domain, &user))
}

/// `domain\user` composed from environment variables.
pub fn environment_identity() -> Result<String> {
    let user = first_var(&["USER", "USERNAME", "LOGNAME"]).ok_or_else(|| {
        InfoError::IdentityLookup {
            message: "no user name in environment".to_string(),
        }
    })?;
    let domain = first_var(&["USERDOMAIN", "COMPUTERNAME", "HOSTNAME"]).unwrap_or_default();
    Ok(qualify(&domain, &user))
}

pub fn current_user() -> String {
    resolve_identity(os_identity, environment_identity)
}

fn qualify(domain: &str, user: &str) -> String {
    format!("{}\\{}", domain, user)
}

fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
}
