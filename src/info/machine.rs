// ABOUTME: Host machine facts: host name, runtime version, culture, address and user
// ABOUTME: Each fact is looked up on first use and cached for the lifetime of the owner

use once_cell::sync::OnceCell;
use serde::Serialize;
use std::env;
use std::net::Ipv4Addr;
use tracing::{debug, warn};

use super::error::{InfoError, Result};
use super::{identity, network};

/// Plain values for every machine fact, used to pre-populate [`MachineInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineFacts {
    pub hostname: Option<String>,
    pub runtime_version: String,
    pub culture: String,
    pub local_ip: Result<Ipv4Addr>,
    pub user: String,
}

#[derive(Debug, Default)]
pub struct MachineInfo {
    prefer_private_address: bool,
    hostname: OnceCell<Option<String>>,
    runtime_version: OnceCell<String>,
    culture: OnceCell<String>,
    local_ip: OnceCell<Result<Ipv4Addr>>,
    user: OnceCell<String>,
}

impl MachineInfo {
    pub fn new(prefer_private_address: bool) -> Self {
        Self {
            prefer_private_address,
            ..Default::default()
        }
    }

    /// Machine info that never touches the operating system.
    pub fn fixed(facts: MachineFacts) -> Self {
        Self {
            prefer_private_address: true,
            hostname: OnceCell::with_value(facts.hostname),
            runtime_version: OnceCell::with_value(facts.runtime_version),
            culture: OnceCell::with_value(facts.culture),
            local_ip: OnceCell::with_value(facts.local_ip),
            user: OnceCell::with_value(facts.user),
        }
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname
            .get_or_init(|| match lookup_hostname() {
                Ok(name) => Some(name),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            })
            .as_deref()
    }

    pub fn runtime_version(&self) -> &str {
        self.runtime_version.get_or_init(runtime_version)
    }

    pub fn culture(&self) -> &str {
        self.culture.get_or_init(current_culture)
    }

    /// The selected local IPv4 address. A failed lookup is cached and returned again.
    pub fn local_ip(&self) -> Result<Ipv4Addr> {
        self.local_ip
            .get_or_init(|| {
                let host = lookup_hostname()?;
                network::find_local_address(&host, self.prefer_private_address)
            })
            .clone()
    }

    pub fn user(&self) -> &str {
        self.user.get_or_init(identity::current_user)
    }

    /// Resolve every fact and return them as plain values.
    pub fn facts(&self) -> MachineFacts {
        MachineFacts {
            hostname: self.hostname().map(str::to_string),
            runtime_version: self.runtime_version().to_string(),
            culture: self.culture().to_string(),
            local_ip: self.local_ip(),
            user: self.user().to_string(),
        }
    }
}

impl MachineFacts {
    pub fn summary(&self) -> MachineSummary {
        MachineSummary {
            hostname: self.hostname.clone(),
            runtime_version: self.runtime_version.clone(),
            culture: self.culture.clone(),
            local_ip: self.local_ip.as_ref().ok().map(|ip| ip.to_string()),
            user: self.user.clone(),
        }
    }
}

/// Serializable view of [`MachineFacts`], with a failed address lookup as `None`.
#[derive(Debug, Clone, Serialize)]
pub struct MachineSummary {
    pub hostname: Option<String>,
    pub runtime_version: String,
    pub culture: String,
    pub local_ip: Option<String>,
    pub user: String,
}

pub fn lookup_hostname() -> Result<String> {
    let name = hostname::get().map_err(|e| InfoError::HostnameLookup {
        message: e.to_string(),
    })?;
    Ok(name.to_string_lossy().to_string())
}

pub fn runtime_version() -> String {
    format!("{} ({})", whoami::distro(), env::consts::ARCH)
}

/// The current culture from the locale environment, or the invariant culture
/// (an empty string) when none is configured.
pub fn current_culture() -> String {
    let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
        .unwrap_or_default();

    let culture = culture_from_locale(&locale);
    debug!("Current culture: '{}' (from locale '{}')", culture, locale);
    culture
}

/// Convert a POSIX locale such as `en_US.UTF-8@euro` to a culture name (`en-US`).
pub fn culture_from_locale(locale: &str) -> String {
    let name = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    match name {
        "" | "C" | "POSIX" => String::new(),
        other => other.replace('_', "-"),
    }
}
