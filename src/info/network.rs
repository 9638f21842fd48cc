// ABOUTME: Best-effort local IPv4 address discovery
// ABOUTME: Resolves the local host name and picks a private or public address by preference

use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use tracing::debug;

use super::error::{InfoError, Result};

/// Whether `address` lies in 10/8, 172.16/12 or 192.168/16.
pub fn is_private_range(address: &Ipv4Addr) -> bool {
    let [first, second, ..] = address.octets();
    first == 10 || (first == 192 && second == 168) || (first == 172 && (16..=31).contains(&second))
}

/// Pick an address from a resolved list.
///
/// A single address is returned as is. Otherwise the first address whose class
/// matches the preference wins, falling back to the first address in the list.
pub fn select_address(addresses: &[Ipv4Addr], prefer_private: bool) -> Option<Ipv4Addr> {
    if addresses.len() == 1 {
        return addresses.first().copied();
    }

    addresses
        .iter()
        .find(|address| is_private_range(address) == prefer_private)
        .or_else(|| addresses.first())
        .copied()
}

/// Resolve every IPv4 address registered for `host`.
pub fn resolve_host(host: &str) -> Result<Vec<Ipv4Addr>> {
    let resolved = (host, 0)
        .to_socket_addrs()
        .map_err(|e| InfoError::AddressResolution {
            host: host.to_string(),
            message: e.to_string(),
        })?;

    let mut addresses = Vec::new();
    for socket in resolved {
        if let IpAddr::V4(address) = socket.ip() {
            if !addresses.contains(&address) {
                addresses.push(address);
            }
        }
    }

    debug!("Resolved {} IPv4 addresses for {}", addresses.len(), host);
    Ok(addresses)
}

/// Find the local machine's address, preferring private ranges when asked.
///
/// Resolution failures are returned to the caller rather than replaced by a
/// synthetic address.
pub fn find_local_address(host: &str, prefer_private: bool) -> Result<Ipv4Addr> {
    let addresses = resolve_host(host)?;
    select_address(&addresses, prefer_private).ok_or_else(|| InfoError::NoAddress {
        host: host.to_string(),
    })
}
