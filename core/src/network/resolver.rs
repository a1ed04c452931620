use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use roast_common::error::RoastError;
use roast_protocols::ntp::NTP_PORT;
use tokio::net::lookup_host;
use tracing::debug;

/// Resolves a domain controller name or address to its NTP endpoint.
///
/// IPv4 literals are used as is. Names go through the system resolver and the
/// first IPv4 answer wins.
pub async fn resolve_target(host: &str) -> anyhow::Result<SocketAddrV4> {
    if let Ok(ipv4_addr) = host.parse::<Ipv4Addr>() {
        return Ok(SocketAddrV4::new(ipv4_addr, NTP_PORT));
    }

    let resolve_err = || RoastError::Resolve {
        host: host.to_string(),
    };

    let addrs = lookup_host((host, NTP_PORT)).await.map_err(|e| {
        debug!("lookup of {host} failed: {e}");
        resolve_err()
    })?;

    let found = addrs
        .filter_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(v4),
            SocketAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(resolve_err)?;

    Ok(found)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
