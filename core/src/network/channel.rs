//! The UDP endpoint the scanner talks through.
//!
//! One non-blocking IPv4 socket, optionally bound to a fixed source port, paired
//! with a single remote time server. Sends are best effort and receives are
//! bounded by a time budget so that pacing and polling can share one slot.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use async_trait::async_trait;
use roast_common::{error::RoastError, warn};
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, trace};

const RECV_BUFFER_SIZE: usize = 512;
const PRIVILEGED_PORTS_END: u16 = 1024;

#[async_trait]
pub trait DatagramChannel {
    /// Transmits `payload` to the remote endpoint. Failures are swallowed.
    async fn send(&mut self, payload: &[u8]);

    /// Waits at most `budget` for one datagram.
    ///
    /// `Ok(None)` means nothing usable arrived in time. `Err` means the channel
    /// is gone and the scan cannot continue.
    async fn recv_within(&mut self, budget: Duration) -> anyhow::Result<Option<Vec<u8>>>;
}

pub struct EndpointChannel {
    socket: UdpSocket,
    remote: SocketAddrV4,
}

impl EndpointChannel {
    pub async fn open(remote: SocketAddrV4, src_port: Option<u16>) -> anyhow::Result<Self> {
        let port: u16 = src_port.unwrap_or(0);
        if port != 0 && port < PRIVILEGED_PORTS_END && !is_root::is_root() {
            warn!("Source port {port} is privileged, binding will likely fail without root");
        }

        let local = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port);
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|source| RoastError::Bind { port, source })?;

        debug!("bound {} for {}", socket.local_addr()?, remote);
        Ok(Self { socket, remote })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn remote(&self) -> SocketAddrV4 {
        self.remote
    }
}

#[async_trait]
impl DatagramChannel for EndpointChannel {
    async fn send(&mut self, payload: &[u8]) {
        if let Err(e) = self.socket.send_to(payload, self.remote).await {
            debug!("send to {} failed: {e}", self.remote);
        }
    }

    async fn recv_within(&mut self, budget: Duration) -> anyhow::Result<Option<Vec<u8>>> {
        let mut buffer = [0u8; RECV_BUFFER_SIZE];

        match timeout(budget, self.socket.recv_from(&mut buffer)).await {
            Err(_elapsed) => Ok(None),
            Ok(Ok((len, source))) => {
                trace!("{len} bytes from {source}");
                Ok(Some(buffer[..len].to_vec()))
            }
            Ok(Err(e)) if is_transient(&e) => {
                trace!("ignoring receive error: {e}");
                Ok(None)
            }
            Ok(Err(e)) => Err(RoastError::ChannelClosed(e).into()),
        }
    }
}

// ICMP unreachable replies surface as these on some platforms.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::Interrupted
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
