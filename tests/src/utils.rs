use std::collections::HashMap;
use std::net::{SocketAddr, SocketAddrV4};
use std::sync::{Arc, Mutex};

use roast_protocols::ntp;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// How the fake domain controller answers.
#[derive(Default, Clone)]
pub struct ServerScript {
    /// RID -> number of identical responses sent back.
    pub replies: HashMap<u32, usize>,
    pub legacy: bool,
    /// Send a 40-byte junk datagram before handling each query.
    pub garbage: bool,
}

impl ServerScript {
    pub fn replying(rids: &[(u32, usize)]) -> Self {
        Self {
            replies: rids.iter().copied().collect(),
            ..Default::default()
        }
    }
}

/// Loopback UDP server that answers MS-SNTP queries the way a domain
/// controller would, minus the real MD5.
pub struct FakeTimeServer {
    addr: SocketAddrV4,
    queries: Arc<Mutex<Vec<(u32, SocketAddr)>>>,
    handle: JoinHandle<()>,
}

impl FakeTimeServer {
    pub async fn start(script: ServerScript) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = match socket.local_addr()? {
            SocketAddr::V4(v4) => v4,
            SocketAddr::V6(v6) => anyhow::bail!("expected IPv4, got {v6}"),
        };
        let queries: Arc<Mutex<Vec<(u32, SocketAddr)>>> = Arc::default();
        let queries_ref = queries.clone();

        let handle = tokio::spawn(async move {
            let mut buf = [0u8; 512];
            while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
                let Some(rid) = ntp::decode_identifier(&buf[..len], script.legacy) else {
                    continue;
                };
                queries_ref.lock().unwrap().push((rid, peer));

                if script.garbage {
                    let _ = socket.send_to(&[0xee; 40], peer).await;
                }

                let copies = script.replies.get(&rid).copied().unwrap_or(0);
                let response = response_for(&buf[..len], rid);
                for _ in 0..copies {
                    let _ = socket.send_to(&response, peer).await;
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddrV4 {
        self.addr
    }

    /// RIDs queried so far, in arrival order.
    pub fn queries(&self) -> Vec<u32> {
        self.queries.lock().unwrap().iter().map(|(rid, _)| *rid).collect()
    }

    /// Source ports the queries came from, in arrival order.
    pub fn source_ports(&self) -> Vec<u16> {
        self.queries.lock().unwrap().iter().map(|(_, peer)| peer.port()).collect()
    }
}

impl Drop for FakeTimeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Echoes the query with server mode set and a RID-derived MAC.
pub fn response_for(query: &[u8], rid: u32) -> Vec<u8> {
    let mut response = query.to_vec();
    response[0] = 0x1c;
    for (i, byte) in response[ntp::HASH_OFFSET..].iter_mut().enumerate() {
        *byte = (rid as u8).wrapping_add(i as u8);
    }
    response
}

/// Splits `<rid>:$sntp-ms$<hash>$<salt>`.
pub fn split_line(line: &str) -> (u32, &str, &str) {
    let (rid, rest) = line.split_once(":$sntp-ms$").expect("hashcat prefix");
    let (hash, salt) = rest.split_once('$').expect("hash/salt separator");
    (rid.parse().expect("numeric rid"), hash, salt)
}
