//! MS-SNTP authenticated request/response layout.
//!
//! ```text
//! offset  len  field
//!      0   48  NTP header (request: fixed prefix, response: echoed "salt")
//!     48    4  key identifier = RID, little-endian, top bit set in legacy mode
//!     52   16  MAC (request: zeroes, response: MD5 over salt with the account key)
//! ```
//!
//! The key identifier byte order is fixed by what domain controllers accept and
//! must stay little-endian.

use roast_common::record::RoastRecord;
use tracing::trace;

pub const NTP_PORT: u16 = 123;

pub const PREFIX_LEN: usize = 48;
pub const RID_OFFSET: usize = PREFIX_LEN;
pub const HASH_OFFSET: usize = RID_OFFSET + 4;
pub const HASH_LEN: usize = 16;
pub const QUERY_LEN: usize = HASH_OFFSET + HASH_LEN;

const LEGACY_FLAG: u32 = 1 << 31;

/// Client-mode NTPv3 header sent with every query.
#[rustfmt::skip]
const NTP_PREFIX: [u8; PREFIX_LEN] = [
    0xdb, 0x00, 0x11, 0xe9, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xe1, 0xb8, 0x40, 0x7d, 0xeb, 0xc7, 0xe5, 0x06,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xe1, 0xb8, 0x42, 0x8b, 0xff, 0xbf, 0xcd, 0x0a,
];

/// Builds the authenticated query for `rid`.
pub fn create_query(rid: u32, legacy: bool) -> [u8; QUERY_LEN] {
    let mut buffer = [0u8; QUERY_LEN];
    buffer[..PREFIX_LEN].copy_from_slice(&NTP_PREFIX);
    buffer[RID_OFFSET..HASH_OFFSET].copy_from_slice(&encode_key_id(rid, legacy).to_le_bytes());
    buffer
}

/// Reads the RID from the key identifier field of a query or response.
///
/// Returns `None` unless `datagram` is exactly [`QUERY_LEN`] bytes.
pub fn decode_identifier(datagram: &[u8], legacy: bool) -> Option<u32> {
    if datagram.len() != QUERY_LEN {
        return None;
    }
    let key_id: [u8; 4] = datagram[RID_OFFSET..HASH_OFFSET].try_into().ok()?;
    Some(encode_key_id(u32::from_le_bytes(key_id), legacy))
}

/// Decodes an authenticated response into a hash record.
///
/// Anything that is not exactly [`QUERY_LEN`] bytes is treated as noise.
pub fn parse_response(datagram: &[u8], legacy: bool) -> Option<RoastRecord> {
    let Some(rid) = decode_identifier(datagram, legacy) else {
        trace!(len = datagram.len(), "discarding datagram of unexpected size");
        return None;
    };
    Some(RoastRecord {
        rid,
        hash: hex::encode(&datagram[HASH_OFFSET..QUERY_LEN]),
        salt: hex::encode(&datagram[..PREFIX_LEN]),
    })
}

// XOR is its own inverse, so this both encodes and decodes.
fn encode_key_id(rid: u32, legacy: bool) -> u32 {
    if legacy { rid ^ LEGACY_FLAG } else { rid }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
