use std::io;
use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoastError {
    #[error("bad range {start}-{end}")]
    BadRange { start: u32, end: u32 },

    #[error("invalid RID '{token}': {source}")]
    InvalidRid {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("range {start}-{end} would queue more than {limit} RIDs")]
    RangeTooLarge { start: u32, end: u32, limit: usize },

    #[error("no RIDs given")]
    EmptyRidList,

    #[error("failed to resolve {host} to an IPv4 address")]
    Resolve { host: String },

    #[error("failed to bind UDP source port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("channel closed: {0}")]
    ChannelClosed(#[source] io::Error),
}
