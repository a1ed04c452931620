pub mod roast;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use roast_common::config::{DEFAULT_RATE, DEFAULT_TIMEOUT_SECS, ScanConfig};
use roast_common::rid::RidList;

#[derive(Parser)]
#[command(name = "roast")]
#[command(version)]
#[command(about = "Collects MS-SNTP computer account hashes from a domain controller.")]
pub struct CommandLine {
    /// Domain controller IPv4 address or hostname
    #[arg(short = 'd', long = "dc")]
    pub dc: String,

    /// RIDs to query, e.g. "500,1000-1200"
    #[arg(short = 'r', long = "rids")]
    pub rids: RidList,

    /// Queries per second
    #[arg(short = 'a', long, default_value_t = DEFAULT_RATE)]
    pub rate: u32,

    /// Seconds without a new hash before giving up
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Use the old key identifier format (top bit flipped)
    #[arg(short = 'l', long)]
    pub legacy: bool,

    /// Fixed UDP source port, e.g. 123 for servers that require it
    #[arg(short = 'p', long = "src-port")]
    pub src_port: Option<u16>,

    /// Write hashes to this file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Less output (-q hides headers, -qq also hides the spinner)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Skip the startup banner
    #[arg(long)]
    pub no_banner: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> ScanConfig {
        ScanConfig {
            rate: self.rate,
            timeout: Duration::from_secs(self.timeout),
            legacy: self.legacy,
            src_port: self.src_port,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
