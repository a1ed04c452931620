use std::time::Duration;

/// Requests per second sent when no rate is given.
pub const DEFAULT_RATE: u32 = 180;

/// Seconds without a new hash before the scan is considered complete.
pub const DEFAULT_TIMEOUT_SECS: u64 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Queries per second. A rate of zero is treated as one.
    pub rate: u32,
    /// Idle period after the last accepted hash that ends the scan.
    pub timeout: Duration,
    /// Flip the top bit of every RID, as expected by older domain controllers.
    pub legacy: bool,
    /// Fixed local source port. `None` lets the OS pick one.
    pub src_port: Option<u16>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            legacy: false,
            src_port: None,
        }
    }
}

impl ScanConfig {
    /// Time slot shared by one send and one receive poll.
    ///
    /// Whole milliseconds, so rates above 1000/s collapse to a zero interval.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(1_000 / u64::from(self.rate.max(1)))
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
