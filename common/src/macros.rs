//! Status macros shared by every crate in the workspace.
//!
//! Each one is a thin wrapper over a `tracing` event. The CLI formatter picks
//! the prefix symbol from the level and the target.

/// Neutral status line, e.g. `[*] Resolved 10.0.0.1:123`.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "roast::info", $($arg)*)
    };
}

/// Positive outcome, e.g. `[+] Recovered 3 hashes`.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "roast::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "roast::warn", $($arg)*)
    };
}

/// Fatal outcome, e.g. `[-] Scan aborted: channel closed`.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: "roast::error", $($arg)*)
    };
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
