//! Shared building blocks for the roast workspace.
//!
//! * **[`config`]**: Scan tuning knobs (rate, idle timeout, legacy format, source port).
//! * **[`rid`]**: Parsing of RID lists such as `1000-1200,2500`.
//! * **[`record`]**: The recovered hash record and the sinks it is written to.
//! * **[`error`]**: Domain error taxonomy.

pub mod config;
pub mod error;
pub mod record;
pub mod rid;

mod macros;

#[doc(hidden)]
pub use tracing;
