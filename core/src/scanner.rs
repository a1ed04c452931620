//! The rate-limited roasting loop.
//!
//! Every tick sends at most one query, then spends whatever is left of the
//! pacing interval waiting for a reply. Replies are decoded, deduplicated by RID
//! and handed to the [`HashSink`]. The scan ends once no new hash has been
//! accepted for the configured idle timeout. Running out of RIDs does not end
//! it, since replies may trail a burst of sends.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use roast_common::{config::ScanConfig, record::HashSink, rid::RidList};
use roast_protocols::ntp;
use tokio::time::{self, Instant};
use tracing::{debug, trace};

use crate::network::channel::DatagramChannel;

pub type ProgressCallback = Box<dyn Fn(ScanProgress) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Running,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    pub sent: usize,
    pub total: usize,
    pub recovered: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub sent: usize,
    pub recovered: usize,
    pub elapsed: Duration,
}

/// A single roasting session against one time server.
///
/// Owns the channel for its whole lifetime; the socket is released when
/// [`RoastScanner::run`] returns.
pub struct RoastScanner<C, S> {
    channel: C,
    sink: S,
    rids: RidList,
    cfg: ScanConfig,
    seen: HashSet<u32>,
    next_idx: usize,
    last_accept: Instant,
    stop_signal: Option<Arc<AtomicBool>>,
    on_progress: Option<ProgressCallback>,
}

impl<C: DatagramChannel, S: HashSink> RoastScanner<C, S> {
    pub fn new(channel: C, sink: S, rids: RidList, cfg: ScanConfig) -> Self {
        Self {
            channel,
            sink,
            rids,
            cfg,
            seen: HashSet::new(),
            next_idx: 0,
            last_accept: Instant::now(),
            stop_signal: None,
            on_progress: None,
        }
    }

    /// Ends the scan at the next tick once `stop` is set.
    pub fn with_stop_signal(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop_signal = Some(stop);
        self
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub async fn run(mut self) -> anyhow::Result<ScanReport> {
        let interval: Duration = self.cfg.interval();
        let start: Instant = Instant::now();
        self.last_accept = start;

        debug!(
            "roasting {} RIDs every {}ms, idle timeout {}s",
            self.rids.len(),
            interval.as_millis(),
            self.cfg.timeout.as_secs()
        );

        while self.state() == ScanState::Running {
            let tick_start: Instant = Instant::now();

            self.send_next_query().await;

            let budget: Duration = interval.saturating_sub(tick_start.elapsed());
            if let Some(datagram) = self.channel.recv_within(budget).await? {
                self.process_datagram(&datagram)?;
            }

            let elapsed: Duration = tick_start.elapsed();
            if elapsed < interval {
                time::sleep(interval - elapsed).await;
            }
        }

        Ok(ScanReport {
            sent: self.next_idx,
            recovered: self.seen.len(),
            elapsed: start.elapsed(),
        })
    }

    fn state(&self) -> ScanState {
        let stopped = self
            .stop_signal
            .as_ref()
            .is_some_and(|stop| stop.load(Ordering::Relaxed));

        if stopped || self.last_accept.elapsed() >= self.cfg.timeout {
            ScanState::Done
        } else {
            ScanState::Running
        }
    }

    async fn send_next_query(&mut self) {
        let Some(&rid) = self.rids.get(self.next_idx) else {
            return;
        };
        self.next_idx += 1;

        let query = ntp::create_query(rid, self.cfg.legacy);
        self.channel.send(&query).await;
        self.report_progress();
    }

    /// Accepts the datagram if it decodes to a RID not seen before.
    ///
    /// Only a sink failure is an error; noise and duplicates are dropped.
    fn process_datagram(&mut self, datagram: &[u8]) -> anyhow::Result<()> {
        let Some(record) = ntp::parse_response(datagram, self.cfg.legacy) else {
            return Ok(());
        };

        if !self.seen.insert(record.rid) {
            trace!("duplicate response for RID {}", record.rid);
            return Ok(());
        }

        self.sink.emit(&record)?;
        self.last_accept = Instant::now();
        self.report_progress();
        Ok(())
    }

    fn report_progress(&self) {
        if let Some(callback) = &self.on_progress {
            callback(ScanProgress {
                sent: self.next_idx,
                total: self.rids.len(),
                recovered: self.seen.len(),
            });
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
