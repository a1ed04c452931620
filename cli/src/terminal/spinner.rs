use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use roast_core::scanner::ScanProgress;
use tracing_subscriber::EnvFilter;

use crate::terminal::logging::RoastFormatter;

const HINT: &str = "Ctrl-C stops early and keeps what was recovered";

pub struct SpinnerHandle {
    pub spinner: ProgressBar,
}

impl SpinnerHandle {
    pub fn println(&self, msg: &str) {
        self.spinner.println(msg);
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }

    pub fn set_message(&self, msg: String) {
        self.spinner.set_message(msg);
    }

    fn is_active(&self) -> bool {
        !self.spinner.is_finished()
    }
}

static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

pub fn get_spinner() -> &'static SpinnerHandle {
    SPINNER.get_or_init(init_spinner)
}

fn active_spinner() -> Option<&'static SpinnerHandle> {
    SPINNER.get().filter(|handle| handle.is_active())
}

fn init_spinner() -> SpinnerHandle {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.set_message(format!("{}", HINT.italic().white()));
    pb.enable_steady_tick(Duration::from_millis(100));

    SpinnerHandle { spinner: pb }
}

pub fn report_roast_progress(progress: ScanProgress) {
    get_spinner().set_message(progress_message(progress));
}

fn progress_message(progress: ScanProgress) -> String {
    format!(
        "Sent {}/{} queries, {} hashes so far... {}",
        progress.sent,
        progress.total,
        progress.recovered.to_string().green().bold(),
        format!("({HINT})").dimmed()
    )
}

/// Installs the global subscriber. Everything goes to stderr, above the
/// spinner while one is running, so stdout carries nothing but hashes.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(RoastFormatter)
        .with_writer(|| SpinnerWriter)
        .init();
}

pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active_spinner() {
            Some(handle) => {
                let msg = String::from_utf8_lossy(buf);
                handle.println(msg.trim_end());
                Ok(buf.len())
            }
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Stdout that hides the spinner while a line is written, so hashes never
/// end up glued to a spinner frame.
pub struct SuspendingStdout;

impl Write for SuspendingStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active_spinner() {
            Some(handle) => handle.spinner.suspend(|| io::stdout().write(buf)),
            None => io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
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
