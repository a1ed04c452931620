//! Recovered hashes and where they go.

use std::fmt;
use std::io::Write;

use anyhow::Context;

/// One recovered MS-SNTP hash, printed in hashcat mode 31300 format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoastRecord {
    pub rid: u32,
    /// 16-byte MAC as 32 lowercase hex characters.
    pub hash: String,
    /// 48-byte response prefix as 96 lowercase hex characters.
    pub salt: String,
}

impl fmt::Display for RoastRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:$sntp-ms${}${}", self.rid, self.hash, self.salt)
    }
}

/// Destination for records accepted by the scanner.
pub trait HashSink {
    fn emit(&mut self, record: &RoastRecord) -> anyhow::Result<()>;
}

impl<S: HashSink + ?Sized> HashSink for &mut S {
    fn emit(&mut self, record: &RoastRecord) -> anyhow::Result<()> {
        (**self).emit(record)
    }
}

impl HashSink for Vec<RoastRecord> {
    fn emit(&mut self, record: &RoastRecord) -> anyhow::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Writes one record per line and flushes immediately, so every hash is
/// visible before the process exits.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> HashSink for LineSink<W> {
    fn emit(&mut self, record: &RoastRecord) -> anyhow::Result<()> {
        let line: String = format!("{record}\n");
        self.writer.write_all(line.as_bytes()).context("writing hash")?;
        self.writer.flush().context("flushing hash output")?;
        Ok(())
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
