use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use colored::*;

use crate::terminal::{colors, print, spinner};
use roast_common::{
    config::ScanConfig,
    error, info,
    record::LineSink,
    rid::RidList,
    success, warn,
};
use roast_core::network::{channel::EndpointChannel, resolver};
use roast_core::scanner::{RoastScanner, ScanReport};

type OutputSink = LineSink<Box<dyn Write + Send>>;

pub async fn roast(
    target: &str,
    rids: RidList,
    output: Option<&Path>,
    cfg: &ScanConfig,
    quiet: u8,
) -> anyhow::Result<()> {
    print::header("getting ready to roast", quiet);

    let sink: OutputSink = open_sink(output)?;
    let remote = resolver::resolve_target(target)
        .await
        .with_context(|| format!("resolving {target}"))?;
    let channel = EndpointChannel::open(remote, cfg.src_port).await?;

    print_setup(&channel, &rids, output, cfg, quiet);

    let stop: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
    listen_for_interrupt(stop.clone());

    print::header("roasting", quiet);
    info!("Sending {} queries to {remote}", rids.len());

    let mut scanner = RoastScanner::new(channel, sink, rids, cfg.clone())
        .with_stop_signal(stop.clone());
    if quiet < 2 {
        scanner = scanner.with_progress(Box::new(spinner::report_roast_progress));
    }

    let result = scanner.run().await;
    if quiet < 2 {
        spinner::get_spinner().finish_and_clear();
    }
    let report: ScanReport = result.inspect_err(|e| error!("Scan aborted: {e:#}"))?;

    if stop.load(Ordering::Relaxed) {
        warn!("Interrupted, stopped after {} of the queued queries", report.sent);
    }

    roast_ends(report, quiet);
    Ok(())
}

fn open_sink(output: Option<&Path>) -> anyhow::Result<OutputSink> {
    let writer: Box<dyn Write + Send> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("opening {}", path.display()))?,
        ),
        None => Box::new(spinner::SuspendingStdout),
    };
    Ok(LineSink::new(writer))
}

fn listen_for_interrupt(stop: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.store(true, Ordering::Relaxed);
        }
    });
}

fn print_setup(
    channel: &EndpointChannel,
    rids: &RidList,
    output: Option<&Path>,
    cfg: &ScanConfig,
    quiet: u8,
) {
    let source = match channel.local_addr() {
        Ok(addr) => addr.to_string(),
        Err(_) => "unknown".to_string(),
    };
    let destination = output
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    print::aligned_line("Target", channel.remote(), quiet);
    print::aligned_line("Source", source, quiet);
    print::aligned_line("RIDs", rids.len(), quiet);
    print::aligned_line("Rate", format!("{}/s", cfg.rate.max(1)), quiet);
    print::aligned_line("Timeout", format!("{}s", cfg.timeout.as_secs()), quiet);
    print::aligned_line("Format", if cfg.legacy { "legacy" } else { "current" }, quiet);
    print::aligned_line("Output", destination, quiet);
}

fn roast_ends(report: ScanReport, quiet: u8) {
    print::header("roast complete", quiet);

    if report.recovered == 0 && quiet == 0 {
        print::no_results();
    }

    let unit: &str = if report.recovered == 1 { "hash" } else { "hashes" };
    let recovered: ColoredString = format!("{} {unit}", report.recovered).bold().green();
    let total_time: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Recovered {recovered} from {} queries in {total_time}", report.sent)
            .color(colors::TEXT_DEFAULT);

    match quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => success!("{}", output),
    }
}
