#![cfg(test)]
use std::net::UdpSocket as StdUdpSocket;
use std::time::{Duration, Instant};

use roast_common::config::ScanConfig;
use roast_common::record::LineSink;
use roast_common::rid::RidList;
use roast_core::network::channel::EndpointChannel;
use roast_core::scanner::{RoastScanner, ScanReport};

use crate::utils::{FakeTimeServer, ServerScript, split_line};

fn fast_config() -> ScanConfig {
    ScanConfig {
        rate: 10,
        timeout: Duration::from_secs(1),
        ..Default::default()
    }
}

async fn roast_against(
    server: &FakeTimeServer,
    rids: &[u32],
    cfg: ScanConfig,
) -> (ScanReport, Vec<String>) {
    let channel = EndpointChannel::open(server.addr(), cfg.src_port)
        .await
        .expect("open channel");
    let mut sink = LineSink::new(Vec::new());

    let report = RoastScanner::new(channel, &mut sink, RidList::from(rids.to_vec()), cfg)
        .run()
        .await
        .expect("scan");

    let output = String::from_utf8(sink.into_inner()).expect("utf8 output");
    let lines = output.lines().map(str::to_string).collect();
    (report, lines)
}

/// One RID, one answer: exactly one well-formed line.
#[tokio::test]
async fn single_rid_single_hash() {
    let server = FakeTimeServer::start(ServerScript::replying(&[(5, 1)]))
        .await
        .unwrap();

    let (report, lines) = roast_against(&server, &[5], fast_config()).await;

    assert_eq!(report.recovered, 1);
    assert_eq!(lines.len(), 1);

    let (rid, hash, salt) = split_line(&lines[0]);
    assert_eq!(rid, 5);
    assert_eq!(hash, "05060708090a0b0c0d0e0f1011121314");
    assert_eq!(salt.len(), 96);
    assert!(salt.starts_with("1c0011e9"));
    assert!(salt.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[tokio::test]
async fn silent_server_ends_after_idle_timeout() {
    let server = FakeTimeServer::start(ServerScript::default()).await.unwrap();

    let start = Instant::now();
    let (report, lines) = roast_against(&server, &[1, 2, 3], fast_config()).await;
    let elapsed = start.elapsed();

    assert!(lines.is_empty());
    assert_eq!(report.recovered, 0);
    assert_eq!(report.sent, 3);
    assert!(elapsed >= Duration::from_secs(1), "ended after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "ended after {elapsed:?}");
    assert_eq!(server.queries(), vec![1, 2, 3]);
}

#[tokio::test]
async fn duplicate_answers_are_written_once() {
    let server = FakeTimeServer::start(ServerScript::replying(&[(7, 2)]))
        .await
        .unwrap();

    let (report, lines) = roast_against(&server, &[7], fast_config()).await;

    assert_eq!(report.recovered, 1);
    assert_eq!(lines.len(), 1);
    assert_eq!(split_line(&lines[0]).0, 7);
}

#[tokio::test]
async fn junk_datagrams_are_ignored() {
    let script = ServerScript {
        garbage: true,
        ..Default::default()
    };
    let server = FakeTimeServer::start(script).await.unwrap();

    let start = Instant::now();
    let (report, lines) = roast_against(&server, &[1], fast_config()).await;

    assert!(lines.is_empty());
    assert_eq!(report.recovered, 0);
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn only_answering_rids_are_recovered() {
    let server = FakeTimeServer::start(ServerScript::replying(&[(1000, 1), (1002, 1)]))
        .await
        .unwrap();
    let rids: RidList = "1000-1003".parse().unwrap();

    let (report, lines) = roast_against(&server, &rids, fast_config()).await;

    let mut found: Vec<u32> = lines.iter().map(|l| split_line(l).0).collect();
    found.sort_unstable();
    assert_eq!(found, vec![1000, 1002]);
    assert_eq!(report.sent, 4);
}

#[tokio::test]
async fn legacy_format_round_trips_through_server() {
    let script = ServerScript {
        legacy: true,
        ..ServerScript::replying(&[(1105, 1)])
    };
    let server = FakeTimeServer::start(script).await.unwrap();
    let cfg = ScanConfig {
        legacy: true,
        ..fast_config()
    };

    let (_report, lines) = roast_against(&server, &[1105], cfg).await;

    assert_eq!(lines.len(), 1);
    assert_eq!(split_line(&lines[0]).0, 1105);
    assert_eq!(server.queries(), vec![1105]);
}

#[tokio::test]
async fn fixed_source_port_is_used() {
    let port = {
        let scratch = StdUdpSocket::bind("0.0.0.0:0").unwrap();
        scratch.local_addr().unwrap().port()
    };
    let server = FakeTimeServer::start(ServerScript::replying(&[(2, 1)]))
        .await
        .unwrap();
    let cfg = ScanConfig {
        src_port: Some(port),
        ..fast_config()
    };

    let (report, lines) = roast_against(&server, &[1, 2], cfg).await;

    assert_eq!(report.sent, 2);
    assert_eq!(lines.len(), 1);
    assert_eq!(server.queries(), vec![1, 2]);
    assert_eq!(server.source_ports(), vec![port, port]);
}
