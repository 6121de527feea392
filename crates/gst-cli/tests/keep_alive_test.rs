//! Tests for KeepAliveJob.
//!
//! Uses wiremock for reachable targets and a closed local port for the
//! unreachable case.

use std::time::Duration;

use gst_cli::keep_alive::KeepAliveJob;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> Url {
    format!("{}/api/keep-alive", server.uri()).parse().unwrap()
}

/// Nothing listens on port 1 in the test environment.
fn dead_endpoint() -> Url {
    "http://127.0.0.1:1/api/keep-alive".parse().unwrap()
}

#[tokio::test]
async fn ping_once_all_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/keep-alive"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let job = KeepAliveJob::new(vec![endpoint(&server)], Duration::from_secs(60)).unwrap();
    let report = job.ping_once().await;

    assert!(report.all_healthy());
    assert_eq!(report.reachable, vec![endpoint(&server)]);
}

#[tokio::test]
async fn ping_once_non_success_status_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let job = KeepAliveJob::new(vec![endpoint(&server)], Duration::from_secs(60)).unwrap();
    let report = job.ping_once().await;

    assert!(!report.all_healthy());
    assert!(report.reachable.is_empty());
    assert_eq!(report.unreachable.len(), 1);
    assert!(report.unreachable[0].1.contains("503"));
}

#[tokio::test]
async fn ping_once_continues_past_a_dead_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let job = KeepAliveJob::new(
        vec![dead_endpoint(), endpoint(&server)],
        Duration::from_secs(60),
    )
    .unwrap();
    let report = job.ping_once().await;

    assert_eq!(report.unreachable.len(), 1);
    assert_eq!(report.unreachable[0].0, dead_endpoint());
    assert_eq!(report.reachable, vec![endpoint(&server)]);
}

#[tokio::test]
async fn run_pings_every_tick_until_shutdown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("alive"))
        .expect(2..)
        .mount(&server)
        .await;

    let job = KeepAliveJob::new(vec![endpoint(&server)], Duration::from_millis(50)).unwrap();
    let rounds = job.run(tokio::time::sleep(Duration::from_millis(180))).await;

    assert!(rounds >= 2, "expected at least two rounds, got {rounds}");
}

#[tokio::test]
async fn run_survives_failing_targets() {
    let job = KeepAliveJob::new(vec![dead_endpoint()], Duration::from_millis(20)).unwrap();
    let rounds = job.run(tokio::time::sleep(Duration::from_millis(150))).await;

    assert!(rounds >= 1);
}

#[tokio::test]
async fn run_stops_immediately_on_ready_shutdown() {
    let job = KeepAliveJob::new(vec![dead_endpoint()], Duration::from_secs(60)).unwrap();
    let rounds = job.run(std::future::ready(())).await;

    // `select!` polls branches in random order, so the first tick may or may not win.
    assert!(rounds <= 1);
}

#[tokio::test]
async fn shutdown_cancels_a_slow_round() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let job = KeepAliveJob::new(vec![endpoint(&server)], Duration::from_secs(60)).unwrap();
    let started = std::time::Instant::now();
    let rounds = tokio::time::timeout(
        Duration::from_secs(2),
        job.run(tokio::time::sleep(Duration::from_millis(100))),
    )
    .await
    .expect("shutdown should not wait for the ping to finish");

    assert_eq!(rounds, 0);
    assert!(started.elapsed() < Duration::from_secs(2));
}
