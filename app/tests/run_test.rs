use clap::Parser;
use sleuth_app::{investigate, load_config, run, Cli};
use sleuth_core::{HitDedupPolicy, SleuthError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const PAGE: &str = "<html><head><title>Ana López</title></head><body>\
    <p>Mail ana@example.com or call +1 415-555-0100</p>\
    <a href=\"https://github.com/ana-lopez\">code</a></body></html>";

/// Serve `PAGE` to every connection, counting requests.
async fn serve_page() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{PAGE}",
                    PAGE.len()
                );
                socket.write_all(response.as_bytes()).await.ok();
                socket.shutdown().await.ok();
            });
        }
    });

    (format!("http://{addr}/ana"), hits)
}

#[tokio::test]
async fn test_run_writes_report_and_uses_cache() {
    let (url, requests) = serve_page().await;
    let tmp = TempDir::new().expect("create temp dir");
    let out = tmp.path().join("reports").join("ana.json");
    let cache = tmp.path().join("cache.json");
    let config = tmp.path().join("missing-config.toml");

    let cli = Cli::try_parse_from([
        "sleuth",
        "--email",
        "ana@example.com",
        "--url",
        url.as_str(),
        "--min-delay",
        "0",
        "--cache",
        cache.to_str().expect("utf-8 path"),
        "--config",
        config.to_str().expect("utf-8 path"),
        "--out",
        out.to_str().expect("utf-8 path"),
    ])
    .expect("parse args");

    run(cli).await.expect("run succeeds");

    // Three query variants, one network fetch; the rest come from the cache
    assert_eq!(requests.load(Ordering::SeqCst), 1);
    assert!(cache.exists());

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).expect("read report"))
            .expect("report is JSON");
    assert_eq!(report["target"]["kind"], "email");
    assert_eq!(report["queries"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["report"]["emails"], serde_json::json!(["ana@example.com"]));
    assert_eq!(report["report"]["phones"], serde_json::json!(["+14155550100"]));
    assert_eq!(
        report["report"]["socialProfiles"]["github"],
        serde_json::json!(["https://github.com/ana-lopez"])
    );
    assert_eq!(report["report"]["hits"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_unwritable_output_is_an_error() {
    let tmp = TempDir::new().expect("create temp dir");
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "x").expect("write blocker");
    let out = blocker.join("report.json");
    let config = tmp.path().join("missing-config.toml");

    let cli = Cli::try_parse_from([
        "sleuth",
        "--name",
        "Ana López",
        "--no-cache",
        "--config",
        config.to_str().expect("utf-8 path"),
        "--out",
        out.to_str().expect("utf-8 path"),
    ])
    .expect("parse args");

    let err = run(cli).await.expect_err("output parent is a file");
    assert!(err.to_string().contains("failed to save report"));
}

#[test]
fn test_config_file_then_flags() {
    let tmp = TempDir::new().expect("create temp dir");
    let config_path = tmp.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[report]\nhit_dedup = \"by_signature\"\nresult_limit = 9\n",
    )
    .expect("write config");

    let cli = Cli::try_parse_from([
        "sleuth",
        "-n",
        "Ana",
        "--limit",
        "2",
        "--config",
        config_path.to_str().expect("utf-8 path"),
    ])
    .expect("parse args");

    let config = load_config(&cli).expect("load config");
    assert_eq!(config.report.hit_dedup, HitDedupPolicy::BySignature);
    assert_eq!(config.report.result_limit, 2);
}

#[tokio::test]
async fn test_missing_target_is_a_validation_error() {
    let tmp = TempDir::new().expect("create temp dir");
    let config = tmp.path().join("missing-config.toml");
    let mut cli = Cli::try_parse_from([
        "sleuth",
        "-e",
        "a@b.com",
        "--no-cache",
        "--config",
        config.to_str().expect("utf-8 path"),
    ])
    .expect("parse args");
    cli.email = None;

    let err = investigate(&cli).await.expect_err("no target");
    assert!(matches!(err, SleuthError::Validation(_)));
}

#[tokio::test]
async fn test_malformed_config_is_a_config_error() {
    let tmp = TempDir::new().expect("create temp dir");
    let config_path = tmp.path().join("config.toml");
    std::fs::write(&config_path, "[report\nresult_limit = ").expect("write config");

    let cli = Cli::try_parse_from([
        "sleuth",
        "-n",
        "Ana",
        "--config",
        config_path.to_str().expect("utf-8 path"),
    ])
    .expect("parse args");

    assert!(matches!(load_config(&cli), Err(SleuthError::Config(_))));
    let err = investigate(&cli).await.expect_err("malformed config");
    assert!(err.to_string().starts_with("configuration error:"));
}
