//! CLI integration tests
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("serialist")
}

fn get_site_fixture_path(site: &str, name: &str) -> String {
    format!("../../tests/fixtures/sites/{}/{}", site, name)
}

/// Serves the `tbchapter` fixtures under `/book/42/` until dropped.
struct FixtureServer {
    base_url: String,
    shutdown: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FixtureServer {
    fn start() -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let base_url = format!("http://{}", server.server_addr());
        let (shutdown, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let name = request.url().strip_prefix("/book/42/").unwrap_or_default().to_string();
                let body = match name.as_str() {
                    "index.html" | "chapter1.html" | "chapter2.html" | "chapter3.html" => {
                        std::fs::read_to_string(get_site_fixture_path("tbchapter", &name)).ok()
                    }
                    _ => None,
                };

                let response = match body {
                    Some(body) => {
                        let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
                            .expect("build header");
                        tiny_http::Response::from_string(body).with_header(header)
                    }
                    None => tiny_http::Response::from_string("not found").with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self { base_url, shutdown, handle: Some(handle) }
    }

    fn index_url(&self) -> String {
        format!("{}/book/42/index.html", self.base_url)
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn offline_args(server: &FixtureServer, out: &TempDir) -> Vec<String> {
    vec![
        server.index_url(),
        "--no-translate".to_string(),
        "--request-delay".to_string(),
        "0".to_string(),
        "-o".to_string(),
        out.path().to_string_lossy().into_owned(),
    ]
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("INDEX_URL"))
        .stdout(predicate::str::contains("--no-translate"));
}

#[test]
fn test_cli_missing_url() {
    cmd().assert().failure().code(2);
}

#[test]
fn test_cli_rejects_negative_counts() {
    for flag in ["--start-from", "--max-chapters", "--retries", "--timeout"] {
        cmd()
            .args(["https://example.com/book/", flag, "-1"])
            .assert()
            .failure()
            .code(2);
    }
}

#[test]
fn test_cli_rejects_zero_retries() {
    cmd()
        .args(["https://example.com/book/", "--retries", "0"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_cli_rejects_bad_delay() {
    cmd()
        .args(["https://example.com/book/", "--request-delay", "soon"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid number of seconds"));
}

#[test]
fn test_cli_invalid_url() {
    cmd()
        .arg("not-a-url")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_cli_missing_site_config() {
    cmd()
        .args(["https://example.com/book/", "--site-config", "/nonexistent/profile.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load site config"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("serialist"));
}

fn long_flags(script: &str) -> Vec<&str> {
    let mut flags: Vec<&str> = script
        .split(|c: char| c.is_whitespace() || c == '\'' || c == '"')
        .filter(|token| token.starts_with("--") && token.len() > 2)
        .collect();
    flags.sort_unstable();
    flags.dedup();
    flags
}

#[test]
fn test_generated_completions_only_offer_accepted_flags() {
    let generated = std::fs::read_to_string(concat!(env!("OUT_DIR"), "/completions/serialist.bash")).unwrap();
    let runtime = cmd().args(["--completions", "bash"]).output().unwrap();
    let runtime = String::from_utf8(runtime.stdout).unwrap();

    assert!(generated.contains("--output-dir"));
    assert!(!generated.contains("--output_dir"));

    let accepted = long_flags(&runtime);
    for flag in long_flags(&generated) {
        assert!(accepted.contains(&flag), "{flag} is not accepted by the binary");
    }
}

#[test]
fn test_cli_partial_run_exits_with_partial_status() {
    let server = FixtureServer::start();
    let out = TempDir::new().unwrap();

    cmd()
        .args(offline_args(&server, &out))
        .args(["--retries", "1"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("2 chapter(s) failed"));

    let first = std::fs::read_to_string(out.path().join("0001_第一章 出發.txt")).unwrap();
    assert!(first.starts_with("清晨的港口還籠罩在霧裡。"));
    assert!(!first.contains("請記住本站域名"));
    assert!(out.path().join("0002_第二章 夜路.txt").exists());
}

#[test]
fn test_cli_clean_window_succeeds() {
    let server = FixtureServer::start();
    let out = TempDir::new().unwrap();

    cmd()
        .args(offline_args(&server, &out))
        .args(["--max-chapters", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("All 2 chapter(s) written"));

    let written = std::fs::read_dir(out.path()).unwrap().count();
    assert_eq!(written, 2);
}

#[test]
fn test_cli_start_beyond_list_is_not_an_error() {
    let server = FixtureServer::start();
    let out = TempDir::new().unwrap();

    cmd()
        .args(offline_args(&server, &out))
        .args(["--start-from", "10"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No chapters in the selected window"));

    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_cli_custom_site_config() {
    let server = FixtureServer::start();
    let out = TempDir::new().unwrap();
    let profile = out.path().join("profile.txt");
    std::fs::write(
        &profile,
        "chapter_list: #tbchapterlist\ncontent_style: font-size: 20px\ncontent_style: line-height: 30px\n",
    )
    .unwrap();
    let output_dir = out.path().join("chapters");

    cmd()
        .args([
            server.index_url().as_str(),
            "--no-translate",
            "--request-delay",
            "0",
            "--max-chapters",
            "1",
            "--site-config",
            profile.to_str().unwrap(),
            "-o",
            output_dir.to_str().unwrap(),
        ])
        .assert()
        .success();

    let text = std::fs::read_to_string(output_dir.join("0001_第一章 出發.txt")).unwrap();
    // No strip_line directive, so the watermark survives.
    assert!(text.contains("請記住本站域名"));
}
