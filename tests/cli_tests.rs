use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LISTING_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <nav><a href="/briefings-statements/">Briefings &amp; Statements</a></nav>
  <ul class="wp-block-post-template">
    <li class="wp-block-post">
      <h2><a href="/briefings-statements/2025/11/statement-on-trade/">Statement on Trade &amp; Tariffs</a></h2>
      <div class="wp-block-post-date"><time datetime="2025-11-14T10:00:00-05:00">November 14, 2025</time></div>
    </li>
    <li class="wp-block-post">
      <h2><a href="/briefings-statements/2025/11/press-briefing/">Press Briefing by the Press Secretary</a></h2>
      <div class="wp-block-post-date"><time>November 13, 2025</time></div>
    </li>
    <li class="wp-block-post">
      <h2><a href="/briefings-statements/2025/11/readout/">Readout of the President's Call</a></h2>
      <div class="wp-block-post-date"><time>November 12, 2025</time></div>
    </li>
  </ul>
  <a href="/briefings-statements/page/2/">Next Page</a>
</body></html>"#;

/// Serve a single canned response on a loopback port and return the listing URL
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}/briefings-statements/", addr)
}

fn scraper_cmd(work_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("whitehouse-rss").unwrap();
    cmd.current_dir(work_dir.path()).env("RUST_LOG", "info");
    for var in [
        "WH_RSS_SOURCE_URL",
        "WH_RSS_OUTPUT",
        "WH_RSS_USER_AGENT",
        "WH_RSS_TIMEOUT_SECS",
        "WH_RSS_SELF_URL",
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_options() {
    let dir = TempDir::new().unwrap();
    scraper_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--url"));
}

#[test]
fn test_run_writes_feed_with_three_items() {
    let dir = TempDir::new().unwrap();
    let url = serve_once("200 OK", LISTING_PAGE);
    let output = dir.path().join("whitehouse_briefings.xml");

    scraper_cmd(&dir)
        .arg("--url")
        .arg(&url)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 3 entries"));

    let xml = fs::read_to_string(&output).unwrap();
    assert_eq!(xml.matches("<item>").count(), 3);
    assert!(xml.contains("Statement on Trade &amp; Tariffs"));

    let base = url.trim_end_matches("/briefings-statements/");
    assert!(xml.contains(&format!(
        "<link>{}/briefings-statements/2025/11/press-briefing/</link>",
        base
    )));
}

#[test]
fn test_default_output_path_in_working_directory() {
    let dir = TempDir::new().unwrap();
    let url = serve_once("200 OK", LISTING_PAGE);

    scraper_cmd(&dir).arg("--url").arg(&url).assert().success();

    assert!(dir.path().join("whitehouse_briefings.xml").exists());
}

#[test]
fn test_service_unavailable_aborts_and_keeps_previous_feed() {
    let dir = TempDir::new().unwrap();
    let url = serve_once("503 Service Unavailable", "maintenance");
    let output = dir.path().join("feed.xml");
    fs::write(&output, "previous feed").unwrap();

    scraper_cmd(&dir)
        .arg("--url")
        .arg(&url)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("503"))
        .stderr(predicate::str::contains("previous feed was left in place"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "previous feed");
}

#[test]
fn test_environment_selects_source_and_output() {
    let dir = TempDir::new().unwrap();
    let url = serve_once("200 OK", LISTING_PAGE);
    let output = dir.path().join("public").join("briefings.xml");

    scraper_cmd(&dir)
        .env("WH_RSS_SOURCE_URL", &url)
        .env("WH_RSS_OUTPUT", &output)
        .assert()
        .success();

    let xml = fs::read_to_string(&output).unwrap();
    assert_eq!(xml.matches("<item>").count(), 3);
    assert!(!dir.path().join("whitehouse_briefings.xml").exists());
}

#[test]
fn test_bad_environment_values_are_configuration_errors() {
    for (var, value) in [
        ("WH_RSS_TIMEOUT_SECS", "thirty"),
        ("WH_RSS_TIMEOUT_SECS", "0"),
        ("WH_RSS_SOURCE_URL", "not a url"),
        ("WH_RSS_SELF_URL", "feeds/whitehouse.xml"),
    ] {
        let dir = TempDir::new().unwrap();
        scraper_cmd(&dir)
            .env(var, value)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Error: Configuration error"))
            .stderr(predicate::str::contains(var));

        assert!(!dir.path().join("whitehouse_briefings.xml").exists());
    }
}

#[test]
fn test_page_without_entries_writes_empty_feed() {
    let dir = TempDir::new().unwrap();
    let url = serve_once("200 OK", "<html><body><p>Redesign in progress</p></body></html>");
    let output = dir.path().join("feed.xml");

    scraper_cmd(&dir)
        .arg("--url")
        .arg(&url)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("No entries found"));

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<channel>"));
    assert!(!xml.contains("<item>"));
}

#[test]
fn test_dry_run_prints_feed_without_writing() {
    let dir = TempDir::new().unwrap();
    let url = serve_once("200 OK", LISTING_PAGE);
    let output = dir.path().join("feed.xml");

    scraper_cmd(&dir)
        .arg("--url")
        .arg(&url)
        .arg("--output")
        .arg(&output)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains("Press Briefing by the Press Secretary"));

    assert!(!output.exists());
}

#[test]
fn test_invalid_url_rejected() {
    let dir = TempDir::new().unwrap();
    scraper_cmd(&dir)
        .arg("--url")
        .arg("not a url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}
