use std::{
    io::{BufRead, BufReader, Write},
    net::TcpListener,
    path::Path,
    thread::{self, JoinHandle},
};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// All three troubleshooting hints printed on failure.
fn hints() -> impl Predicate<str> {
    predicate::str::contains("  1. Your internet connection")
        .and(predicate::str::contains("  2. The Supabase URL is correct"))
        .and(predicate::str::contains("  3. The API key is valid"))
}

/// A command isolated from any ambient Supabase configuration.
fn supacheck(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("supacheck").expect("binary must build");
    cmd.current_dir(dir.path())
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY");
    cmd
}

/// Accept one connection and answer it with `status` and `body`.
/// Returns the base URL to reach the server and the request head it received.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("listener address");
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut head = String::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read request line");
            if line.is_empty() || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        head
    });

    (format!("http://{addr}"), handle)
}

/// A local address with nothing listening on it.
fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{addr}")
}

fn write_env_file(path: &Path, url: &str, key: &str) {
    std::fs::write(path, format!("SUPABASE_URL={url}\nSUPABASE_KEY={key}\n"))
        .expect("write settings file");
}

#[test]
fn missing_config_fails_without_contacting_anything() {
    let dir = TempDir::new().expect("create temp dir");
    supacheck(&dir)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Supabase Connection Test"))
        .stdout(predicate::str::contains("Connecting to").not())
        .stderr(predicate::str::contains("❌ ERROR: Missing environment variables"))
        .stderr(predicate::str::contains(
            "Please ensure SUPABASE_URL and SUPABASE_KEY are set in .env file",
        ));
}

#[test]
fn empty_values_count_as_missing() {
    let dir = TempDir::new().expect("create temp dir");
    supacheck(&dir)
        .env("SUPABASE_URL", "")
        .env("SUPABASE_KEY", "")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing environment variables"));
}

#[test]
fn unreachable_endpoint_lists_hints() {
    let dir = TempDir::new().expect("create temp dir");
    let url = closed_port();

    supacheck(&dir)
        .env("SUPABASE_URL", &url)
        .env("SUPABASE_KEY", "anon-key")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(format!("📡 Connecting to: {url}")))
        .stdout(predicate::str::contains("All tests passed").not())
        .stderr(predicate::str::contains("❌ Connection failed:"))
        .stderr(predicate::str::contains("Please check:"))
        .stderr(hints());
}

#[test]
fn anonymous_session_passes() {
    let dir = TempDir::new().expect("create temp dir");
    let (url, server) = serve_once(
        "403 Forbidden",
        r#"{"code":403,"error_code":"bad_jwt","msg":"invalid claim: missing sub claim"}"#,
    );

    supacheck(&dir)
        .env("SUPABASE_URL", &url)
        .env("SUPABASE_KEY", "anon-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Successfully created Supabase client"))
        .stdout(predicate::str::contains("✅ API is reachable and responding"))
        .stdout(predicate::str::contains(
            "🎉 All tests passed! Supabase is ready to use.",
        ));

    let head = server.join().expect("server thread").to_lowercase();
    assert!(head.starts_with("get /auth/v1/user "), "head: {head}");
    assert!(head.contains("apikey: anon-key"), "head: {head}");
}

#[test]
fn invalid_key_fails_like_network_fault() {
    let dir = TempDir::new().expect("create temp dir");
    let (url, server) = serve_once("401 Unauthorized", r#"{"message":"Invalid API key"}"#);

    supacheck(&dir)
        .env("SUPABASE_URL", &url)
        .env("SUPABASE_KEY", "wrong-key")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("❌ Connection failed:"))
        .stderr(predicate::str::contains("Invalid API key"))
        .stderr(hints());
    server.join().expect("server thread");
}

#[test]
fn reads_settings_file() {
    let dir = TempDir::new().expect("create temp dir");
    let (url, server) = serve_once("200 OK", r#"{"id":"u-1"}"#);
    write_env_file(&dir.path().join(".env"), &url, "file-key");

    supacheck(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("All tests passed"));

    let head = server.join().expect("server thread").to_lowercase();
    assert!(head.contains("apikey: file-key"), "head: {head}");
}

#[test]
fn environment_overrides_settings_file() {
    let dir = TempDir::new().expect("create temp dir");
    let (url, server) = serve_once("200 OK", "{}");
    let settings = dir.path().join("custom.env");
    write_env_file(&settings, &closed_port(), "file-key");

    supacheck(&dir)
        .arg("--env-file")
        .arg(&settings)
        .env("SUPABASE_URL", &url)
        .env("SUPABASE_KEY", "env-key")
        .assert()
        .success();

    let head = server.join().expect("server thread").to_lowercase();
    assert!(head.contains("apikey: env-key"), "head: {head}");
}

#[test]
fn malformed_endpoint_uses_failure_path() {
    let dir = TempDir::new().expect("create temp dir");
    supacheck(&dir)
        .env("SUPABASE_URL", "abc.supabase.co")
        .env("SUPABASE_KEY", "anon-key")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Successfully created").not())
        .stderr(predicate::str::contains(
            "❌ Connection failed: parse endpoint 'abc.supabase.co'",
        ))
        .stderr(hints());
}
