// ABOUTME: Integration tests for the techstack CLI binary.
// ABOUTME: Tests saved-page mapping, URL fetching, output options and error exits.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const PAGE: &str = r#"<html><head><title>Tech Stack</title></head><body>
<h2>Languages</h2>
<table>
<thead><tr><th>Name</th><th>Notes</th></tr></thead>
<tbody><tr><td>Go</td><td></td></tr><tr><td></td><td></td></tr></tbody>
</table>
</body></html>"#;

const PAGE_JSON: &str = r#"{
  "Title": "Tech Stack",
  "Area": [
    {
      "Name": "Languages",
      "Technologies": [
        {
          "Name": "Go",
          "Notes": ""
        }
      ]
    }
  ]
}
"#;

fn techstack_cmd() -> Command {
    let mut cmd = Command::cargo_bin("techstack").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_page(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("page.html");
    fs::write(&path, PAGE).unwrap();
    path
}

#[test]
fn html_file_prints_pretty_json() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = write_page(&temp_dir);

    techstack_cmd()
        .arg("--html")
        .arg(&html_path)
        .assert()
        .success()
        .stdout(PAGE_JSON);
}

#[test]
fn compact_flag_prints_one_line() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = write_page(&temp_dir);

    techstack_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--compact")
        .assert()
        .success()
        .stdout(
            "{\"Title\":\"Tech Stack\",\"Area\":[{\"Name\":\"Languages\",\"Technologies\":[{\"Name\":\"Go\",\"Notes\":\"\"}]}]}\n",
        );
}

#[test]
fn url_argument_is_fetched() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/Tech-Stack.md");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(PAGE);
    });

    techstack_cmd()
        .arg(server.url("/Tech-Stack.md"))
        .assert()
        .success()
        .stdout(PAGE_JSON);

    mock.assert();
}

#[test]
fn user_agent_and_timeout_flags_are_applied() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/Tech-Stack.md")
            .header("user-agent", "handbook-bot/2");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(PAGE);
    });

    techstack_cmd()
        .arg(server.url("/Tech-Stack.md"))
        .args(["--user-agent", "handbook-bot/2", "--timeout", "5"])
        .assert()
        .success()
        .stdout(PAGE_JSON);

    mock.assert();
}

#[test]
fn http_error_prints_nothing_on_stdout() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404).body("not found");
    });

    techstack_cmd()
        .arg(server.url("/missing"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("HTTP status 404"));

    mock.assert();
}

#[test]
fn invalid_url_fails() {
    techstack_cmd()
        .arg("ftp://example.com/Tech-Stack.md")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("scheme must be http or https"));
}

#[test]
fn output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = write_page(&temp_dir);
    let output_path = temp_dir.path().join("stack.json");

    techstack_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output_path).unwrap(), PAGE_JSON);
}

#[test]
fn missing_html_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    techstack_cmd()
        .arg("--html")
        .arg(temp_dir.path().join("nope.html"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to read file"));
}

#[test]
fn url_and_html_conflict() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = write_page(&temp_dir);

    techstack_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("https://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
