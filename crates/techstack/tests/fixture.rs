// ABOUTME: Fixture tests mapping a saved handbook page against its expected JSON.
// ABOUTME: Covers both the offline path and the fetch path through a mock server.

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use techstack::{Client, TechStack};

/// Load a file from the fixtures directory.
fn load_fixture(path: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), path);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path, e))
}

fn expected() -> TechStack {
    serde_json::from_str(&load_fixture("tech_stack.json")).expect("fixture JSON should parse")
}

#[test]
fn saved_page_maps_to_expected_areas() {
    let html = load_fixture("html/tech_stack.html");
    let client = Client::builder().build().unwrap();

    let stack = client.scrape_html(&html).unwrap();

    assert_eq!(stack, expected());
}

#[test]
fn saved_page_serializes_to_fixture_text() {
    let html = load_fixture("html/tech_stack.html");
    let client = Client::builder().build().unwrap();

    let json = client.scrape_html(&html).unwrap().to_json_pretty().unwrap();

    assert_eq!(json, load_fixture("tech_stack.json").trim_end());
}

#[test]
fn fetched_page_matches_saved_page() {
    let html = load_fixture("html/tech_stack.html");
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/egis/handbook/blob/master/Tech-Stack.md");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(&html);
    });

    let client = Client::builder().build().unwrap();
    let stack = client
        .scrape(&server.url("/egis/handbook/blob/master/Tech-Stack.md"))
        .unwrap();
    mock.assert();

    assert_eq!(stack, expected());
    assert_eq!(stack.technology_count(), 6);
    assert!(stack
        .area("Planned")
        .is_some_and(|area| area.technologies.is_empty()));
}
