//! Integration tests for Linklens
//!
//! These tests use wiremock to serve pages and link targets, and run whole
//! analyses against them end-to-end.

mod analyze_tests;

use linklens::{Analyzer, Config};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Loopback port nothing listens on; connections are refused immediately
pub const UNREACHABLE_ORIGIN: &str = "http://127.0.0.1:1";

/// Creates an analyzer with the default configuration
pub fn analyzer() -> Analyzer {
    Analyzer::new(&Config::default()).expect("Failed to build analyzer")
}

/// Serves `body` as `text/html` at `route`
pub async fn mount_html(server: &MockServer, route: &str, body: &str) {
    mount_html_with_status(server, route, body, 200).await;
}

pub async fn mount_html_with_status(server: &MockServer, route: &str, body: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}
