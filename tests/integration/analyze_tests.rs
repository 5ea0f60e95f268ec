//! Page-level analysis scenarios: failures, metadata and page type

use crate::{analyzer, mount_html, mount_html_with_status, UNREACHABLE_ORIGIN};
use linklens::api::handle_analyze;
use linklens::{AnalysisError, AnalysisResult, ErrorCode, HtmlVersion, LinkStats, PageType};
use std::collections::BTreeMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn analyze_ok(url: &str) -> AnalysisResult {
    analyzer()
        .analyze(url)
        .await
        .unwrap_or_else(|e| panic!("Analysis of {} failed: {}", url, e))
}

async fn analyze_err(url: &str) -> AnalysisError {
    match analyzer().analyze(url).await {
        Ok(result) => panic!("Expected analysis of {} to fail, got {:?}", url, result),
        Err(err) => err,
    }
}

#[tokio::test]
async fn test_invalid_url() {
    let err = analyze_err(":invalid url").await;
    assert_eq!(err.code(), ErrorCode::InvalidUrl);
    assert_eq!(err.to_string(), "[InvalidUrl] given url is malformed");
}

#[tokio::test]
async fn test_unreachable_host() {
    let err = analyze_err(&format!("{}/nothing", UNREACHABLE_ORIGIN)).await;
    assert_eq!(err.code(), ErrorCode::RemoteFetchError);
    assert_eq!(
        err.to_string(),
        "[RemoteFetchError] cannot fetch the content from url"
    );
}

#[tokio::test]
async fn test_unsuccessful_status() {
    let server = MockServer::start().await;
    mount_html_with_status(
        &server,
        "/test/x",
        "<!doctype html><html>404 Not Exists</html>",
        404,
    )
    .await;

    let err = analyze_err(&format!("{}/test/x", server.uri())).await;
    assert_eq!(err.code(), ErrorCode::UnsuccessfulStatusCode);
    assert_eq!(
        err.to_string(),
        "[UnsuccessfulStatusCode] unsuccessful status code returned for the given url! 404"
    );
}

#[tokio::test]
async fn test_non_html_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test/y"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{ "alive": true }"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = analyze_err(&format!("{}/test/y", server.uri())).await;
    assert_eq!(err.code(), ErrorCode::InvalidContentType);
    assert_eq!(
        err.to_string(),
        "[InvalidContentType] only HTML content types are supported"
    );
}

#[tokio::test]
async fn test_heading_counts() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/test/headings",
        r#"<!doctype html>
        <html>
        <title>Test Headings</title>
        <body>
            <h1 /><h1>Heading 1</h1>
            <h2/><h2>Heading 2</h2>
            <h3 /><H3></H3>
            <h4/><h4></h4>
            <h5 /><h5>  </h5>
            <h6 /><H6></H6>
            <hr/><hr></hr>
        </body>
        </html>"#,
    )
    .await;

    let url = format!("{}/test/headings", server.uri());
    let result = analyze_ok(&url).await;

    let headings: BTreeMap<String, u32> = ["H1", "H2", "H3", "H4", "H5", "H6"]
        .iter()
        .map(|h| (h.to_string(), 2))
        .collect();
    assert_eq!(
        result,
        AnalysisResult {
            source_url: url.clone(),
            html_version: HtmlVersion::Html5,
            title: "Test Headings".to_string(),
            headings_count: headings,
            link_stats: LinkStats::default(),
            page_type: PageType::Unknown,
        }
    );
}

#[tokio::test]
async fn test_html_version() {
    let server = MockServer::start().await;
    let cases = [
        (
            "/test/htmlv4",
            r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.0 Transitional//EN">
            <html><title>Test HTML V4</title><body></body></html>"#,
            HtmlVersion::Html4,
        ),
        (
            "/test/htmlv5",
            r#"<!DOCTYPE HTML"><html><title>Test HTML V5</title><body></body></html>"#,
            HtmlVersion::Html5,
        ),
        (
            "/test/htmlnx",
            "<html><title>Test HTML Default</title><body></body></html>",
            HtmlVersion::Html5,
        ),
    ];

    for (route, body, _) in &cases {
        mount_html(&server, route, body).await;
    }

    for (route, _, expected) in cases {
        let result = analyze_ok(&format!("{}{}", server.uri(), route)).await;
        assert_eq!(result.html_version, expected, "route {}", route);
    }
}

#[tokio::test]
async fn test_title_capture() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/test/title",
        "<!doctype html><html><title>Test Title With</title><body></body></html>",
    )
    .await;
    mount_html(
        &server,
        "/test/titlenx",
        "<!doctype html><html><body></body></html>",
    )
    .await;

    let result = analyze_ok(&format!("{}/test/title", server.uri())).await;
    assert_eq!(result.title, "Test Title With");

    let result = analyze_ok(&format!("{}/test/titlenx", server.uri())).await;
    assert_eq!(result.title, "");
}

#[tokio::test]
async fn test_title_in_declared_charset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test/latin1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><title>Caf\xe9</title></html>".to_vec(),
            "text/html; charset=ISO-8859-1",
        ))
        .mount(&server)
        .await;

    let result = analyze_ok(&format!("{}/test/latin1", server.uri())).await;
    assert_eq!(result.title, "Café");
}

#[tokio::test]
async fn test_login_form_detection() {
    let server = MockServer::start().await;
    let form = |inputs: &str| {
        format!(
            r#"<html>
            <title>Test Login Form</title>
            <body>
                <form>
                    <input type="text" name="email"></input>
                    {}
                </form>
            </body>
            </html>"#,
            inputs
        )
    };

    let cases = [
        (
            "/test/loginform",
            form(r#"<INPUT TYPE="password" name="password"></input>
                    <input type="submit">Login</button>"#),
            PageType::LoginForm,
        ),
        (
            "/test/loginsubmit",
            form(r#"<input type="submit">Login</button>"#),
            PageType::Unknown,
        ),
        (
            "/test/loginpw",
            form(r#"<input type="password" name="password"></input>"#),
            PageType::Unknown,
        ),
        (
            "/test/loginmultiplepw",
            form(r#"<input type="password" name="password1"></input>
                    <input type="password" name="password2"></input>
                    <input type="submit">Login</button>"#),
            PageType::Unknown,
        ),
        (
            "/test/loginmultiplesubmit",
            form(r#"<input type="password" name="password"></input>
                    <input type="submit">Login 1</button>
                    <input type="submit">Login 2</button>"#),
            PageType::Unknown,
        ),
    ];

    for (route, body, _) in &cases {
        mount_html(&server, route, body).await;
    }

    for (route, _, expected) in cases {
        let url = format!("{}{}", server.uri(), route);
        let result = analyze_ok(&url).await;
        assert_eq!(
            result,
            AnalysisResult {
                source_url: url.clone(),
                html_version: HtmlVersion::Html5,
                title: "Test Login Form".to_string(),
                headings_count: BTreeMap::new(),
                link_stats: LinkStats::default(),
                page_type: expected,
            },
            "route {}",
            route
        );
    }
}

#[tokio::test]
async fn test_request_helper_round_trip() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/test/api",
        "<!doctype html><html><title>Via Api</title><body><h2>x</h2></body></html>",
    )
    .await;

    let url = format!("{}/test/api", server.uri());
    let body = serde_json::json!({ "url": url }).to_string();
    let response = handle_analyze(&analyzer(), &body).await;

    assert_eq!(response.status, 200);
    let value: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(value["sourceUrl"], url.as_str());
    assert_eq!(value["title"], "Via Api");
    assert_eq!(value["htmlVersion"], "5");
    assert_eq!(value["headingsCount"]["H2"], 1);
    assert_eq!(value["pageType"], "Unknown");
    assert_eq!(value["linkStats"]["invalidLinks"], serde_json::json!([]));
}

#[tokio::test]
async fn test_request_helper_reports_fetch_failure() {
    let server = MockServer::start().await;
    mount_html_with_status(&server, "/test/gone", "gone", 410).await;

    let body = serde_json::json!({ "url": format!("{}/test/gone", server.uri()) }).to_string();
    let response = handle_analyze(&analyzer(), &body).await;

    assert_eq!(response.status, 500);
    let value: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "errorCode": "UnsuccessfulStatusCode",
            "message": "unsuccessful status code returned for the given url! 410",
        })
    );
}

#[tokio::test]
async fn test_source_url_must_be_a_usable_link_base() {
    let server = MockServer::start().await;
    mount_html(&server, "/page", r#"<html><a href="/ok">ok</a></html>"#).await;
    mount_html(&server, "/ok", "ok").await;

    let padded = format!(" {}/page", server.uri());
    let without_slashes = format!("{}/page", server.uri()).replacen("http://", "http:", 1);

    for url in [padded, without_slashes] {
        let err = analyze_err(&url).await;
        assert_eq!(err.code(), ErrorCode::InvalidUrl, "url {:?}", url);
        assert_eq!(err.url(), url);
    }
    assert!(server.received_requests().await.unwrap().is_empty());

    let result = analyze_ok(&format!("{}/page", server.uri())).await;
    assert_eq!(result.link_stats.internal_link_count, 1);
    assert_eq!(result.link_stats.invalid_link_count, 0);
}

#[tokio::test]
async fn test_request_helper_strips_padded_url() {
    let server = MockServer::start().await;
    mount_html(&server, "/page", r#"<html><a href="/ok">ok</a></html>"#).await;
    mount_html(&server, "/ok", "ok").await;

    let url = format!("{}/page", server.uri());
    let body = serde_json::json!({ "url": format!("  {}\n", url) }).to_string();
    let response = handle_analyze(&analyzer(), &body).await;

    assert_eq!(response.status, 200);
    let value: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(value["sourceUrl"], url.as_str());
    assert_eq!(value["linkStats"]["invalidLinkCount"], 0);
}
