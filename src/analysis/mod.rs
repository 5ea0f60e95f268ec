//! Page analysis entry point
//!
//! An analysis runs in four steps:
//! 1. Validate the source URL
//! 2. Fetch the page and stream it through the extraction state machine
//! 3. Probe every discovered link once
//! 4. Classify the page from its form controls
//!
//! Each step fills in part of the [`AnalysisResult`]. Only the first two can
//! fail the analysis; link failures are reported in [`LinkStats`].

mod page_type;
mod types;

pub use page_type::classify_page;
pub use types::{AnalysisResult, HtmlVersion, LinkStats, PageType};

use crate::config::{Config, TitleScope};
use crate::crawler::{build_http_client, fetch_page, HttpProber, LinkCrawler, LinkProber};
use crate::extract::Extraction;
use crate::url::resolve;
use crate::AnalysisError;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Reusable analyzer holding the HTTP client and crawl settings
///
/// Cloning is cheap; clones share the client's connection pool.
#[derive(Clone)]
pub struct Analyzer {
    client: Client,
    crawler: LinkCrawler,
    title_scope: TitleScope,
}

impl Analyzer {
    /// Creates an analyzer that probes links over HTTP
    pub fn new(config: &Config) -> crate::Result<Self> {
        let client = build_http_client(&config.http)?;
        let prober = Arc::new(HttpProber::new(client.clone()));
        Ok(Self::from_parts(config, client, prober))
    }

    /// Creates an analyzer that fetches pages over HTTP but probes links with
    /// the given prober
    pub fn with_prober(config: &Config, prober: Arc<dyn LinkProber>) -> crate::Result<Self> {
        let client = build_http_client(&config.http)?;
        Ok(Self::from_parts(config, client, prober))
    }

    fn from_parts(config: &Config, client: Client, prober: Arc<dyn LinkProber>) -> Self {
        Self {
            client,
            crawler: LinkCrawler::new(prober, config.analyzer.max_concurrent_probes),
            title_scope: config.analyzer.title_scope,
        }
    }

    /// Analyzes the page at `url`
    ///
    /// # Errors
    ///
    /// * `InvalidUrl` - `url` is not an absolute http(s) URL
    /// * `RemoteFetch` - the page could not be retrieved or its body broke off
    /// * `UnsuccessfulStatus` - the page answered with a status of 300 or above
    /// * `InvalidContentType` - the page is not `text/html`
    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        tracing::info!("Starting the analysis of url: {}", url);

        let source = parse_source_url(url)?;
        let Extraction { page, state } = fetch_page(&self.client, &source, self.title_scope).await?;

        tracing::debug!(
            "Extracted {} distinct links and {} heading kinds from {}",
            state.links.len(),
            page.headings_count.len(),
            url
        );

        let link_stats = self.crawler.crawl_for_validity(url, &state.links).await;
        let page_type = classify_page(&state.input_type_counts);

        tracing::info!(
            "Finished the analysis of url: {} (html {}, {} invalid links, {})",
            url,
            page.html_version.as_str(),
            link_stats.invalid_link_count,
            page_type.as_str()
        );

        Ok(AnalysisResult {
            source_url: url.to_string(),
            html_version: page.html_version,
            title: page.title,
            headings_count: page.headings_count,
            link_stats,
            page_type,
        })
    }
}

/// Analyzes `url` with the default configuration
pub async fn analyze(url: &str) -> crate::Result<AnalysisResult> {
    let analyzer = Analyzer::new(&Config::default())?;
    Ok(analyzer.analyze(url).await?)
}

/// Accepts only absolute http(s) URLs with a host
///
/// The raw string must also be usable as the base for link resolution, so a
/// URL that only parses after normalization (leading whitespace, missing
/// `//`) is rejected here instead of failing every link later.
fn parse_source_url(url: &str) -> Result<Url, AnalysisError> {
    let invalid = || AnalysisError::InvalidUrl {
        url: url.to_string(),
    };

    resolve("", url).map_err(|_| invalid())?;
    let parsed = Url::parse(url).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(parsed),
        _ => Err(invalid()),
    }
}
