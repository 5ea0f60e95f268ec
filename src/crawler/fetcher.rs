//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the shared HTTP client from configuration
//! - Fetching the source page and streaming its body into the tokenizer
//! - Probing individual links for reachability

use crate::config::{HttpConfig, TitleScope};
use crate::crawler::prober::{LinkProber, ProbeOutcome};
use crate::extract::{ChunkDecoder, Extraction, MarkupTokenizer};
use crate::{AnalysisError, FetchFailure};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use linklens::config::HttpConfig;
/// use linklens::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let redirect = if config.max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(config.max_redirects)
    };

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the source page and runs extraction over its body
///
/// # Request Flow
///
/// 1. Send GET request
///    - Network failure → `RemoteFetch`
/// 2. Check status
///    - 300 or above → `UnsuccessfulStatus`
/// 3. Check Content-Type
///    - Anything without `text/html` → `InvalidContentType`
/// 4. Stream the body chunk by chunk into the tokenizer
///    - Interrupted body → `RemoteFetch`
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The already-parsed source URL
/// * `title_scope` - Title capture scope for the state machine
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    title_scope: TitleScope,
) -> Result<Extraction, AnalysisError> {
    let remote_fetch = |source: FetchFailure| AnalysisError::RemoteFetch {
        url: url.to_string(),
        source,
    };

    let mut response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| remote_fetch(e.into()))?;

    let status = response.status();
    if status.as_u16() >= 300 {
        return Err(AnalysisError::UnsuccessfulStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.to_ascii_lowercase().contains("text/html") {
        return Err(AnalysisError::InvalidContentType {
            url: url.to_string(),
            content_type,
        });
    }

    tracing::info!("Received a valid html content from {}", url);

    let mut decoder = ChunkDecoder::for_content_type(&content_type);
    let mut tokenizer = MarkupTokenizer::new(title_scope);
    let mut bytes_read = 0usize;

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                bytes_read += chunk.len();
                tokenizer.feed(&decoder.decode(&chunk, false));
            }
            Ok(None) => {
                tokenizer.feed(&decoder.decode(&[], true));
                break;
            }
            Err(e) => {
                tracing::warn!("Body of {} broke off after {} bytes: {}", url, bytes_read, e);
                let failure = tokenizer.fail(e.to_string());
                return Err(remote_fetch(failure.into()));
            }
        }
    }

    tracing::debug!(
        "Tokenized {} bytes of {} from {}",
        bytes_read,
        decoder.encoding_name(),
        url
    );

    tokenizer.finish().map_err(|e| remote_fetch(e.into()))
}

/// Link prober backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkProber for HttpProber {
    /// Sends one GET and reports its status; the body is never read
    async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.get(url).send().await {
            Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
            Err(e) => {
                let reason = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    "Connection refused".to_string()
                } else {
                    e.to_string()
                };
                ProbeOutcome::Unreachable(reason)
            }
        }
    }
}
