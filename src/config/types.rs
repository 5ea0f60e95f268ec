use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Linklens
///
/// Every section and key is optional; missing values take the defaults
/// below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub http: HttpConfig,
}

/// Analysis behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum number of link probes in flight at once
    #[serde(rename = "max-concurrent-probes")]
    pub max_concurrent_probes: usize,

    /// Which end tags stop title text capture
    #[serde(rename = "title-scope")]
    pub title_scope: TitleScope,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_probes: 32,
            title_scope: TitleScope::default(),
        }
    }
}

/// Scope of `<title>` text capture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleScope {
    /// Any end tag stops the capture, whatever element it closes
    #[default]
    AnyEndTag,
    /// Only `</title>` stops the capture
    MatchingEndTag,
}

/// HTTP client configuration shared by the page fetch and all link probes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,

    /// Maximum number of redirects followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("linklens/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: 30,
            connect_timeout: 10,
            max_redirects: 10,
        }
    }
}
