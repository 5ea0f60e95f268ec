//! Linklens: a single-page web analyzer
//!
//! This crate fetches one HTML page, extracts its structural metadata with a
//! streaming token state machine, and probes every discovered link once to
//! report which ones are broken.

pub mod analysis;
pub mod api;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod url;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Main error type for Linklens operations outside of a single analysis
#[derive(Debug, Error)]
pub enum LinklensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Stable machine-readable codes for analysis failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    InvalidUrl,
    RemoteFetchError,
    UnsuccessfulStatusCode,
    InvalidContentType,
}

impl ErrorCode {
    /// Returns the code as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "InvalidUrl",
            Self::RemoteFetchError => "RemoteFetchError",
            Self::UnsuccessfulStatusCode => "UnsuccessfulStatusCode",
            Self::InvalidContentType => "InvalidContentType",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures that abort the analysis of a page
///
/// Failures of individual links never show up here; they are reported as
/// data in [`analysis::LinkStats::invalid_links`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("[InvalidUrl] given url is malformed")]
    InvalidUrl { url: String },

    #[error("[RemoteFetchError] cannot fetch the content from url")]
    RemoteFetch {
        url: String,
        #[source]
        source: FetchFailure,
    },

    #[error("[UnsuccessfulStatusCode] unsuccessful status code returned for the given url! {status}")]
    UnsuccessfulStatus { url: String, status: u16 },

    #[error("[InvalidContentType] only HTML content types are supported")]
    InvalidContentType { url: String, content_type: String },
}

impl AnalysisError {
    /// Returns the error code of this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidUrl { .. } => ErrorCode::InvalidUrl,
            Self::RemoteFetch { .. } => ErrorCode::RemoteFetchError,
            Self::UnsuccessfulStatus { .. } => ErrorCode::UnsuccessfulStatusCode,
            Self::InvalidContentType { .. } => ErrorCode::InvalidContentType,
        }
    }

    /// Returns the human-readable cause without the code prefix
    pub fn message(&self) -> String {
        match self {
            Self::InvalidUrl { .. } => "given url is malformed".to_string(),
            Self::RemoteFetch { .. } => "cannot fetch the content from url".to_string(),
            Self::UnsuccessfulStatus { status, .. } => format!(
                "unsuccessful status code returned for the given url! {}",
                status
            ),
            Self::InvalidContentType { .. } => "only HTML content types are supported".to_string(),
        }
    }

    /// Returns the source URL the failed analysis was started with
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url }
            | Self::RemoteFetch { url, .. }
            | Self::UnsuccessfulStatus { url, .. }
            | Self::InvalidContentType { url, .. } => url,
        }
    }
}

/// Underlying reason a source page could not be retrieved
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("markup stream failed: {0}")]
    Stream(#[from] ExtractError),
}

/// Terminal failure of the markup event stream
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("markup stream interrupted: {0}")]
    Interrupted(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid base url '{0}': either an unsupported protocol or a malformed url")]
    InvalidBaseUrl(String),

    #[error("unsupported href '{0}': either an unsupported protocol or a malformed url")]
    UnsupportedHref(String),
}

/// Result type alias for Linklens operations
pub type Result<T> = std::result::Result<T, LinklensError>;

/// Result type alias for URL resolution
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

// Re-export commonly used types
pub use analysis::{analyze, AnalysisResult, Analyzer, HtmlVersion, LinkStats, PageType};
pub use config::Config;
pub use crate::url::resolve;
