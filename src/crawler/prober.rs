//! Link probing interface
//!
//! A probe issues exactly one request against an already-resolved URL and
//! reports what happened. Probes never fail the analysis: every outcome,
//! including resolution and connection failures, becomes a
//! [`LinkProbeResult`].

use async_trait::async_trait;

/// Status code recorded when no HTTP status could be obtained
pub const PROBE_FAILED_STATUS: u16 = 999;

/// Raw outcome of a single probe request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this status code
    Status(u16),
    /// No response (DNS, connection refused, TLS, timeout, ...)
    Unreachable(String),
}

/// Verdict on one link, as merged by the collector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkProbeResult {
    /// Resolved URL, or the raw href when it could not be resolved
    pub url: String,
    pub is_valid: bool,
    pub status_code: u16,
}

impl LinkProbeResult {
    pub fn from_outcome(url: String, outcome: ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Status(status_code) => Self {
                url,
                is_valid: status_code < 300,
                status_code,
            },
            ProbeOutcome::Unreachable(_) => Self::failed(url),
        }
    }

    /// Invalid result carrying the sentinel status
    pub fn failed(url: String) -> Self {
        Self {
            url,
            is_valid: false,
            status_code: PROBE_FAILED_STATUS,
        }
    }
}

/// Something that can check whether a URL answers
#[async_trait]
pub trait LinkProber: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeOutcome;
}
