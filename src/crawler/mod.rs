//! Crawler module for page fetching and link probing
//!
//! This module contains the network side of an analysis, including:
//! - HTTP client construction and the source page fetch
//! - Single-request link probes behind the [`LinkProber`] trait
//! - Bounded probe scheduling
//! - Merging probe verdicts into link statistics

mod coordinator;
mod fetcher;
mod prober;
mod scheduler;

pub use coordinator::{classify, LinkCounts, LinkCrawler};
pub use fetcher::{build_http_client, fetch_page, HttpProber};
pub use prober::{LinkProbeResult, LinkProber, ProbeOutcome, PROBE_FAILED_STATUS};
pub use scheduler::{ProbeBatch, Scheduler};
