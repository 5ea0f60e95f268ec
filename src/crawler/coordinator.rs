//! Link crawl coordination
//!
//! Classifies the raw link set, hands every non-anchor href to the
//! [`Scheduler`], and merges the verdicts into [`LinkStats`] as they arrive.
//! The merge happens in this one task only, so the counters need no lock.

use crate::analysis::LinkStats;
use crate::crawler::prober::LinkProber;
use crate::crawler::scheduler::Scheduler;
use crate::url::{is_absolute, is_anchor};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Internal/external split of a link set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCounts {
    pub internal: usize,
    pub external: usize,
}

/// Splits distinct hrefs into internal and external ones
///
/// Purely syntactic: an href is external iff it contains `://`. Anchors and
/// unresolvable hrefs still count as internal.
pub fn classify<'a, I>(links: I) -> LinkCounts
where
    I: IntoIterator<Item = &'a String>,
{
    let mut counts = LinkCounts::default();
    for href in links {
        if is_absolute(href) {
            counts.external += 1;
        } else {
            counts.internal += 1;
        }
    }
    counts
}

/// One-depth link crawler
///
/// Probes each link of a page once; never follows links further.
#[derive(Clone)]
pub struct LinkCrawler {
    prober: Arc<dyn LinkProber>,
    scheduler: Scheduler,
}

impl LinkCrawler {
    pub fn new(prober: Arc<dyn LinkProber>, max_concurrent: usize) -> Self {
        Self {
            prober,
            scheduler: Scheduler::new(max_concurrent),
        }
    }

    /// Probes every non-anchor link and returns the complete link statistics
    ///
    /// # Arguments
    ///
    /// * `source_url` - URL of the page the links were found on
    /// * `links` - Distinct raw hrefs of the page
    ///
    /// # Returns
    ///
    /// Link statistics with the classification counts and the sorted list of
    /// invalid links. An empty link set returns all-zero statistics without
    /// any network activity.
    pub async fn crawl_for_validity(&self, source_url: &str, links: &BTreeSet<String>) -> LinkStats {
        if links.is_empty() {
            tracing::info!("Nothing to crawl! No links found in {}", source_url);
            return LinkStats::default();
        }

        let counts = classify(links);
        let mut stats = LinkStats {
            internal_link_count: counts.internal,
            external_link_count: counts.external,
            ..LinkStats::default()
        };

        let hrefs: Vec<String> = links.iter().filter(|href| !is_anchor(href)).cloned().collect();
        tracing::info!(
            "Probing {} of {} links from {} ({} at a time)",
            hrefs.len(),
            links.len(),
            source_url,
            self.scheduler.max_concurrent()
        );

        let mut batch = self
            .scheduler
            .spawn(Arc::clone(&self.prober), source_url, hrefs);

        while let Some(result) = batch.next().await {
            if !result.is_valid {
                tracing::warn!(
                    "Invalid link found! url={}, status={}",
                    result.url,
                    result.status_code
                );
                stats.invalid_link_count += 1;
                stats.invalid_links.push(result.url);
            }
        }
        batch.join().await;

        stats.invalid_links.sort();
        tracing::info!(
            "Finished crawling links of {}: {} invalid",
            source_url,
            stats.invalid_link_count
        );

        stats
    }
}
