//! Bounded probe worker pool
//!
//! This module handles:
//! - Queueing every link that needs a probe
//! - Draining the queue with a fixed number of workers
//! - Streaming each verdict to a single collector over a channel
//!
//! The channel closes once every worker has exited, which happens only after
//! the queue is empty and every in-flight probe has reported. That closure is
//! the completion barrier the collector waits on.

use crate::crawler::prober::{LinkProbeResult, LinkProber, ProbeOutcome};
use crate::url::resolve;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// Spawns probe workers with a fixed concurrency limit
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    max_concurrent: usize,
}

impl Scheduler {
    /// Creates a scheduler; a limit of 0 is treated as 1
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Queues `hrefs` and starts draining them
    ///
    /// At most `max_concurrent` probes are in flight at any time. Each href
    /// is resolved against `source_url` by the worker that picks it up.
    pub fn spawn(
        &self,
        prober: Arc<dyn LinkProber>,
        source_url: &str,
        hrefs: Vec<String>,
    ) -> ProbeBatch {
        let pending = hrefs.len();
        let queue = Arc::new(Mutex::new(VecDeque::from(hrefs)));
        let source_url: Arc<str> = Arc::from(source_url);
        let (tx, rx) = mpsc::unbounded_channel();
        let mut workers = JoinSet::new();

        for worker_id in 0..self.max_concurrent.min(pending) {
            let queue = Arc::clone(&queue);
            let prober = Arc::clone(&prober);
            let source_url = Arc::clone(&source_url);
            let tx = tx.clone();

            workers.spawn(async move {
                loop {
                    let Some(href) = queue.lock().await.pop_front() else {
                        break;
                    };
                    let result = probe_link(prober.as_ref(), &href, &source_url).await;
                    tracing::debug!(
                        worker_id,
                        url = %result.url,
                        status = result.status_code,
                        valid = result.is_valid,
                        "link probed"
                    );
                    if tx.send(result).is_err() {
                        break;
                    }
                }
            });
        }

        ProbeBatch {
            results: rx,
            workers,
            pending,
        }
    }
}

/// Handle on a running set of probes
pub struct ProbeBatch {
    results: mpsc::UnboundedReceiver<LinkProbeResult>,
    workers: JoinSet<()>,
    pending: usize,
}

impl ProbeBatch {
    /// Number of probes that have not reported yet
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Waits for the next verdict, in completion order
    ///
    /// Returns `None` once every worker has exited.
    pub async fn next(&mut self) -> Option<LinkProbeResult> {
        let result = self.results.recv().await;
        if result.is_some() {
            self.pending = self.pending.saturating_sub(1);
        }
        result
    }

    /// Reaps the workers after the results channel has closed
    pub async fn join(mut self) {
        while let Some(joined) = self.workers.join_next().await {
            if let Err(err) = joined {
                tracing::error!("Probe worker failed: {}", err);
            }
        }
        if self.pending > 0 {
            tracing::warn!("{} link probes never reported", self.pending);
        }
    }
}

/// Resolves and probes one href
///
/// Unresolvable hrefs are reported under their raw value with the sentinel
/// status, without touching the network.
async fn probe_link(prober: &dyn LinkProber, href: &str, source_url: &str) -> LinkProbeResult {
    match resolve(href, source_url) {
        Ok(url) => {
            let outcome = prober.probe(&url).await;
            if let ProbeOutcome::Unreachable(reason) = &outcome {
                tracing::debug!(url = %url, %reason, "link unreachable");
            }
            LinkProbeResult::from_outcome(url, outcome)
        }
        Err(err) => {
            tracing::debug!("Cannot resolve {}: {}", href, err);
            LinkProbeResult::failed(href.to_string())
        }
    }
}
