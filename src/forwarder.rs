// Event Forwarding
//
// Best-effort delivery of funnel events to a remote ingestion endpoint.
// The append path only enqueues; a background worker owns the network and
// drops anything that fails or times out. No retries.

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ForwardingConfig;
use crate::metrics::AppMetrics;
use crate::models::AnalyticsEventRecord;

/// Receives every record after it has been appended to the log.
/// Implementations must return immediately.
pub trait EventForwarder: Send + Sync {
    fn forward(&self, record: &AnalyticsEventRecord);
}

/// Used when forwarding is disabled
#[derive(Debug, Default)]
pub struct NoopForwarder;

impl EventForwarder for NoopForwarder {
    fn forward(&self, _record: &AnalyticsEventRecord) {}
}

/// Hands records to a `ForwardingWorker` through a bounded queue
pub struct HttpForwarder {
    tx: mpsc::Sender<AnalyticsEventRecord>,
    metrics: Arc<AppMetrics>,
}

impl HttpForwarder {
    /// Build the forwarder and start its worker on the current tokio runtime
    pub fn spawn(config: &ForwardingConfig, metrics: Arc<AppMetrics>) -> Result<(Self, JoinHandle<()>)> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let (tx, rx) = mpsc::channel(config.queue_capacity);

        let worker = ForwardingWorker {
            client,
            ingest_url: config.ingest_url.clone(),
            timeout: config.timeout,
            metrics: metrics.clone(),
            rx,
        };

        info!(
            "Forwarding events to {} (timeout {:?}, queue {})",
            config.ingest_url, config.timeout, config.queue_capacity
        );
        let handle = tokio::spawn(worker.run());

        Ok((Self { tx, metrics }, handle))
    }
}

impl EventForwarder for HttpForwarder {
    fn forward(&self, record: &AnalyticsEventRecord) {
        match self.tx.try_send(record.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                self.metrics.record_forward_dropped();
                warn!("Forwarding queue full, dropping event {}", dropped.id);
            }
            Err(TrySendError::Closed(dropped)) => {
                self.metrics.record_forward_dropped();
                warn!("Forwarding worker stopped, dropping event {}", dropped.id);
            }
        }
    }
}

/// ForwardingWorker - drains the queue and posts each record once
pub struct ForwardingWorker {
    client: reqwest::Client,
    ingest_url: String,
    timeout: Duration,
    metrics: Arc<AppMetrics>,
    rx: mpsc::Receiver<AnalyticsEventRecord>,
}

impl ForwardingWorker {
    /// Runs until every `HttpForwarder` handle is dropped
    pub async fn run(mut self) {
        debug!("Forwarding worker started");
        while let Some(record) = self.rx.recv().await {
            self.post(&record).await;
        }
        debug!("Forwarding worker stopped");
    }

    async fn post(&self, record: &AnalyticsEventRecord) {
        let start = Instant::now();
        let request = self.client.post(&self.ingest_url).json(record).send();

        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(response)) if response.status().is_success() => {
                self.metrics.record_forwarded(start.elapsed().as_secs_f64());
                debug!("Forwarded {} event {}", record.kind, record.id);
            }
            Ok(Ok(response)) => {
                self.metrics.record_forward_failure("status");
                warn!(
                    "Ingestion rejected {} event {}: HTTP {}",
                    record.kind,
                    record.id,
                    response.status()
                );
            }
            Ok(Err(e)) if e.is_timeout() => {
                self.metrics.record_forward_failure("timeout");
                warn!("Forwarding {} event {} timed out: {}", record.kind, record.id, e);
            }
            Ok(Err(e)) => {
                self.metrics.record_forward_failure("request");
                warn!("Forwarding {} event {} failed: {}", record.kind, record.id, e);
            }
            Err(_) => {
                self.metrics.record_forward_failure("timeout");
                warn!(
                    "Forwarding {} event {} timed out after {:?}",
                    record.kind, record.id, self.timeout
                );
            }
        }
    }
}
