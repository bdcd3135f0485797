// Configuration Management
//
// Process-level settings for the upsell service: HTTP binding, logging and
// best-effort forwarding of funnel events to the ingestion endpoint.
// Eligibility thresholds are not configurable here; they ship as constants.

use clap::Parser;
use std::time::Duration;

/// Command line and environment variable configuration for the upsell service
#[derive(Parser, Debug, Clone)]
#[clap(name = "contest-upsell")]
#[clap(about = "Boost and Second Chance eligibility with contest funnel analytics")]
pub struct Config {
    /// HTTP server bind address for the host UI, dashboards and metrics
    #[clap(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
    pub bind_address: String,

    /// Forward every logged funnel event to the ingestion endpoint
    #[clap(long, env = "FORWARDING_ENABLED")]
    pub forwarding_enabled: bool,

    /// Remote ingestion endpoint receiving forwarded events as JSON
    #[clap(long, env = "INGEST_URL", default_value = "http://localhost:8080/ingest")]
    pub ingest_url: String,

    /// Per-request timeout for a forwarded event, in milliseconds
    #[clap(long, env = "FORWARD_TIMEOUT_MS", default_value = "3000")]
    pub forward_timeout_ms: u64,

    /// Events waiting to be forwarded before new ones are dropped
    #[clap(long, env = "FORWARD_QUEUE_CAPACITY", default_value = "1024")]
    pub forward_queue_capacity: usize,

    /// tracing-subscriber filter directive
    #[clap(long, env = "LOG_FILTER", default_value = "contest_upsell=info,tower_http=warn")]
    pub log_filter: String,
}

impl Config {
    pub fn forwarding(&self) -> ForwardingConfig {
        ForwardingConfig {
            ingest_url: self.ingest_url.clone(),
            timeout: Duration::from_millis(self.forward_timeout_ms),
            queue_capacity: self.forward_queue_capacity.max(1),
        }
    }
}

/// Settings handed to the HTTP forwarder when forwarding is enabled
#[derive(Debug, Clone)]
pub struct ForwardingConfig {
    pub ingest_url: String,
    pub timeout: Duration,
    pub queue_capacity: usize,
}
