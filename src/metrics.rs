// Prometheus Metrics Collection
//
// Operational counters for the upsell service: funnel events logged,
// eligibility outcomes and the health of best-effort event forwarding.

use prometheus::{CounterVec, Histogram, HistogramOpts, IntCounter, Opts, Registry};

use crate::models::AnalyticsEventKind;

/// AppMetrics contains all Prometheus metrics exposed on /metrics
pub struct AppMetrics {
    pub registry: Registry,

    // Funnel
    pub events_logged_total: CounterVec,

    // Eligibility
    pub eligibility_decisions_total: CounterVec,

    // Forwarding
    pub events_forwarded_total: IntCounter,
    pub forward_failures_total: CounterVec,
    pub forward_dropped_total: IntCounter,
    pub forward_duration: Histogram,
}

impl AppMetrics {
    /// Create a new registry with all application metrics registered
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let events_logged_total = CounterVec::new(
            Opts::new("upsell_events_logged_total", "Funnel events appended to the log"),
            &["kind"],
        )?;

        let eligibility_decisions_total = CounterVec::new(
            Opts::new("upsell_eligibility_decisions_total", "Eligibility evaluations by outcome"),
            &["offer", "result"],
        )?;

        let events_forwarded_total = IntCounter::new(
            "upsell_events_forwarded_total",
            "Events accepted by the ingestion endpoint",
        )?;

        let forward_failures_total = CounterVec::new(
            Opts::new("upsell_forward_failures_total", "Forwarding attempts that failed"),
            &["reason"],
        )?;

        let forward_dropped_total = IntCounter::new(
            "upsell_forward_dropped_total",
            "Events dropped because the forwarding queue was full or closed",
        )?;

        let forward_duration = Histogram::with_opts(HistogramOpts::new(
            "upsell_forward_duration_seconds",
            "Time spent posting one event to the ingestion endpoint",
        ))?;

        registry.register(Box::new(events_logged_total.clone()))?;
        registry.register(Box::new(eligibility_decisions_total.clone()))?;
        registry.register(Box::new(events_forwarded_total.clone()))?;
        registry.register(Box::new(forward_failures_total.clone()))?;
        registry.register(Box::new(forward_dropped_total.clone()))?;
        registry.register(Box::new(forward_duration.clone()))?;

        Ok(Self {
            registry,
            events_logged_total,
            eligibility_decisions_total,
            events_forwarded_total,
            forward_failures_total,
            forward_dropped_total,
            forward_duration,
        })
    }

    pub fn record_event_logged(&self, kind: AnalyticsEventKind) {
        self.events_logged_total.with_label_values(&[kind.as_str()]).inc();
    }

    pub fn record_decision(&self, offer: &str, eligible: bool) {
        let result = if eligible { "shown" } else { "withheld" };
        self.eligibility_decisions_total
            .with_label_values(&[offer, result])
            .inc();
    }

    pub fn record_forwarded(&self, duration: f64) {
        self.events_forwarded_total.inc();
        self.forward_duration.observe(duration);
    }

    pub fn record_forward_failure(&self, reason: &str) {
        self.forward_failures_total.with_label_values(&[reason]).inc();
    }

    pub fn record_forward_dropped(&self) {
        self.forward_dropped_total.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_exported() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_event_logged(AnalyticsEventKind::BoostShown);
        metrics.record_decision("boost", true);
        metrics.record_forward_failure("timeout");

        let names: Vec<String> = metrics
            .registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"upsell_events_logged_total".to_string()));
        assert!(names.contains(&"upsell_eligibility_decisions_total".to_string()));
        assert!(names.contains(&"upsell_forward_failures_total".to_string()));

        assert_eq!(
            metrics
                .events_logged_total
                .with_label_values(&["boost_shown"])
                .get(),
            1.0
        );
    }
}
