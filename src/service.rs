// Upsell Service
//
// The contract the host UI talks to: eligibility checks against the shipped
// configs, funnel event tracking and per-contest metrics.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::analytics::AnalyticsLog;
use crate::clock::Clock;
use crate::eligibility::{
    self, BoostConfig, BoostInput, Decision, SecondChanceConfig, SecondChanceInput,
};
use crate::funnel::funnel_metrics;
use crate::metrics::AppMetrics;
use crate::models::{AnalyticsEventKind, AnalyticsEventRecord, MetricsSummary, NewEvent};
use crate::pricing::{self, PricingOffer, BOOST_PRICING, SECOND_CHANCE_PRICING};

pub struct UpsellService {
    boost: BoostConfig,
    second_chance: SecondChanceConfig,
    clock: Arc<dyn Clock>,
    log: Arc<AnalyticsLog>,
    metrics: Arc<AppMetrics>,
}

impl UpsellService {
    pub fn new(clock: Arc<dyn Clock>, log: Arc<AnalyticsLog>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            boost: BoostConfig::DEFAULT,
            second_chance: SecondChanceConfig::DEFAULT,
            clock,
            log,
            metrics,
        }
    }

    pub fn evaluate_boost(&self, input: &BoostInput) -> Decision {
        let decision = eligibility::evaluate_boost(&self.boost, input, self.clock.now());
        self.metrics.record_decision(BOOST_PRICING.id, decision.eligible);
        decision
    }

    pub fn should_show_boost(&self, input: &BoostInput) -> bool {
        self.evaluate_boost(input).eligible
    }

    pub fn evaluate_second_chance(&self, input: &SecondChanceInput) -> Decision {
        let decision = eligibility::evaluate_second_chance(&self.second_chance, input);
        self.metrics.record_decision(SECOND_CHANCE_PRICING.id, decision.eligible);
        decision
    }

    pub fn should_show_second_chance(&self, input: &SecondChanceInput) -> bool {
        self.evaluate_second_chance(input).eligible
    }

    pub fn track_event(
        &self,
        kind: AnalyticsEventKind,
        contest_id: &str,
        user_id: &str,
        metadata: Option<Map<String, Value>>,
    ) -> AnalyticsEventRecord {
        let event = NewEvent::new(kind, contest_id, user_id);
        match metadata {
            Some(metadata) => self.log.log(event.with_metadata(metadata)),
            None => self.log.log(event),
        }
    }

    pub fn track(&self, event: NewEvent) -> AnalyticsEventRecord {
        self.log.log(event)
    }

    pub fn event_metrics(&self, contest_id: &str) -> MetricsSummary {
        funnel_metrics(&self.log.events_for_contest(contest_id), contest_id)
    }

    pub fn pricing(&self) -> [PricingOffer; 2] {
        pricing::catalogue()
    }

    pub fn log(&self) -> &AnalyticsLog {
        &self.log
    }
}
