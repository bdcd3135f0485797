// Contest Upsell Library
//
// Eligibility rules for the Boost and Second Chance offers, the funnel event
// log behind them and the metrics operators read from it.

pub mod analytics;
pub mod api;
pub mod clock;
pub mod config;
pub mod eligibility;
pub mod forwarder;
pub mod funnel;
pub mod metrics;
pub mod models;
pub mod pricing;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use analytics::AnalyticsLog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use eligibility::{
    evaluate_boost, evaluate_second_chance, should_show_boost, should_show_second_chance,
    Blocker, BoostConfig, BoostInput, Decision, SecondChanceConfig, SecondChanceInput,
};
pub use forwarder::{EventForwarder, HttpForwarder, NoopForwarder};
pub use funnel::funnel_metrics;
pub use metrics::AppMetrics;
pub use models::*;
pub use pricing::{PricingOffer, BOOST_PRICING, SECOND_CHANCE_PRICING};
pub use service::UpsellService;
