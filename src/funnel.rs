// Funnel Metrics
//
// Per-contest conversion and revenue figures derived from the event log.

use std::collections::HashSet;

use crate::models::{AnalyticsEventKind, AnalyticsEventRecord, MetricsSummary};
use crate::pricing::{BOOST_PRICING, SECOND_CHANCE_PRICING};

/// Summarise one contest. Records for other contests are ignored, so the
/// full log can be passed in. An unknown contest yields all zeros.
pub fn funnel_metrics(events: &[AnalyticsEventRecord], contest_id: &str) -> MetricsSummary {
    let mut summary = MetricsSummary {
        contest_id: contest_id.to_string(),
        ..MetricsSummary::default()
    };
    let mut participants: HashSet<&str> = HashSet::new();
    let mut paying_users: HashSet<&str> = HashSet::new();

    for record in events.iter().filter(|r| r.contest_id == contest_id) {
        match record.kind {
            AnalyticsEventKind::ActionPerformed => {
                participants.insert(&record.user_id);
            }
            AnalyticsEventKind::BoostShown => summary.boost_shown += 1,
            AnalyticsEventKind::BoostClicked => summary.boost_clicked += 1,
            AnalyticsEventKind::BoostPurchased => {
                summary.boost_purchased += 1;
                summary.total_revenue = summary
                    .total_revenue
                    .saturating_add(purchase_price(record, BOOST_PRICING.price_stars));
            }
            AnalyticsEventKind::SecondChanceShown => summary.second_chance_shown += 1,
            AnalyticsEventKind::SecondChanceClicked => summary.second_chance_clicked += 1,
            AnalyticsEventKind::SecondChancePurchased => {
                summary.second_chance_purchased += 1;
                summary.total_revenue = summary
                    .total_revenue
                    .saturating_add(purchase_price(record, SECOND_CHANCE_PRICING.price_stars));
            }
            AnalyticsEventKind::Viewed | AnalyticsEventKind::Finished => {}
        }

        if record.kind.is_purchase() {
            paying_users.insert(&record.user_id);
        }
    }

    summary.participants = participants.len() as u64;
    summary.paying_users = paying_users.len() as u64;
    summary.boost_conversion = conversion_rate(summary.boost_purchased, summary.boost_shown);
    summary.second_chance_conversion =
        conversion_rate(summary.second_chance_purchased, summary.second_chance_shown);
    summary
}

// Recorded prices come from the host unchecked; totals saturate instead of
// overflowing.
fn purchase_price(record: &AnalyticsEventRecord, default_stars: u32) -> u64 {
    record
        .recorded_price_stars()
        .unwrap_or(u64::from(default_stars))
}

fn conversion_rate(purchased: u64, shown: u64) -> f64 {
    if shown > 0 {
        (purchased as f64 / shown as f64) * 100.0
    } else {
        0.0
    }
}
