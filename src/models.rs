// Data Models and Types
//
// Funnel event records, the kinds the host UI may log, and the per-contest
// metrics summary served to operator dashboards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Closed set of funnel steps the host UI reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventKind {
    /// Participant opened the contest page
    Viewed,
    /// Reaction or comment that earned points
    ActionPerformed,
    BoostShown,
    BoostClicked,
    BoostPurchased,
    /// Contest ended while the participant was looking
    Finished,
    SecondChanceShown,
    SecondChanceClicked,
    SecondChancePurchased,
}

impl AnalyticsEventKind {
    pub const ALL: [AnalyticsEventKind; 9] = [
        AnalyticsEventKind::Viewed,
        AnalyticsEventKind::ActionPerformed,
        AnalyticsEventKind::BoostShown,
        AnalyticsEventKind::BoostClicked,
        AnalyticsEventKind::BoostPurchased,
        AnalyticsEventKind::Finished,
        AnalyticsEventKind::SecondChanceShown,
        AnalyticsEventKind::SecondChanceClicked,
        AnalyticsEventKind::SecondChancePurchased,
    ];

    /// Wire and metric label representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEventKind::Viewed => "viewed",
            AnalyticsEventKind::ActionPerformed => "action_performed",
            AnalyticsEventKind::BoostShown => "boost_shown",
            AnalyticsEventKind::BoostClicked => "boost_clicked",
            AnalyticsEventKind::BoostPurchased => "boost_purchased",
            AnalyticsEventKind::Finished => "finished",
            AnalyticsEventKind::SecondChanceShown => "second_chance_shown",
            AnalyticsEventKind::SecondChanceClicked => "second_chance_clicked",
            AnalyticsEventKind::SecondChancePurchased => "second_chance_purchased",
        }
    }

    pub fn is_purchase(&self) -> bool {
        matches!(
            self,
            AnalyticsEventKind::BoostPurchased | AnalyticsEventKind::SecondChancePurchased
        )
    }
}

impl fmt::Display for AnalyticsEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored funnel event. Never mutated after it is appended to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventRecord {
    pub id: Uuid,
    pub kind: AnalyticsEventKind,
    pub contest_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl AnalyticsEventRecord {
    /// Price actually paid, when the host recorded it with the purchase
    pub fn recorded_price_stars(&self) -> Option<u64> {
        self.metadata
            .as_ref()?
            .get(PRICE_STARS_KEY)
            .and_then(Value::as_u64)
    }
}

/// Metadata key the host uses to record the paid amount on purchase events
pub const PRICE_STARS_KEY: &str = "price_stars";

/// An event as submitted by the host, before the log stamps it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub kind: AnalyticsEventKind,
    pub contest_id: String,
    pub user_id: String,
    /// Filled with the current time when absent
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl NewEvent {
    pub fn new(kind: AnalyticsEventKind, contest_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            kind,
            contest_id: contest_id.into(),
            user_id: user_id.into(),
            timestamp: None,
            metadata: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Conversion funnel for one contest, as shown on the operator dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub contest_id: String,
    /// Distinct users with at least one scored action
    pub participants: u64,
    pub boost_shown: u64,
    pub boost_clicked: u64,
    pub boost_purchased: u64,
    /// Purchases per impression, in percent
    pub boost_conversion: f64,
    pub second_chance_shown: u64,
    pub second_chance_clicked: u64,
    pub second_chance_purchased: u64,
    pub second_chance_conversion: f64,
    /// Stars
    pub total_revenue: u64,
    /// Distinct users who bought either offer
    pub paying_users: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_string_forms_agree() {
        for kind in AnalyticsEventKind::ALL {
            let wire = serde_json::to_value(kind).unwrap();
            assert_eq!(wire, json!(kind.as_str()));
            assert_eq!(kind.to_string(), kind.as_str());
            let parsed: AnalyticsEventKind = serde_json::from_value(wire).unwrap();
            assert_eq!(parsed, kind);
        }
        assert!(serde_json::from_value::<AnalyticsEventKind>(json!("boost_refunded")).is_err());
    }

    #[test]
    fn test_recorded_price() {
        let mut metadata = Map::new();
        metadata.insert(PRICE_STARS_KEY.to_string(), json!(80));
        let record = AnalyticsEventRecord {
            id: Uuid::new_v4(),
            kind: AnalyticsEventKind::BoostPurchased,
            contest_id: "c1".into(),
            user_id: "u1".into(),
            timestamp: Utc::now(),
            metadata: Some(metadata),
        };
        assert_eq!(record.recorded_price_stars(), Some(80));

        let bare = AnalyticsEventRecord { metadata: None, ..record.clone() };
        assert_eq!(bare.recorded_price_stars(), None);

        let mut negative = Map::new();
        negative.insert(PRICE_STARS_KEY.to_string(), json!(-5));
        let negative = AnalyticsEventRecord { metadata: Some(negative), ..record };
        assert_eq!(negative.recorded_price_stars(), None);
    }

    #[test]
    fn test_new_event_accepts_host_payload() {
        let event: NewEvent = serde_json::from_value(json!({
            "kind": "boost_shown",
            "contestId": "c9",
            "userId": "42"
        }))
        .unwrap();
        assert_eq!(event.kind, AnalyticsEventKind::BoostShown);
        assert!(event.timestamp.is_none());
        assert!(event.metadata.is_none());
    }
}
