//! Boost: offered to participants close to the next rank while the contest
//! is about to end.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Blocker, Decision};
use crate::validation::rank_fraction;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostConfig {
    /// Participant must rank within this top fraction of the field
    pub top_percent_threshold: f64,
    /// Largest gap to the next rank that still counts as "almost there"
    pub max_points_gap: i64,
    pub max_time_left_hours: f64,
    pub min_user_actions: u32,
    /// Minimum time between two impressions for the same user
    pub cooldown_hours: f64,
}

impl BoostConfig {
    pub const DEFAULT: BoostConfig = BoostConfig {
        top_percent_threshold: 0.30,
        max_points_gap: 12,
        max_time_left_hours: 6.0,
        min_user_actions: 5,
        cooldown_hours: 24.0,
    };

    fn cooldown(&self) -> Duration {
        Duration::milliseconds((self.cooldown_hours * 3_600_000.0).round() as i64)
    }
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Live snapshot polled from the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostInput {
    pub user_rank: u32,
    pub total_users: u32,
    /// Zero or negative when tied with or ahead of the next rank
    pub points_to_next_rank: i64,
    pub hours_left: f64,
    pub user_actions_count: u32,
    #[serde(default)]
    pub last_shown_at: Option<DateTime<Utc>>,
}

pub fn evaluate_boost(config: &BoostConfig, input: &BoostInput, now: DateTime<Utc>) -> Decision {
    let mut blockers = Vec::new();

    match rank_fraction(input.user_rank, input.total_users) {
        Ok(fraction) if fraction <= config.top_percent_threshold => {}
        Ok(_) => blockers.push(Blocker::OutsideTopTier),
        Err(e) => {
            debug!("Boost input rejected: {}", e);
            blockers.push(Blocker::InvalidRank);
        }
    }

    if input.points_to_next_rank <= 0 || input.points_to_next_rank > config.max_points_gap {
        blockers.push(Blocker::GapOutOfRange);
    }

    if !(input.hours_left > 0.0 && input.hours_left <= config.max_time_left_hours) {
        blockers.push(Blocker::OutsideTimeWindow);
    }

    if input.user_actions_count < config.min_user_actions {
        blockers.push(Blocker::NotEngaged);
    }

    if let Some(last_shown_at) = input.last_shown_at {
        if now.signed_duration_since(last_shown_at) <= config.cooldown() {
            blockers.push(Blocker::CoolingDown);
        }
    }

    Decision::from_blockers(blockers)
}

pub fn should_show_boost(config: &BoostConfig, input: &BoostInput, now: DateTime<Utc>) -> bool {
    evaluate_boost(config, input, now).eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    fn eligible_input() -> BoostInput {
        BoostInput {
            user_rank: 2,
            total_users: 10,
            points_to_next_rank: 8,
            hours_left: 3.0,
            user_actions_count: 6,
            last_shown_at: None,
        }
    }

    #[test]
    fn test_reference_snapshot_is_eligible() {
        let config = BoostConfig::default();
        let decision = evaluate_boost(&config, &eligible_input(), now());
        assert!(decision.eligible);
        assert!(decision.blockers.is_empty());
    }

    #[test]
    fn test_engagement_floor() {
        let input = BoostInput { user_actions_count: 4, ..eligible_input() };
        let decision = evaluate_boost(&BoostConfig::default(), &input, now());
        assert_eq!(decision.blockers, vec![Blocker::NotEngaged]);
    }

    #[test]
    fn test_leaders_and_ties_are_not_offered() {
        let config = BoostConfig::default();
        for gap in [0, -3] {
            let input = BoostInput {
                user_rank: 1,
                points_to_next_rank: gap,
                hours_left: 1.0,
                user_actions_count: 10,
                ..eligible_input()
            };
            assert!(!should_show_boost(&config, &input, now()), "gap {}", gap);
        }
        let at_max = BoostInput { points_to_next_rank: 12, ..eligible_input() };
        assert!(should_show_boost(&config, &at_max, now()));
        let past_max = BoostInput { points_to_next_rank: 13, ..eligible_input() };
        assert!(!should_show_boost(&config, &past_max, now()));
    }

    #[test]
    fn test_time_window_boundaries() {
        let config = BoostConfig::default();
        let at_edge = BoostInput { hours_left: 6.0, ..eligible_input() };
        assert!(should_show_boost(&config, &at_edge, now()));

        for hours_left in [6.01, 0.0, -1.0, f64::NAN] {
            let input = BoostInput { hours_left, ..eligible_input() };
            assert!(!should_show_boost(&config, &input, now()), "hours_left {}", hours_left);
        }
    }

    #[test]
    fn test_top_tier_boundary() {
        let config = BoostConfig::default();
        let third = BoostInput { user_rank: 3, ..eligible_input() };
        assert!(should_show_boost(&config, &third, now()));
        let fourth = BoostInput { user_rank: 4, ..eligible_input() };
        assert_eq!(
            evaluate_boost(&config, &fourth, now()).blockers,
            vec![Blocker::OutsideTopTier]
        );
    }

    #[test]
    fn test_cooldown_is_strict() {
        let config = BoostConfig::default();
        let exactly = BoostInput {
            last_shown_at: Some(now() - Duration::hours(24)),
            ..eligible_input()
        };
        assert_eq!(
            evaluate_boost(&config, &exactly, now()).blockers,
            vec![Blocker::CoolingDown]
        );

        let just_past = BoostInput {
            last_shown_at: Some(now() - Duration::hours(24) - Duration::milliseconds(1)),
            ..eligible_input()
        };
        assert!(should_show_boost(&config, &just_past, now()));
    }

    #[test]
    fn test_invalid_rank_is_not_eligible() {
        let config = BoostConfig::default();
        for (user_rank, total_users) in [(1, 0), (0, 10), (11, 10)] {
            let input = BoostInput { user_rank, total_users, ..eligible_input() };
            let decision = evaluate_boost(&config, &input, now());
            assert!(!decision.eligible);
            assert_eq!(decision.blockers, vec![Blocker::InvalidRank]);
        }
    }

    #[test]
    fn test_reports_every_failed_rule() {
        let input = BoostInput {
            user_rank: 9,
            total_users: 10,
            points_to_next_rank: 0,
            hours_left: 48.0,
            user_actions_count: 0,
            last_shown_at: Some(now()),
        };
        let decision = evaluate_boost(&BoostConfig::default(), &input, now());
        assert_eq!(
            decision.blockers,
            vec![
                Blocker::OutsideTopTier,
                Blocker::GapOutOfRange,
                Blocker::OutsideTimeWindow,
                Blocker::NotEngaged,
                Blocker::CoolingDown,
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let config = BoostConfig::default();
        let input = BoostInput { last_shown_at: Some(now() - Duration::hours(30)), ..eligible_input() };
        let first = evaluate_boost(&config, &input, now());
        for _ in 0..10 {
            assert_eq!(evaluate_boost(&config, &input, now()), first);
        }
    }
}
