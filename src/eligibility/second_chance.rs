//! Second Chance: a one-time offer shortly after the contest ends, for
//! participants who finished just outside the prize ranks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Blocker, Decision};
use crate::validation::{rank_fraction, within};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondChanceConfig {
    pub top_percent_threshold: f64,
    /// Largest distance to the last prize-winning rank
    pub max_points_gap: i64,
    pub min_user_actions: u32,
    /// Offer stays open this long after the contest ends
    pub time_window_minutes: f64,
}

impl SecondChanceConfig {
    pub const DEFAULT: SecondChanceConfig = SecondChanceConfig {
        top_percent_threshold: 0.40,
        max_points_gap: 15,
        min_user_actions: 5,
        time_window_minutes: 30.0,
    };
}

impl Default for SecondChanceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondChanceInput {
    pub user_rank: u32,
    pub total_users: u32,
    /// May be zero or negative for participants already inside the prize ranks
    pub points_to_prize_rank: i64,
    pub user_actions_count: u32,
    /// Negative while the contest is still running
    pub minutes_since_end: f64,
    pub already_used: bool,
}

pub fn evaluate_second_chance(config: &SecondChanceConfig, input: &SecondChanceInput) -> Decision {
    if input.already_used {
        return Decision::from_blockers(vec![Blocker::AlreadyUsed]);
    }

    let mut blockers = Vec::new();

    match rank_fraction(input.user_rank, input.total_users) {
        Ok(fraction) if fraction <= config.top_percent_threshold => {}
        Ok(_) => blockers.push(Blocker::OutsideTopTier),
        Err(e) => {
            debug!("Second chance input rejected: {}", e);
            blockers.push(Blocker::InvalidRank);
        }
    }

    if input.points_to_prize_rank > config.max_points_gap {
        blockers.push(Blocker::GapOutOfRange);
    }

    if input.user_actions_count < config.min_user_actions {
        blockers.push(Blocker::NotEngaged);
    }

    if !within(input.minutes_since_end, 0.0, config.time_window_minutes) {
        blockers.push(Blocker::OutsideTimeWindow);
    }

    Decision::from_blockers(blockers)
}

pub fn should_show_second_chance(config: &SecondChanceConfig, input: &SecondChanceInput) -> bool {
    evaluate_second_chance(config, input).eligible
}
