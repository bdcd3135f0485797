// Upsell Eligibility
//
// Pure rule sets deciding when the host UI may surface a paid offer. Each
// engine reports every failed rule so dashboards can explain a "no".

pub mod boost;
pub mod second_chance;

pub use boost::{evaluate_boost, should_show_boost, BoostConfig, BoostInput};
pub use second_chance::{
    evaluate_second_chance, should_show_second_chance, SecondChanceConfig, SecondChanceInput,
};

use serde::Serialize;

/// Why an offer was withheld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Blocker {
    /// Rank or field size violates 1 <= rank <= total
    InvalidRank,
    OutsideTopTier,
    GapOutOfRange,
    OutsideTimeWindow,
    NotEngaged,
    CoolingDown,
    AlreadyUsed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub eligible: bool,
    pub blockers: Vec<Blocker>,
}

impl Decision {
    fn from_blockers(blockers: Vec<Blocker>) -> Self {
        Self {
            eligible: blockers.is_empty(),
            blockers,
        }
    }
}
