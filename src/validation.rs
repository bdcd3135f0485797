// Input Validation
//
// Precondition checks on snapshots coming from the host. The eligibility
// engines turn any failure here into "not eligible" instead of surfacing it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("contest has no participants")]
    NoParticipants,

    #[error("rank {rank} is outside 1..={total_users}")]
    RankOutOfRange { rank: u32, total_users: u32 },
}

/// Fraction of the field at or above this participant, in (0, 1].
pub fn rank_fraction(user_rank: u32, total_users: u32) -> Result<f64, InputError> {
    if total_users == 0 {
        return Err(InputError::NoParticipants);
    }
    if user_rank == 0 || user_rank > total_users {
        return Err(InputError::RankOutOfRange {
            rank: user_rank,
            total_users,
        });
    }
    Ok(f64::from(user_rank) / f64::from(total_users))
}

/// Inclusive range check that rejects NaN.
#[inline]
pub fn within(value: f64, low: f64, high: f64) -> bool {
    value >= low && value <= high
}
