//! Stage two: the stated reaction to losses sets a ceiling no other answer
//! can lift.

use crate::domain::answers::RiskTolerance;
use crate::domain::portfolio::{LEVERAGE_RISK_LEVEL, MIN_RISK_LEVEL};

/// Highest risk level each tolerance point may receive. No point reaches 8.
pub fn tolerance_ceiling(tolerance: RiskTolerance) -> u8 {
    match tolerance {
        RiskTolerance::PanicSeller => 2,
        RiskTolerance::VeryWorried => 3,
        RiskTolerance::WorriedButHold => 5,
        RiskTolerance::Opportunity => 7,
        RiskTolerance::Calm => 7,
    }
}

/// Drops levels above the ceiling (and the leverage level unconditionally).
///
/// When nothing survives, the two levels just below and at the ceiling are
/// used instead, so the result is never empty.
pub fn apply_tolerance_cap(range: &[u8], tolerance: RiskTolerance) -> Vec<u8> {
    let ceiling = tolerance_ceiling(tolerance);
    let mut capped: Vec<u8> = range
        .iter()
        .copied()
        .filter(|&level| level <= ceiling && level != LEVERAGE_RISK_LEVEL)
        .collect();

    if capped.is_empty() {
        capped = vec![ceiling.saturating_sub(1).max(MIN_RISK_LEVEL), ceiling];
    }

    capped.sort_unstable();
    capped.dedup();
    capped
}
