//! Stage one: horizon picks a base band of risk levels, the remaining
//! answers shift it.

use crate::domain::answers::{
    AgeBracket, HorizonBracket, IncomeStability, InvestmentGoal, RiskTolerance, UserAnswers,
    WealthShare,
};
use crate::domain::portfolio::{MAX_GUIDED_RISK_LEVEL, MIN_RISK_LEVEL};
use std::collections::BTreeSet;

/// The longest horizon tops out at 7; leverage is not reachable from here.
pub fn base_risk_levels(horizon: HorizonBracket) -> &'static [u8] {
    match horizon {
        HorizonBracket::UpTo3Years => &[1, 2],
        HorizonBracket::From3To5Years => &[2, 3],
        HorizonBracket::From5To10Years => &[3, 4, 5],
        HorizonBracket::From10To20Years => &[4, 5, 6],
        HorizonBracket::Over20Years => &[5, 6, 7],
    }
}

pub fn age_adjustment(age: AgeBracket) -> i32 {
    match age {
        AgeBracket::Under30 => 1,
        AgeBracket::From30To45 => 0,
        AgeBracket::From45To60 => -1,
        AgeBracket::Over60 => -2,
    }
}

pub fn goal_adjustment(goal: InvestmentGoal) -> i32 {
    match goal {
        InvestmentGoal::CapitalPreservation => -2,
        InvestmentGoal::Income => -1,
        InvestmentGoal::BalancedGrowth => 0,
        InvestmentGoal::WealthGrowth => 1,
    }
}

pub fn wealth_share_adjustment(share: WealthShare) -> i32 {
    match share {
        WealthShare::Under10 => 1,
        WealthShare::From10To25 => 0,
        WealthShare::From25To50 => -1,
        WealthShare::Over50 => -2,
    }
}

pub fn tolerance_adjustment(tolerance: RiskTolerance) -> i32 {
    match tolerance {
        RiskTolerance::PanicSeller => -2,
        RiskTolerance::VeryWorried => -1,
        RiskTolerance::WorriedButHold => 0,
        RiskTolerance::Opportunity => 1,
        RiskTolerance::Calm => 1,
    }
}

pub fn income_adjustment(income: IncomeStability) -> i32 {
    match income {
        IncomeStability::VeryStable => 1,
        IncomeStability::Stable => 0,
        IncomeStability::Variable => -1,
        IncomeStability::Precarious => -2,
    }
}

pub fn total_adjustment(answers: &UserAnswers) -> i32 {
    age_adjustment(answers.age)
        + goal_adjustment(answers.goal)
        + wealth_share_adjustment(answers.wealth_share)
        + tolerance_adjustment(answers.risk_tolerance)
        + income_adjustment(answers.income_stability)
}

/// Shifts `base` by `adjustment` and clamps into `[1, 7]`.
///
/// Output is ascending, deduplicated and non-empty whenever `base` is.
pub fn shift_and_clamp(base: &[u8], adjustment: i32) -> Vec<u8> {
    let lo = i32::from(MIN_RISK_LEVEL);
    let hi = i32::from(MAX_GUIDED_RISK_LEVEL);
    let levels: BTreeSet<u8> = base
        .iter()
        .map(|&level| (i32::from(level) + adjustment).clamp(lo, hi) as u8)
        .collect();
    levels.into_iter().collect()
}

pub fn derive_risk_range(answers: &UserAnswers) -> Vec<u8> {
    shift_and_clamp(base_risk_levels(answers.horizon), total_adjustment(answers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::test_support::{all_range_inputs, answers};

    #[test]
    fn base_table_is_contiguous_and_below_leverage() {
        for &h in HorizonBracket::ALL {
            let base = base_risk_levels(h);
            assert!((2..=3).contains(&base.len()), "{h:?}");
            assert!(base.windows(2).all(|w| w[1] == w[0] + 1), "{h:?}");
            assert!(base.iter().all(|&l| l <= MAX_GUIDED_RISK_LEVEL), "{h:?}");
        }
        assert_eq!(base_risk_levels(HorizonBracket::Over20Years), &[5, 6, 7]);
    }

    #[test]
    fn clamps_both_ends_and_dedupes() {
        assert_eq!(shift_and_clamp(&[5, 6, 7], 2), vec![7]);
        assert_eq!(shift_and_clamp(&[1, 2], -5), vec![1]);
        assert_eq!(shift_and_clamp(&[4, 5, 6], 2), vec![6, 7]);
        assert_eq!(shift_and_clamp(&[3, 4, 5], -1), vec![2, 3, 4]);
        // Even a base band containing 8 never survives the clamp.
        assert_eq!(shift_and_clamp(&[6, 7, 8], 0), vec![6, 7]);
    }

    #[test]
    fn sums_all_five_modifiers() {
        let mut a = answers();
        a.age = AgeBracket::Under30;
        a.goal = InvestmentGoal::WealthGrowth;
        a.wealth_share = WealthShare::Under10;
        a.risk_tolerance = RiskTolerance::Calm;
        a.income_stability = IncomeStability::VeryStable;
        assert_eq!(total_adjustment(&a), 5);

        a.age = AgeBracket::Over60;
        a.goal = InvestmentGoal::CapitalPreservation;
        a.wealth_share = WealthShare::Over50;
        a.risk_tolerance = RiskTolerance::PanicSeller;
        a.income_stability = IncomeStability::Precarious;
        assert_eq!(total_adjustment(&a), -10);
    }

    #[test]
    fn range_is_non_empty_and_within_guided_levels_for_all_inputs() {
        for a in all_range_inputs() {
            let range = derive_risk_range(&a);
            assert!(!range.is_empty(), "{a:?}");
            assert!(
                range
                    .iter()
                    .all(|&l| (MIN_RISK_LEVEL..=MAX_GUIDED_RISK_LEVEL).contains(&l)),
                "{a:?} -> {range:?}"
            );
            assert!(range.windows(2).all(|w| w[0] < w[1]), "{range:?}");
        }
    }
}
