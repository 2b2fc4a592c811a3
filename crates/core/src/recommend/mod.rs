//! Guided recommendation: answers in, at most three portfolios out.
//!
//! Four stages run in order: risk range from horizon and modifiers, the
//! tolerance ceiling, hard filters, then scoring. Everything here is pure;
//! the same catalog and answers always give the same result.

pub mod caps;
pub mod filter;
pub mod profile;
pub mod reasons;
pub mod risk_range;
pub mod scoring;

use crate::domain::answers::UserAnswers;
use crate::domain::portfolio::Portfolio;
use crate::domain::recommendation::RecommendationResult;
use crate::recommend::profile::HoldingProfile;

pub const TOP_N: usize = 3;

/// Risk levels a user may be offered: derived range after the tolerance cap.
pub fn allowed_risk_levels(answers: &UserAnswers) -> Vec<u8> {
    let derived = risk_range::derive_risk_range(answers);
    caps::apply_tolerance_cap(&derived, answers.risk_tolerance)
}

pub fn recommend(catalog: &[Portfolio], answers: &UserAnswers) -> RecommendationResult {
    let allowed = allowed_risk_levels(answers);
    let profile = HoldingProfile::from_answers(answers);
    let candidates = filter::filter_candidates(catalog, &allowed, &profile);
    let ideal = scoring::ideal_risk_level(&allowed);
    let ranked = scoring::rank(&candidates, answers, &profile, ideal, TOP_N);

    tracing::debug!(
        allowed_risk_levels = ?allowed,
        ideal_risk_level = ideal,
        candidates = candidates.len(),
        ranked = ranked.len(),
        "recommendation computed"
    );

    RecommendationResult {
        ranked_portfolios: ranked,
        allowed_risk_levels: allowed,
        ideal_risk_level: ideal,
        criteria_echo: *answers,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{all_range_inputs, all_selection_inputs, answers, portfolio};
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::answers::*;
    use crate::domain::portfolio::LEVERAGE_RISK_LEVEL;
    use crate::recommend::caps::tolerance_ceiling;

    #[test]
    fn allowed_range_invariants_hold_for_all_range_inputs() {
        for a in all_range_inputs() {
            let allowed = allowed_risk_levels(&a);
            assert!(!allowed.is_empty(), "{a:?}");
            assert!(!allowed.contains(&LEVERAGE_RISK_LEVEL), "{a:?}");
            let ceiling = tolerance_ceiling(a.risk_tolerance);
            assert!(allowed.iter().all(|&l| l <= ceiling), "{a:?} -> {allowed:?}");
        }
    }

    #[test]
    fn recommendations_never_include_leverage_and_stay_within_top_n() {
        let catalog = Catalog::bundled().unwrap();
        for a in all_selection_inputs() {
            let result = catalog.recommend(&a);
            assert!(result.ranked_portfolios.len() <= TOP_N);
            assert!(!result.allowed_risk_levels.contains(&LEVERAGE_RISK_LEVEL));
            for r in &result.ranked_portfolios {
                assert_ne!(r.portfolio.risk_level, LEVERAGE_RISK_LEVEL);
                assert!(result.allowed_risk_levels.contains(&r.portfolio.risk_level));
            }
            assert!(result
                .ranked_portfolios
                .windows(2)
                .all(|w| w[0].score >= w[1].score));
            assert_eq!(result.criteria_echo, a);
        }
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let catalog = Catalog::bundled().unwrap();
        for a in all_selection_inputs().into_iter().step_by(37) {
            assert_eq!(catalog.recommend(&a), catalog.recommend(&a));
        }
    }

    #[test]
    fn young_nervous_investor_is_held_to_the_lowest_levels() {
        let a = UserAnswers {
            age: AgeBracket::Under30,
            horizon: HorizonBracket::Over20Years,
            goal: InvestmentGoal::WealthGrowth,
            wealth_share: WealthShare::Under10,
            risk_tolerance: RiskTolerance::PanicSeller,
            ..answers()
        };
        assert_eq!(allowed_risk_levels(&a), vec![1, 2]);
    }

    #[test]
    fn esg_and_single_only_filter_down_to_one_portfolio() {
        let catalog = vec![portfolio("LEV", 8, false, 1), {
            let mut p = portfolio("GREEN", 3, true, 1);
            p.category = crate::domain::portfolio::Category::Esg;
            p
        }];
        let a = UserAnswers {
            age: AgeBracket::From30To45,
            capital: CapitalBracket::Under5k,
            horizon: HorizonBracket::From5To10Years,
            goal: InvestmentGoal::BalancedGrowth,
            wealth_share: WealthShare::From10To25,
            experience: ExperienceLevel::Beginner,
            risk_tolerance: RiskTolerance::Calm,
            income_stability: IncomeStability::Variable,
            esg: EsgPreference::Required,
            management: ManagementPreference::Zero,
        };
        let profile = HoldingProfile::from_answers(&a);
        assert!(profile.single_only);

        // Even a range admitting every level, leverage included, keeps only GREEN.
        let every_level: Vec<u8> = (1..=8).collect();
        let survivors = filter::filter_candidates(&catalog, &every_level, &profile);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].id, "GREEN");

        let result = recommend(&catalog, &a);
        assert_eq!(result.allowed_risk_levels, vec![3, 4, 5]);
        let ids: Vec<_> = result
            .ranked_portfolios
            .iter()
            .map(|r| r.portfolio.id.as_str())
            .collect();
        assert_eq!(ids, vec!["GREEN"]);
    }

    #[test]
    fn no_match_is_an_empty_result() {
        let catalog = vec![portfolio("CONVENTIONAL", 5, false, 4)];
        let a = UserAnswers {
            esg: EsgPreference::Required,
            ..answers()
        };
        let result = recommend(&catalog, &a);
        assert!(result.is_empty());
        assert!(!result.allowed_risk_levels.is_empty());
    }

    #[test]
    fn bundled_catalog_low_touch_beginner_gets_single_etfs() {
        let catalog = Catalog::bundled().unwrap();
        let a = UserAnswers {
            age: AgeBracket::From30To45,
            capital: CapitalBracket::From5kTo20k,
            horizon: HorizonBracket::Over20Years,
            goal: InvestmentGoal::WealthGrowth,
            wealth_share: WealthShare::From10To25,
            experience: ExperienceLevel::Beginner,
            risk_tolerance: RiskTolerance::Calm,
            income_stability: IncomeStability::Stable,
            esg: EsgPreference::Indifferent,
            management: ManagementPreference::Minimal,
        };
        let result = catalog.recommend(&a);

        // Base [5,6,7] shifted by +2 clamps to [7].
        assert_eq!(result.allowed_risk_levels, vec![7]);
        let ids: Vec<_> = result
            .ranked_portfolios
            .iter()
            .map(|r| r.portfolio.id.as_str())
            .collect();
        // Four single-ETF level-7 portfolios tie; catalog order decides.
        assert_eq!(ids, vec!["PORT17a", "PORT17b", "PORT27"]);
        // 12 + 18 + 10 + 8
        assert!(result.ranked_portfolios.iter().all(|r| r.score == 48));
    }
}
