//! Stage four: additive fit score and top-N selection.

use crate::domain::answers::{EsgPreference, InvestmentGoal, ManagementPreference, UserAnswers};
use crate::domain::portfolio::{Portfolio, RebalanceCadence, MIN_RISK_LEVEL};
use crate::domain::recommendation::RankedPortfolio;
use crate::recommend::profile::HoldingProfile;

pub const DISTANCE_PENALTY_PER_LEVEL: i32 = 3;

/// Independent scoring rules. Each one that holds adds its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    SingleHoldingLowTouch,
    EsgPreferred,
    EsgRequired,
    NoRebalancingLowTouch,
    LowMaintenanceModerateTouch,
    SingleHoldingSmallCapital,
    SingleHoldingLargeCapital,
    PreservationLowRisk,
    GrowthHigherRisk,
}

impl Rule {
    pub const ALL: [Rule; 9] = [
        Rule::SingleHoldingLowTouch,
        Rule::EsgPreferred,
        Rule::EsgRequired,
        Rule::NoRebalancingLowTouch,
        Rule::LowMaintenanceModerateTouch,
        Rule::SingleHoldingSmallCapital,
        Rule::SingleHoldingLargeCapital,
        Rule::PreservationLowRisk,
        Rule::GrowthHigherRisk,
    ];

    pub fn points(self) -> i32 {
        match self {
            Rule::SingleHoldingLowTouch => 12,
            Rule::EsgPreferred => 6,
            Rule::EsgRequired => 10,
            Rule::NoRebalancingLowTouch => 18,
            Rule::LowMaintenanceModerateTouch => 8,
            Rule::SingleHoldingSmallCapital => 10,
            Rule::SingleHoldingLargeCapital => -3,
            Rule::PreservationLowRisk => 8,
            Rule::GrowthHigherRisk => 8,
        }
    }

    pub fn applies(self, p: &Portfolio, answers: &UserAnswers, profile: &HoldingProfile) -> bool {
        match self {
            Rule::SingleHoldingLowTouch => p.is_single_holding() && profile.prefers_low_touch,
            Rule::EsgPreferred => p.is_esg && answers.esg == EsgPreference::Preferred,
            Rule::EsgRequired => p.is_esg && answers.esg == EsgPreference::Required,
            Rule::NoRebalancingLowTouch => {
                p.rebalance_cadence == RebalanceCadence::None && profile.prefers_low_touch
            }
            Rule::LowMaintenanceModerateTouch => {
                p.rebalance_cadence.is_low_maintenance()
                    && answers.management == ManagementPreference::Moderate
            }
            Rule::SingleHoldingSmallCapital => {
                p.is_single_holding() && profile.capital_favors_single
            }
            Rule::SingleHoldingLargeCapital => {
                p.is_single_holding() && profile.capital_favors_multi
            }
            Rule::PreservationLowRisk => {
                answers.goal == InvestmentGoal::CapitalPreservation && p.risk_level <= 3
            }
            Rule::GrowthHigherRisk => {
                answers.goal == InvestmentGoal::WealthGrowth && p.risk_level >= 5
            }
        }
    }
}

/// Middle of the allowed range; the upper middle for even lengths.
pub fn ideal_risk_level(allowed_risk_levels: &[u8]) -> u8 {
    allowed_risk_levels
        .get(allowed_risk_levels.len() / 2)
        .copied()
        .unwrap_or(MIN_RISK_LEVEL)
}

pub fn matched_rules(p: &Portfolio, answers: &UserAnswers, profile: &HoldingProfile) -> Vec<Rule> {
    Rule::ALL
        .into_iter()
        .filter(|rule| rule.applies(p, answers, profile))
        .collect()
}

pub fn distance_penalty(risk_level: u8, ideal: u8) -> i32 {
    DISTANCE_PENALTY_PER_LEVEL * (i32::from(risk_level) - i32::from(ideal)).abs()
}

pub fn score(p: &Portfolio, answers: &UserAnswers, profile: &HoldingProfile, ideal: u8) -> i32 {
    let bonus: i32 = matched_rules(p, answers, profile)
        .into_iter()
        .map(Rule::points)
        .sum();
    bonus - distance_penalty(p.risk_level, ideal)
}

/// Scores every candidate and keeps the best `top_n`.
///
/// The sort is stable: equal scores keep the order candidates came in,
/// which is catalog order.
pub fn rank(
    candidates: &[&Portfolio],
    answers: &UserAnswers,
    profile: &HoldingProfile,
    ideal: u8,
    top_n: usize,
) -> Vec<RankedPortfolio> {
    let mut scored: Vec<(i32, &Portfolio)> = candidates
        .iter()
        .map(|&p| (score(p, answers, profile, ideal), p))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, (score, p))| RankedPortfolio {
            rank: (i + 1) as u8,
            score,
            portfolio: p.clone(),
        })
        .collect()
}
