//! Human-readable "why recommended" lines.
//!
//! Derived from the same rule facts the score uses, so a consumer can
//! rebuild them from a portfolio and the answers alone.

use crate::domain::answers::UserAnswers;
use crate::domain::portfolio::Portfolio;
use crate::recommend::profile::HoldingProfile;
use crate::recommend::scoring::{matched_rules, Rule};

fn describe(rule: Rule, p: &Portfolio) -> String {
    match rule {
        Rule::SingleHoldingLowTouch => "A single ETF keeps management to a minimum".to_string(),
        Rule::EsgPreferred => {
            "ESG screened, in line with your sustainability preference".to_string()
        }
        Rule::EsgRequired => "ESG screened, as you require".to_string(),
        Rule::NoRebalancingLowTouch => "No rebalancing needed".to_string(),
        Rule::LowMaintenanceModerateTouch => {
            "At most a yearly rebalance, matching the time you want to spend".to_string()
        }
        Rule::SingleHoldingSmallCapital => {
            "A single ETF suits the amount you plan to invest".to_string()
        }
        Rule::SingleHoldingLargeCapital => {
            "Note: your capital would also allow a more diversified multi-ETF portfolio".to_string()
        }
        Rule::PreservationLowRisk => {
            format!("Risk level {} fits a capital preservation goal", p.risk_level)
        }
        Rule::GrowthHigherRisk => format!("Risk level {} fits a wealth growth goal", p.risk_level),
    }
}

pub fn reasons_for(p: &Portfolio, answers: &UserAnswers, ideal_risk_level: u8) -> Vec<String> {
    let profile = HoldingProfile::from_answers(answers);
    let (bonuses, penalties): (Vec<Rule>, Vec<Rule>) = matched_rules(p, answers, &profile)
        .into_iter()
        .partition(|rule| rule.points() > 0);
    let mut out: Vec<String> = bonuses.into_iter().map(|rule| describe(rule, p)).collect();

    if p.risk_level == ideal_risk_level {
        out.push(format!("Risk level {} is the best match for your profile", p.risk_level));
    } else {
        out.push(format!(
            "Risk level {} is within your allowed range (best match: {ideal_risk_level})",
            p.risk_level
        ));
    }

    out.push(format!("Weighted cost ratio {:.2}% per year", p.weighted_cost_ratio()));
    // Penalties are caveats, listed after the reasons.
    out.extend(penalties.into_iter().map(|rule| describe(rule, p)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answers::{CapitalBracket, EsgPreference, ManagementPreference};
    use crate::domain::portfolio::RebalanceCadence;
    use crate::recommend::test_support::{answers, portfolio};

    #[test]
    fn lists_matching_rules_then_risk_and_cost() {
        let mut a = answers();
        a.management = ManagementPreference::Zero;
        a.capital = CapitalBracket::Under5k;
        a.esg = EsgPreference::Required;

        let mut p = portfolio("E", 3, true, 1);
        p.rebalance_cadence = RebalanceCadence::None;
        p.components[0].cost_ratio = 0.2;

        let reasons = reasons_for(&p, &a, 3);
        assert_eq!(
            reasons,
            vec![
                "A single ETF keeps management to a minimum",
                "ESG screened, as you require",
                "No rebalancing needed",
                "A single ETF suits the amount you plan to invest",
                "Risk level 3 is the best match for your profile",
                "Weighted cost ratio 0.20% per year",
            ]
        );
    }

    #[test]
    fn mentions_best_match_when_off_center() {
        let a = answers();
        let p = portfolio("M", 4, false, 3);
        let reasons = reasons_for(&p, &a, 5);
        assert!(reasons
            .iter()
            .any(|r| r == "Risk level 4 is within your allowed range (best match: 5)"));
    }

    #[test]
    fn penalties_come_last_as_caveats() {
        let mut a = answers();
        a.capital = CapitalBracket::Over100k;
        a.management = ManagementPreference::Zero;

        let p = portfolio("S", 5, false, 1);
        let reasons = reasons_for(&p, &a, 5);
        assert_eq!(reasons[0], "A single ETF keeps management to a minimum");
        assert_eq!(
            reasons.last().unwrap(),
            "Note: your capital would also allow a more diversified multi-ETF portfolio"
        );
        assert_eq!(reasons.iter().filter(|r| r.starts_with("Note:")).count(), 1);
    }
}
