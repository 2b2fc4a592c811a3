//! Stage three: hard constraints. A portfolio failing any of them is never
//! shown, whatever its score would be.

use crate::domain::portfolio::Portfolio;
use crate::recommend::profile::HoldingProfile;

pub fn is_eligible(
    portfolio: &Portfolio,
    allowed_risk_levels: &[u8],
    profile: &HoldingProfile,
) -> bool {
    // Leverage is excluded here too, independently of the range stages.
    if portfolio.is_leveraged() {
        return false;
    }
    if !allowed_risk_levels.contains(&portfolio.risk_level) {
        return false;
    }
    if profile.esg_required && !portfolio.is_esg {
        return false;
    }
    if portfolio.holding_count() > profile.max_components {
        return false;
    }
    if profile.single_only && !portfolio.is_single_holding() {
        return false;
    }
    true
}

/// Eligible portfolios in catalog order.
pub fn filter_candidates<'a>(
    catalog: &'a [Portfolio],
    allowed_risk_levels: &[u8],
    profile: &HoldingProfile,
) -> Vec<&'a Portfolio> {
    catalog
        .iter()
        .filter(|p| is_eligible(p, allowed_risk_levels, profile))
        .collect()
}
