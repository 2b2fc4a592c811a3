use crate::domain::answers::UserAnswers;
use crate::domain::portfolio::Portfolio;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Highest score first, at most three entries.
    pub ranked_portfolios: Vec<RankedPortfolio>,
    /// Ascending, deduplicated; never empty, never contains the leverage level.
    pub allowed_risk_levels: Vec<u8>,
    pub ideal_risk_level: u8,
    pub criteria_echo: UserAnswers,
}

impl RecommendationResult {
    pub fn is_empty(&self) -> bool {
        self.ranked_portfolios.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPortfolio {
    pub rank: u8,
    pub score: i32,
    pub portfolio: Portfolio,
}
