use crate::domain::portfolio::{
    Category, MinHorizon, Portfolio, PortfolioComponent, RebalanceCadence, LEVERAGE_RISK_LEVEL,
    MIN_RISK_LEVEL,
};
use anyhow::ensure;
use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// A portfolio as written in a catalog file, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub category: Category,
    pub risk_level: i64,
    pub esg: bool,
    pub min_horizon_years: String,
    pub rebalance: RebalanceCadence,
    #[serde(default)]
    pub alternatives: bool,
    pub components: Vec<ComponentRecord>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    pub isin: String,
    pub ter: f64,
    pub percentage: f64,
}

impl CatalogRecord {
    pub fn validate_and_into_portfolio(self) -> anyhow::Result<Portfolio> {
        let id = self.id.trim().to_string();
        ensure!(!id.is_empty(), "id must be non-empty");

        ensure!(
            (i64::from(MIN_RISK_LEVEL)..=i64::from(LEVERAGE_RISK_LEVEL)).contains(&self.risk_level),
            "risk_level out of range: {}",
            self.risk_level
        );

        let min_horizon_years = self.min_horizon_years.parse::<MinHorizon>()?;

        ensure!(
            !self.components.is_empty(),
            "portfolio must have at least one component"
        );

        let mut components = Vec::with_capacity(self.components.len());
        for component in self.components {
            components.push(component.validate_and_into_component()?);
        }

        if self.alternatives {
            ensure!(
                components.len() >= 2,
                "alternatives portfolio must list at least two components (got {})",
                components.len()
            );
            for c in &components {
                ensure!(
                    (c.weight_percent - 100.0).abs() <= WEIGHT_SUM_TOLERANCE,
                    "alternative {} must weigh 100% (got {})",
                    c.identifier,
                    c.weight_percent
                );
            }
        } else {
            let total: f64 = components.iter().map(|c| c.weight_percent).sum();
            ensure!(
                (total - 100.0).abs() <= WEIGHT_SUM_TOLERANCE,
                "component weights must sum to 100 (got {total})"
            );
        }

        let display_name = self
            .display_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| id.clone());

        let strategy_note = self
            .note
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        Ok(Portfolio {
            id,
            display_name,
            category: self.category,
            risk_level: self.risk_level as u8,
            is_esg: self.esg,
            min_horizon_years,
            rebalance_cadence: self.rebalance,
            alternatives: self.alternatives,
            components,
            strategy_note,
        })
    }
}

impl ComponentRecord {
    fn validate_and_into_component(self) -> anyhow::Result<PortfolioComponent> {
        let identifier = self.isin.trim().to_string();
        ensure!(!identifier.is_empty(), "component identifier must be non-empty");

        let name = self.name.trim().to_string();
        ensure!(!name.is_empty(), "component {identifier} name must be non-empty");

        ensure!(
            self.ter.is_finite() && self.ter >= 0.0,
            "component {identifier} cost ratio must be a non-negative number (got {})",
            self.ter
        );
        ensure!(
            self.percentage.is_finite() && self.percentage > 0.0 && self.percentage <= 100.0,
            "component {identifier} weight must be in (0, 100] (got {})",
            self.percentage
        );

        Ok(PortfolioComponent {
            name,
            identifier,
            cost_ratio: self.ter,
            weight_percent: self.percentage,
        })
    }
}
