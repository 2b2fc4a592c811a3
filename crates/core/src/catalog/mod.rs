pub mod error;
pub mod json;

use crate::catalog::error::CatalogIntegrityError;
use crate::config::Settings;
use crate::domain::answers::UserAnswers;
use crate::domain::portfolio::{Category, Portfolio, RiskBand};
use crate::domain::recommendation::RecommendationResult;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Immutable set of model portfolios, in file order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub as_of_date: NaiveDate,
    portfolios: Vec<Portfolio>,
    rejected: Vec<CatalogIntegrityError>,
}

/// Browse filters; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioQuery {
    pub risk_level: Option<u8>,
    pub esg: Option<bool>,
    pub category: Option<Category>,
    pub band: Option<RiskBand>,
}

impl PortfolioQuery {
    pub fn matches(&self, p: &Portfolio) -> bool {
        self.risk_level.map_or(true, |r| p.risk_level == r)
            && self.esg.map_or(true, |e| p.is_esg == e)
            && self.category.map_or(true, |c| p.category == c)
            && self.band.map_or(true, |b| p.risk_band() == b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_portfolios: usize,
    pub per_category: BTreeMap<Category, usize>,
    pub risk_levels: Vec<u8>,
    pub unique_components: usize,
    pub rejected_records: usize,
}

impl Catalog {
    pub fn new(
        as_of_date: NaiveDate,
        portfolios: Vec<Portfolio>,
        rejected: Vec<CatalogIntegrityError>,
    ) -> Self {
        Self {
            as_of_date,
            portfolios,
            rejected,
        }
    }

    pub fn bundled() -> anyhow::Result<Self> {
        json::parse_catalog(json::BUNDLED_CATALOG).context("bundled catalog failed to load")
    }

    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {path}"))?;
        json::parse_catalog(&text).with_context(|| format!("failed to load catalog file {path}"))
    }

    /// `CATALOG_PATH` when set, otherwise the bundled data.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        match settings.catalog_path.as_deref() {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    pub fn portfolios(&self) -> &[Portfolio] {
        &self.portfolios
    }

    pub fn rejected(&self) -> &[CatalogIntegrityError] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.portfolios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Portfolio> {
        let id = id.trim();
        self.portfolios.iter().find(|p| p.id == id)
    }

    pub fn query(&self, query: &PortfolioQuery) -> Vec<&Portfolio> {
        self.portfolios.iter().filter(|p| query.matches(p)).collect()
    }

    pub fn by_risk_level(&self, risk_level: u8) -> Vec<&Portfolio> {
        self.query(&PortfolioQuery {
            risk_level: Some(risk_level),
            ..Default::default()
        })
    }

    pub fn by_esg(&self, esg: bool) -> Vec<&Portfolio> {
        self.query(&PortfolioQuery {
            esg: Some(esg),
            ..Default::default()
        })
    }

    pub fn by_category(&self, category: Category) -> Vec<&Portfolio> {
        self.query(&PortfolioQuery {
            category: Some(category),
            ..Default::default()
        })
    }

    pub fn by_risk_band(&self, band: RiskBand) -> Vec<&Portfolio> {
        self.query(&PortfolioQuery {
            band: Some(band),
            ..Default::default()
        })
    }

    pub fn stats(&self) -> CatalogStats {
        let mut per_category = BTreeMap::new();
        for category in Category::ALL {
            per_category.insert(category, 0);
        }
        for p in &self.portfolios {
            *per_category.entry(p.category).or_insert(0) += 1;
        }

        let risk_levels: BTreeSet<u8> = self.portfolios.iter().map(|p| p.risk_level).collect();
        let unique_components: BTreeSet<&str> = self
            .portfolios
            .iter()
            .flat_map(|p| p.components.iter().map(|c| c.identifier.as_str()))
            .collect();

        CatalogStats {
            total_portfolios: self.portfolios.len(),
            per_category,
            risk_levels: risk_levels.into_iter().collect(),
            unique_components: unique_components.len(),
            rejected_records: self.rejected.len(),
        }
    }

    pub fn recommend(&self, answers: &UserAnswers) -> RecommendationResult {
        crate::recommend::recommend(&self.portfolios, answers)
    }
}
