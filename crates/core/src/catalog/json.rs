use crate::catalog::error::{
    CatalogIntegrityError, STAGE_DECODE, STAGE_DUPLICATE, STAGE_VALIDATE,
};
use crate::catalog::Catalog;
use crate::domain::contract::CatalogRecord;
use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Model portfolios shipped with the crate (data as of December 2025).
pub const BUNDLED_CATALOG: &str = include_str!("../../data/portfolios.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    as_of_date: NaiveDate,
    portfolios: Vec<Value>,
}

/// Parses a catalog file.
///
/// Only a file that is not a catalog at all is an error. Each record is
/// decoded and validated on its own; failing records are left out and
/// returned in `Catalog::rejected` so the rest stays usable.
pub fn parse_catalog(text: &str) -> anyhow::Result<Catalog> {
    let file = serde_json::from_str::<CatalogFile>(text)
        .context("catalog is not valid JSON for the catalog schema")?;

    let mut seen_ids = BTreeSet::<String>::new();
    let mut portfolios = Vec::with_capacity(file.portfolios.len());
    let mut rejected = Vec::new();

    for (index, raw) in file.portfolios.into_iter().enumerate() {
        let id_hint = raw
            .get("id")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let record = match serde_json::from_value::<CatalogRecord>(raw) {
            Ok(record) => record,
            Err(e) => {
                rejected.push(CatalogIntegrityError {
                    index,
                    portfolio_id: id_hint,
                    stage: STAGE_DECODE,
                    detail: e.to_string(),
                });
                continue;
            }
        };

        let portfolio = match record.validate_and_into_portfolio() {
            Ok(p) => p,
            Err(e) => {
                rejected.push(CatalogIntegrityError {
                    index,
                    portfolio_id: id_hint,
                    stage: STAGE_VALIDATE,
                    detail: format!("{e:#}"),
                });
                continue;
            }
        };

        if !seen_ids.insert(portfolio.id.clone()) {
            rejected.push(CatalogIntegrityError {
                index,
                detail: format!("duplicate portfolio id: {}", portfolio.id),
                portfolio_id: Some(portfolio.id),
                stage: STAGE_DUPLICATE,
            });
            continue;
        }

        portfolios.push(portfolio);
    }

    for err in &rejected {
        tracing::warn!(
            index = err.index,
            portfolio_id = err.portfolio_id.as_deref().unwrap_or("?"),
            stage = err.stage,
            detail = %err.detail,
            "catalog record rejected"
        );
    }

    tracing::debug!(
        as_of_date = %file.as_of_date,
        loaded = portfolios.len(),
        rejected = rejected.len(),
        "catalog parsed"
    );

    Ok(Catalog::new(file.as_of_date, portfolios, rejected))
}
