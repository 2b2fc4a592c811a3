use std::fmt;

pub const STAGE_DECODE: &str = "decode";
pub const STAGE_VALIDATE: &str = "validate";
pub const STAGE_DUPLICATE: &str = "duplicate";

/// A catalog record that was excluded at load time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CatalogIntegrityError {
    /// Position of the record in the catalog file.
    pub index: usize,
    pub portfolio_id: Option<String>,
    pub stage: &'static str,
    pub detail: String,
}

impl fmt::Display for CatalogIntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "catalog record rejected (index={}, id={}, stage={}): {}",
            self.index,
            self.portfolio_id.as_deref().unwrap_or("?"),
            self.stage,
            self.detail
        )
    }
}

impl std::error::Error for CatalogIntegrityError {}
