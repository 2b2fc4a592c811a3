use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const MIN_RISK_LEVEL: u8 = 1;
/// Highest level reachable through guided recommendations.
pub const MAX_GUIDED_RISK_LEVEL: u8 = 7;
/// Leveraged products. Never recommended.
pub const LEVERAGE_RISK_LEVEL: u8 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioComponent {
    pub name: String,
    pub identifier: String,
    /// Annual holding cost, percent of invested value.
    pub cost_ratio: f64,
    pub weight_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: String,
    pub display_name: String,
    pub category: Category,
    pub risk_level: u8,
    pub is_esg: bool,
    pub min_horizon_years: MinHorizon,
    pub rebalance_cadence: RebalanceCadence,
    /// Components are interchangeable choices; the investor holds exactly one.
    pub alternatives: bool,
    pub components: Vec<PortfolioComponent>,
    pub strategy_note: String,
}

impl Portfolio {
    /// Number of instruments the investor actually holds.
    pub fn holding_count(&self) -> usize {
        if self.alternatives {
            1
        } else {
            self.components.len()
        }
    }

    pub fn is_single_holding(&self) -> bool {
        self.holding_count() == 1
    }

    pub fn is_leveraged(&self) -> bool {
        self.risk_level == LEVERAGE_RISK_LEVEL
    }

    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_level(self.risk_level)
    }

    /// Weighted average cost ratio, percent per year.
    ///
    /// For alternatives portfolios the components are never held together, so
    /// the plain mean of their cost ratios is returned instead.
    pub fn weighted_cost_ratio(&self) -> f64 {
        if self.components.is_empty() {
            return 0.0;
        }
        if self.alternatives {
            let total: f64 = self.components.iter().map(|c| c.cost_ratio).sum();
            return total / self.components.len() as f64;
        }
        self.components
            .iter()
            .map(|c| c.cost_ratio * c.weight_percent / 100.0)
            .sum()
    }
}

/// Grouping used by the bundled data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Multi,
    Single,
    Esg,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Multi, Category::Single, Category::Esg];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Multi => "multi",
            Category::Single => "single",
            Category::Esg => "esg",
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multi" => Ok(Category::Multi),
            "single" => Ok(Category::Single),
            "esg" => Ok(Category::Esg),
            other => anyhow::bail!("unknown category: {other}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_level(level: u8) -> Self {
        match level {
            0..=3 => RiskBand::Low,
            4..=6 => RiskBand::Medium,
            _ => RiskBand::High,
        }
    }
}

impl FromStr for RiskBand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskBand::Low),
            "medium" => Ok(RiskBand::Medium),
            "high" => Ok(RiskBand::High),
            other => anyhow::bail!("unknown risk band: {other}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebalanceCadence {
    #[serde(alias = "NO", alias = "none")]
    None,
    #[serde(alias = "1y", alias = "annual")]
    Annual,
    #[serde(alias = "3M", alias = "quarterly")]
    Quarterly,
}

impl RebalanceCadence {
    /// Needs no manual upkeep beyond (at most) a yearly rebalance.
    pub fn is_low_maintenance(self) -> bool {
        matches!(self, RebalanceCadence::None | RebalanceCadence::Annual)
    }
}

/// Minimum suggested holding period in years.
///
/// Source data writes either a scalar (`"10"`) or a range, with an open end
/// (`"1..xx"`) or a closed one (`"1...9"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MinHorizon {
    Years(u8),
    Range { from: u8, to: Option<u8> },
}

impl MinHorizon {
    pub fn lower_bound(self) -> u8 {
        match self {
            MinHorizon::Years(y) => y,
            MinHorizon::Range { from, .. } => from,
        }
    }

    pub fn upper_bound(self) -> Option<u8> {
        match self {
            MinHorizon::Years(y) => Some(y),
            MinHorizon::Range { to, .. } => to,
        }
    }
}

impl Ord for MinHorizon {
    fn cmp(&self, other: &Self) -> Ordering {
        // Open upper bound sorts after any closed one; scalars before ranges on ties.
        let key = |h: &MinHorizon| {
            (
                h.lower_bound(),
                h.upper_bound().map_or(u16::MAX, u16::from),
                matches!(h, MinHorizon::Range { .. }),
            )
        };
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for MinHorizon {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for MinHorizon {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        anyhow::ensure!(!s.is_empty(), "horizon must be non-empty");

        let Some(dots) = s.find("..") else {
            let years = s
                .parse::<u8>()
                .map_err(|_| anyhow::anyhow!("invalid horizon: {s:?}"))?;
            return Ok(MinHorizon::Years(years));
        };

        let from = s[..dots]
            .trim()
            .parse::<u8>()
            .map_err(|_| anyhow::anyhow!("invalid horizon lower bound: {s:?}"))?;
        let rest = s[dots..].trim_start_matches('.').trim();
        // "xx" or nothing after the dots marks an open range.
        if rest.is_empty() || rest.eq_ignore_ascii_case("xx") {
            return Ok(MinHorizon::Range { from, to: None });
        }
        let to = rest
            .parse::<u8>()
            .map_err(|_| anyhow::anyhow!("invalid horizon upper bound: {s:?}"))?;
        anyhow::ensure!(to >= from, "horizon range is inverted: {s:?}");
        Ok(MinHorizon::Range { from, to: Some(to) })
    }
}

impl TryFrom<String> for MinHorizon {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        value.parse()
    }
}

impl From<MinHorizon> for String {
    fn from(value: MinHorizon) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MinHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinHorizon::Years(y) => write!(f, "{y}"),
            MinHorizon::Range { from, to: None } => write!(f, "{from}.."),
            MinHorizon::Range { from, to: Some(to) } => write!(f, "{from}..{to}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(cost: f64, weight: f64) -> PortfolioComponent {
        PortfolioComponent {
            name: "C".to_string(),
            identifier: "ID".to_string(),
            cost_ratio: cost,
            weight_percent: weight,
        }
    }

    fn portfolio(components: Vec<PortfolioComponent>, alternatives: bool) -> Portfolio {
        Portfolio {
            id: "P".to_string(),
            display_name: "P".to_string(),
            category: Category::Multi,
            risk_level: 5,
            is_esg: false,
            min_horizon_years: MinHorizon::Years(10),
            rebalance_cadence: RebalanceCadence::Annual,
            alternatives,
            components,
            strategy_note: String::new(),
        }
    }

    #[test]
    fn parses_source_horizon_encodings() {
        assert_eq!("10".parse::<MinHorizon>().unwrap(), MinHorizon::Years(10));
        assert_eq!(
            "1..xx".parse::<MinHorizon>().unwrap(),
            MinHorizon::Range { from: 1, to: None }
        );
        assert_eq!(
            "1...9".parse::<MinHorizon>().unwrap(),
            MinHorizon::Range { from: 1, to: Some(9) }
        );
        assert!("".parse::<MinHorizon>().is_err());
        assert!("ten".parse::<MinHorizon>().is_err());
        assert!("9..3".parse::<MinHorizon>().is_err());
        assert_eq!(
            "5..".parse::<MinHorizon>().unwrap(),
            MinHorizon::Range { from: 5, to: None }
        );
        assert!("5..1O".parse::<MinHorizon>().is_err());
        assert!("5..-3".parse::<MinHorizon>().is_err());
        assert!("5..open".parse::<MinHorizon>().is_err());
    }

    #[test]
    fn horizons_order_by_lower_bound_then_upper() {
        let mut hs = vec![
            MinHorizon::Years(10),
            MinHorizon::Range { from: 1, to: None },
            MinHorizon::Years(5),
            MinHorizon::Range { from: 1, to: Some(9) },
        ];
        hs.sort();
        assert_eq!(
            hs,
            vec![
                MinHorizon::Range { from: 1, to: Some(9) },
                MinHorizon::Range { from: 1, to: None },
                MinHorizon::Years(5),
                MinHorizon::Years(10),
            ]
        );
    }

    #[test]
    fn horizon_serializes_as_string() {
        let v = serde_json::to_value(MinHorizon::Range { from: 1, to: None }).unwrap();
        assert_eq!(v, serde_json::json!("1.."));
        let back: MinHorizon = serde_json::from_value(v).unwrap();
        assert_eq!(back, MinHorizon::Range { from: 1, to: None });
    }

    #[test]
    fn cadence_accepts_source_codes() {
        let c: RebalanceCadence = serde_json::from_str("\"NO\"").unwrap();
        assert_eq!(c, RebalanceCadence::None);
        let c: RebalanceCadence = serde_json::from_str("\"1y\"").unwrap();
        assert_eq!(c, RebalanceCadence::Annual);
        let c: RebalanceCadence = serde_json::from_str("\"3M\"").unwrap();
        assert_eq!(c, RebalanceCadence::Quarterly);
        assert_eq!(
            serde_json::to_string(&RebalanceCadence::None).unwrap(),
            "\"NONE\""
        );
    }

    #[test]
    fn weighted_cost_ratio_uses_weights() {
        // 0.19 * 60% + 0.09 * 10% + 0.10 * 10% + 0.15 * 20% = 0.163
        let p = portfolio(
            vec![
                component(0.19, 60.0),
                component(0.09, 10.0),
                component(0.10, 10.0),
                component(0.15, 20.0),
            ],
            false,
        );
        assert!((p.weighted_cost_ratio() - 0.163).abs() < 1e-9);
        assert_eq!(p.holding_count(), 4);
    }

    #[test]
    fn alternatives_hold_a_single_instrument() {
        let p = portfolio(vec![component(0.10, 100.0), component(0.20, 100.0)], true);
        assert_eq!(p.holding_count(), 1);
        assert!(p.is_single_holding());
        assert!((p.weighted_cost_ratio() - 0.15).abs() < 1e-9);
    }

    #[test]
    fn risk_bands_cover_all_levels() {
        assert_eq!(RiskBand::from_level(1), RiskBand::Low);
        assert_eq!(RiskBand::from_level(3), RiskBand::Low);
        assert_eq!(RiskBand::from_level(4), RiskBand::Medium);
        assert_eq!(RiskBand::from_level(6), RiskBand::Medium);
        assert_eq!(RiskBand::from_level(7), RiskBand::High);
        assert_eq!(RiskBand::from_level(8), RiskBand::High);
    }
}
