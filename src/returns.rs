//! Period returns lookup
//!
//! Every instrument carries exactly one return figure per fixed period.
//! Lookups by label fail loudly on unknown periods instead of defaulting.

use crate::error::AdvisorError;
use crate::models::Instrument;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed, ordered set of return windows
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Period {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    #[default]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
}

impl Period {
    /// All periods in display order
    pub const ALL: [Period; 5] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::FiveYears,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Period::OneMonth => "1M",
            Period::ThreeMonths => "3M",
            Period::SixMonths => "6M",
            Period::OneYear => "1Y",
            Period::FiveYears => "5Y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Period {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.label() == s)
            .ok_or_else(|| AdvisorError::InvalidPeriod(s.to_string()))
    }
}

/// Signed percentage return for each fixed period.
///
/// One field per period, so a loaded record can never miss or add a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodReturns {
    #[serde(rename = "1M")]
    pub one_month: f64,
    #[serde(rename = "3M")]
    pub three_months: f64,
    #[serde(rename = "6M")]
    pub six_months: f64,
    #[serde(rename = "1Y")]
    pub one_year: f64,
    #[serde(rename = "5Y")]
    pub five_years: f64,
}

impl PeriodReturns {
    pub fn get(&self, period: Period) -> f64 {
        match period {
            Period::OneMonth => self.one_month,
            Period::ThreeMonths => self.three_months,
            Period::SixMonths => self.six_months,
            Period::OneYear => self.one_year,
            Period::FiveYears => self.five_years,
        }
    }
}

/// Look up an instrument's return for a period label such as `"6M"`
pub fn return_for(instrument: &Instrument, period: &str) -> Result<f64> {
    let period = period.parse::<Period>()?;
    Ok(instrument.return_for(period))
}

/// `(name, return)` pairs for a chart, in the given instrument order
pub fn performance_series(instruments: &[Instrument], period: Period) -> Vec<(String, f64)> {
    instruments
        .iter()
        .map(|etf| (etf.name.clone(), etf.return_for(period)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;

    #[test]
    fn test_return_for_known_period() {
        let catalog = CatalogStore::sample();
        let iota = &catalog.instruments()[0];

        assert_eq!(return_for(iota, "1Y").unwrap(), 12.77);
        assert_eq!(return_for(iota, "5Y").unwrap(), 64.3);
    }

    #[test]
    fn test_return_for_unknown_period() {
        let catalog = CatalogStore::sample();
        let iota = &catalog.instruments()[0];

        let err = return_for(iota, "2Y").unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidPeriod(ref p) if p == "2Y"));

        // Labels are case-sensitive
        assert!(return_for(iota, "6m").is_err());
    }

    #[test]
    fn test_unknown_return_key_rejected() {
        let raw = r#"{"1M":1.0,"3M":1.0,"6M":1.0,"1Y":1.0,"5Y":1.0,"2Y":3.0}"#;
        assert!(serde_json::from_str::<PeriodReturns>(raw).is_err());

        let missing = r#"{"1M":1.0,"3M":1.0,"6M":1.0,"1Y":1.0}"#;
        assert!(serde_json::from_str::<PeriodReturns>(missing).is_err());
    }

    #[test]
    fn test_performance_series_keeps_order() {
        let catalog = CatalogStore::sample();
        let series = performance_series(catalog.instruments(), Period::SixMonths);

        let names: Vec<&str> = series.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Iota ETF", "Epsilon ETF", "Alpha ETF", "Delta ETF"]);
        assert_eq!(series[1].1, 1.4);
    }

    #[test]
    fn test_period_order_and_default() {
        let labels: Vec<String> = Period::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["1M", "3M", "6M", "1Y", "5Y"]);
        assert_eq!(Period::default(), Period::SixMonths);
    }
}
