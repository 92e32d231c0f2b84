//! Instrument catalog
//!
//! Immutable list of ETFs with static metrics. Loaded once, read only.

use crate::error::AdvisorError;
use crate::models::Instrument;
use crate::returns::PeriodReturns;
use crate::Result;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CatalogStore {
    instruments: Vec<Instrument>,
}

impl CatalogStore {
    /// Build a catalog, rejecting records that break the schema bounds
    pub fn new(instruments: Vec<Instrument>) -> Result<Self> {
        validate(&instruments)?;
        Ok(Self { instruments })
    }

    /// Parse a JSON array of instruments
    pub fn from_json(raw: &str) -> Result<Self> {
        let instruments: Vec<Instrument> = serde_json::from_str(raw)?;
        Self::new(instruments)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&raw)?;

        info!(
            path = %path.display(),
            instruments = catalog.len(),
            "Loaded instrument catalog"
        );

        Ok(catalog)
    }

    /// The four demo ETFs
    pub fn sample() -> Self {
        Self {
            instruments: sample_instruments(),
        }
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::sample()
    }
}

fn validate(instruments: &[Instrument]) -> Result<()> {
    let mut seen = HashSet::with_capacity(instruments.len());

    for etf in instruments {
        if !seen.insert(etf.id) {
            return Err(AdvisorError::Config(format!("duplicate instrument id {}", etf.id)));
        }
        if !(1..=10).contains(&etf.risk_level) {
            return Err(AdvisorError::Config(format!(
                "{}: riskLevel {} outside 1..=10",
                etf.ticker, etf.risk_level
            )));
        }
        if etf.match_score > 100 {
            return Err(AdvisorError::Config(format!(
                "{}: matchScore {} outside 0..=100",
                etf.ticker, etf.match_score
            )));
        }
        // NaN fails this check as well
        let metrics = [etf.annual_return, etf.expense_ratio, etf.volatility];
        if !metrics.iter().all(|m| *m >= 0.0) {
            return Err(AdvisorError::Config(format!(
                "{}: annualReturn, expenseRatio and volatility must be non-negative",
                etf.ticker
            )));
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn etf(
    id: u32,
    name: &str,
    ticker: &str,
    category: &str,
    annual_return: f64,
    expense_ratio: f64,
    volatility: f64,
    risk_level: u8,
    match_score: u8,
    returns: [f64; 5],
) -> Instrument {
    let [one_month, three_months, six_months, one_year, five_years] = returns;

    Instrument {
        id,
        name: name.to_string(),
        ticker: ticker.to_string(),
        category: category.to_string(),
        annual_return,
        expense_ratio,
        volatility,
        risk_level,
        match_score,
        returns: PeriodReturns {
            one_month,
            three_months,
            six_months,
            one_year,
            five_years,
        },
    }
}

#[rustfmt::skip]
fn sample_instruments() -> Vec<Instrument> {
    vec![
        etf(1, "Iota ETF", "IETF", "Equity", 12.77, 0.36, 12.1, 8, 92, [1.2, 3.6, 6.8, 12.77, 64.3]),
        etf(2, "Epsilon ETF", "EPSN", "Equity", 2.59, 0.49, 6.7, 7, 85, [0.1, 0.8, 1.4, 2.59, 13.5]),
        etf(3, "Alpha ETF", "ALFA", "Bond", 9.77, 0.26, 8.5, 5, 75, [0.7, 2.3, 4.7, 9.77, 48.2]),
        etf(4, "Delta ETF", "DTEF", "Mixed", 8.25, 0.31, 7.9, 6, 70, [0.9, 2.5, 4.1, 8.25, 42.8]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ONE_ETF: &str = r#"[{
        "id": 7, "name": "Zeta ETF", "ticker": "ZETA", "category": "Bond",
        "annualReturn": 3.1, "expenseRatio": 0.12, "volatility": 2.0,
        "riskLevel": 2, "matchScore": 64,
        "returns": {"1M": -0.2, "3M": 0.4, "6M": 1.1, "1Y": 3.1, "5Y": 14.0}
    }]"#;

    #[test]
    fn test_sample_catalog_is_valid() {
        let sample = CatalogStore::sample();
        assert_eq!(sample.len(), 4);
        assert!(validate(sample.instruments()).is_ok());
        let tickers: Vec<&str> = sample.instruments().iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["IETF", "EPSN", "ALFA", "DTEF"]);
    }

    #[test]
    fn test_from_json() {
        let catalog = CatalogStore::from_json(ONE_ETF).unwrap();
        let zeta = &catalog.instruments()[0];
        assert_eq!(zeta.ticker, "ZETA");
        assert_eq!(zeta.returns.one_month, -0.2);
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ONE_ETF.as_bytes()).unwrap();

        let catalog = CatalogStore::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut instruments = sample_instruments();
        instruments[0].risk_level = 11;
        assert!(matches!(CatalogStore::new(instruments), Err(AdvisorError::Config(_))));

        let mut instruments = sample_instruments();
        instruments[1].risk_level = 0;
        assert!(CatalogStore::new(instruments).is_err());

        let mut instruments = sample_instruments();
        instruments[2].match_score = 101;
        assert!(CatalogStore::new(instruments).is_err());

        let mut instruments = sample_instruments();
        instruments[3].volatility = -1.0;
        assert!(CatalogStore::new(instruments).is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut instruments = sample_instruments();
        instruments[1].id = instruments[0].id;
        let err = CatalogStore::new(instruments).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_catalog_allowed() {
        let catalog = CatalogStore::new(vec![]).unwrap();
        assert!(catalog.is_empty());
    }
}
