//! Recommendation engine
//!
//! Filters the catalog by risk band, ranks by static match score and
//! derives the investor profile label from the same inputs.
//!
//! Filter bands: `< 4` conservative, `> 7` aggressive, else unfiltered.
//! Label bands: `<= 4` conservative, `<= 7` moderate, else aggressive.
//! A tolerance of exactly 4 is therefore unfiltered but labelled
//! Conservative.

use crate::catalog::CatalogStore;
use crate::error::AdvisorError;
use crate::models::{ExperienceTier, Instrument, ProfileLabel, RiskBand, UserProfileInput};
use crate::Result;
use serde::Serialize;
use std::ops::RangeInclusive;
use tracing::info;

pub const RISK_TOLERANCE_RANGE: RangeInclusive<u8> = 1..=10;
pub const INVESTMENT_AMOUNT_RANGE: RangeInclusive<u32> = 100..=10_000;

/// Amounts above this mark the investor as experienced
pub const EXPERIENCED_AMOUNT_THRESHOLD: u32 = 3000;

/// Catalog filter selected by risk tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Bonds or instruments with risk level below 6
    BondsOrLowRisk,
    /// Annual return above 5%
    HighReturn,
    Unfiltered,
}

impl FilterPolicy {
    pub fn for_risk(risk_tolerance: u8) -> Self {
        if risk_tolerance < 4 {
            FilterPolicy::BondsOrLowRisk
        } else if risk_tolerance > 7 {
            FilterPolicy::HighReturn
        } else {
            FilterPolicy::Unfiltered
        }
    }

    pub fn keeps(&self, etf: &Instrument) -> bool {
        match self {
            FilterPolicy::BondsOrLowRisk => etf.is_bond() || etf.risk_level < 6,
            FilterPolicy::HighReturn => etf.annual_return > 5.0,
            FilterPolicy::Unfiltered => true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub ranked: Vec<Instrument>,
    pub profile: ProfileLabel,
}

impl UserProfileInput {
    /// Check the declared bounds
    pub fn validate(&self) -> Result<()> {
        if !RISK_TOLERANCE_RANGE.contains(&self.risk_tolerance) {
            return Err(AdvisorError::InvalidInput(format!(
                "risk tolerance {} outside 1..=10",
                self.risk_tolerance
            )));
        }
        if !INVESTMENT_AMOUNT_RANGE.contains(&self.investment_amount) {
            return Err(AdvisorError::InvalidInput(format!(
                "investment amount {} outside 100..=10000",
                self.investment_amount
            )));
        }
        Ok(())
    }
}

/// Profile label for a tolerance/amount pair (no bounds check)
pub fn derive_profile_label(risk_tolerance: u8, investment_amount: u32) -> ProfileLabel {
    let risk_band = if risk_tolerance <= 4 {
        RiskBand::Conservative
    } else if risk_tolerance <= 7 {
        RiskBand::Moderate
    } else {
        RiskBand::Aggressive
    };

    let experience = if investment_amount > EXPERIENCED_AMOUNT_THRESHOLD {
        ExperienceTier::Experienced
    } else {
        ExperienceTier::Novice
    };

    ProfileLabel::new(experience, risk_band)
}

/// Filter and rank `catalog` for the given profile.
///
/// Ranking is a stable sort on match score, descending: ties keep catalog
/// order. An empty result is valid.
pub fn recommend(
    risk_tolerance: u8,
    investment_amount: u32,
    catalog: &[Instrument],
) -> Result<Recommendation> {
    let input = UserProfileInput {
        risk_tolerance,
        investment_amount,
    };
    input.validate()?;

    let policy = FilterPolicy::for_risk(risk_tolerance);

    let mut ranked: Vec<Instrument> = catalog
        .iter()
        .filter(|etf| policy.keeps(etf))
        .cloned()
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    let profile = derive_profile_label(risk_tolerance, investment_amount);

    info!(
        risk_tolerance,
        investment_amount,
        policy = ?policy,
        kept = ranked.len(),
        catalog_size = catalog.len(),
        profile = %profile,
        "Recommendations computed"
    );

    Ok(Recommendation { ranked, profile })
}

/// Recommendation engine over a fixed catalog
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    catalog: CatalogStore,
}

impl RecommendationEngine {
    pub fn new(catalog: CatalogStore) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn recommend(&self, input: UserProfileInput) -> Result<Recommendation> {
        recommend(
            input.risk_tolerance,
            input.investment_amount,
            self.catalog.instruments(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CatalogStore {
        CatalogStore::sample()
    }

    fn tickers(rec: &Recommendation) -> Vec<&str> {
        rec.ranked.iter().map(|e| e.ticker.as_str()).collect()
    }

    #[test]
    fn test_conservative_filter() {
        let rec = recommend(3, 2500, sample().instruments()).unwrap();

        // Only the Bond (risk 5) passes; Equity 8/7 and Mixed 6 do not
        assert_eq!(rec.ranked.len(), 1);
        assert_eq!(tickers(&rec), vec!["ALFA"]);
    }

    #[test]
    fn test_conservative_keeps_low_risk_non_bonds() {
        let mut instruments = sample().instruments().to_vec();
        instruments[3].risk_level = 5;

        let rec = recommend(1, 500, &instruments).unwrap();
        assert_eq!(tickers(&rec), vec!["ALFA", "DTEF"]);
    }

    #[test]
    fn test_aggressive_filter() {
        let rec = recommend(9, 2500, sample().instruments()).unwrap();

        // Drops Epsilon (2.59%)
        assert_eq!(tickers(&rec), vec!["IETF", "ALFA", "DTEF"]);
        assert!(rec.ranked.iter().all(|e| e.annual_return > 5.0));
    }

    #[test]
    fn test_moderate_band_unfiltered() {
        for risk in 4..=7 {
            let rec = recommend(risk, 2500, sample().instruments()).unwrap();
            assert_eq!(rec.ranked.len(), 4, "risk {}", risk);
        }
    }

    #[test]
    fn test_ranked_by_match_score() {
        let rec = recommend(6, 2500, sample().instruments()).unwrap();
        let scores: Vec<u8> = rec.ranked.iter().map(|e| e.match_score).collect();
        assert_eq!(scores, vec![92, 85, 75, 70]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let mut instruments = sample().instruments().to_vec();
        for etf in &mut instruments {
            etf.match_score = 80;
        }
        instruments[2].match_score = 90;

        let rec = recommend(5, 2500, &instruments).unwrap();
        assert_eq!(tickers(&rec), vec!["ALFA", "IETF", "EPSN", "DTEF"]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let mut instruments = sample().instruments().to_vec();
        for etf in &mut instruments {
            etf.annual_return = 1.0;
        }

        let rec = recommend(10, 2500, &instruments).unwrap();
        assert!(rec.ranked.is_empty());
        assert_eq!(rec.profile.to_string(), "Novice Aggressive");
    }

    #[test]
    fn test_profile_label_boundaries() {
        assert_eq!(derive_profile_label(4, 3500).to_string(), "Experienced Conservative");
        assert_eq!(derive_profile_label(5, 2000).to_string(), "Novice Moderate");
        assert_eq!(derive_profile_label(8, 4000).to_string(), "Experienced Aggressive");
        assert_eq!(derive_profile_label(7, 3000).to_string(), "Novice Moderate");
        assert_eq!(derive_profile_label(1, 3001).to_string(), "Experienced Conservative");
    }

    #[test]
    fn test_filter_and_label_bands_differ_at_four() {
        let rec = recommend(4, 3500, sample().instruments()).unwrap();

        assert_eq!(FilterPolicy::for_risk(4), FilterPolicy::Unfiltered);
        assert_eq!(rec.ranked.len(), 4);
        assert_eq!(rec.profile.risk_band, RiskBand::Conservative);
    }

    #[test]
    fn test_out_of_bounds_input() {
        let catalog = sample();
        let cases = [(0, 2500), (11, 2500), (5, 99), (5, 10_001)];

        for (risk, amount) in cases {
            let err = recommend(risk, amount, catalog.instruments()).unwrap_err();
            assert!(matches!(err, AdvisorError::InvalidInput(_)), "{} {}", risk, amount);
        }

        assert!(recommend(1, 100, catalog.instruments()).is_ok());
        assert!(recommend(10, 10_000, catalog.instruments()).is_ok());
    }

    #[test]
    fn test_engine_is_idempotent() {
        let engine = RecommendationEngine::default();
        let input = UserProfileInput {
            risk_tolerance: 8,
            investment_amount: 4000,
        };

        let first = engine.recommend(input).unwrap();
        let second = engine.recommend(input).unwrap();
        assert_eq!(first.ranked, second.ranked);
        assert_eq!(first.profile, second.profile);
    }
}
