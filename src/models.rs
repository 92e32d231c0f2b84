//! Core data models for the Fintro assistant

use crate::error::AdvisorError;
use crate::returns::{Period, PeriodReturns};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

//
// ================= Instrument =================
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: u32,
    pub name: String,
    pub ticker: String,
    /// Open set: "Equity", "Bond", "Mixed", ...
    pub category: String,
    pub annual_return: f64,
    pub expense_ratio: f64,
    pub volatility: f64,
    /// 1..=10
    pub risk_level: u8,
    /// 0..=100, static seed score independent of the user
    pub match_score: u8,
    pub returns: PeriodReturns,
}

impl Instrument {
    pub fn return_for(&self, period: Period) -> f64 {
        self.returns.get(period)
    }

    pub fn risk_badge(&self) -> RiskBadge {
        RiskBadge::for_level(self.risk_level)
    }

    pub fn is_bond(&self) -> bool {
        self.category == "Bond"
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskBadge {
    Low,
    Medium,
    High,
}

impl RiskBadge {
    pub fn for_level(risk_level: u8) -> Self {
        if risk_level <= 3 {
            RiskBadge::Low
        } else if risk_level <= 6 {
            RiskBadge::Medium
        } else {
            RiskBadge::High
        }
    }
}

//
// ================= Profile =================
//

/// Validated user inputs for a recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileInput {
    pub risk_tolerance: u8,
    pub investment_amount: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskBand {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExperienceTier {
    Novice,
    Experienced,
}

/// One of the six `"{Experience} {RiskBand}"` investor labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileLabel {
    pub experience: ExperienceTier,
    pub risk_band: RiskBand,
}

impl ProfileLabel {
    pub const fn new(experience: ExperienceTier, risk_band: RiskBand) -> Self {
        Self { experience, risk_band }
    }

    pub fn description(&self) -> &'static str {
        use ExperienceTier::*;
        use RiskBand::*;

        match (self.experience, self.risk_band) {
            (Novice, Conservative) => "You prefer stability and are cautious with your investments.",
            (Novice, Moderate) => {
                "You seek a balance between risk and return with limited investment experience."
            }
            (Novice, Aggressive) => {
                "You have limited experience but are willing to take calculated risks for better returns."
            }
            (Experienced, Conservative) => {
                "Despite your experience, you prefer consistent returns over high-risk opportunities."
            }
            (Experienced, Moderate) => {
                "You have investment experience and prefer a balanced approach to risk and return."
            }
            (Experienced, Aggressive) => {
                "You have investment experience and are comfortable with higher risk for potentially greater returns."
            }
        }
    }

    /// Share of surveyed students holding this profile
    pub fn share_of_students(&self) -> &'static str {
        use ExperienceTier::*;
        use RiskBand::*;

        match (self.experience, self.risk_band) {
            (Novice, Conservative) => "11.8%",
            (Novice, Moderate) => "35.2%",
            (Novice, Aggressive) => "27.0%",
            (Experienced, Conservative) => "5.5%",
            (Experienced, Moderate) => "10.3%",
            (Experienced, Aggressive) => "10.2%",
        }
    }

    pub fn experience_years(&self) -> &'static str {
        match self.experience {
            ExperienceTier::Novice => "0-2 yrs",
            ExperienceTier::Experienced => "3+ yrs",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskBand::Conservative => "Conservative",
            RiskBand::Moderate => "Moderate",
            RiskBand::Aggressive => "Aggressive",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExperienceTier::Novice => "Novice",
            ExperienceTier::Experienced => "Experienced",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ProfileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.experience, self.risk_band)
    }
}

impl FromStr for ProfileLabel {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AdvisorError::InvalidInput(format!("unknown profile label: {}", s));
        let (experience, band) = s.split_once(' ').ok_or_else(invalid)?;

        let experience = match experience {
            "Novice" => ExperienceTier::Novice,
            "Experienced" => ExperienceTier::Experienced,
            _ => return Err(invalid()),
        };
        let risk_band = match band {
            "Conservative" => RiskBand::Conservative,
            "Moderate" => RiskBand::Moderate,
            "Aggressive" => RiskBand::Aggressive,
            _ => return Err(invalid()),
        };

        Ok(ProfileLabel::new(experience, risk_band))
    }
}

impl Serialize for ProfileLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProfileLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

//
// ================= Chat =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into() }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { sender: Sender::Bot, text: text.into() }
    }
}
