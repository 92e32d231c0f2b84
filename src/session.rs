//! Caller-owned session state
//!
//! Holds everything the UI mutates between calls: the risk and amount
//! inputs, the last recommendations, the selected return period and the
//! chat transcript. The core never keeps any of this itself.

use crate::models::{ChatTurn, ExperienceTier, Instrument, ProfileLabel, RiskBand, UserProfileInput};
use crate::recommendation::RecommendationEngine;
use crate::resolver::IntentResolver;
use crate::returns::{performance_series, Period};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const GREETING: &str =
    "Hi there! I'm your Fintro assistant. Ask me anything about ETFs, investing, or financial concepts!";

/// Ordered, append-only chat transcript
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// Transcript opened by the bot greeting
    pub fn with_greeting() -> Self {
        Self {
            turns: vec![ChatTurn::bot(GREETING)],
        }
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub risk_tolerance: u8,
    pub investment_amount: u32,
    pub profile: ProfileLabel,
    pub recommendations: Vec<Instrument>,
    pub selected_period: Period,
    pub transcript: Transcript,
}

impl Session {
    pub fn new() -> Self {
        Self {
            risk_tolerance: 6,
            investment_amount: 2500,
            profile: ProfileLabel::new(ExperienceTier::Novice, RiskBand::Aggressive),
            recommendations: Vec::new(),
            selected_period: Period::default(),
            transcript: Transcript::with_greeting(),
        }
    }

    pub fn input(&self) -> UserProfileInput {
        UserProfileInput {
            risk_tolerance: self.risk_tolerance,
            investment_amount: self.investment_amount,
        }
    }

    /// Record a user message and the bot reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn submit_message(&mut self, resolver: &IntentResolver, text: &str) -> Option<&ChatTurn> {
        if text.trim().is_empty() {
            warn!("Ignoring empty chat message");
            return None;
        }

        self.transcript.push(ChatTurn::user(text));
        let answer = resolver.resolve(text);
        self.transcript.push(ChatTurn::bot(answer));

        self.transcript.last()
    }

    /// Re-run the engine with the current inputs.
    ///
    /// On error the previous recommendations and profile are left untouched.
    pub fn refresh_recommendations(&mut self, engine: &RecommendationEngine) -> Result<()> {
        self.update_profile(engine, self.risk_tolerance, self.investment_amount)
    }

    /// Apply new profile inputs and re-rank.
    ///
    /// Inputs are only stored once the engine accepts them, so a rejected
    /// update leaves inputs, recommendations and profile as they were.
    pub fn update_profile(
        &mut self,
        engine: &RecommendationEngine,
        risk_tolerance: u8,
        investment_amount: u32,
    ) -> Result<()> {
        let rec = engine.recommend(UserProfileInput {
            risk_tolerance,
            investment_amount,
        })?;

        self.risk_tolerance = risk_tolerance;
        self.investment_amount = investment_amount;
        self.recommendations = rec.ranked;
        self.profile = rec.profile;
        Ok(())
    }

    pub fn select_period(&mut self, label: &str) -> Result<Period> {
        let period = label.parse::<Period>()?;
        self.selected_period = period;
        Ok(period)
    }

    /// `(name, return)` pairs for the current recommendations and period
    pub fn performance(&self) -> Vec<(String, f64)> {
        performance_series(&self.recommendations, self.selected_period)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
