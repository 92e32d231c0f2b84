//! Fintro Assistant
//!
//! Deterministic ETF learning assistant:
//! - Resolves chat questions to canned answers via exact match and
//!   ordered keyword rules (no NLU)
//! - Filters and ranks a static ETF catalog against a risk/amount profile
//! - Derives the investor profile label from the same inputs
//!
//! The core is pure and synchronous. Callers own all session state.
//!
//! QUESTION → EXACT MATCH? → KEYWORD RULES? → FALLBACK
//! PROFILE  → FILTER → RANK → LABEL

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod models;
pub mod recommendation;
pub mod resolver;
pub mod returns;
pub mod session;

pub use error::{AdvisorError, Result};

// Re-export common types
pub use catalog::CatalogStore;
pub use knowledge::KnowledgeBase;
pub use models::*;
pub use recommendation::{recommend, Recommendation, RecommendationEngine};
pub use resolver::IntentResolver;
pub use returns::{return_for, Period};
pub use session::Session;
