//! Environment configuration
//!
//! Reads (after `.env` is loaded by the binaries):
//! - `FINTRO_KNOWLEDGE_PATH`: JSON object question -> answer
//! - `FINTRO_RULES_PATH`: JSON array of keyword rule groups
//! - `FINTRO_CATALOG_PATH`: JSON array of instruments
//! - `PORT` / `API_PORT`: HTTP port (default 8080)
//! - `FINTRO_REPLY_DELAY_MS`: REPL reply pacing (default 600)
//!
//! Unset table paths fall back to the embedded tables.

use crate::catalog::CatalogStore;
use crate::error::AdvisorError;
use crate::knowledge::KnowledgeBase;
use crate::recommendation::RecommendationEngine;
use crate::resolver::{default_rules, rules_from_path, IntentResolver};
use crate::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub knowledge_path: Option<PathBuf>,
    pub rules_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub api_port: u16,
    pub reply_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            knowledge_path: None,
            rules_path: None,
            catalog_path: None,
            api_port: DEFAULT_API_PORT,
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AdvisorError::Config(format!("invalid port '{}': {}", raw, e)))?,
            None => DEFAULT_API_PORT,
        };

        let reply_delay = match get("FINTRO_REPLY_DELAY_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().map_err(|e| {
                AdvisorError::Config(format!("invalid FINTRO_REPLY_DELAY_MS '{}': {}", raw, e))
            })?),
            None => Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
        };

        Ok(Self {
            knowledge_path: get("FINTRO_KNOWLEDGE_PATH").map(PathBuf::from),
            rules_path: get("FINTRO_RULES_PATH").map(PathBuf::from),
            catalog_path: get("FINTRO_CATALOG_PATH").map(PathBuf::from),
            api_port,
            reply_delay,
        })
    }

    /// Knowledge base and rules, from files where configured
    pub fn load_resolver(&self) -> Result<IntentResolver> {
        let knowledge = match &self.knowledge_path {
            Some(path) => KnowledgeBase::from_path(path)?,
            None => KnowledgeBase::default(),
        };
        let rules = match &self.rules_path {
            Some(path) => rules_from_path(path)?,
            None => default_rules(),
        };

        let resolver = IntentResolver::new(knowledge, rules)?;
        info!(
            questions = resolver.knowledge().len(),
            rule_groups = resolver.rules().len(),
            "Intent resolver ready"
        );
        Ok(resolver)
    }

    pub fn load_engine(&self) -> Result<RecommendationEngine> {
        let catalog = match &self.catalog_path {
            Some(path) => CatalogStore::from_path(path)?,
            None => CatalogStore::sample(),
        };

        info!(instruments = catalog.len(), "Recommendation engine ready");
        Ok(RecommendationEngine::new(catalog))
    }
}
