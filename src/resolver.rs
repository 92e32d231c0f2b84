//! Intent Resolver
//!
//! Maps free-text questions to canned answers:
//! 1. Exact match on the canonical (trimmed, lowercased) question
//! 2. Keyword combination: the FIRST primary keyword present in the query
//!    selects a rule group; the first secondary keyword in that group that
//!    is empty or present picks the target question
//! 3. Fallback message
//!
//! Step 2 never falls through to later primary keywords. Rule order is the
//! whole behaviour of this module, so rules are kept as an ordered list.

use crate::error::AdvisorError;
use crate::knowledge::{canonicalize, KnowledgeBase};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const FALLBACK_ANSWER: &str =
    "I'm not sure about that. Could you try asking about ETFs, investment basics, or risk profiles?";

/// Default rule table, in precedence order
const DEFAULT_RULES: &[(&str, &[(&str, &str)])] = &[
    (
        "what",
        &[
            ("etf", "what is an etf"),
            ("exactly", "what exactly is an etf"),
            ("index", "what are index etfs"),
            ("risk", "what are the risks of etfs"),
            ("expense ratio", "what is an expense ratio"),
            ("type", "what are the different types of etfs"),
            ("different type", "what are the different types of etfs"),
            ("active and passive", "what is the difference between active and passive etfs"),
        ],
    ),
    (
        "how",
        &[
            ("work", "how do etfs work"),
            ("buy", "how do i buy an etf"),
            ("purchase", "how do i buy an etf"),
            ("tax", "how are etfs taxed"),
        ],
    ),
    ("benefit", &[("", "what are the benefits of etfs")]),
    ("advantage", &[("etf", "what are the benefits of etfs")]),
    (
        "difference",
        &[
            ("mutual fund", "what's the difference between etfs and mutual funds"),
            ("active", "what is the difference between active and passive etfs"),
            ("passive", "what is the difference between active and passive etfs"),
        ],
    ),
    ("vs", &[("mutual", "what's the difference between etfs and mutual funds")]),
    ("beginner", &[("", "are etfs good for beginners")]),
    ("new", &[("investor", "are etfs good for beginners")]),
];

/// Second-tier trigger inside a rule group. Empty `secondary` always matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryRule {
    #[serde(default)]
    pub secondary: String,
    pub question: String,
}

/// A primary keyword and its ordered secondary rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub primary: String,
    pub rules: Vec<SecondaryRule>,
}

/// Built-in rule table as owned values
pub fn default_rules() -> Vec<KeywordRule> {
    DEFAULT_RULES
        .iter()
        .map(|(primary, secondaries)| KeywordRule {
            primary: primary.to_string(),
            rules: secondaries
                .iter()
                .map(|(secondary, question)| SecondaryRule {
                    secondary: secondary.to_string(),
                    question: question.to_string(),
                })
                .collect(),
        })
        .collect()
}

/// Parse a JSON array of keyword rules, keeping file order
pub fn rules_from_json(raw: &str) -> Result<Vec<KeywordRule>> {
    Ok(serde_json::from_str(raw)?)
}

pub fn rules_from_path(path: &Path) -> Result<Vec<KeywordRule>> {
    let raw = std::fs::read_to_string(path)?;
    let rules = rules_from_json(&raw)?;

    info!(path = %path.display(), groups = rules.len(), "Loaded keyword rules");
    Ok(rules)
}

/// Which step produced an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind<'a> {
    Exact,
    Keyword { primary: &'a str, secondary: &'a str },
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub answer: &'a str,
    pub matched: MatchKind<'a>,
}

#[derive(Debug, Clone)]
pub struct IntentResolver {
    knowledge: KnowledgeBase,
    rules: Vec<KeywordRule>,
}

impl IntentResolver {
    /// Build a resolver from custom tables.
    ///
    /// Keywords and targets are canonicalized. Every target must exist in
    /// `knowledge`, and primary keywords must be non-empty.
    pub fn new(knowledge: KnowledgeBase, rules: Vec<KeywordRule>) -> Result<Self> {
        let rules: Vec<KeywordRule> = rules
            .into_iter()
            .map(|group| KeywordRule {
                primary: group.primary.to_lowercase(),
                rules: group
                    .rules
                    .into_iter()
                    .map(|r| SecondaryRule {
                        secondary: r.secondary.to_lowercase(),
                        question: canonicalize(&r.question),
                    })
                    .collect(),
            })
            .collect();

        for group in &rules {
            if group.primary.is_empty() {
                return Err(AdvisorError::Config(
                    "primary keyword must not be empty".to_string(),
                ));
            }
            if let Some(missing) = group.rules.iter().find(|r| !knowledge.contains(&r.question)) {
                return Err(AdvisorError::Config(format!(
                    "rule '{}' -> '{}' targets unknown question '{}'",
                    group.primary, missing.secondary, missing.question
                )));
            }
        }

        Ok(Self { knowledge, rules })
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Answer text for raw user input. Total: unmatched input gets the fallback.
    pub fn resolve(&self, raw_text: &str) -> String {
        self.resolve_traced(raw_text).answer.to_string()
    }

    /// Like [`resolve`](Self::resolve), also reporting which step matched
    pub fn resolve_traced(&self, raw_text: &str) -> Resolution<'_> {
        let query = canonicalize(raw_text);

        if let Some(answer) = self.knowledge.answer(&query) {
            debug!(query = %query, "Exact knowledge base match");
            return Resolution {
                answer,
                matched: MatchKind::Exact,
            };
        }

        // First primary keyword present decides; no fall-through.
        let Some(group) = self
            .rules
            .iter()
            .find(|group| query.contains(group.primary.as_str()))
        else {
            debug!(query = %query, "No primary keyword present");
            return fallback();
        };

        let hit = group
            .rules
            .iter()
            .find(|r| r.secondary.is_empty() || query.contains(r.secondary.as_str()));

        match hit {
            Some(rule) => match self.knowledge.answer(&rule.question) {
                Some(answer) => {
                    debug!(
                        primary = %group.primary,
                        secondary = %rule.secondary,
                        target = %rule.question,
                        "Keyword combination match"
                    );
                    Resolution {
                        answer,
                        matched: MatchKind::Keyword {
                            primary: &group.primary,
                            secondary: &rule.secondary,
                        },
                    }
                }
                None => fallback(),
            },
            None => {
                debug!(
                    primary = %group.primary,
                    "Primary keyword matched but no secondary keyword did"
                );
                fallback()
            }
        }
    }
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self {
            knowledge: KnowledgeBase::default(),
            rules: default_rules(),
        }
    }
}

fn fallback<'a>() -> Resolution<'a> {
    Resolution {
        answer: FALLBACK_ANSWER,
        matched: MatchKind::Fallback,
    }
}
