//! Synonym suggestions: gather candidates, then rank them against the caller's context.
//!
//! Candidates come from the configured [`SuggestionStrategy`]. The context is the
//! caller's known synonyms followed by the word itself.

mod error;
pub mod service;


use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::SuggestError;
pub use service::{SynonymRequest, SynonymService, filter_candidates};

/// Where synonym candidates come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStrategy {
    /// Lexical resource lookup (ReSyf).
    #[default]
    Lexicon,
    /// Local language model.
    Generator,
}

impl SuggestionStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionStrategy::Lexicon => "lexicon",
            SuggestionStrategy::Generator => "generator",
        }
    }
}

impl fmt::Display for SuggestionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicon" | "resyf" => Ok(SuggestionStrategy::Lexicon),
            "generator" | "llm" | "ollama" => Ok(SuggestionStrategy::Generator),
            other => Err(format!("unknown strategy '{other}' (expected lexicon or generator)")),
        }
    }
}
