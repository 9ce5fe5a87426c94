//! Lexical resources that propose synonym candidates.
//!
//! [`ResyfLexicon`] serves a ReSyf export; anything else that can answer
//! "synonyms of this word for this part of speech" implements [`LexicalResource`].

mod error;
pub mod resyf;


use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::LexiconError;
pub use resyf::ResyfLexicon;

/// ReSyf part-of-speech tags, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    /// Common noun.
    #[serde(rename = "NC")]
    Noun,
    #[serde(rename = "VER")]
    Verb,
    #[serde(rename = "ADJ")]
    Adjective,
    #[serde(rename = "ADV")]
    Adverb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NC",
            PartOfSpeech::Verb => "VER",
            PartOfSpeech::Adjective => "ADJ",
            PartOfSpeech::Adverb => "ADV",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PartOfSpeech {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartOfSpeech::ALL
            .into_iter()
            .find(|pos| pos.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LexiconError::UnknownPartOfSpeech { tag: s.to_string() })
    }
}

/// One synonym of one sense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymRecord {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<f64>,
}

/// A sense of a word with its synonyms, as listed by the resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    pub sense_id: String,
    #[serde(default)]
    pub synonyms: Vec<SynonymRecord>,
}

/// A source of synonym candidates.
pub trait LexicalResource: Send + Sync {
    /// Senses of `word` under `pos`, in resource order. Unknown words yield nothing.
    fn senses(&self, word: &str, pos: PartOfSpeech) -> Vec<Sense>;

    /// Number of headwords the resource knows.
    fn entry_count(&self) -> usize;

    /// Flattened synonyms of `word` under `pos`, sense by sense.
    fn synonyms(&self, word: &str, pos: PartOfSpeech) -> Vec<SynonymRecord> {
        self.senses(word, pos)
            .into_iter()
            .flat_map(|sense| sense.synonyms)
            .collect()
    }
}

impl<L: LexicalResource + ?Sized> LexicalResource for std::sync::Arc<L> {
    fn senses(&self, word: &str, pos: PartOfSpeech) -> Vec<Sense> {
        (**self).senses(word, pos)
    }

    fn entry_count(&self) -> usize {
        (**self).entry_count()
    }
}

/// Every synonym word of `word` across all parts of speech.
///
/// Tags are walked in [`PartOfSpeech::ALL`] order, senses in resource order. Duplicates
/// are kept; collapsing them is the caller's call.
pub fn collect_synonyms<L: LexicalResource + ?Sized>(resource: &L, word: &str) -> Vec<String> {
    PartOfSpeech::ALL
        .into_iter()
        .flat_map(|pos| resource.synonyms(word, pos))
        .map(|record| record.word)
        .collect()
}
