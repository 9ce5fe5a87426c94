use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use super::error::LexiconError;
use super::{LexicalResource, PartOfSpeech, Sense};

type RawEntries = HashMap<String, HashMap<String, Vec<Sense>>>;

/// In-memory ReSyf lexicon loaded from a JSON export.
///
/// The export maps each headword to its senses per part-of-speech tag:
///
/// ```json
/// { "rapide": { "ADJ": [ { "sense_id": "rapide_1", "synonyms": [ { "word": "vif", "freq": 12 } ] } ] } }
/// ```
#[derive(Debug, Default, Clone)]
pub struct ResyfLexicon {
    entries: HashMap<String, HashMap<PartOfSpeech, Vec<Sense>>>,
}

impl ResyfLexicon {
    /// Lexicon with no entries; every lookup comes back empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let lexicon = Self::from_json(&raw).map_err(|source| LexiconError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            entries = lexicon.len(),
            "Loaded ReSyf lexicon"
        );
        Ok(lexicon)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: RawEntries = serde_json::from_str(raw)?;
        let mut entries = HashMap::with_capacity(parsed.len());

        for (word, by_tag) in parsed {
            let mut senses = HashMap::with_capacity(by_tag.len());
            for (tag, list) in by_tag {
                match tag.parse::<PartOfSpeech>() {
                    Ok(pos) => {
                        senses.insert(pos, list);
                    }
                    Err(_) => warn!(word = %word, tag = %tag, "Skipping unknown part of speech"),
                }
            }
            entries.insert(word, senses);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, word: &str) -> Option<&HashMap<PartOfSpeech, Vec<Sense>>> {
        self.entries
            .get(word)
            .or_else(|| self.entries.get(&word.to_lowercase()))
    }
}

impl LexicalResource for ResyfLexicon {
    fn senses(&self, word: &str, pos: PartOfSpeech) -> Vec<Sense> {
        match self.lookup(word).and_then(|by_tag| by_tag.get(&pos)) {
            Some(senses) => senses.clone(),
            None => {
                debug!(word, pos = %pos, "No lexicon senses");
                Vec::new()
            }
        }
    }

    fn entry_count(&self) -> usize {
        self.len()
    }
}
