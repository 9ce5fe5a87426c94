use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::embedding::Embedder;
use crate::generation::{TextGenerator, parse_synonym_csv, synonym_prompt};
use crate::lexicon::{LexicalResource, collect_synonyms};
use crate::ranking::{RankedCandidate, Ranker};

use super::SuggestionStrategy;
use super::error::SuggestError;

/// A word to find synonyms for, with what the caller already knows about it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SynonymRequest {
    pub word: String,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl SynonymRequest {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn with_synonyms<S: Into<String>>(mut self, synonyms: impl IntoIterator<Item = S>) -> Self {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    /// Caller synonyms followed by the word, blanks dropped.
    pub fn context(&self) -> Vec<String> {
        self.known_synonyms()
            .chain(std::iter::once(self.word.trim()))
            .map(str::to_string)
            .collect()
    }

    fn known_synonyms(&self) -> impl Iterator<Item = &str> {
        self.synonyms
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Drops blanks, the word itself, already-known synonyms and repeats.
///
/// Comparisons ignore case; the first spelling of a repeated candidate wins.
pub fn filter_candidates<'a>(
    raw: impl IntoIterator<Item = String>,
    word: &str,
    known: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut seen: HashSet<String> = known.into_iter().map(str::to_lowercase).collect();
    seen.insert(word.trim().to_lowercase());

    raw.into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .filter(|c| seen.insert(c.to_lowercase()))
        .collect()
}

/// Finds and orders synonym suggestions.
pub struct SynonymService<E> {
    ranker: Arc<Ranker<E>>,
    lexicon: Arc<dyn LexicalResource>,
    generator: Option<Arc<dyn TextGenerator>>,
    strategy: SuggestionStrategy,
}

impl<E> Clone for SynonymService<E> {
    fn clone(&self) -> Self {
        Self {
            ranker: Arc::clone(&self.ranker),
            lexicon: Arc::clone(&self.lexicon),
            generator: self.generator.clone(),
            strategy: self.strategy,
        }
    }
}

impl<E> std::fmt::Debug for SynonymService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynonymService")
            .field("strategy", &self.strategy)
            .field("lexicon_entries", &self.lexicon.entry_count())
            .field("generator", &self.generator.as_ref().map(|g| g.model()))
            .finish_non_exhaustive()
    }
}

impl<E> SynonymService<E>
where
    E: Embedder + 'static,
{
    pub fn new(
        ranker: Ranker<E>,
        lexicon: Arc<dyn LexicalResource>,
        strategy: SuggestionStrategy,
    ) -> Self {
        Self {
            ranker: Arc::new(ranker),
            lexicon,
            generator: None,
            strategy,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn strategy(&self) -> SuggestionStrategy {
        self.strategy
    }

    pub fn ranker(&self) -> &Ranker<E> {
        &self.ranker
    }

    pub fn lexicon_entries(&self) -> usize {
        self.lexicon.entry_count()
    }

    pub fn generator_model(&self) -> Option<&str> {
        self.generator.as_ref().map(|g| g.model())
    }

    /// Ranked synonym suggestions for `request.word`.
    #[instrument(skip(self, request), fields(word = %request.word, strategy = %self.strategy))]
    pub async fn suggest(&self, request: &SynonymRequest) -> Result<Vec<String>, SuggestError> {
        let word = request.word.trim();
        if word.is_empty() {
            return Err(SuggestError::InvalidArgument {
                reason: "word must not be empty".to_string(),
            });
        }

        let candidates = self.candidates(request).await?;
        if candidates.is_empty() {
            warn!("No synonym candidates found");
            return Ok(Vec::new());
        }

        let ranked = self.rank(candidates, request.context()).await?;
        info!(suggestions = ranked.len(), "Ranked synonym suggestions");

        Ok(ranked.into_iter().map(RankedCandidate::into_text).collect())
    }

    /// Unranked candidates from the configured source, already filtered.
    pub async fn candidates(&self, request: &SynonymRequest) -> Result<Vec<String>, SuggestError> {
        let word = request.word.trim();

        let raw = match self.strategy {
            SuggestionStrategy::Lexicon => collect_synonyms(self.lexicon.as_ref(), word),
            SuggestionStrategy::Generator => {
                let generator = self
                    .generator
                    .as_ref()
                    .ok_or(SuggestError::GeneratorUnavailable)?;
                let known: Vec<String> = request.known_synonyms().map(str::to_string).collect();
                let prompt = synonym_prompt(word, request.definition.as_deref(), &known);
                parse_synonym_csv(&generator.generate(&prompt).await?)
            }
        };

        let total = raw.len();
        let filtered = filter_candidates(raw, word, request.known_synonyms());
        debug!(total, kept = filtered.len(), "Filtered synonym candidates");
        Ok(filtered)
    }

    /// Runs the ranker off the async runtime.
    pub async fn rank(
        &self,
        candidates: Vec<String>,
        context: Vec<String>,
    ) -> Result<Vec<RankedCandidate>, SuggestError> {
        let ranker = Arc::clone(&self.ranker);
        let ranked =
            tokio::task::spawn_blocking(move || ranker.rank_with_scores(&candidates, &context))
                .await??;
        Ok(ranked)
    }
}
