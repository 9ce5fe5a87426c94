use serde::{Deserialize, Serialize};

use crate::export::CellValue;
use crate::suggest::SynonymRequest;

/// Body of `POST /synonym/getSynonym`. Missing and `null` fields are both accepted.
#[derive(Debug, Deserialize)]
pub struct SynonymPayload {
    pub word: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub synonyms: Option<Vec<String>>,
}

impl From<SynonymPayload> for SynonymRequest {
    fn from(payload: SynonymPayload) -> Self {
        SynonymRequest {
            word: payload.word.unwrap_or_default(),
            definition: payload.definition.filter(|d| !d.trim().is_empty()),
            synonyms: payload.synonyms.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SynonymResponse {
    pub synonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RankPayload {
    pub candidates: Vec<String>,
    pub context: Vec<String>,
}

/// Ranked candidates with their scores, index-aligned.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankResponse {
    pub synonyms: Vec<String>,
    pub scores: Vec<f32>,
}

#[derive(Debug, Deserialize)]
pub struct ExportPayload {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}
