use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::constants::GLOSAURUS_STATUS_HEADER;
use crate::embedding::Embedder;
use crate::export::MarkdownTable;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    ExportPayload, RankPayload, RankResponse, SynonymPayload, SynonymResponse,
};
use crate::gateway::state::HandlerState;
use crate::suggest::SynonymRequest;

fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, GatewayError> {
    serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

fn ok_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(GLOSAURUS_STATUS_HEADER, HeaderValue::from_static("ok"));
    headers
}

#[instrument(skip(state, body), fields(word = tracing::field::Empty))]
pub async fn get_synonym_handler<E>(
    State(state): State<HandlerState<E>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    E: Embedder + 'static,
{
    let request: SynonymRequest = parse_body::<SynonymPayload>(body)?.into();
    tracing::Span::current().record("word", tracing::field::display(&request.word));

    let synonyms = state.service.suggest(&request).await?;
    info!(count = synonyms.len(), "Synonyms suggested");

    Ok((StatusCode::OK, ok_headers(), Json(SynonymResponse { synonyms })).into_response())
}

#[instrument(skip(state, body))]
pub async fn rank_handler<E>(
    State(state): State<HandlerState<E>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    E: Embedder + 'static,
{
    let RankPayload {
        candidates,
        context,
    } = parse_body(body)?;
    debug!(
        candidates = candidates.len(),
        context = context.len(),
        "Ranking request"
    );

    let ranked = state.service.rank(candidates, context).await?;
    let (synonyms, scores): (Vec<String>, Vec<f32>) =
        ranked.into_iter().map(|c| (c.text, c.score)).unzip();

    Ok((StatusCode::OK, ok_headers(), Json(RankResponse { synonyms, scores })).into_response())
}

#[instrument(skip(body))]
pub async fn export_markdown_handler(
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let ExportPayload { headers, rows } = parse_body(body)?;

    let mut table = MarkdownTable::new(headers.len())?;
    table.set_header(&headers)?;
    for row in rows {
        table.add_line(row)?;
    }
    debug!(rows = table.row_count(), "Exporting glossary table");

    let mut response_headers = ok_headers();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/markdown; charset=utf-8"),
    );

    Ok((StatusCode::OK, response_headers, table.to_markdown()).into_response())
}
