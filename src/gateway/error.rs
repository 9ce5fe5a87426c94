use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::GLOSAURUS_STATUS_HEADER;
use crate::export::ExportError;
use crate::ranking::RankingError;
use crate::suggest::SuggestError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("generator error: {0}")]
    GeneratorError(String),

    #[error("export failed: {0}")]
    ExportFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<SuggestError> for GatewayError {
    fn from(err: SuggestError) -> Self {
        match err {
            SuggestError::InvalidArgument { reason } => GatewayError::InvalidRequest(reason),
            SuggestError::Ranking(RankingError::InvalidArgument { reason }) => {
                GatewayError::InvalidRequest(reason)
            }
            SuggestError::Ranking(RankingError::ModelUnavailable(e)) => {
                GatewayError::ModelUnavailable(e.to_string())
            }
            SuggestError::Generation(e) => GatewayError::GeneratorError(e.to_string()),
            e @ SuggestError::GeneratorUnavailable => GatewayError::GeneratorError(e.to_string()),
            e @ SuggestError::TaskFailed { .. } => GatewayError::InternalError(e.to_string()),
        }
    }
}

impl From<ExportError> for GatewayError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::ColumnMismatch { .. } | ExportError::NoColumns => {
                GatewayError::InvalidRequest(err.to_string())
            }
            ExportError::Io(_) => GatewayError::ExportFailed(err.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, glosaurus_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::ModelUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "model_unavailable")
            }
            GatewayError::GeneratorError(_) => (StatusCode::BAD_GATEWAY, "generator_error"),
            GatewayError::ExportFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "export_error"),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            GLOSAURUS_STATUS_HEADER,
            HeaderValue::from_static(glosaurus_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
