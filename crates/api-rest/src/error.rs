//! Mapping from domain errors to HTTP responses.

use api_shared::ErrorRes;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use triage_core::TriageError;

/// Error returned by REST handlers. Rendered as a status code with an [`ErrorRes`] body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Triage(TriageError),
}

impl From<TriageError> for ApiError {
    fn from(e: TriageError) -> Self {
        ApiError::Triage(e)
    }
}

/// Undecodable request bodies are reported as 400 with an [`ErrorRes`] body.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Triage(e) => match e {
                TriageError::InvalidInput(_)
                | TriageError::NoSymptomsSelected
                | TriageError::SymptomNotSelected(_)
                | TriageError::Types(_) => StatusCode::BAD_REQUEST,
                TriageError::UnknownSymptom(_)
                | TriageError::SessionNotFound(_)
                | TriageError::ReportNotGenerated(_) => StatusCode::NOT_FOUND,
                TriageError::InvalidCatalog(_)
                | TriageError::CatalogRead(_)
                | TriageError::CatalogParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::Triage(e) if self.status().is_server_error() => {
                tracing::error!("Triage error: {:?}", e);
                "Internal error".to_string()
            }
            ApiError::Triage(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorRes::new(self.message());
        if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), error = %body.error, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}
