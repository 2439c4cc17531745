use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisMode, ComplianceFinding, ComplianceResult};
use crate::presentation::state::AppState;

use super::comparison_form::read_comparison;

#[derive(Debug, Default, Deserialize)]
pub struct ComplianceQuery {
    #[serde(default)]
    pub mode: AnalysisMode,
}

#[derive(Serialize)]
pub struct FreeformResponse {
    pub result: String,
}

#[derive(Serialize)]
pub struct StructuredResponse {
    pub success: bool,
    pub analysis: Vec<ComplianceFinding>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

#[tracing::instrument(skip_all, fields(mode = tracing::field::Empty))]
pub async fn compliance_check_handler(
    State(state): State<AppState>,
    query: Result<Query<ComplianceQuery>, QueryRejection>,
    request: Request,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected query string");
            return error_response(rejection.status(), rejection.body_text());
        }
    };
    tracing::Span::current().record("mode", tracing::field::debug(query.mode));

    let comparison = match read_comparison(&state, request).await {
        Ok(comparison) => comparison,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected comparison request");
            return error_response(e.status(), e.to_string());
        }
    };

    match state.compliance_service.check(comparison, query.mode).await {
        Ok(ComplianceResult::Freeform(result)) => {
            (StatusCode::OK, Json(FreeformResponse { result })).into_response()
        }
        Ok(ComplianceResult::Structured(analysis)) => (
            StatusCode::OK,
            Json(StructuredResponse {
                success: true,
                analysis,
            }),
        )
            .into_response(),
        Err(e) if e.is_client_error() => {
            tracing::warn!(error = %e, "Compliance check rejected");
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Compliance check failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
