//! API request handlers
//!
//! Rejection reason codes map 1:1 to status codes: 409 for the duplicate
//! codes, 400 for everything else. Error bodies are always
//! `{ "error": <code>, "detail": <text> }`; callers branch on the code,
//! never the detail text.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::core::field_validator::Rejection;
use crate::error::CellmapError;
use crate::store::{StoredField, Template, TemplateMeta};
use crate::types::FieldRequest;

use super::server::AppState;

/// Error responses carried back to HTTP callers.
pub struct ApiError(CellmapError);

impl From<CellmapError> for ApiError {
    fn from(err: CellmapError) -> Self {
        Self(err)
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        Self(CellmapError::Rejected(rejection))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            CellmapError::Rejected(rejection) => {
                let status = if rejection.code.is_conflict() {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::BAD_REQUEST
                };
                (status, Json(rejection)).into_response()
            }
            CellmapError::TemplateNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "template_not_found", "detail": id.to_string() })),
            )
                .into_response(),
            CellmapError::FieldNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "field_not_found", "detail": id.to_string() })),
            )
                .into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal_error", "detail": other.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
}

/// GET /api/health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        version: state.version.clone(),
    })
}

/// GET /api/templates - List templates, newest first
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<Vec<Template>> {
    Json(state.store.list_templates())
}

/// POST /api/templates - Register template metadata
///
/// File content never reaches this service; callers pass the extracted
/// name/size/mime of the upload they stored elsewhere.
pub async fn create_template(
    State(state): State<Arc<AppState>>,
    Json(meta): Json<TemplateMeta>,
) -> impl IntoResponse {
    let template = state.store.add_template(meta);
    (StatusCode::CREATED, Json(template))
}

/// GET /api/templates/:template_id/fields - List a template's fields
pub async fn list_fields(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Vec<StoredField>>, ApiError> {
    Ok(Json(state.store.list_fields(template_id)?))
}

/// POST /api/templates/:template_id/fields - Validate and store a field
pub async fn create_field(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<Uuid>,
    Json(request): Json<FieldRequest>,
) -> Result<(StatusCode, Json<StoredField>), ApiError> {
    let existing = state.store.existing_fields(template_id)?;
    let definition = state
        .validator
        .validate(&request, &existing)
        .map_err(ApiError::from)?;
    // The store repeats the duplicate check under its write lock; the
    // snapshot check above is not atomic against concurrent inserts.
    let stored = state.store.add_field(template_id, definition)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// DELETE /api/templates/:template_id/fields/:field_id - Remove a field
pub async fn delete_field(
    State(state): State<Arc<AppState>>,
    Path((template_id, field_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.store.delete_field(template_id, field_id)?;
    Ok(Json(json!({ "ok": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field_validator::RejectCode;

    #[test]
    fn test_rejection_maps_to_conflict() {
        let rejection = Rejection::new(RejectCode::DuplicateCellRef);
        let response = ApiError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_rejection_maps_to_bad_request() {
        let rejection = Rejection::new(RejectCode::InvalidCellRef);
        let response = ApiError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_template_maps_to_not_found() {
        let err = ApiError::from(CellmapError::TemplateNotFound(Uuid::new_v4()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
