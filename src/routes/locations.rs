use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::operations::locations::{self, LocationInsert, LocationRecord, NewLocation};
use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    name: String,
    translated_name: String,
    translated_name_anglicized: String,
}

#[derive(Serialize)]
pub struct CreateLocationResponse {
    success: bool,
    id: i64,
}

#[derive(Serialize)]
pub struct DuplicateLocationResponse {
    detail: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

#[derive(Serialize)]
pub struct LocationResponse {
    id: i64,
    name: String,
    translated_name: String,
    translated_name_anglicized: String,
}

impl From<LocationRecord> for LocationResponse {
    fn from(record: LocationRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            translated_name: record.translated_name,
            translated_name_anglicized: record.translated_name_anglicized,
        }
    }
}

pub async fn create_location(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<Response, AppError> {
    if request.name.trim().is_empty()
        || request.translated_name.trim().is_empty()
        || request.translated_name_anglicized.trim().is_empty()
    {
        return Err(AppError::validation(
            "name, translated_name and translated_name_anglicized must be non-empty",
        ));
    }

    let entry = NewLocation {
        name: request.name,
        translated_name: request.translated_name,
        translated_name_anglicized: request.translated_name_anglicized,
    };

    match locations::insert_location(state.db().pool(), &entry).await? {
        LocationInsert::Created(id) => {
            tracing::debug!(id, name = %entry.name, "location created");
            Ok(Json(CreateLocationResponse { success: true, id }).into_response())
        }
        LocationInsert::AlreadyExists(id) => {
            let body = DuplicateLocationResponse {
                detail: "already exists",
                id: state.duplicate_location_include_id().then_some(id),
            };
            Ok((StatusCode::ACCEPTED, Json(body)).into_response())
        }
    }
}

pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    let records = locations::list_locations(state.db().pool()).await?;
    Ok(Json(records.into_iter().map(LocationResponse::from).collect()))
}
