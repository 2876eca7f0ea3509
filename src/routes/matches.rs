use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::db::DynMatchStore;
use crate::error::ApiError;
use crate::models::{MatchListResponse, MatchResponse, MatchStatus};
use crate::validation::{self, MAX_LIST_LIMIT};

/// Records returned when the caller does not ask for a limit
const DEFAULT_LIST_LIMIT: i64 = 50;

/// Query parameters for listing matches, validated by hand so numeric-looking
/// strings coerce and anything else turns into a field issue
#[derive(Deserialize)]
pub struct ListMatchesQuery {
    #[serde(default)]
    limit: Option<String>,
}

/// GET /api/matches - List matches, newest first
pub async fn list_matches(
    State(store): State<DynMatchStore>,
    Query(params): Query<ListMatchesQuery>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let requested = validation::validate_list_query(params.limit.as_deref())
        .map_err(ApiError::invalid_query)?;

    let limit = requested.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);

    let data = store
        .list_matches(limit)
        .await
        .map_err(|e| ApiError::store("Failed to list matches.", e))?;

    Ok(Json(MatchListResponse { data }))
}

/// POST /api/matches - Create a match with a status derived from its window
pub async fn create_match(
    State(store): State<DynMatchStore>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let parsed = validation::validate_create_match(&body).map_err(ApiError::invalid_payload)?;

    // Status is a snapshot taken at creation; it is not recomputed on read.
    let status = MatchStatus::from_window(parsed.start_time, parsed.end_time, Utc::now());

    let created = store
        .insert_match(&parsed, status)
        .await
        .map_err(|e| ApiError::store("Failed to create match.", e))?;

    Ok((StatusCode::CREATED, Json(MatchResponse { data: created })))
}
