use axum::{Json, extract::State};
use chrono::Utc;

use crate::controllers::poll_controllers::models::PollResponse;
use crate::services::query_service;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// The last five published polls, newest first.
pub async fn recent_polls(State(state): State<AppState>) -> AppResult<Json<Vec<PollResponse>>> {
    let polls = query_service::recent_polls(&state.db, Utc::now()).await?;

    Ok(Json(polls.into_iter().map(PollResponse::from).collect()))
}

/// Every published poll, newest first.
pub async fn all_polls(State(state): State<AppState>) -> AppResult<Json<Vec<PollResponse>>> {
    let polls = query_service::all_polls(&state.db, Utc::now()).await?;

    Ok(Json(polls.into_iter().map(PollResponse::from).collect()))
}
