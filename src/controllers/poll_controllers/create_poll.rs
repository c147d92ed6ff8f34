use axum::{Json, extract::State};
use chrono::Utc;

use crate::controllers::poll_controllers::models::{CreatePollRequest, PollResponse};
use crate::services::poll_service;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn create_poll(
    State(state): State<AppState>,
    Json(payload): Json<CreatePollRequest>,
) -> AppResult<Json<PollResponse>> {
    let pub_date = payload.pub_date.unwrap_or_else(Utc::now);

    let poll =
        poll_service::create_poll(&state.db, &payload.question, &payload.choices, pub_date).await?;

    Ok(Json(poll.into()))
}
