use axum::{
    Json,
    extract::{Path, State},
};

use crate::controllers::poll_controllers::models::{ChoiceResultResponse, PollResultsResponse};
use crate::services::query_service;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_results(
    Path(poll_id): Path<i64>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResultsResponse>> {
    let (poll, choices) = query_service::poll_results(&state.db, poll_id).await?;

    let total_votes = choices.iter().map(|c| c.votes).sum();

    Ok(Json(PollResultsResponse {
        id: poll.id,
        question: poll.question,
        choices: choices.into_iter().map(ChoiceResultResponse::from).collect(),
        total_votes,
    }))
}
