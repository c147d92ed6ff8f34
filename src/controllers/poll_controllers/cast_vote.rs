use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::controllers::poll_controllers::models::{CastVoteRequest, CastVoteResponse};
use crate::services::vote_service;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;

pub async fn cast_vote(
    Path(poll_id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<Option<Claims>>,
    Json(payload): Json<CastVoteRequest>,
) -> AppResult<Json<CastVoteResponse>> {
    let voter = claims.as_ref().map(|c| c.sub.as_str());

    let poll_id = vote_service::cast_vote(&state.db, poll_id, payload.choice_id, voter).await?;

    Ok(Json(CastVoteResponse { poll_id }))
}
