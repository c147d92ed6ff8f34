use axum::{
    Json,
    extract::{Extension, Path, State},
};
use chrono::Utc;

use crate::controllers::poll_controllers::models::{ChoiceResponse, PollDetailResponse};
use crate::services::query_service;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;

pub async fn get_poll(
    Path(poll_id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<Option<Claims>>,
) -> AppResult<Json<PollDetailResponse>> {
    let user = claims.as_ref().map(|c| c.sub.as_str());

    let detail = query_service::poll_detail(&state.db, poll_id, Utc::now(), user).await?;

    let response = PollDetailResponse {
        id: detail.poll.id,
        question: detail.poll.question,
        pub_date: detail.poll.pub_date,
        choices: detail
            .choices
            .into_iter()
            .map(|c| ChoiceResponse {
                id: c.id,
                choice_text: c.choice_text,
            })
            .collect(),
        has_voted: detail.existing_vote.is_some(),
        voted_choice_id: detail.existing_vote.map(|v| v.choice_id),
    };

    Ok(Json(response))
}
