use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::controllers::poll_controllers::models::{AddChoiceRequest, AddChoiceResponse};
use crate::services::poll_service;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;

pub async fn add_choice(
    Path(poll_id): Path<i64>,
    State(state): State<AppState>,
    Extension(claims): Extension<Option<Claims>>,
    Json(payload): Json<AddChoiceRequest>,
) -> AppResult<Json<AddChoiceResponse>> {
    let voter = claims.as_ref().map(|c| c.sub.as_str());

    let choice_id =
        poll_service::add_choice(&state.db, poll_id, &payload.choice_text, voter).await?;

    Ok(Json(AddChoiceResponse { poll_id, choice_id }))
}
