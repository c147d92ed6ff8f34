use axum::{Json, extract::State};

use crate::services::query_service;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Everyone who has cast at least one vote.
pub async fn voters(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let users = query_service::voters(&state.db).await?;

    Ok(Json(users))
}
