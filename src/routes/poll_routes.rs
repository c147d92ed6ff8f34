use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::controllers::poll_controllers::{
    add_choice, cast_vote, create_poll, get_poll, get_results, polls, voters,
};
use crate::middleware::auth;
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(polls::recent_polls).post(create_poll::create_poll))
        .route("/all", get(polls::all_polls))
        .route("/voters", get(voters::voters))
        .route("/:poll_id", get(get_poll::get_poll))
        .route("/:poll_id/results", get(get_results::get_results))
        .route("/:poll_id/vote", post(cast_vote::cast_vote))
        .route("/:poll_id/choices", post(add_choice::add_choice))
        .layer(middleware::from_fn(auth::identity))
        .with_state(state)
}
