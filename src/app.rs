use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .nest("/api", routes())
        .with_state(state)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/today", get(handlers::get_today))
        .route("/complete", post(handlers::post_complete))
        .route("/history", get(handlers::get_history))
}
