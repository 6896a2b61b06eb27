pub mod pipe;
pub mod tools;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router with all sub-routes.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/pipe", pipe::router())
        .nest("/api/tools", tools::router())
}
