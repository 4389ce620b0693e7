mod games;
mod health;
mod sessions;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router. API routes are matched first; any
/// other path falls through to the static frontend bundle, which serves
/// `index.html` at the root and 404s for files that do not exist.
pub fn router(state: AppState) -> Router {
    let frontend = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/health", get(health::health))
        .route("/version", get(health::version))
        .route("/1.0/sessions/", post(sessions::create_session))
        .route("/1.0/games", get(games::list_games))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
