use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{history, ws};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/data/histominute", get(history::histo_minute))
        .route("/data/histohour", get(history::histo_hour))
        .route("/data/histoday", get(history::histo_day))
        .route("/realtime", get(ws::realtime_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
