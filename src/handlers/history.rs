//! Historical query endpoints.
//!
//! Three routes over one orchestrator; the route fixes the resolution, the
//! query string carries `limit` and `toTs`.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::FeedError;
use crate::history::{run_query, HistoryQuery, HistoryResponse};
use crate::resolution::Resolution;
use crate::state::AppState;
use crate::unix_time_secs;

/// Query parameters shared by the historical endpoints.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
    #[serde(rename = "toTs")]
    pub to_ts: Option<i64>,
}

pub async fn histo_minute(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, FeedError> {
    serve_history(&state, "1", params)
}

pub async fn histo_hour(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, FeedError> {
    serve_history(&state, "60", params)
}

pub async fn histo_day(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, FeedError> {
    serve_history(&state, "1D", params)
}

fn serve_history(
    state: &AppState,
    token: &str,
    params: HistoryParams,
) -> Result<Json<HistoryResponse>, FeedError> {
    let resolution: Resolution = token.parse()?;
    let query = HistoryQuery {
        resolution,
        to_ts: params.to_ts,
        limit: params.limit.unwrap_or(state.config.default_limit),
    };

    tracing::info!(
        resolution_secs = resolution.seconds(),
        limit = query.limit,
        to_ts = query.to_ts,
        "historical query"
    );

    let response = run_query(&state.config.generator, &query, unix_time_secs())?;
    Ok(Json(response))
}
