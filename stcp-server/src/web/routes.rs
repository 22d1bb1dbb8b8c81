//! HTTP route handlers.
//!
//! Responses carry the transport's success status regardless of outcome;
//! failures are told apart by the JSON body alone. Routes are registered for
//! GET only, so axum answers other methods with 405.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::warn;

use crate::arrivals::{self, StopCode};

use super::state::AppState;

/// Create the application router.
///
/// Every path except the fixed routes is treated as a stop code.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(no_stop_code))
        .route("/pesquisa", get(search_stops))
        .route("/*stop", get(stop_arrivals))
        .with_state(state)
}

fn json_body(payload: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], payload).into_response()
}

/// `GET /` — nothing after the separator, so there is no code to look up.
async fn no_stop_code() -> Response {
    json_body(Bytes::from_static(
        arrivals::NO_STOP_CODE_PAYLOAD.as_bytes(),
    ))
}

/// `GET /<stop>` — live arrivals for one stop, trailing slash tolerated.
async fn stop_arrivals(State(state): State<AppState>, Path(stop): Path<String>) -> Response {
    let Some(code) = StopCode::from_path(&stop) else {
        return json_body(Bytes::from_static(
            arrivals::NO_STOP_CODE_PAYLOAD.as_bytes(),
        ));
    };

    json_body(state.arrivals.lookup(&code).await)
}

/// Query for `GET /pesquisa`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Stop name, or a fragment of one
    pub q: String,
}

/// `GET /pesquisa?q=<name>` — stop-name search.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<SearchRequest>,
) -> Response {
    match state.search.stops(&req.q).await {
        Ok(stops) => Json(stops).into_response(),
        Err(error) => {
            warn!(query = %req.q, %error, "stop search failed");
            json_body(Bytes::from_static(arrivals::OFFLINE_PAYLOAD.as_bytes()))
        }
    }
}
