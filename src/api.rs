//! JSON endpoint around [`QueryEngine::handle_query`].
//!
//! - `POST /query` `{"query": "..."}` -> `{"reply": "..."}`
//! - `GET  /health` -> `{"status": "ok", "players": n}`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::router::QueryEngine;

pub const MISSING_QUERY: &str = "Missing 'query' in request body.";

#[derive(Debug, Deserialize)]
struct QueryRequest {
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryReply {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReply {
    pub status: String,
    pub players: usize,
}

pub fn router(engine: Arc<QueryEngine>) -> Router {
    Router::new()
        .route("/query", post(query))
        .route("/health", get(health))
        .with_state(engine)
}

async fn query(
    State(engine): State<Arc<QueryEngine>>,
    body: Bytes,
) -> Result<Json<QueryReply>, (StatusCode, Json<ErrorReply>)> {
    let request = serde_json::from_slice::<QueryRequest>(&body).ok();
    let Some(text) = request.and_then(|r| r.query) else {
        warn!("rejected request without a query field");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorReply {
                error: MISSING_QUERY.to_string(),
            }),
        ));
    };
    debug!(query = %text, "handling query");
    Ok(Json(QueryReply {
        reply: engine.handle_query(&text),
    }))
}

async fn health(State(engine): State<Arc<QueryEngine>>) -> Json<HealthReply> {
    Json(HealthReply {
        status: "ok".to_string(),
        players: engine.store().len(),
    })
}
