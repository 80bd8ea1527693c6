use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::http_server::state::AppState;

/// Always answers 200; `ok` tells whether the database responds
pub async fn health(State(app_state): State<Arc<AppState>>) -> Json<Value> {
    match app_state.db.ping().await {
        Ok(()) => Json(json!({ "ok": true, "graph": app_state.graph_name })),
        Err(e) => {
            log::warn!("Health check failed: {:#}", e);
            Json(json!({ "ok": false, "error": format!("{:#}", e) }))
        }
    }
}
