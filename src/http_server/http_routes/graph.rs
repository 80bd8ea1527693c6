use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use super::tracks::TrackRef;
use crate::http_server::{error::Report, state::AppState};
use crate::services::graph::{DEFAULT_MAX_DEPTH, GraphService};

#[derive(Debug, Deserialize)]
pub struct DepthQuery {
    pub max_depth: Option<u64>,
}

/// Tracks reachable from an artist over the configured named graph
pub async fn artist_graph_tracks(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<DepthQuery>,
) -> Result<Json<Vec<TrackRef>>, Report> {
    let tracks = GraphService::new(app_state.db.clone())
        .artist_tracks(
            &app_state.graph_name,
            &key,
            query.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        )
        .await?;
    Ok(Json(tracks.into_iter().map(TrackRef::from).collect()))
}
