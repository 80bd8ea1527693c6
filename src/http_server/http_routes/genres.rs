use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use super::tracks::{LimitQuery, TrackView};
use crate::http_server::{error::Report, state::AppState};
use crate::services::genre::GenreService;

const DEFAULT_GENRE_TRACKS_LIMIT: u64 = 50;

#[derive(Debug, Serialize)]
pub struct GenreView {
    pub key: String,
}

pub async fn all_genres(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<GenreView>>, Report> {
    let genres = GenreService::new(app_state.db.clone()).all().await?;
    Ok(Json(
        genres
            .into_iter()
            .map(|g| GenreView { key: g.key })
            .collect(),
    ))
}

pub async fn genre_tracks(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<TrackView>>, Report> {
    let tracks = GenreService::new(app_state.db.clone())
        .tracks(&key, query.limit.unwrap_or(DEFAULT_GENRE_TRACKS_LIMIT))
        .await?;
    Ok(Json(tracks.into_iter().map(TrackView::from).collect()))
}
