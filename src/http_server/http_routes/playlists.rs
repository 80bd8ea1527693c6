use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::entities;
use crate::http_server::{error::Report, state::AppState};
use crate::services::playlist::{NewPlaylist, PlaylistEntry, PlaylistService, SortOrder};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistView {
    pub key: String,
    pub title: String,
    pub user_key: String,
    pub created_at: i64,
}

impl From<entities::playlist::Model> for PlaylistView {
    fn from(playlist: entities::playlist::Model) -> Self {
        Self {
            key: playlist.key,
            title: playlist.title,
            user_key: playlist.user_key,
            created_at: playlist.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistTrackView {
    pub key: String,
    pub title: String,
    pub created_at: i64,
    pub album_key: String,
    pub artist_key: String,
}

impl From<PlaylistEntry> for PlaylistTrackView {
    fn from(entry: PlaylistEntry) -> Self {
        Self {
            key: entry.track.key,
            title: entry.track.title,
            created_at: entry.created_at,
            album_key: entry.track.album_key,
            artist_key: entry.track.artist_key,
        }
    }
}

/// A Playlist -> Track edge
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEdgeView {
    pub from: String,
    pub to: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct RemovedView {
    pub removed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistInput {
    pub key: String,
    pub title: String,
    pub user_key: String,
    pub created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTrackInput {
    pub track_key: String,
    pub created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistInput {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub order: SortOrder,
}

pub async fn all_playlists(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlaylistView>>, Report> {
    let playlists = PlaylistService::new(app_state.db.clone()).all().await?;
    Ok(Json(playlists.into_iter().map(PlaylistView::from).collect()))
}

pub async fn create_playlist(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<CreatePlaylistInput>,
) -> Result<(StatusCode, Json<PlaylistView>), Report> {
    let playlist = PlaylistService::new(app_state.db.clone())
        .create(NewPlaylist {
            key: input.key,
            title: input.title,
            user_key: input.user_key,
            created_at: input.created_at,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(playlist.into())))
}

pub async fn update_playlist(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(input): Json<UpdatePlaylistInput>,
) -> Result<Json<PlaylistView>, Report> {
    let playlist = PlaylistService::new(app_state.db.clone())
        .rename(&key, input.title)
        .await?;
    Ok(Json(playlist.into()))
}

pub async fn playlist_tracks(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<PlaylistTrackView>>, Report> {
    let entries = PlaylistService::new(app_state.db.clone())
        .tracks(&key, query.order)
        .await?;
    Ok(Json(entries.into_iter().map(PlaylistTrackView::from).collect()))
}

pub async fn add_track_to_playlist(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(input): Json<AddTrackInput>,
) -> Result<(StatusCode, Json<PlaylistEdgeView>), Report> {
    let edge = PlaylistService::new(app_state.db.clone())
        .add_track(&key, &input.track_key, input.created_at)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PlaylistEdgeView {
            from: edge.from_id,
            to: edge.to_id,
            created_at: edge.created_at,
        }),
    ))
}

pub async fn remove_track_from_playlist(
    State(app_state): State<Arc<AppState>>,
    Path((key, track_key)): Path<(String, String)>,
) -> Result<Json<RemovedView>, Report> {
    let removed = PlaylistService::new(app_state.db.clone())
        .remove_track(&key, &track_key)
        .await?;
    Ok(Json(RemovedView { removed }))
}
