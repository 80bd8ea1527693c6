use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::tracks::TrackView;
use crate::entities;
use crate::http_server::{error::Report, state::AppState};
use crate::services::album::{AlbumPatch, AlbumService, NewAlbum};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
    pub key: String,
    pub title: String,
    pub year: i32,
    pub artist_key: String,
}

impl From<entities::album::Model> for AlbumView {
    fn from(album: entities::album::Model) -> Self {
        Self {
            key: album.key,
            title: album.title,
            year: album.year,
            artist_key: album.artist_key,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumInput {
    pub key: String,
    pub title: String,
    pub year: i32,
    pub artist_key: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAlbumInput {
    pub title: Option<String>,
    pub year: Option<i32>,
}

pub async fn all_albums(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<AlbumView>>, Report> {
    let albums = AlbumService::new(app_state.db.clone()).all().await?;
    Ok(Json(albums.into_iter().map(AlbumView::from).collect()))
}

pub async fn create_album(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<CreateAlbumInput>,
) -> Result<(StatusCode, Json<AlbumView>), Report> {
    let album = AlbumService::new(app_state.db.clone())
        .create(NewAlbum {
            key: input.key,
            title: input.title,
            year: input.year,
            artist_key: input.artist_key,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(album.into())))
}

pub async fn update_album(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(input): Json<UpdateAlbumInput>,
) -> Result<Json<AlbumView>, Report> {
    let album = AlbumService::new(app_state.db.clone())
        .update(
            &key,
            AlbumPatch {
                title: input.title,
                year: input.year,
            },
        )
        .await?;
    Ok(Json(album.into()))
}

pub async fn album_tracks(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<TrackView>>, Report> {
    let tracks = AlbumService::new(app_state.db.clone())
        .tracks(&key)
        .await?;
    Ok(Json(tracks.into_iter().map(TrackView::from).collect()))
}
