use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::albums::AlbumView;
use super::artists::ArtistView;
use crate::entities;
use crate::http_server::{error::Report, state::AppState};
use crate::services::track::{NewTrack, TrackDetail, TrackPatch, TrackService};

const DEFAULT_TOP_N: u64 = 5;
const DEFAULT_SEARCH_LIMIT: u64 = 20;
const DEFAULT_RECOMMENDATION_LIMIT: u64 = 20;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackView {
    pub key: String,
    pub title: String,
    pub duration: i32,
    pub album_key: String,
    pub artist_key: String,
    pub genres: Vec<String>,
    pub plays: i64,
}

impl From<entities::track::Model> for TrackView {
    fn from(track: entities::track::Model) -> Self {
        let genres = track.genre_keys();
        Self {
            key: track.key,
            title: track.title,
            duration: track.duration,
            album_key: track.album_key,
            artist_key: track.artist_key,
            genres,
            plays: track.plays,
        }
    }
}

/// Short form used by search, recommendation and traversal results
#[derive(Debug, Serialize)]
pub struct TrackRef {
    pub key: String,
    pub title: String,
}

impl From<entities::track::Model> for TrackRef {
    fn from(track: entities::track::Model) -> Self {
        Self {
            key: track.key,
            title: track.title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrackFullView {
    pub track: TrackView,
    pub album: Option<AlbumView>,
    pub artist: Option<ArtistView>,
}

impl From<TrackDetail> for TrackFullView {
    fn from(detail: TrackDetail) -> Self {
        Self {
            track: detail.track.into(),
            album: detail.album.map(AlbumView::from),
            artist: detail.artist.map(ArtistView::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedView {
    pub deleted: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrackInput {
    pub key: String,
    pub title: String,
    pub duration: i32,
    pub album_key: String,
    pub artist_key: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub plays: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTrackInput {
    pub title: Option<String>,
    pub duration: Option<i32>,
    pub plays: Option<i64>,
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub n: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub prefix: String,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u64>,
}

pub async fn all_tracks(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<TrackView>>, Report> {
    let tracks = TrackService::new(app_state.db.clone()).all().await?;
    Ok(Json(tracks.into_iter().map(TrackView::from).collect()))
}

pub async fn top_tracks(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<TrackView>>, Report> {
    let tracks = TrackService::new(app_state.db.clone())
        .top(query.n.unwrap_or(DEFAULT_TOP_N))
        .await?;
    Ok(Json(tracks.into_iter().map(TrackView::from).collect()))
}

pub async fn search_tracks(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<TrackRef>>, Report> {
    let tracks = TrackService::new(app_state.db.clone())
        .search(&query.prefix, query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
        .await?;
    Ok(Json(tracks.into_iter().map(TrackRef::from).collect()))
}

pub async fn track_full(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<TrackFullView>, Report> {
    let detail = TrackService::new(app_state.db.clone())
        .detail(&key)
        .await?;
    Ok(Json(detail.into()))
}

pub async fn track_recommendations(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<TrackRef>>, Report> {
    let tracks = TrackService::new(app_state.db.clone())
        .recommendations(&key, query.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT))
        .await?;
    Ok(Json(tracks.into_iter().map(TrackRef::from).collect()))
}

pub async fn create_track(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<CreateTrackInput>,
) -> Result<(StatusCode, Json<TrackView>), Report> {
    let track = TrackService::new(app_state.db.clone())
        .create(NewTrack {
            key: input.key,
            title: input.title,
            duration: input.duration,
            album_key: input.album_key,
            artist_key: input.artist_key,
            genres: input.genres,
            plays: input.plays,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(track.into())))
}

pub async fn update_track(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(input): Json<UpdateTrackInput>,
) -> Result<Json<TrackView>, Report> {
    let track = TrackService::new(app_state.db.clone())
        .update(
            &key,
            TrackPatch {
                title: input.title,
                duration: input.duration,
                plays: input.plays,
                genres: input.genres,
            },
        )
        .await?;
    Ok(Json(track.into()))
}

pub async fn delete_track(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<DeletedView>, Report> {
    TrackService::new(app_state.db.clone()).delete(&key).await?;
    Ok(Json(DeletedView { deleted: true }))
}
