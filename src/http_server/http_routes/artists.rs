use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::albums::AlbumView;
use crate::entities;
use crate::http_server::{error::Report, state::AppState};
use crate::services::artist::{ArtistService, DatedTrack, NewArtist};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistView {
    pub key: String,
    pub name: String,
    pub country: Option<String>,
    pub genres: Vec<String>,
}

impl From<entities::artist::Model> for ArtistView {
    fn from(artist: entities::artist::Model) -> Self {
        let genres = artist.genre_keys();
        Self {
            key: artist.key,
            name: artist.name,
            country: artist.country,
            genres,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedTrackView {
    pub key: String,
    pub title: String,
    pub album: String,
    pub year: i32,
}

impl From<DatedTrack> for DatedTrackView {
    fn from(dated: DatedTrack) -> Self {
        Self {
            key: dated.track.key,
            title: dated.track.title,
            album: dated.album_title,
            year: dated.year,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackCountView {
    pub artist_key: String,
    pub tracks: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtistInput {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct YearRangeQuery {
    pub year_from: i32,
    pub year_to: i32,
}

pub async fn all_artists(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistView>>, Report> {
    let artists = ArtistService::new(app_state.db.clone()).all().await?;
    Ok(Json(artists.into_iter().map(ArtistView::from).collect()))
}

pub async fn create_artist(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<CreateArtistInput>,
) -> Result<(StatusCode, Json<ArtistView>), Report> {
    let artist = ArtistService::new(app_state.db.clone())
        .create(NewArtist {
            key: input.key,
            name: input.name,
            country: input.country,
            genres: input.genres,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(artist.into())))
}

pub async fn artist_albums(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<AlbumView>>, Report> {
    let albums = ArtistService::new(app_state.db.clone())
        .albums(&key)
        .await?;
    Ok(Json(albums.into_iter().map(AlbumView::from).collect()))
}

pub async fn artist_tracks_by_year(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(range): Query<YearRangeQuery>,
) -> Result<Json<Vec<DatedTrackView>>, Report> {
    let tracks = ArtistService::new(app_state.db.clone())
        .tracks_by_year(&key, range.year_from, range.year_to)
        .await?;
    Ok(Json(tracks.into_iter().map(DatedTrackView::from).collect()))
}

pub async fn count_tracks_by_artist(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<TrackCountView>, Report> {
    let tracks = ArtistService::new(app_state.db.clone())
        .count_tracks(&key)
        .await?;
    Ok(Json(TrackCountView {
        artist_key: key,
        tracks,
    }))
}
