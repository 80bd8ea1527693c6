use std::collections::HashSet;

use rand::Rng;

use super::dataset::Dataset;
use crate::collections::Collection;

/// The seed does not model per-album track ordering
pub const ALBUM_TRACK_NUMBER: i32 = 1;

/// Playlist `i` (in dataset order) receives `MIN_PLAYLIST_TRACKS + i % PLAYLIST_TRACK_SPREAD`
/// tracks, i.e. 6, 7 or 8.
pub const MIN_PLAYLIST_TRACKS: usize = 6;
pub const PLAYLIST_TRACK_SPREAD: usize = 3;

/// Offsets subtracted from "now" for playlist membership timestamps. The playlist
/// stride exceeds a full playlist of track strides, so timestamps strictly decrease
/// over the whole run.
const PLAYLIST_STRIDE_MS: i64 = 100_000;
const TRACK_STRIDE_MS: i64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdge {
    pub from_id: String,
    pub to_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPlaylistTrack {
    pub from_id: String,
    pub to_id: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgePlan {
    pub artist_album: Vec<PlannedEdge>,
    /// Every album -> track edge carries [`ALBUM_TRACK_NUMBER`]
    pub album_track: Vec<PlannedEdge>,
    pub track_genre: Vec<PlannedEdge>,
    pub user_playlist: Vec<PlannedEdge>,
    pub playlist_track: Vec<PlannedPlaylistTrack>,
}

fn edge(from: Collection, from_key: &str, to: Collection, to_key: &str) -> PlannedEdge {
    PlannedEdge {
        from_id: from.handle(from_key),
        to_id: to.handle(to_key),
    }
}

/// Uniformly picks up to `count` distinct elements of `pool`, without replacement.
/// Returns fewer than `count` only when the pool runs out.
pub fn pick_distinct<T: Clone, R: Rng + ?Sized>(pool: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut remaining = pool.to_vec();
    let mut picked = Vec::with_capacity(count.min(remaining.len()));
    while picked.len() < count && !remaining.is_empty() {
        let index = rng.random_range(0..remaining.len());
        picked.push(remaining.remove(index));
    }
    picked
}

/// Derives every edge of a seed run from a (validated) dataset. Only the playlist
/// membership depends on `rng`.
pub fn plan_edges<R: Rng + ?Sized>(dataset: &Dataset, rng: &mut R, now_ms: i64) -> EdgePlan {
    let genres: HashSet<&str> = dataset.genres.iter().map(String::as_str).collect();

    let artist_album = dataset
        .albums
        .iter()
        .map(|album| {
            edge(
                Collection::Artists,
                &album.artist_key,
                Collection::Albums,
                &album.key,
            )
        })
        .collect();

    let album_track = dataset
        .tracks
        .iter()
        .map(|track| {
            edge(
                Collection::Albums,
                &track.album_key,
                Collection::Tracks,
                &track.key,
            )
        })
        .collect();

    let track_genre = dataset
        .tracks
        .iter()
        .flat_map(|track| {
            track
                .genres
                .iter()
                .filter(|genre| genres.contains(genre.as_str()))
                .map(|genre| edge(Collection::Tracks, &track.key, Collection::Genres, genre))
        })
        .collect();

    let user_playlist = dataset
        .playlists
        .iter()
        .map(|playlist| {
            edge(
                Collection::Users,
                &playlist.user_key,
                Collection::Playlists,
                &playlist.key,
            )
        })
        .collect();

    let track_keys: Vec<&str> = dataset.tracks.iter().map(|t| t.key.as_str()).collect();
    let mut playlist_track = Vec::new();
    for (index, playlist) in dataset.playlists.iter().enumerate() {
        let quota = MIN_PLAYLIST_TRACKS + index % PLAYLIST_TRACK_SPREAD;
        let chosen = pick_distinct(&track_keys, quota, rng);
        for (position, track_key) in chosen.into_iter().enumerate() {
            let offset = index as i64 * PLAYLIST_STRIDE_MS + position as i64 * TRACK_STRIDE_MS;
            playlist_track.push(PlannedPlaylistTrack {
                from_id: Collection::Playlists.handle(&playlist.key),
                to_id: Collection::Tracks.handle(track_key),
                created_at: now_ms - offset,
            });
        }
    }

    EdgePlan {
        artist_album,
        album_track,
        track_genre,
        user_playlist,
        playlist_track,
    }
}
