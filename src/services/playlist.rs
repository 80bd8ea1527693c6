use std::sync::Arc;

use chrono::Utc;
use color_eyre::{Result, eyre::Context};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;

use super::{CatalogError, keys_in};
use crate::collections::Collection;
use crate::database::Database;
use crate::entities;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

pub struct NewPlaylist {
    pub key: String,
    pub title: String,
    pub user_key: String,
    /// Epoch milliseconds, now when absent
    pub created_at: Option<i64>,
}

/// A track as it appears in a playlist: `created_at` is when it was added
#[derive(Debug, Clone)]
pub struct PlaylistEntry {
    pub track: entities::track::Model,
    pub created_at: i64,
}

pub struct PlaylistService {
    db: Arc<Database>,
}

impl PlaylistService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every playlist, by title
    pub async fn all(&self) -> Result<Vec<entities::playlist::Model>> {
        entities::playlist::Entity::find()
            .order_by_asc(entities::playlist::Column::Title)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch playlists")
    }

    pub async fn get(&self, key: &str) -> Result<entities::playlist::Model> {
        entities::playlist::Entity::find_by_id(key.to_string())
            .one(&self.db.conn)
            .await
            .context("Failed to fetch playlist")?
            .ok_or_else(|| CatalogError::not_found(Collection::Playlists, key).into())
    }

    /// Creates the playlist together with its User -> Playlist edge
    pub async fn create(&self, playlist: NewPlaylist) -> Result<entities::playlist::Model> {
        let user = entities::user::Entity::find_by_id(playlist.user_key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to look up user")?;
        if user.is_none() {
            return Err(CatalogError::not_found(Collection::Users, &playlist.user_key).into());
        }

        let existing = entities::playlist::Entity::find_by_id(playlist.key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to look up playlist")?;
        if existing.is_some() {
            return Err(CatalogError::conflict(Collection::Playlists, &playlist.key).into());
        }

        let created_at = playlist
            .created_at
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        let txn = self.db.conn.begin().await?;

        let model = entities::playlist::ActiveModel {
            key: Set(playlist.key.clone()),
            title: Set(playlist.title),
            user_key: Set(playlist.user_key.clone()),
            created_at: Set(created_at),
        }
        .insert(&txn)
        .await
        .context("Failed to create playlist")?;

        entities::user_playlist::ActiveModel {
            from_id: Set(Collection::Users.handle(&playlist.user_key)),
            to_id: Set(Collection::Playlists.handle(&playlist.key)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to link playlist to user")?;

        txn.commit().await?;

        log::info!("Created playlist '{}' for user '{}'", model.key, model.user_key);
        Ok(model)
    }

    /// Tracks of the playlist ordered by when they were added
    pub async fn tracks(&self, key: &str, order: SortOrder) -> Result<Vec<PlaylistEntry>> {
        self.get(key).await?;

        let query = entities::playlist_track::Entity::find()
            .filter(entities::playlist_track::Column::FromId.eq(Collection::Playlists.handle(key)));
        let query = match order {
            SortOrder::Asc => query
                .order_by_asc(entities::playlist_track::Column::CreatedAt)
                .order_by_asc(entities::playlist_track::Column::Id),
            SortOrder::Desc => query
                .order_by_desc(entities::playlist_track::Column::CreatedAt)
                .order_by_desc(entities::playlist_track::Column::Id),
        };
        let edges = query
            .all(&self.db.conn)
            .await
            .context("Failed to fetch playlist track edges")?;

        let track_keys = keys_in(edges.iter().map(|e| &e.to_id), Collection::Tracks);
        let tracks = entities::track::Entity::find()
            .filter(entities::track::Column::Key.is_in(track_keys))
            .all(&self.db.conn)
            .await
            .context("Failed to fetch playlist tracks")?;

        // The same track may be added more than once; every edge is one entry
        let entries = edges
            .iter()
            .filter_map(|edge| {
                let track = tracks
                    .iter()
                    .find(|t| Collection::Tracks.handle(&t.key) == edge.to_id)?;
                Some(PlaylistEntry {
                    track: track.clone(),
                    created_at: edge.created_at,
                })
            })
            .collect();

        Ok(entries)
    }

    pub async fn add_track(
        &self,
        key: &str,
        track_key: &str,
        created_at: Option<i64>,
    ) -> Result<entities::playlist_track::Model> {
        self.get(key).await?;
        self.require_track(track_key).await?;

        let model = entities::playlist_track::ActiveModel {
            from_id: Set(Collection::Playlists.handle(key)),
            to_id: Set(Collection::Tracks.handle(track_key)),
            created_at: Set(created_at.unwrap_or_else(|| Utc::now().timestamp_millis())),
            ..Default::default()
        }
        .insert(&self.db.conn)
        .await
        .context("Failed to add track to playlist")?;

        log::debug!("Added track '{}' to playlist '{}'", track_key, key);
        Ok(model)
    }

    pub async fn rename(&self, key: &str, title: Option<String>) -> Result<entities::playlist::Model> {
        let current = self.get(key).await?;
        let Some(title) = title else {
            return Ok(current);
        };

        let mut playlist = current.into_active_model();
        playlist.title = Set(title);
        playlist
            .update(&self.db.conn)
            .await
            .context("Failed to rename playlist")
    }

    /// Removes every occurrence of the track from the playlist. Returns whether
    /// anything was removed.
    pub async fn remove_track(&self, key: &str, track_key: &str) -> Result<bool> {
        self.get(key).await?;
        self.require_track(track_key).await?;

        let result = entities::playlist_track::Entity::delete_many()
            .filter(entities::playlist_track::Column::FromId.eq(Collection::Playlists.handle(key)))
            .filter(entities::playlist_track::Column::ToId.eq(Collection::Tracks.handle(track_key)))
            .exec(&self.db.conn)
            .await
            .context("Failed to remove track from playlist")?;

        Ok(result.rows_affected > 0)
    }

    async fn require_track(&self, track_key: &str) -> Result<()> {
        entities::track::Entity::find_by_id(track_key.to_string())
            .one(&self.db.conn)
            .await
            .context("Failed to look up track")?
            .ok_or_else(|| CatalogError::not_found(Collection::Tracks, track_key))?;
        Ok(())
    }
}
