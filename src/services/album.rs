use std::sync::Arc;

use color_eyre::{Result, eyre::Context};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::{CatalogError, in_key_order, keys_in};
use crate::collections::Collection;
use crate::database::Database;
use crate::entities;

pub struct NewAlbum {
    pub key: String,
    pub title: String,
    pub year: i32,
    pub artist_key: String,
}

#[derive(Debug, Default)]
pub struct AlbumPatch {
    pub title: Option<String>,
    pub year: Option<i32>,
}

pub struct AlbumService {
    db: Arc<Database>,
}

impl AlbumService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every album, by title
    pub async fn all(&self) -> Result<Vec<entities::album::Model>> {
        entities::album::Entity::find()
            .order_by_asc(entities::album::Column::Title)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch albums")
    }

    pub async fn get(&self, key: &str) -> Result<entities::album::Model> {
        entities::album::Entity::find_by_id(key.to_string())
            .one(&self.db.conn)
            .await
            .context("Failed to fetch album")?
            .ok_or_else(|| CatalogError::not_found(Collection::Albums, key).into())
    }

    /// Creates the album together with its Artist -> Album edge
    pub async fn create(&self, album: NewAlbum) -> Result<entities::album::Model> {
        let artist = entities::artist::Entity::find_by_id(album.artist_key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to look up artist")?;
        if artist.is_none() {
            return Err(CatalogError::not_found(Collection::Artists, &album.artist_key).into());
        }

        let existing = entities::album::Entity::find_by_id(album.key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to look up album")?;
        if existing.is_some() {
            return Err(CatalogError::conflict(Collection::Albums, &album.key).into());
        }

        let txn = self.db.conn.begin().await?;

        let model = entities::album::ActiveModel {
            key: Set(album.key.clone()),
            title: Set(album.title),
            year: Set(album.year),
            artist_key: Set(album.artist_key.clone()),
        }
        .insert(&txn)
        .await
        .context("Failed to create album")?;

        entities::artist_album::ActiveModel {
            from_id: Set(Collection::Artists.handle(&album.artist_key)),
            to_id: Set(Collection::Albums.handle(&album.key)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to link album to artist")?;

        txn.commit().await?;

        log::info!("Created album '{}' for artist '{}'", model.key, model.artist_key);
        Ok(model)
    }

    /// Tracks reached through the album's Album -> Track edges, in edge order
    pub async fn tracks(&self, key: &str) -> Result<Vec<entities::track::Model>> {
        self.get(key).await?;

        let edges = entities::album_track::Entity::find()
            .filter(entities::album_track::Column::FromId.eq(Collection::Albums.handle(key)))
            .order_by_asc(entities::album_track::Column::TrackNumber)
            .order_by_asc(entities::album_track::Column::Id)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch album track edges")?;
        let track_keys = keys_in(edges.iter().map(|e| &e.to_id), Collection::Tracks);

        let tracks = entities::track::Entity::find()
            .filter(entities::track::Column::Key.is_in(track_keys.clone()))
            .all(&self.db.conn)
            .await
            .context("Failed to fetch tracks")?;

        Ok(in_key_order(&track_keys, tracks, |t| t.key.as_str()))
    }

    /// Updates title and/or year; absent fields keep their value
    pub async fn update(&self, key: &str, patch: AlbumPatch) -> Result<entities::album::Model> {
        let current = self.get(key).await?;
        if patch.title.is_none() && patch.year.is_none() {
            return Ok(current);
        }

        let mut album = current.into_active_model();
        if let Some(title) = patch.title {
            album.title = Set(title);
        }
        if let Some(year) = patch.year {
            album.year = Set(year);
        }

        album
            .update(&self.db.conn)
            .await
            .context("Failed to update album")
    }
}
