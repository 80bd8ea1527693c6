use std::sync::Arc;

use color_eyre::{Result, eyre::Context};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::{CatalogError, in_key_order, keys_in};
use crate::collections::Collection;
use crate::database::Database;
use crate::entities::{self, encode_genres};

pub struct NewArtist {
    pub key: String,
    pub name: String,
    pub country: Option<String>,
    pub genres: Vec<String>,
}

/// A track released on one of the artist's albums, with that album's title and year
#[derive(Debug, Clone)]
pub struct DatedTrack {
    pub track: entities::track::Model,
    pub album_title: String,
    pub year: i32,
}

pub struct ArtistService {
    db: Arc<Database>,
}

impl ArtistService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every artist, by name
    pub async fn all(&self) -> Result<Vec<entities::artist::Model>> {
        entities::artist::Entity::find()
            .order_by_asc(entities::artist::Column::Name)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch artists")
    }

    pub async fn get(&self, key: &str) -> Result<entities::artist::Model> {
        entities::artist::Entity::find_by_id(key.to_string())
            .one(&self.db.conn)
            .await
            .context("Failed to fetch artist")?
            .ok_or_else(|| CatalogError::not_found(Collection::Artists, key).into())
    }

    pub async fn create(&self, artist: NewArtist) -> Result<entities::artist::Model> {
        let existing = entities::artist::Entity::find_by_id(artist.key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to look up artist")?;
        if existing.is_some() {
            return Err(CatalogError::conflict(Collection::Artists, &artist.key).into());
        }

        let model = entities::artist::ActiveModel {
            key: Set(artist.key),
            name: Set(artist.name),
            country: Set(artist.country),
            genres: Set(encode_genres(&artist.genres)),
        }
        .insert(&self.db.conn)
        .await
        .context("Failed to create artist")?;

        log::info!("Created artist '{}'", model.key);
        Ok(model)
    }

    /// Albums reached through the artist's Artist -> Album edges, oldest first
    pub async fn albums(&self, key: &str) -> Result<Vec<entities::album::Model>> {
        self.get(key).await?;

        let edges = entities::artist_album::Entity::find()
            .filter(entities::artist_album::Column::FromId.eq(Collection::Artists.handle(key)))
            .all(&self.db.conn)
            .await
            .context("Failed to fetch artist album edges")?;
        let album_keys = keys_in(edges.iter().map(|e| &e.to_id), Collection::Albums);

        entities::album::Entity::find()
            .filter(entities::album::Column::Key.is_in(album_keys))
            .order_by_asc(entities::album::Column::Year)
            .order_by_asc(entities::album::Column::Title)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch albums")
    }

    /// Tracks of the artist's albums released between `year_from` and `year_to`, inclusive
    pub async fn tracks_by_year(
        &self,
        key: &str,
        year_from: i32,
        year_to: i32,
    ) -> Result<Vec<DatedTrack>> {
        if year_from > year_to {
            return Err(CatalogError::BadRequest(
                "year_from must be less than or equal to year_to".to_string(),
            )
            .into());
        }

        let albums = entities::album::Entity::find()
            .filter(entities::album::Column::ArtistKey.eq(key))
            .filter(entities::album::Column::Year.between(year_from, year_to))
            .order_by_asc(entities::album::Column::Year)
            .order_by_asc(entities::album::Column::Title)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch albums in year range")?;

        let mut dated = Vec::new();
        for album in albums {
            let edges = entities::album_track::Entity::find()
                .filter(
                    entities::album_track::Column::FromId.eq(Collection::Albums.handle(&album.key)),
                )
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

            for track in in_key_order(&track_keys, tracks, |t| t.key.as_str()) {
                dated.push(DatedTrack {
                    track,
                    album_title: album.title.clone(),
                    year: album.year,
                });
            }
        }

        Ok(dated)
    }

    /// Number of Album -> Track edges leaving the artist's albums. Unknown artists have
    /// no tracks.
    pub async fn count_tracks(&self, key: &str) -> Result<u64> {
        let album_handles: Vec<String> = entities::artist_album::Entity::find()
            .filter(entities::artist_album::Column::FromId.eq(Collection::Artists.handle(key)))
            .all(&self.db.conn)
            .await
            .context("Failed to fetch artist album edges")?
            .into_iter()
            .map(|e| e.to_id)
            .collect();

        entities::album_track::Entity::find()
            .filter(entities::album_track::Column::FromId.is_in(album_handles))
            .count(&self.db.conn)
            .await
            .context("Failed to count artist tracks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{seeded_db, test_db};

    #[tokio::test]
    async fn test_all_sorted_by_name() {
        let service = ArtistService::new(seeded_db().await);

        let artists = service.all().await.unwrap();
        assert_eq!(artists.len(), 21);
        assert!(artists.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[tokio::test]
    async fn test_albums_of_artist() {
        let service = ArtistService::new(seeded_db().await);

        let albums = service.albums("a2").await.unwrap();
        let keys: Vec<&str> = albums.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["al3", "al4"]);
    }

    #[tokio::test]
    async fn test_albums_of_unknown_artist() {
        let service = ArtistService::new(seeded_db().await);

        let err = service.albums("nobody").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::not_found(Collection::Artists, "nobody"))
        );
    }

    #[tokio::test]
    async fn test_count_tracks() {
        let service = ArtistService::new(seeded_db().await);

        assert_eq!(service.count_tracks("a2").await.unwrap(), 7);
        assert_eq!(service.count_tracks("nobody").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_tracks_by_year() {
        let service = ArtistService::new(seeded_db().await);

        let tracks = service.tracks_by_year("a2", 2020, 2020).await.unwrap();
        assert_eq!(tracks.len(), 4);
        assert!(tracks.iter().all(|t| t.album_title == "Moonlight Run"));
        assert!(tracks.iter().all(|t| t.year == 2020));

        let all = service.tracks_by_year("a2", 1900, 2100).await.unwrap();
        assert_eq!(all.len(), 7);
    }

    #[tokio::test]
    async fn test_tracks_by_year_rejects_inverted_range() {
        let service = ArtistService::new(seeded_db().await);

        let err = service.tracks_by_year("a2", 2022, 2020).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_create_artist() {
        let service = ArtistService::new(test_db().await);

        let artist = service
            .create(NewArtist {
                key: "a99".into(),
                name: "Test Artist".into(),
                country: None,
                genres: vec!["jazz".into()],
            })
            .await
            .unwrap();
        assert_eq!(artist.genre_keys(), vec!["jazz".to_string()]);

        let duplicate = service
            .create(NewArtist {
                key: "a99".into(),
                name: "Other".into(),
                country: Some("PE".into()),
                genres: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(
            duplicate.downcast_ref::<CatalogError>(),
            Some(CatalogError::Conflict { .. })
        ));
    }
}
