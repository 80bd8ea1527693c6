use std::sync::Arc;

use color_eyre::{Result, eyre::Context};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use super::{check_range, in_key_order, keys_in};
use crate::collections::Collection;
use crate::database::Database;
use crate::entities;

pub struct GenreService {
    db: Arc<Database>,
}

impl GenreService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn all(&self) -> Result<Vec<entities::genre::Model>> {
        entities::genre::Entity::find()
            .order_by_asc(entities::genre::Column::Key)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch genres")
    }

    /// Tracks with a Track -> Genre edge into the genre, 1 <= limit <= 200. An unknown
    /// genre simply has no tracks.
    pub async fn tracks(&self, key: &str, limit: u64) -> Result<Vec<entities::track::Model>> {
        check_range("limit", limit, 1..=200)?;

        let edges = entities::track_genre::Entity::find()
            .filter(entities::track_genre::Column::ToId.eq(Collection::Genres.handle(key)))
            .order_by_asc(entities::track_genre::Column::Id)
            .limit(limit)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch genre track edges")?;
        let track_keys = keys_in(edges.iter().map(|e| &e.from_id), Collection::Tracks);

        let tracks = entities::track::Entity::find()
            .filter(entities::track::Column::Key.is_in(track_keys.clone()))
            .all(&self.db.conn)
            .await
            .context("Failed to fetch genre tracks")?;

        Ok(in_key_order(&track_keys, tracks, |t| t.key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CatalogError;
    use crate::test_utils::seeded_db;

    #[tokio::test]
    async fn test_all_genres() {
        let service = GenreService::new(seeded_db().await);

        let genres: Vec<String> = service.all().await.unwrap().into_iter().map(|g| g.key).collect();
        assert_eq!(
            genres,
            vec!["classical", "electronic", "jazz", "latin", "pop", "rock"]
        );
    }

    #[tokio::test]
    async fn test_tracks_of_genre() {
        let service = GenreService::new(seeded_db().await);

        let jazz = service.tracks("jazz", 200).await.unwrap();
        assert!(!jazz.is_empty());
        assert!(jazz.iter().all(|t| t.genre_keys().contains(&"jazz".to_string())));

        let limited = service.tracks("jazz", 2).await.unwrap();
        assert_eq!(limited.len(), 2);

        assert!(service.tracks("polka", 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_limit_bounds() {
        let service = GenreService::new(seeded_db().await);

        let err = service.tracks("jazz", 201).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::BadRequest(_))
        ));
    }
}
