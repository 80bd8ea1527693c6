use std::collections::HashSet;
use std::sync::Arc;

use color_eyre::{Result, eyre::Context};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::{CatalogError, check_range, in_key_order, keys_in};
use crate::collections::Collection;
use crate::database::Database;
use crate::entities::{self, encode_genres};
use crate::seed::ALBUM_TRACK_NUMBER;

pub struct NewTrack {
    pub key: String,
    pub title: String,
    pub duration: i32,
    pub album_key: String,
    pub artist_key: String,
    pub genres: Vec<String>,
    pub plays: i64,
}

#[derive(Debug, Default)]
pub struct TrackPatch {
    pub title: Option<String>,
    pub duration: Option<i32>,
    pub plays: Option<i64>,
    /// Replaces the genre list and the track's Track -> Genre edges
    pub genres: Option<Vec<String>>,
}

impl TrackPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.duration.is_none() && self.plays.is_none() && self.genres.is_none()
    }
}

/// A track with the album and artist it references. Either may be missing if the
/// store was edited behind the catalog's back.
#[derive(Debug, Clone)]
pub struct TrackDetail {
    pub track: entities::track::Model,
    pub album: Option<entities::album::Model>,
    pub artist: Option<entities::artist::Model>,
}

pub struct TrackService {
    db: Arc<Database>,
}

impl TrackService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every track, by title
    pub async fn all(&self) -> Result<Vec<entities::track::Model>> {
        entities::track::Entity::find()
            .order_by_asc(entities::track::Column::Title)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch tracks")
    }

    pub async fn get(&self, key: &str) -> Result<entities::track::Model> {
        entities::track::Entity::find_by_id(key.to_string())
            .one(&self.db.conn)
            .await
            .context("Failed to fetch track")?
            .ok_or_else(|| CatalogError::not_found(Collection::Tracks, key).into())
    }

    /// The `n` most played tracks, 1 <= n <= 100
    pub async fn top(&self, n: u64) -> Result<Vec<entities::track::Model>> {
        check_range("n", n, 1..=100)?;

        entities::track::Entity::find()
            .order_by_desc(entities::track::Column::Plays)
            .order_by_asc(entities::track::Column::Key)
            .limit(n)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch top tracks")
    }

    /// Tracks whose title starts with `prefix`, ignoring case
    pub async fn search(&self, prefix: &str, limit: u64) -> Result<Vec<entities::track::Model>> {
        check_range("limit", limit, 1..=100)?;

        // SQLite's LIKE only folds ASCII case, fold in Rust so "último" finds "Último"
        let prefix = prefix.to_lowercase();
        let tracks = entities::track::Entity::find()
            .order_by_asc(entities::track::Column::Title)
            .all(&self.db.conn)
            .await
            .context("Failed to search tracks")?;

        Ok(tracks
            .into_iter()
            .filter(|t| t.title.to_lowercase().starts_with(&prefix))
            .take(limit as usize)
            .collect())
    }

    pub async fn detail(&self, key: &str) -> Result<TrackDetail> {
        let track = self.get(key).await?;

        let album = entities::album::Entity::find_by_id(track.album_key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to fetch track album")?;
        let artist = entities::artist::Entity::find_by_id(track.artist_key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to fetch track artist")?;

        Ok(TrackDetail {
            track,
            album,
            artist,
        })
    }

    /// Other tracks linked to any of this track's genres, each listed once
    pub async fn recommendations(
        &self,
        key: &str,
        limit: u64,
    ) -> Result<Vec<entities::track::Model>> {
        check_range("limit", limit, 1..=100)?;
        let track = self.get(key).await?;

        let genre_handles: Vec<String> = track
            .genre_keys()
            .iter()
            .map(|g| Collection::Genres.handle(g))
            .collect();
        let own_handle = Collection::Tracks.handle(key);

        let edges = entities::track_genre::Entity::find()
            .filter(entities::track_genre::Column::ToId.is_in(genre_handles))
            .filter(entities::track_genre::Column::FromId.ne(own_handle))
            .order_by_asc(entities::track_genre::Column::Id)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch genre edges")?;

        let mut seen = HashSet::new();
        let distinct: Vec<&String> = edges
            .iter()
            .map(|e| &e.from_id)
            .filter(|handle| seen.insert(*handle))
            .take(limit as usize)
            .collect();
        let track_keys = keys_in(distinct, Collection::Tracks);

        let tracks = entities::track::Entity::find()
            .filter(entities::track::Column::Key.is_in(track_keys.clone()))
            .all(&self.db.conn)
            .await
            .context("Failed to fetch recommended tracks")?;

        Ok(in_key_order(&track_keys, tracks, |t| t.key.as_str()))
    }

    /// Creates the track with its Album -> Track edge and one Track -> Genre edge per
    /// genre present in the genres collection
    pub async fn create(&self, track: NewTrack) -> Result<entities::track::Model> {
        let album = entities::album::Entity::find_by_id(track.album_key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to look up album")?
            .ok_or_else(|| CatalogError::not_found(Collection::Albums, &track.album_key))?;

        let artist = entities::artist::Entity::find_by_id(track.artist_key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to look up artist")?;
        if artist.is_none() {
            return Err(CatalogError::not_found(Collection::Artists, &track.artist_key).into());
        }

        let existing = entities::track::Entity::find_by_id(track.key.clone())
            .one(&self.db.conn)
            .await
            .context("Failed to look up track")?;
        if existing.is_some() {
            return Err(CatalogError::conflict(Collection::Tracks, &track.key).into());
        }

        if album.artist_key != track.artist_key {
            return Err(CatalogError::BadRequest(format!(
                "Track artist '{}' does not match artist '{}' of album '{}'",
                track.artist_key, album.artist_key, album.key
            ))
            .into());
        }

        let txn = self.db.conn.begin().await?;

        let model = entities::track::ActiveModel {
            key: Set(track.key.clone()),
            title: Set(track.title),
            duration: Set(track.duration),
            album_key: Set(track.album_key.clone()),
            artist_key: Set(track.artist_key),
            genres: Set(encode_genres(&track.genres)),
            plays: Set(track.plays),
        }
        .insert(&txn)
        .await
        .context("Failed to create track")?;

        entities::album_track::ActiveModel {
            from_id: Set(Collection::Albums.handle(&track.album_key)),
            to_id: Set(Collection::Tracks.handle(&track.key)),
            track_number: Set(ALBUM_TRACK_NUMBER),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to link track to album")?;

        let linked = link_genres(&txn, &track.key, &track.genres).await?;

        txn.commit().await?;

        log::info!(
            "Created track '{}' on album '{}' ({} genre edges)",
            model.key,
            model.album_key,
            linked
        );
        Ok(model)
    }

    pub async fn update(&self, key: &str, patch: TrackPatch) -> Result<entities::track::Model> {
        let current = self.get(key).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let txn = self.db.conn.begin().await?;

        let mut track = current.into_active_model();
        if let Some(title) = patch.title {
            track.title = Set(title);
        }
        if let Some(duration) = patch.duration {
            track.duration = Set(duration);
        }
        if let Some(plays) = patch.plays {
            track.plays = Set(plays);
        }
        if let Some(genres) = &patch.genres {
            track.genres = Set(encode_genres(genres));

            entities::track_genre::Entity::delete_many()
                .filter(entities::track_genre::Column::FromId.eq(Collection::Tracks.handle(key)))
                .exec(&txn)
                .await
                .context("Failed to unlink track genres")?;
            link_genres(&txn, key, genres).await?;
        }

        let model = track
            .update(&txn)
            .await
            .context("Failed to update track")?;

        txn.commit().await?;
        Ok(model)
    }

    /// Deletes the track and every edge touching it
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.get(key).await?;
        let handle = Collection::Tracks.handle(key);

        let txn = self.db.conn.begin().await?;

        entities::playlist_track::Entity::delete_many()
            .filter(entities::playlist_track::Column::ToId.eq(handle.clone()))
            .exec(&txn)
            .await
            .context("Failed to remove track from playlists")?;
        entities::album_track::Entity::delete_many()
            .filter(entities::album_track::Column::ToId.eq(handle.clone()))
            .exec(&txn)
            .await
            .context("Failed to unlink track from album")?;
        entities::track_genre::Entity::delete_many()
            .filter(entities::track_genre::Column::FromId.eq(handle))
            .exec(&txn)
            .await
            .context("Failed to unlink track genres")?;
        entities::track::Entity::delete_by_id(key.to_string())
            .exec(&txn)
            .await
            .context("Failed to delete track")?;

        txn.commit().await?;

        log::info!("Deleted track '{}'", key);
        Ok(())
    }
}

/// Inserts a Track -> Genre edge for each genre that exists in the genres collection.
/// Returns the number of edges written.
async fn link_genres(txn: &DatabaseTransaction, track_key: &str, genres: &[String]) -> Result<usize> {
    let known: HashSet<String> = entities::genre::Entity::find()
        .filter(entities::genre::Column::Key.is_in(genres.to_vec()))
        .all(txn)
        .await
        .context("Failed to look up genres")?
        .into_iter()
        .map(|g| g.key)
        .collect();

    let edges: Vec<entities::track_genre::ActiveModel> = genres
        .iter()
        .filter(|g| known.contains(*g))
        .map(|g| entities::track_genre::ActiveModel {
            from_id: Set(Collection::Tracks.handle(track_key)),
            to_id: Set(Collection::Genres.handle(g)),
            ..Default::default()
        })
        .collect();

    let count = edges.len();
    if count > 0 {
        entities::track_genre::Entity::insert_many(edges)
            .exec_without_returning(txn)
            .await
            .context("Failed to link track genres")?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::playlist::PlaylistService;
    use crate::test_utils::seeded_db;
    use sea_orm::PaginatorTrait;

    fn new_track(key: &str, album_key: &str, artist_key: &str, genres: &[&str]) -> NewTrack {
        NewTrack {
            key: key.to_string(),
            title: "Fresh Cut".to_string(),
            duration: 200,
            album_key: album_key.to_string(),
            artist_key: artist_key.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            plays: 0,
        }
    }

    async fn genre_targets(db: &Database, key: &str) -> Vec<String> {
        let mut targets: Vec<String> = entities::track_genre::Entity::find()
            .filter(entities::track_genre::Column::FromId.eq(Collection::Tracks.handle(key)))
            .all(&db.conn)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.to_id)
            .collect();
        targets.sort();
        targets
    }

    #[tokio::test]
    async fn test_top_tracks() {
        let service = TrackService::new(seeded_db().await);

        let top = service.top(3).await.unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].key, "t2");
        assert_eq!(top[1].key, "t13");
        assert!(top.windows(2).all(|w| w[0].plays >= w[1].plays));
    }

    #[tokio::test]
    async fn test_top_rejects_out_of_range() {
        let service = TrackService::new(seeded_db().await);

        for n in [0, 101] {
            let err = service.top(n).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CatalogError>(),
                Some(CatalogError::BadRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_prefix() {
        let service = TrackService::new(seeded_db().await);

        let found = service.search("NOCHE", 20).await.unwrap();
        let titles: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();
        assert!(titles.contains(&"Noche en Ruta"));
        assert!(titles.contains(&"Noches Claras"));
        assert!(titles.iter().all(|t| t.to_lowercase().starts_with("noche")));

        let limited = service.search("", 5).await.unwrap();
        assert_eq!(limited.len(), 5);
    }

    #[tokio::test]
    async fn test_search_folds_accented_capitals() {
        let service = TrackService::new(seeded_db().await);

        for prefix in ["último", "Último", "ÚLTIMO"] {
            let found = service.search(prefix, 20).await.unwrap();
            let titles: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();
            assert_eq!(titles, vec!["Último Bus", "Último Sorbo"], "{}", prefix);
        }

        let limited = service.search("último", 1).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].title, "Último Bus");
    }

    #[tokio::test]
    async fn test_detail_joins_album_and_artist() {
        let service = TrackService::new(seeded_db().await);

        let detail = service.detail("t5").await.unwrap();
        assert_eq!(detail.track.title, "The Run");
        assert_eq!(detail.album.unwrap().key, "al3");
        assert_eq!(detail.artist.unwrap().name, "The Night Owls");
    }

    #[tokio::test]
    async fn test_recommendations_share_a_genre() {
        let service = TrackService::new(seeded_db().await);

        let recommended = service.recommendations("t5", 100).await.unwrap();
        assert!(!recommended.is_empty());
        assert!(recommended.iter().all(|t| t.key != "t5"));
        assert!(
            recommended
                .iter()
                .all(|t| t.genre_keys().contains(&"rock".to_string()))
        );

        let keys: HashSet<&str> = recommended.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys.len(), recommended.len());

        let limited = service.recommendations("t5", 3).await.unwrap();
        assert_eq!(limited.len(), 3);
    }

    #[tokio::test]
    async fn test_create_track_links_album_and_known_genres() {
        let db = seeded_db().await;
        let service = TrackService::new(db.clone());

        service
            .create(new_track("t999", "al3", "a2", &["rock", "grunge"]))
            .await
            .unwrap();

        assert_eq!(genre_targets(&db, "t999").await, vec!["genres/rock"]);
        let album_edges = entities::album_track::Entity::find()
            .filter(entities::album_track::Column::ToId.eq("tracks/t999"))
            .count(&db.conn)
            .await
            .unwrap();
        assert_eq!(album_edges, 1);
    }

    #[tokio::test]
    async fn test_create_track_errors() {
        let service = TrackService::new(seeded_db().await);

        let err = service
            .create(new_track("t999", "nope", "a2", &[]))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::not_found(Collection::Albums, "nope"))
        );

        let err = service
            .create(new_track("t5", "al3", "a2", &[]))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CatalogError>(),
            Some(&CatalogError::conflict(Collection::Tracks, "t5"))
        );

        let err = service
            .create(new_track("t999", "al3", "a1", &[]))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_update_track_rewrites_genre_edges() {
        let db = seeded_db().await;
        let service = TrackService::new(db.clone());

        let updated = service
            .update(
                "t1",
                TrackPatch {
                    plays: Some(1000),
                    genres: Some(vec!["jazz".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.plays, 1000);
        assert_eq!(updated.title, "Intro Amanecer");
        assert_eq!(updated.genre_keys(), vec!["jazz".to_string()]);
        assert_eq!(genre_targets(&db, "t1").await, vec!["genres/jazz"]);
    }

    #[tokio::test]
    async fn test_delete_track_removes_edges() {
        let db = seeded_db().await;
        let service = TrackService::new(db.clone());
        PlaylistService::new(db.clone())
            .add_track("p1", "t5", None)
            .await
            .unwrap();

        service.delete("t5").await.unwrap();

        let handle = Collection::Tracks.handle("t5");
        let playlist_edges = entities::playlist_track::Entity::find()
            .filter(entities::playlist_track::Column::ToId.eq(handle.clone()))
            .count(&db.conn)
            .await
            .unwrap();
        let album_edges = entities::album_track::Entity::find()
            .filter(entities::album_track::Column::ToId.eq(handle))
            .count(&db.conn)
            .await
            .unwrap();

        assert_eq!(playlist_edges, 0);
        assert_eq!(album_edges, 0);
        assert!(genre_targets(&db, "t5").await.is_empty());
        assert!(service.get("t5").await.is_err());
    }
}
