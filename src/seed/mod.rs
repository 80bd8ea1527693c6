mod dataset;
mod error;
mod plan;
mod validate;

use std::fmt;
use std::sync::Arc;

use color_eyre::{Result, eyre::Context};
use rand::Rng;
use sea_orm::{DatabaseTransaction, EntityTrait, Set, TransactionTrait};

pub use dataset::Dataset;
pub use error::SeedError;
pub use plan::{ALBUM_TRACK_NUMBER, EdgePlan, plan_edges};
pub use validate::validate;

use crate::collections::Collection;
use crate::database::Database;
use crate::entities::{self, encode_genres};

/// Rows per INSERT statement, well below SQLite's bound parameter limit
const INSERT_BATCH_SIZE: usize = 100;

/// Number of documents/edges a seed run writes, per collection, in `Collection::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub counts: Vec<(Collection, usize)>,
}

impl SeedReport {
    fn new(dataset: &Dataset, plan: &EdgePlan) -> Self {
        let counts = Collection::ALL
            .into_iter()
            .map(|collection| {
                let count = match collection {
                    Collection::Artists => dataset.artists.len(),
                    Collection::Albums => dataset.albums.len(),
                    Collection::Tracks => dataset.tracks.len(),
                    Collection::Users => dataset.users.len(),
                    Collection::Playlists => dataset.playlists.len(),
                    Collection::Genres => dataset.genres.len(),
                    Collection::RelArtistAlbum => plan.artist_album.len(),
                    Collection::RelAlbumTrack => plan.album_track.len(),
                    Collection::RelTrackGenre => plan.track_genre.len(),
                    Collection::RelUserPlaylist => plan.user_playlist.len(),
                    Collection::RelPlaylistTrack => plan.playlist_track.len(),
                };
                (collection, count)
            })
            .collect();
        Self { counts }
    }

    pub fn count(&self, collection: Collection) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == collection)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (collection, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", collection, count)?;
        }
        Ok(())
    }
}

macro_rules! insert_batched {
    ($txn:expr, $entity:path, $collection:expr, $models:expr) => {
        for chunk in $models.chunks(INSERT_BATCH_SIZE) {
            <$entity>::insert_many(chunk.to_vec())
                .exec_without_returning($txn)
                .await
                .context(format!("Failed to insert into '{}'", $collection))?;
        }
    };
}

/// Validates the dataset and plans the edges without touching the database.
pub fn prepare<R: Rng + ?Sized>(
    dataset: &Dataset,
    rng: &mut R,
    now_ms: i64,
) -> Result<(EdgePlan, SeedReport)> {
    validate(dataset).context("Seed dataset failed validation")?;
    let plan = plan_edges(dataset, rng, now_ms);
    let report = SeedReport::new(dataset, &plan);
    Ok((plan, report))
}

/// Empties one collection, keeping its schema and indexes
pub async fn truncate(txn: &DatabaseTransaction, collection: Collection) -> Result<u64> {
    let result = match collection {
        Collection::Artists => entities::artist::Entity::delete_many().exec(txn).await,
        Collection::Albums => entities::album::Entity::delete_many().exec(txn).await,
        Collection::Tracks => entities::track::Entity::delete_many().exec(txn).await,
        Collection::Users => entities::user::Entity::delete_many().exec(txn).await,
        Collection::Playlists => entities::playlist::Entity::delete_many().exec(txn).await,
        Collection::Genres => entities::genre::Entity::delete_many().exec(txn).await,
        Collection::RelArtistAlbum => {
            entities::artist_album::Entity::delete_many()
                .exec(txn)
                .await
        }
        Collection::RelAlbumTrack => entities::album_track::Entity::delete_many().exec(txn).await,
        Collection::RelTrackGenre => entities::track_genre::Entity::delete_many().exec(txn).await,
        Collection::RelUserPlaylist => {
            entities::user_playlist::Entity::delete_many()
                .exec(txn)
                .await
        }
        Collection::RelPlaylistTrack => {
            entities::playlist_track::Entity::delete_many()
                .exec(txn)
                .await
        }
    };

    let result = result.context(format!("Failed to truncate '{}'", collection))?;
    Ok(result.rows_affected)
}

/// Reset-and-load: wipes every collection and loads a dataset plus its edges.
pub struct Seeder {
    db: Arc<Database>,
}

impl Seeder {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Runs the whole pipeline. Validation and planning happen before the first write;
    /// all writes share one transaction, so a failure leaves the previous contents in
    /// place.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
        now_ms: i64,
    ) -> Result<SeedReport> {
        let (plan, report) = prepare(dataset, rng, now_ms)?;

        let txn = self
            .db
            .conn
            .begin()
            .await
            .context("Failed to start seed transaction")?;

        for collection in Collection::ALL {
            let removed = truncate(&txn, collection).await?;
            log::debug!("Truncated '{}' ({} removed)", collection, removed);
        }

        load_documents(&txn, dataset).await?;
        load_edges(&txn, &plan).await?;

        txn.commit()
            .await
            .context("Failed to commit seed transaction")?;

        for (collection, count) in &report.counts {
            log::info!("Seeded '{}': {}", collection, count);
        }

        Ok(report)
    }
}

async fn load_documents(txn: &DatabaseTransaction, dataset: &Dataset) -> Result<()> {
    let genres: Vec<entities::genre::ActiveModel> = dataset
        .genres
        .iter()
        .map(|key| entities::genre::ActiveModel {
            key: Set(key.clone()),
        })
        .collect();
    insert_batched!(txn, entities::genre::Entity, Collection::Genres, genres);

    let artists: Vec<entities::artist::ActiveModel> = dataset
        .artists
        .iter()
        .map(|a| entities::artist::ActiveModel {
            key: Set(a.key.clone()),
            name: Set(a.name.clone()),
            country: Set(Some(a.country.clone())),
            genres: Set(encode_genres(&a.genres)),
        })
        .collect();
    insert_batched!(txn, entities::artist::Entity, Collection::Artists, artists);

    let albums: Vec<entities::album::ActiveModel> = dataset
        .albums
        .iter()
        .map(|a| entities::album::ActiveModel {
            key: Set(a.key.clone()),
            title: Set(a.title.clone()),
            year: Set(a.year),
            artist_key: Set(a.artist_key.clone()),
        })
        .collect();
    insert_batched!(txn, entities::album::Entity, Collection::Albums, albums);

    let tracks: Vec<entities::track::ActiveModel> = dataset
        .tracks
        .iter()
        .map(|t| entities::track::ActiveModel {
            key: Set(t.key.clone()),
            title: Set(t.title.clone()),
            duration: Set(t.duration),
            album_key: Set(t.album_key.clone()),
            artist_key: Set(t.artist_key.clone()),
            genres: Set(encode_genres(&t.genres)),
            plays: Set(t.plays),
        })
        .collect();
    insert_batched!(txn, entities::track::Entity, Collection::Tracks, tracks);

    let users: Vec<entities::user::ActiveModel> = dataset
        .users
        .iter()
        .map(|u| entities::user::ActiveModel {
            key: Set(u.key.clone()),
            name: Set(u.name.clone()),
            email: Set(u.email.clone()),
        })
        .collect();
    insert_batched!(txn, entities::user::Entity, Collection::Users, users);

    let playlists: Vec<entities::playlist::ActiveModel> = dataset
        .playlists
        .iter()
        .map(|p| entities::playlist::ActiveModel {
            key: Set(p.key.clone()),
            title: Set(p.title.clone()),
            user_key: Set(p.user_key.clone()),
            created_at: Set(p.created_at),
        })
        .collect();
    insert_batched!(
        txn,
        entities::playlist::Entity,
        Collection::Playlists,
        playlists
    );

    Ok(())
}

async fn load_edges(txn: &DatabaseTransaction, plan: &EdgePlan) -> Result<()> {
    let artist_album: Vec<entities::artist_album::ActiveModel> = plan
        .artist_album
        .iter()
        .map(|e| entities::artist_album::ActiveModel {
            from_id: Set(e.from_id.clone()),
            to_id: Set(e.to_id.clone()),
            ..Default::default()
        })
        .collect();
    insert_batched!(
        txn,
        entities::artist_album::Entity,
        Collection::RelArtistAlbum,
        artist_album
    );

    let album_track: Vec<entities::album_track::ActiveModel> = plan
        .album_track
        .iter()
        .map(|e| entities::album_track::ActiveModel {
            from_id: Set(e.from_id.clone()),
            to_id: Set(e.to_id.clone()),
            track_number: Set(ALBUM_TRACK_NUMBER),
            ..Default::default()
        })
        .collect();
    insert_batched!(
        txn,
        entities::album_track::Entity,
        Collection::RelAlbumTrack,
        album_track
    );

    let track_genre: Vec<entities::track_genre::ActiveModel> = plan
        .track_genre
        .iter()
        .map(|e| entities::track_genre::ActiveModel {
            from_id: Set(e.from_id.clone()),
            to_id: Set(e.to_id.clone()),
            ..Default::default()
        })
        .collect();
    insert_batched!(
        txn,
        entities::track_genre::Entity,
        Collection::RelTrackGenre,
        track_genre
    );

    let user_playlist: Vec<entities::user_playlist::ActiveModel> = plan
        .user_playlist
        .iter()
        .map(|e| entities::user_playlist::ActiveModel {
            from_id: Set(e.from_id.clone()),
            to_id: Set(e.to_id.clone()),
            ..Default::default()
        })
        .collect();
    insert_batched!(
        txn,
        entities::user_playlist::Entity,
        Collection::RelUserPlaylist,
        user_playlist
    );

    let playlist_track: Vec<entities::playlist_track::ActiveModel> = plan
        .playlist_track
        .iter()
        .map(|e| entities::playlist_track::ActiveModel {
            from_id: Set(e.from_id.clone()),
            to_id: Set(e.to_id.clone()),
            created_at: Set(e.created_at),
            ..Default::default()
        })
        .collect();
    insert_batched!(
        txn,
        entities::playlist_track::Entity,
        Collection::RelPlaylistTrack,
        playlist_track
    );

    Ok(())
}
