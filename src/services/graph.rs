use std::collections::HashSet;
use std::sync::Arc;

use color_eyre::{Result, eyre::Context};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::{CatalogError, check_range, in_key_order};
use crate::collections::{Collection, DocumentHandle, EdgeDefinition};
use crate::database::Database;
use crate::entities;

pub const DEFAULT_MAX_DEPTH: u64 = 2;

macro_rules! outbound_from {
    ($conn:expr, $edge:ident, $from:expr) => {
        entities::$edge::Entity::find()
            .filter(entities::$edge::Column::FromId.is_in($from))
            .order_by_asc(entities::$edge::Column::Id)
            .all($conn)
            .await
            .map(|edges| edges.into_iter().map(|e| e.to_id).collect::<Vec<_>>())
    };
}

/// Target handles of the edges in `collection` leaving any of `from`
async fn outbound(
    conn: &DatabaseConnection,
    collection: Collection,
    from: Vec<String>,
) -> Result<Vec<String>> {
    let targets = match collection {
        Collection::RelArtistAlbum => outbound_from!(conn, artist_album, from),
        Collection::RelAlbumTrack => outbound_from!(conn, album_track, from),
        Collection::RelTrackGenre => outbound_from!(conn, track_genre, from),
        Collection::RelUserPlaylist => outbound_from!(conn, user_playlist, from),
        Collection::RelPlaylistTrack => outbound_from!(conn, playlist_track, from),
        vertex => {
            log::warn!("Graph names document collection '{}' as an edge collection", vertex);
            return Ok(Vec::new());
        }
    };
    targets.context(format!("Failed to follow edges in '{}'", collection))
}

/// Breadth-first walks over a named graph. Each vertex is visited at most once.
pub struct GraphService {
    db: Arc<Database>,
}

impl GraphService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn definitions(&self, graph_name: &str) -> Result<Vec<EdgeDefinition>> {
        let graph = entities::graph::Entity::find_by_id(graph_name.to_string())
            .one(&self.db.conn)
            .await
            .context("Failed to fetch graph")?
            .ok_or_else(|| CatalogError::GraphNotFound(graph_name.to_string()))?;

        graph
            .definitions()
            .context(format!("Graph '{}' has unreadable edge definitions", graph_name))
    }

    /// Vertices reachable from `start` by following 1 to `max_depth` outbound edges,
    /// in breadth-first order. `start` itself is not included.
    pub async fn traverse(
        &self,
        graph_name: &str,
        start: DocumentHandle,
        max_depth: u64,
    ) -> Result<Vec<DocumentHandle>> {
        let definitions = self.definitions(graph_name).await?;

        let mut visited = HashSet::from([start.clone()]);
        let mut frontier = vec![start];
        let mut reached = Vec::new();

        for depth in 1..=max_depth {
            if frontier.is_empty() {
                break;
            }

            let mut next = Vec::new();
            for definition in &definitions {
                let sources: Vec<String> = frontier
                    .iter()
                    .filter(|h| definition.from.contains(&h.collection))
                    .map(ToString::to_string)
                    .collect();
                if sources.is_empty() {
                    continue;
                }

                for target in outbound(&self.db.conn, definition.collection, sources).await? {
                    let handle = match target.parse::<DocumentHandle>() {
                        Ok(handle) => handle,
                        Err(e) => {
                            log::warn!("Skipping edge in '{}': {}", definition.collection, e);
                            continue;
                        }
                    };
                    if definition.to.contains(&handle.collection) && visited.insert(handle.clone())
                    {
                        next.push(handle);
                    }
                }
            }

            log::debug!("Depth {}: {} new vertices", depth, next.len());
            reached.extend(next.iter().cloned());
            frontier = next;
        }

        Ok(reached)
    }

    /// Tracks reachable from an artist within `max_depth` hops (1..=3)
    pub async fn artist_tracks(
        &self,
        graph_name: &str,
        artist_key: &str,
        max_depth: u64,
    ) -> Result<Vec<entities::track::Model>> {
        check_range("max_depth", max_depth, 1..=3)?;

        let reached = self
            .traverse(
                graph_name,
                DocumentHandle::new(Collection::Artists, artist_key),
                max_depth,
            )
            .await?;
        let track_keys: Vec<String> = reached
            .into_iter()
            .filter(|h| h.collection == Collection::Tracks)
            .map(|h| h.key)
            .collect();

        let tracks = entities::track::Entity::find()
            .filter(entities::track::Column::Key.is_in(track_keys.clone()))
            .all(&self.db.conn)
            .await
            .context("Failed to fetch reachable tracks")?;

        Ok(in_key_order(&track_keys, tracks, |t| t.key.as_str()))
    }
}
