use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the graph grouping every edge collection, unless configured otherwise.
pub const DEFAULT_GRAPH_NAME: &str = "musicGraph";

/// The fixed genre enumeration. Genre keys are the genre names.
pub const GENRE_KEYS: [&str; 6] = ["rock", "pop", "jazz", "classical", "electronic", "latin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollectionKind {
    Document,
    Edge,
}

/// Every collection managed by the store: six vertex collections and five edge collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Artists,
    Albums,
    Tracks,
    Users,
    Playlists,
    Genres,
    RelArtistAlbum,
    RelAlbumTrack,
    RelTrackGenre,
    RelUserPlaylist,
    RelPlaylistTrack,
}

impl Collection {
    pub const EDGE: [Collection; 5] = [
        Collection::RelArtistAlbum,
        Collection::RelAlbumTrack,
        Collection::RelTrackGenre,
        Collection::RelUserPlaylist,
        Collection::RelPlaylistTrack,
    ];

    pub const ALL: [Collection; 11] = [
        Collection::Artists,
        Collection::Albums,
        Collection::Tracks,
        Collection::Users,
        Collection::Playlists,
        Collection::Genres,
        Collection::RelArtistAlbum,
        Collection::RelAlbumTrack,
        Collection::RelTrackGenre,
        Collection::RelUserPlaylist,
        Collection::RelPlaylistTrack,
    ];

    /// Table name backing this collection
    pub fn name(self) -> &'static str {
        match self {
            Collection::Artists => "artists",
            Collection::Albums => "albums",
            Collection::Tracks => "tracks",
            Collection::Users => "users",
            Collection::Playlists => "playlists",
            Collection::Genres => "genres",
            Collection::RelArtistAlbum => "rel_artist_album",
            Collection::RelAlbumTrack => "rel_album_track",
            Collection::RelTrackGenre => "rel_track_genre",
            Collection::RelUserPlaylist => "rel_user_playlist",
            Collection::RelPlaylistTrack => "rel_playlist_track",
        }
    }

    pub fn kind(self) -> CollectionKind {
        if Self::EDGE.contains(&self) {
            CollectionKind::Edge
        } else {
            CollectionKind::Document
        }
    }

    /// Document handle (`collection/key`) of a document stored in this collection
    pub fn handle(self, key: &str) -> String {
        format!("{}/{}", self.name(), key)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    #[error("Malformed document handle: `{0}`")]
    Malformed(String),
    #[error("Unknown collection in document handle: `{0}`")]
    UnknownCollection(String),
}

impl FromStr for Collection {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| HandleError::UnknownCollection(s.to_string()))
    }
}

/// A parsed `collection/key` reference, as stored in edge endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentHandle {
    pub collection: Collection,
    pub key: String,
}

impl DocumentHandle {
    pub fn new(collection: Collection, key: impl Into<String>) -> Self {
        Self {
            collection,
            key: key.into(),
        }
    }
}

impl FromStr for DocumentHandle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (collection, key) = s
            .split_once('/')
            .filter(|(c, k)| !c.is_empty() && !k.is_empty())
            .ok_or_else(|| HandleError::Malformed(s.to_string()))?;

        Ok(Self {
            collection: collection.parse()?,
            key: key.to_string(),
        })
    }
}

impl fmt::Display for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.key)
    }
}

/// Allowed source and target vertex collections of one edge collection within a named graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    pub collection: Collection,
    pub from: Vec<Collection>,
    pub to: Vec<Collection>,
}

/// The five edge definitions making up the music graph
pub fn music_graph_edge_definitions() -> Vec<EdgeDefinition> {
    let def = |collection, from, to| EdgeDefinition {
        collection,
        from: vec![from],
        to: vec![to],
    };

    vec![
        def(
            Collection::RelArtistAlbum,
            Collection::Artists,
            Collection::Albums,
        ),
        def(
            Collection::RelAlbumTrack,
            Collection::Albums,
            Collection::Tracks,
        ),
        def(
            Collection::RelTrackGenre,
            Collection::Tracks,
            Collection::Genres,
        ),
        def(
            Collection::RelUserPlaylist,
            Collection::Users,
            Collection::Playlists,
        ),
        def(
            Collection::RelPlaylistTrack,
            Collection::Playlists,
            Collection::Tracks,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_kinds() {
        assert_eq!(
            Collection::ALL
                .iter()
                .filter(|c| c.kind() == CollectionKind::Document)
                .count(),
            6
        );
        assert_eq!(Collection::RelPlaylistTrack.kind(), CollectionKind::Edge);
        assert_eq!(Collection::Genres.kind(), CollectionKind::Document);
    }

    #[test]
    fn test_collection_name_parses_back() {
        for collection in Collection::ALL {
            assert_eq!(collection.name().parse::<Collection>(), Ok(collection));
        }
        assert!("songs".parse::<Collection>().is_err());
    }

    #[test]
    fn test_document_handle_parse() {
        let handle: DocumentHandle = "albums/al3".parse().unwrap();
        assert_eq!(handle, DocumentHandle::new(Collection::Albums, "al3"));
        assert_eq!(handle.to_string(), "albums/al3");
        assert_eq!(Collection::Tracks.handle("t1"), "tracks/t1");
    }

    #[test]
    fn test_document_handle_rejects_malformed() {
        assert!(matches!(
            "albums".parse::<DocumentHandle>(),
            Err(HandleError::Malformed(_))
        ));
        assert!(matches!(
            "albums/".parse::<DocumentHandle>(),
            Err(HandleError::Malformed(_))
        ));
        assert!(matches!(
            "records/r1".parse::<DocumentHandle>(),
            Err(HandleError::UnknownCollection(_))
        ));
    }

    #[test]
    fn test_music_graph_covers_every_edge_collection() {
        let definitions = music_graph_edge_definitions();
        assert_eq!(definitions.len(), 5);
        for edge in Collection::EDGE {
            assert!(definitions.iter().any(|d| d.collection == edge));
        }
        for definition in &definitions {
            assert!(
                definition
                    .from
                    .iter()
                    .chain(&definition.to)
                    .all(|c| c.kind() == CollectionKind::Document)
            );
        }
    }
}
