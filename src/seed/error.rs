use crate::collections::Collection;

/// Integrity problems found in a dataset before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("Duplicate key `{key}` in collection '{collection}'")]
    DuplicateKey { collection: Collection, key: String },
    #[error("'{collection}' document `{key}` references missing '{target}' document `{missing}`")]
    DanglingReference {
        collection: Collection,
        key: String,
        target: Collection,
        missing: String,
    },
    #[error(
        "Track `{track}` names artist `{artist_key}` but its album `{album_key}` belongs to artist `{album_artist}`"
    )]
    ArtistMismatch {
        track: String,
        artist_key: String,
        album_key: String,
        album_artist: String,
    },
}
