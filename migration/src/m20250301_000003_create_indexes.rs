use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (index name, table, column) for every secondary index on the vertex collections.
/// All of them are plain, non-unique indexes.
const VERTEX_INDEXES: [(&str, &str, &str); 12] = [
    ("idx_artists_name", "artists", "name"),
    ("idx_artists_genres", "artists", "genres"),
    ("idx_albums_artist_key", "albums", "artist_key"),
    ("idx_albums_year", "albums", "year"),
    ("idx_tracks_title", "tracks", "title"),
    ("idx_tracks_plays", "tracks", "plays"),
    ("idx_tracks_album_key", "tracks", "album_key"),
    ("idx_tracks_artist_key", "tracks", "artist_key"),
    ("idx_tracks_genres", "tracks", "genres"),
    ("idx_users_email", "users", "email"),
    ("idx_playlists_user_key", "playlists", "user_key"),
    ("idx_playlists_created_at", "playlists", "created_at"),
];

const EDGE_COLLECTIONS: [&str; 5] = [
    "rel_artist_album",
    "rel_album_track",
    "rel_track_genre",
    "rel_user_playlist",
    "rel_playlist_track",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in VERTEX_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Alias::new(table))
                        .col(Alias::new(column))
                        .to_owned(),
                )
                .await?;
        }

        // Edge index: lookups by either endpoint
        for table in EDGE_COLLECTIONS {
            for column in ["from_id", "to_id"] {
                manager
                    .create_index(
                        Index::create()
                            .if_not_exists()
                            .name(format!("idx_{table}_{column}"))
                            .table(Alias::new(table))
                            .col(Alias::new(column))
                            .to_owned(),
                    )
                    .await?;
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in EDGE_COLLECTIONS {
            for column in ["from_id", "to_id"] {
                manager
                    .drop_index(
                        Index::drop()
                            .name(format!("idx_{table}_{column}"))
                            .table(Alias::new(table))
                            .to_owned(),
                    )
                    .await?;
            }
        }

        for (name, table, _) in VERTEX_INDEXES {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(Alias::new(table))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
