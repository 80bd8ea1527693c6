use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Every edge collection shares the same shape: a surrogate id plus the
/// `collection/key` handles of both endpoints.
fn edge_collection<T: IntoTableRef>(table: T) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(Edge::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Edge::FromId).string().not_null())
        .col(ColumnDef::new(Edge::ToId).string().not_null())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(edge_collection(RelArtistAlbum::Table))
            .await?;

        let mut album_track = edge_collection(RelAlbumTrack::Table);
        album_track.col(
            ColumnDef::new(Edge::TrackNumber)
                .integer()
                .not_null()
                .default(1),
        );
        manager.create_table(album_track).await?;

        manager
            .create_table(edge_collection(RelTrackGenre::Table))
            .await?;

        manager
            .create_table(edge_collection(RelUserPlaylist::Table))
            .await?;

        let mut playlist_track = edge_collection(RelPlaylistTrack::Table);
        playlist_track.col(ColumnDef::new(Edge::CreatedAt).big_integer().not_null());
        manager.create_table(playlist_track).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RelPlaylistTrack::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RelUserPlaylist::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RelTrackGenre::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RelAlbumTrack::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RelArtistAlbum::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Edge {
    Id,
    FromId,
    ToId,
    TrackNumber,
    CreatedAt,
}

#[derive(DeriveIden)]
enum RelArtistAlbum {
    Table,
}

#[derive(DeriveIden)]
enum RelAlbumTrack {
    Table,
}

#[derive(DeriveIden)]
enum RelTrackGenre {
    Table,
}

#[derive(DeriveIden)]
enum RelUserPlaylist {
    Table,
}

#[derive(DeriveIden)]
enum RelPlaylistTrack {
    Table,
}
