use sea_orm::entity::prelude::*;

/// Playlist -> Track edge. `created_at` (epoch milliseconds) orders the playlist.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rel_playlist_track")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub from_id: String,
    pub to_id: String,
    pub created_at: i64,
}

impl ActiveModelBehavior for ActiveModel {}
