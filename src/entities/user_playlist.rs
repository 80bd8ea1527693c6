use sea_orm::entity::prelude::*;

/// User -> Playlist edge
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rel_user_playlist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub from_id: String,
    pub to_id: String,
}

impl ActiveModelBehavior for ActiveModel {}
