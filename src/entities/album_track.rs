use sea_orm::entity::prelude::*;

/// Album -> Track edge
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rel_album_track")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub from_id: String,
    pub to_id: String,
    pub track_number: i32,
}

impl ActiveModelBehavior for ActiveModel {}
