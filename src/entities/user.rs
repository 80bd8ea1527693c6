use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub name: String,
    pub email: String,

    #[sea_orm(has_many)]
    pub playlists: HasMany<super::playlist::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
