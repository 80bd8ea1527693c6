use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub name: String,
    pub country: Option<String>,
    pub genres: String, // JSON array of genre keys: ["latin", "pop"]

    #[sea_orm(has_many)]
    pub albums: HasMany<super::album::Entity>,
    #[sea_orm(has_many)]
    pub tracks: HasMany<super::track::Entity>,
}

impl Model {
    pub fn genre_keys(&self) -> Vec<String> {
        super::decode_genres(&self.genres)
    }
}

impl ActiveModelBehavior for ActiveModel {}
