use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tracks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub title: String,
    /// Duration in seconds
    pub duration: i32,
    pub album_key: String,
    /// Denormalized copy of the album's artist
    pub artist_key: String,
    pub genres: String, // JSON array of genre keys
    pub plays: i64,

    #[sea_orm(belongs_to, from = "album_key", to = "key")]
    pub album: HasOne<super::album::Entity>,
    #[sea_orm(belongs_to, from = "artist_key", to = "key")]
    pub artist: HasOne<super::artist::Entity>,
}

impl Model {
    pub fn genre_keys(&self) -> Vec<String> {
        super::decode_genres(&self.genres)
    }
}

impl ActiveModelBehavior for ActiveModel {}
