use std::sync::Arc;

use color_eyre::{Result, eyre::Context};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::{CatalogError, keys_in};
use crate::collections::Collection;
use crate::database::Database;
use crate::entities;

pub struct UserService {
    db: Arc<Database>,
}

impl UserService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every user, by name
    pub async fn all(&self) -> Result<Vec<entities::user::Model>> {
        entities::user::Entity::find()
            .order_by_asc(entities::user::Column::Name)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch users")
    }

    /// Playlists reached through the user's User -> Playlist edges, newest first
    pub async fn playlists(&self, key: &str) -> Result<Vec<entities::playlist::Model>> {
        entities::user::Entity::find_by_id(key.to_string())
            .one(&self.db.conn)
            .await
            .context("Failed to fetch user")?
            .ok_or_else(|| CatalogError::not_found(Collection::Users, key))?;

        let edges = entities::user_playlist::Entity::find()
            .filter(entities::user_playlist::Column::FromId.eq(Collection::Users.handle(key)))
            .all(&self.db.conn)
            .await
            .context("Failed to fetch user playlist edges")?;
        let playlist_keys = keys_in(edges.iter().map(|e| &e.to_id), Collection::Playlists);

        entities::playlist::Entity::find()
            .filter(entities::playlist::Column::Key.is_in(playlist_keys))
            .order_by_desc(entities::playlist::Column::CreatedAt)
            .all(&self.db.conn)
            .await
            .context("Failed to fetch playlists")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::seeded_db;

    #[tokio::test]
    async fn test_all_users() {
        let service = UserService::new(seeded_db().await);

        let users = service.all().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Diego", "Luis", "Mia", "Sofía"]);
    }

    #[tokio::test]
    async fn test_playlists_newest_first() {
        let service = UserService::new(seeded_db().await);

        let playlists = service.playlists("u1").await.unwrap();
        let keys: Vec<&str> = playlists.iter().map(|p| p.key.as_str()).collect();
        // p6 was created 2 days before the seed run, p1 five days before
        assert_eq!(keys, vec!["p6", "p1"]);
    }

    #[tokio::test]
    async fn test_playlists_of_unknown_user() {
        let service = UserService::new(seeded_db().await);

        assert!(service.playlists("u404").await.is_err());
    }
}
