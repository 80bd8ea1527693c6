use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use super::playlists::PlaylistView;
use crate::entities;
use crate::http_server::{error::Report, state::AppState};
use crate::services::user::UserService;

#[derive(Debug, Serialize)]
pub struct UserView {
    pub key: String,
    pub name: String,
    pub email: String,
}

impl From<entities::user::Model> for UserView {
    fn from(user: entities::user::Model) -> Self {
        Self {
            key: user.key,
            name: user.name,
            email: user.email,
        }
    }
}

pub async fn all_users(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserView>>, Report> {
    let users = UserService::new(app_state.db.clone()).all().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

pub async fn user_playlists(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<PlaylistView>>, Report> {
    let playlists = UserService::new(app_state.db.clone())
        .playlists(&key)
        .await?;
    Ok(Json(playlists.into_iter().map(PlaylistView::from).collect()))
}
