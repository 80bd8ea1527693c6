//! JSON handlers. Request and response bodies use camelCase field names.

pub mod albums;
pub mod artists;
pub mod genres;
pub mod graph;
pub mod health;
pub mod playlists;
pub mod tracks;
pub mod users;
