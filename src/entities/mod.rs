pub mod album;
pub mod album_track;
pub mod artist;
pub mod artist_album;
pub mod genre;
pub mod graph;
pub mod playlist;
pub mod playlist_track;
pub mod track;
pub mod track_genre;
pub mod user;
pub mod user_playlist;

/// Multi-value genre attributes are stored as a JSON array of genre keys.
pub fn encode_genres<S: AsRef<str>>(genres: &[S]) -> String {
    let genres: Vec<&str> = genres.iter().map(AsRef::as_ref).collect();
    serde_json::to_string(&genres).unwrap_or_else(|_| "[]".to_string())
}

/// Lenient counterpart of [`encode_genres`]: an unreadable column yields no genres.
pub fn decode_genres(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
