use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post},
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::{
    database::Database,
    http_server::{
        http_routes::{albums, artists, genres, graph, health, playlists, tracks, users},
        state::AppState,
    },
};

pub struct HttpServerConfig {
    pub port: u16,
    pub database: Arc<Database>,
    pub graph_name: String,
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} -> {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Artists
        .route("/artists", post(artists::create_artist))
        .route("/artists/all", get(artists::all_artists))
        .route("/artists/{key}/albums", get(artists::artist_albums))
        .route(
            "/artists/{key}/tracks-by-year",
            get(artists::artist_tracks_by_year),
        )
        .route(
            "/counts/tracks-by-artist/{key}",
            get(artists::count_tracks_by_artist),
        )
        // Albums
        .route("/albums", post(albums::create_album))
        .route("/albums/all", get(albums::all_albums))
        .route("/albums/{key}", patch(albums::update_album))
        .route("/albums/{key}/tracks", get(albums::album_tracks))
        // Tracks
        .route("/tracks", post(tracks::create_track))
        .route("/tracks/all", get(tracks::all_tracks))
        .route("/tracks/top", get(tracks::top_tracks))
        .route(
            "/tracks/{key}",
            patch(tracks::update_track).delete(tracks::delete_track),
        )
        .route("/tracks/{key}/full", get(tracks::track_full))
        .route(
            "/tracks/{key}/recommendations",
            get(tracks::track_recommendations),
        )
        .route("/search/tracks", get(tracks::search_tracks))
        // Users and playlists
        .route("/users/all", get(users::all_users))
        .route("/users/{key}/playlists", get(users::user_playlists))
        .route("/playlists", post(playlists::create_playlist))
        .route("/playlists/all", get(playlists::all_playlists))
        .route("/playlists/{key}", patch(playlists::update_playlist))
        .route(
            "/playlists/{key}/tracks",
            get(playlists::playlist_tracks).post(playlists::add_track_to_playlist),
        )
        .route(
            "/playlists/{key}/tracks/{track_key}",
            delete(playlists::remove_track_from_playlist),
        )
        // Genres and graph
        .route("/genres/all", get(genres::all_genres))
        .route("/genres/{key}/tracks", get(genres::genre_tracks))
        .route(
            "/graph/artist/{key}/tracks",
            get(graph::artist_graph_tracks),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(log_request))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

pub async fn start(config: HttpServerConfig) -> color_eyre::Result<()> {
    let app_state = Arc::new(AppState {
        db: config.database,
        graph_name: config.graph_name,
    });

    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .wrap_err_with(|| eyre!("Failed to bind to port {}", config.port))?;
    log::info!("Listening on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app)
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::DEFAULT_GRAPH_NAME;
    use crate::test_utils::seeded_db;
    use axum::{
        body::Body,
        http::{Method, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        router(Arc::new(AppState {
            db: seeded_db().await,
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
        }))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = axum::http::Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;

        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_listings_use_camel_case() {
        let app = test_app().await;

        let (status, body) = get_json(&app, "/tracks/all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 140);
        assert!(body[0].get("albumKey").is_some());
        assert!(body[0].get("album_key").is_none());

        let (_, playlists) = get_json(&app, "/playlists/all").await;
        assert!(playlists[0].get("createdAt").is_some());

        let (_, genres) = get_json(&app, "/genres/all").await;
        assert_eq!(genres.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_top_tracks_bounds() {
        let app = test_app().await;

        let (status, body) = get_json(&app, "/tracks/top").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);
        assert_eq!(body[0]["key"], "t2");

        let (status, body) = get_json(&app, "/tracks/top?n=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("between 1 and 100"));
    }

    #[tokio::test]
    async fn test_not_found_paths() {
        let app = test_app().await;

        for uri in [
            "/artists/nobody/albums",
            "/albums/nope/tracks",
            "/users/nobody/playlists",
            "/playlists/nope/tracks",
            "/tracks/nope/full",
            "/tracks/nope/recommendations",
        ] {
            let (status, _) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_artist_queries() {
        let app = test_app().await;

        let (_, albums) = get_json(&app, "/artists/a2/albums").await;
        assert_eq!(albums.as_array().unwrap().len(), 2);

        let (_, count) = get_json(&app, "/counts/tracks-by-artist/a2").await;
        assert_eq!(count, json!({ "artistKey": "a2", "tracks": 7 }));

        let (status, _) =
            get_json(&app, "/artists/a2/tracks-by-year?year_from=2023&year_to=2020").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, dated) =
            get_json(&app, "/artists/a2/tracks-by-year?year_from=2022&year_to=2022").await;
        assert_eq!(dated.as_array().unwrap().len(), 3);
        assert_eq!(dated[0]["album"], "Static Roads");
    }

    #[tokio::test]
    async fn test_playlist_order_param() {
        let app = test_app().await;

        let (status, asc) = get_json(&app, "/playlists/p1/tracks?order=asc").await;
        assert_eq!(status, StatusCode::OK);
        let times: Vec<i64> = asc
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["createdAt"].as_i64().unwrap())
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));

        let (status, _) = get_json(&app, "/playlists/p1/tracks?order=sideways").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_track_full_and_search() {
        let app = test_app().await;

        let (_, full) = get_json(&app, "/tracks/t5/full").await;
        assert_eq!(full["track"]["albumKey"], "al3");
        assert_eq!(full["album"]["title"], "Moonlight Run");
        assert_eq!(full["artist"]["name"], "The Night Owls");

        let (_, found) = get_json(&app, "/search/tracks?prefix=intro&limit=5").await;
        assert!(
            found
                .as_array()
                .unwrap()
                .iter()
                .any(|t| t["key"] == "t1")
        );
    }

    #[tokio::test]
    async fn test_graph_traversal() {
        let app = test_app().await;

        let (status, tracks) = get_json(&app, "/graph/artist/a2/tracks").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tracks.as_array().unwrap().len(), 7);

        let (status, _) = get_json(&app, "/graph/artist/a2/tracks?max_depth=4").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_endpoints() {
        let app = test_app().await;

        let artist = json!({ "key": "a99", "name": "New Band", "genres": ["rock"] });
        let (status, _) = send(&app, Method::POST, "/artists", Some(artist.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(&app, Method::POST, "/artists", Some(artist)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let album = json!({ "key": "al99", "title": "Debut", "year": 2025, "artistKey": "a99" });
        let (status, body) = send(&app, Method::POST, "/albums", Some(album)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["artistKey"], "a99");

        let mismatched = json!({
            "key": "t999", "title": "Wrong Owner", "duration": 180,
            "albumKey": "al99", "artistKey": "a1"
        });
        let (status, _) = send(&app, Method::POST, "/tracks", Some(mismatched)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let track = json!({
            "key": "t999", "title": "Opener", "duration": 180,
            "albumKey": "al99", "artistKey": "a99", "genres": ["rock"]
        });
        let (status, body) = send(&app, Method::POST, "/tracks", Some(track)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["plays"], 0);

        let (_, tracks) = get_json(&app, "/albums/al99/tracks").await;
        assert_eq!(tracks[0]["key"], "t999");

        let playlist = json!({ "key": "p99", "title": "Fresh", "userKey": "u2" });
        let (status, body) = send(&app, Method::POST, "/playlists", Some(playlist)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["createdAt"].as_i64().unwrap() > 0);

        let (status, edge) = send(
            &app,
            Method::POST,
            "/playlists/p99/tracks",
            Some(json!({ "trackKey": "t999", "createdAt": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            edge,
            json!({ "from": "playlists/p99", "to": "tracks/t999", "createdAt": 7 })
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_endpoints() {
        let app = test_app().await;

        let (status, album) = send(
            &app,
            Method::PATCH,
            "/albums/al3",
            Some(json!({ "title": "Moonlight Run (Remastered)" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(album["year"], 2020);

        let (_, playlist) = send(
            &app,
            Method::PATCH,
            "/playlists/p1",
            Some(json!({ "title": "Mañanas" })),
        )
        .await;
        assert_eq!(playlist["title"], "Mañanas");

        let (_, track) = send(
            &app,
            Method::PATCH,
            "/tracks/t5",
            Some(json!({ "genres": ["rock", "jazz"] })),
        )
        .await;
        assert_eq!(track["genres"], json!(["rock", "jazz"]));

        let (status, removed) =
            send(&app, Method::DELETE, "/playlists/p1/tracks/t140", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(removed["removed"].is_boolean());

        let (status, deleted) = send(&app, Method::DELETE, "/tracks/t5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, json!({ "deleted": true }));

        let (status, _) = get_json(&app, "/tracks/t5/full").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, "/tracks/t5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
