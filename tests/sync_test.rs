use std::{env, net::SocketAddr, sync::Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use discotrack::{
    error::{ApiError, SyncError},
    spotify::{self, Session},
    store::CatalogStore,
    sync,
};

/// Serializes tests: the config env vars are process-global, so every test
/// points them at its own mock server while holding this lock.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

async fn spawn_api(build: impl FnOnce(String) -> Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build(format!("http://{addr}"));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn point_config_at(addr: SocketAddr) {
    // Safety: guarded by ENV_LOCK, and tests in this binary only read these
    // vars through the config module after this call.
    unsafe {
        env::set_var("SPOTIFY_API_URL", format!("http://{addr}"));
        env::set_var("SPOTIFY_API_TOKEN_URL", format!("http://{addr}/token"));
        env::set_var("SPOTIFY_CLIENT_ID", "test-client");
        env::set_var("SPOTIFY_CLIENT_SECRET", "test-secret");
    }
}

// ── Mock catalog data ────────────────────────────────────────────────

fn artist_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Test Artist",
        "uri": format!("spotify:artist:{id}"),
        "external_urls": {"spotify": format!("https://open.spotify.com/artist/{id}")},
        "images": [
            {"url": "https://img.example/640.jpg", "width": 640, "height": 640},
            {"url": "https://img.example/300.jpg", "width": 300, "height": 300},
            {"url": "https://img.example/64.jpg", "width": 64, "height": 64}
        ]
    })
}

fn album_item(id: &str, name: &str, release_date: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "release_date": release_date,
        "release_date_precision": "day",
        "album_type": "album",
        "total_tracks": 2,
        "uri": format!("spotify:album:{id}"),
        "external_urls": {"spotify": format!("https://open.spotify.com/album/{id}")},
        "images": [
            {"url": "https://img.example/640.jpg", "width": 640, "height": 640},
            {"url": "https://img.example/300.jpg", "width": 300, "height": 300},
            {"url": "https://img.example/64.jpg", "width": 64, "height": 64}
        ]
    })
}

fn track_item(id: &str, name: &str, track_number: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "track_number": track_number,
        "duration_ms": 185_000,
        "uri": format!("spotify:track:{id}"),
        "external_urls": {"spotify": format!("https://open.spotify.com/track/{id}")}
    })
}

fn albums_for(artist_id: &str) -> Vec<Value> {
    match artist_id {
        // Five albums, served in pages of two: 2 + 2 + 1
        "artist-1" => vec![
            album_item("alb-1", "Album One", "2024-05-01"),
            album_item("alb-2", "Album Two", "2024-03-01"),
            album_item("alb-3", "Album Three", "2023-11-01"),
            album_item("alb-4", "Album Four", "2023-06-01"),
            album_item("alb-5", "Album Five", "2022-01-01"),
        ],
        // One album repeated across pages
        "artist-dup" => vec![
            album_item("dup-1", "Dup One", "2024-01-01"),
            album_item("dup-2", "Dup Two", "2023-01-01"),
            album_item("dup-1", "Dup One", "2024-01-01"),
            album_item("dup-3", "Dup Three", "2022-01-01"),
        ],
        // Track fetching fails for the middle album
        "artist-bad" => vec![
            album_item("bad-1", "Bad Album 1", "2024-01-01"),
            album_item("bad-2", "Bad Album 2", "2023-01-01"),
            album_item("bad-3", "Bad Album 3", "2022-01-01"),
        ],
        _ => Vec::new(),
    }
}

fn tracks_for(album_id: &str) -> Vec<Value> {
    if album_id == "alb-1" {
        // Three tracks so the track listing itself spans two pages
        vec![
            track_item("alb-1-t1", "Opener", 1),
            track_item("alb-1-t2", "Test Song", 2),
            track_item("alb-1-t3", "Closer", 3),
        ]
    } else {
        vec![
            track_item(&format!("{album_id}-t1"), "Side A", 1),
            track_item(&format!("{album_id}-t2"), "Side B", 2),
        ]
    }
}

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default)]
    offset: usize,
}

const MOCK_PAGE_SIZE: usize = 2;

fn page_response(page_url: &str, items: &[Value], offset: usize) -> Value {
    let start = offset.min(items.len());
    let end = (start + MOCK_PAGE_SIZE).min(items.len());
    let next = if end < items.len() {
        Value::String(format!("{page_url}?offset={end}"))
    } else {
        Value::Null
    };
    let page_items = &items[start..end];
    json!({"items": page_items, "next": next, "total": items.len()})
}

fn catalog_app(base: String) -> Router {
    let albums_base = base.clone();
    let tracks_base = base.clone();

    Router::new()
        .route(
            "/token",
            post(|| async {
                Json(json!({
                    "access_token": "test-token",
                    "token_type": "Bearer",
                    "expires_in": 3600
                }))
            }),
        )
        .route(
            "/artists/{artist_id}",
            get(|Path(artist_id): Path<String>| async move {
                if albums_for(&artist_id).is_empty() {
                    Err(StatusCode::NOT_FOUND)
                } else {
                    Ok(Json(artist_json(&artist_id)))
                }
            }),
        )
        .route(
            "/artists/{artist_id}/albums",
            get(
                move |Path(artist_id): Path<String>, Query(query): Query<PageQuery>| {
                    let base = albums_base.clone();
                    async move {
                        let items = albums_for(&artist_id);
                        let page_url = format!("{base}/artists/{artist_id}/albums");
                        Json(page_response(&page_url, &items, query.offset))
                    }
                },
            ),
        )
        .route(
            "/albums/{album_id}/tracks",
            get(
                move |Path(album_id): Path<String>, Query(query): Query<PageQuery>| {
                    let base = tracks_base.clone();
                    async move {
                        if album_id == "bad-2" {
                            return Err(StatusCode::INTERNAL_SERVER_ERROR);
                        }
                        let items = tracks_for(&album_id);
                        let page_url = format!("{base}/albums/{album_id}/tracks");
                        Ok(Json(page_response(&page_url, &items, query.offset)))
                    }
                },
            ),
        )
}

fn broken_token_app(_base: String) -> Router {
    Router::new().route("/token", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
}

// ── Client tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_album_pagination_exhaustion() {
    let _guard = lock_env();
    let addr = spawn_api(catalog_app).await;
    point_config_at(addr);

    let mut session = Session::new();
    let albums = spotify::fetch_all_albums(&mut session, "artist-1")
        .await
        .unwrap();

    // Three pages (2, 2, 1) walked to exhaustion, no duplicates
    assert_eq!(albums.len(), 5);
    let ids: Vec<&str> = albums.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["alb-1", "alb-2", "alb-3", "alb-4", "alb-5"]);
}

#[tokio::test]
async fn test_duplicate_albums_are_removed() {
    let _guard = lock_env();
    let addr = spawn_api(catalog_app).await;
    point_config_at(addr);

    let mut session = Session::new();
    let albums = spotify::fetch_all_albums(&mut session, "artist-dup")
        .await
        .unwrap();

    let ids: Vec<&str> = albums.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["dup-1", "dup-2", "dup-3"]);
}

#[tokio::test]
async fn test_track_listing_spans_pages() {
    let _guard = lock_env();
    let addr = spawn_api(catalog_app).await;
    point_config_at(addr);

    let mut session = Session::new();
    let tracks = spotify::fetch_album_tracks(&mut session, "alb-1")
        .await
        .unwrap();

    assert_eq!(tracks.len(), 3);
    let numbers: Vec<u32> = tracks.iter().map(|t| t.track_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(tracks[1].name, "Test Song");
    assert_eq!(tracks[1].duration, "3:05");
}

#[tokio::test]
async fn test_fetch_artist_not_found() {
    let _guard = lock_env();
    let addr = spawn_api(catalog_app).await;
    point_config_at(addr);

    let mut session = Session::new();
    let err = spotify::fetch_artist(&mut session, "nobody")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

// ── Orchestrator tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_sync_persists_whole_catalog() {
    let _guard = lock_env();
    let addr = spawn_api(catalog_app).await;
    point_config_at(addr);

    let store = CatalogStore::open_in_memory().unwrap();
    let mut session = Session::new();
    let summary = sync::run(&mut session, &store, "artist-1", false)
        .await
        .unwrap();

    assert_eq!(summary.albums_processed, 5);
    assert_eq!(summary.tracks_saved, 11); // 3 + 2 + 2 + 2 + 2
    assert!(summary.skipped_albums.is_empty());

    assert_eq!(store.count_albums().unwrap(), 5);
    assert_eq!(store.count_tracks().unwrap(), 11);

    // Albums come back newest first regardless of insertion order
    let albums = store.list_albums(None).unwrap();
    assert_eq!(albums[0].release_date, "2024-05-01");
    assert_eq!(albums[4].release_date, "2022-01-01");

    // Referential integrity: every row resolves to its parent
    for album in &albums {
        assert!(store.get_artist(&album.artist_id).unwrap().is_some());
        for track in store.list_tracks_for_album(&album.id).unwrap() {
            assert_eq!(track.album_id, album.id);
        }
    }

    // The story renderer's lookup works against the synced data
    let (track, album) = store.find_track_by_title("test song").unwrap().unwrap();
    assert_eq!(track.id, "alb-1-t2");
    assert_eq!(album.id, "alb-1");
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let _guard = lock_env();
    let addr = spawn_api(catalog_app).await;
    point_config_at(addr);

    let store = CatalogStore::open_in_memory().unwrap();
    let mut session = Session::new();

    sync::run(&mut session, &store, "artist-1", false)
        .await
        .unwrap();
    let albums_after_first = store.count_albums().unwrap();
    let tracks_after_first = store.count_tracks().unwrap();

    let summary = sync::run(&mut session, &store, "artist-1", false)
        .await
        .unwrap();

    assert_eq!(summary.albums_processed, 5);
    assert_eq!(store.count_albums().unwrap(), albums_after_first);
    assert_eq!(store.count_tracks().unwrap(), tracks_after_first);
}

#[tokio::test]
async fn test_partial_failure_skips_album_and_continues() {
    let _guard = lock_env();
    let addr = spawn_api(catalog_app).await;
    point_config_at(addr);

    let store = CatalogStore::open_in_memory().unwrap();
    let mut session = Session::new();
    let summary = sync::run(&mut session, &store, "artist-bad", false)
        .await
        .unwrap();

    // Album #2's track fetch fails; #1 and #3 are fully persisted
    assert_eq!(summary.albums_processed, 2);
    assert_eq!(summary.tracks_saved, 4);
    assert_eq!(summary.skipped_albums, vec!["Bad Album 2".to_string()]);

    assert_eq!(store.list_tracks_for_album("bad-1").unwrap().len(), 2);
    assert_eq!(store.list_tracks_for_album("bad-2").unwrap().len(), 0);
    assert_eq!(store.list_tracks_for_album("bad-3").unwrap().len(), 2);
}

#[tokio::test]
async fn test_sync_aborts_for_unknown_artist() {
    let _guard = lock_env();
    let addr = spawn_api(catalog_app).await;
    point_config_at(addr);

    let store = CatalogStore::open_in_memory().unwrap();
    let mut session = Session::new();
    let err = sync::run(&mut session, &store, "nobody", false)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Api(ApiError::NotFound(_))));
    assert_eq!(store.count_albums().unwrap(), 0);
}

#[tokio::test]
async fn test_auth_failure_is_fatal() {
    let _guard = lock_env();
    let addr = spawn_api(broken_token_app).await;
    point_config_at(addr);

    let store = CatalogStore::open_in_memory().unwrap();
    let mut session = Session::new();
    let err = sync::run(&mut session, &store, "artist-1", false)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Api(ApiError::Auth(_))));
}
