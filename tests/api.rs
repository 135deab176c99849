//! HTTP-level tests: the full router over an in-memory store, driven with
//! a real HTTP client on an ephemeral port.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};

use encore_gateway::api;
use encore_gateway::app_state::AppState;
use encore_gateway::config::{AppConfig, LogFormat};
use encore_gateway::domain::{Concert, ConcertId, NewConcert, Vote, VoteTally, VoteType};
use encore_gateway::persistence::seed::default_catalog;
use encore_gateway::persistence::{ConcertStore, InMemoryStore, StoreError};

struct TestServer {
    base: String,
    store: InMemoryStore,
    client: reqwest::Client,
}

fn test_config(static_dir: Option<PathBuf>) -> AppConfig {
    AppConfig {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: String::new(),
        database_max_connections: 1,
        database_min_connections: 0,
        database_connect_timeout_secs: 1,
        database_statement_timeout_secs: 1,
        seed_on_startup: false,
        static_dir,
        request_timeout_secs: 1,
        log_format: LogFormat::Pretty,
    }
}

async fn serve(store: Arc<dyn ConcertStore>, config: &AppConfig) -> String {
    let app = api::build_app(AppState::new(store), config);

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    base_url(addr)
}

impl TestServer {
    async fn start(store: InMemoryStore) -> Self {
        Self::start_with(store, &test_config(None)).await
    }

    async fn start_with(store: InMemoryStore, config: &AppConfig) -> Self {
        let base = serve(Arc::new(store.clone()), config).await;

        Self {
            base,
            store,
            client: reqwest::Client::new(),
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let Ok(resp) = self.client.get(format!("{}{path}", self.base)).send().await else {
            panic!("GET {path} failed");
        };
        let status = resp.status();
        let Ok(body) = resp.json::<Value>().await else {
            panic!("GET {path} returned non-JSON");
        };
        (status, body)
    }

    async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let Ok(resp) = self.client.get(format!("{}{path}", self.base)).send().await else {
            panic!("GET {path} failed");
        };
        let status = resp.status();
        let Ok(body) = resp.text().await else {
            panic!("GET {path} body unreadable");
        };
        (status, body)
    }

    async fn vote(&self, body: Value) -> (StatusCode, Value) {
        let Ok(resp) = self
            .client
            .post(format!("{}/api/vote", self.base))
            .json(&body)
            .send()
            .await
        else {
            panic!("POST /api/vote failed");
        };
        let status = resp.status();
        let Ok(body) = resp.json::<Value>().await else {
            panic!("POST /api/vote returned non-JSON");
        };
        (status, body)
    }
}

fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

fn concert(title: &str) -> NewConcert {
    NewConcert {
        title: title.to_string(),
        date: "Sunday at 7:00 PM".to_string(),
        venue: "Takoma Station Tavern".to_string(),
        price: "From $23.18".to_string(),
        organizer: "Jazz Kitchen Productions".to_string(),
        description: "Brazilian jazz".to_string(),
        image_url: "https://example.com/a.png".to_string(),
    }
}

#[tokio::test]
async fn lists_concerts_with_catalog_fields() {
    let server = TestServer::start(InMemoryStore::with_concerts(default_catalog())).await;

    let (status, body) = server.get("/api/concerts").await;
    assert_eq!(status, StatusCode::OK);
    let Some(list) = body.as_array() else {
        panic!("expected array");
    };
    assert_eq!(list.len(), 6);
    for field in [
        "id",
        "title",
        "date",
        "venue",
        "price",
        "organizer",
        "description",
        "imageUrl",
    ] {
        assert!(list[0].get(field).is_some(), "missing {field}");
    }
}

#[tokio::test]
async fn get_concert_by_id() {
    let server = TestServer::start(InMemoryStore::with_concerts([concert("A"), concert("B")])).await;

    let (status, body) = server.get("/api/concerts/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["title"], "B");
}

#[tokio::test]
async fn get_concert_errors() {
    let server = TestServer::start(InMemoryStore::with_concerts([concert("A")])).await;

    let (status, body) = server.get("/api/concerts/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);

    let (status, body) = server.get("/api/concerts/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);

    let (status, _) = server.get("/api/concerts/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vote_returns_stored_record() {
    let server = TestServer::start(InMemoryStore::with_concerts([concert("A")])).await;

    let (status, body) = server
        .vote(json!({"concertId": 1, "voteType": "excited"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["concertId"], 1);
    assert_eq!(body["voteType"], "excited");
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn vote_for_unknown_concert_is_not_found_and_not_stored() {
    let server = TestServer::start(InMemoryStore::with_concerts([concert("A")])).await;
    let (_, before) = server.get("/api/vote-stats").await;

    let (status, body) = server
        .vote(json!({"concertId": 999, "voteType": "excited"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["retryable"], false);

    let (_, after) = server.get("/api/vote-stats").await;
    assert_eq!(before, after);
    assert_eq!(server.store.vote_len().await, 0);
}

#[tokio::test]
async fn vote_with_unknown_type_is_invalid_and_not_stored() {
    let server = TestServer::start(InMemoryStore::with_concerts([concert("A")])).await;

    let (status, body) = server
        .vote(json!({"concertId": 1, "voteType": "loved"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1002);
    assert_eq!(server.store.vote_len().await, 0);
}

#[tokio::test]
async fn malformed_vote_bodies_are_invalid() {
    let server = TestServer::start(InMemoryStore::with_concerts([concert("A")])).await;

    let (status, _) = server.vote(json!({"concertId": "one", "voteType": "excited"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server.vote(json!({"voteType": "excited"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server.vote(json!({"concertId": -1, "voteType": "excited"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(server.store.vote_len().await, 0);
}

#[tokio::test]
async fn vote_stats_count_per_concert() {
    let server = TestServer::start(InMemoryStore::with_concerts([
        concert("A"),
        concert("B"),
        concert("C"),
    ]))
    .await;

    for (id, kind) in [(1, "excited"), (1, "interested"), (1, "excited"), (3, "interested")] {
        let (status, _) = server.vote(json!({"concertId": id, "voteType": kind})).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = server.get("/api/vote-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "1": {"excited": 2, "interested": 1},
            "3": {"excited": 0, "interested": 1},
        })
    );
}

#[tokio::test]
async fn rankings_order_by_weighted_score() {
    let server = TestServer::start(InMemoryStore::with_concerts([concert("A"), concert("B")])).await;

    for kind in ["excited", "excited", "excited", "interested"] {
        let _ = server.vote(json!({"concertId": 2, "voteType": kind})).await;
    }

    let (status, body) = server.get("/api/rankings").await;
    assert_eq!(status, StatusCode::OK);
    let Some(list) = body.as_array() else {
        panic!("expected array");
    };
    assert_eq!(list.len(), 2);

    let b = &list[0];
    assert_eq!(b["id"], 2);
    assert_eq!(b["title"], "B");
    assert_eq!(b["excitedVotes"], 3);
    assert_eq!(b["interestedVotes"], 1);
    assert_eq!(b["totalVotes"], 4);
    assert_eq!(b["weightedScore"], 7);
    assert_eq!(b["rank"], 1);
    assert_eq!(b["previousRank"], 1);
    assert_eq!(b["rankChange"], 0);

    let a = &list[1];
    assert_eq!(a["id"], 1);
    assert_eq!(a["weightedScore"], 0);
    assert_eq!(a["totalVotes"], 0);
    assert_eq!(a["rank"], 2);
}

#[tokio::test]
async fn storage_outage_is_retryable_503() {
    let store = InMemoryStore::with_concerts([concert("A")]);
    let server = TestServer::start(store.clone()).await;
    store.set_unavailable(true);

    let (status, body) = server.get("/api/rankings").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["retryable"], true);

    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn health_reports_up() {
    let server = TestServer::start(InMemoryStore::new()).await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn unknown_api_path_is_json_404() {
    let server = TestServer::start(InMemoryStore::with_concerts([concert("A")])).await;

    let (status, body) = server.get("/api/concert").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2002);
    assert_eq!(body["error"]["retryable"], false);
}

/// Writes a throwaway frontend build into a fresh temp directory.
fn frontend_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("encore-gateway-{name}-{}", std::process::id()));
    if let Err(e) = std::fs::create_dir_all(&dir) {
        panic!("cannot create {}: {e}", dir.display());
    }
    if let Err(e) = std::fs::write(dir.join("index.html"), "<html>encore</html>") {
        panic!("cannot write index.html: {e}");
    }
    if let Err(e) = std::fs::write(dir.join("app.js"), "console.log('encore');") {
        panic!("cannot write app.js: {e}");
    }
    dir
}

#[tokio::test]
async fn frontend_serves_files_and_404s_misses() {
    let dir = frontend_dir("static");
    let server = TestServer::start_with(
        InMemoryStore::with_concerts([concert("A")]),
        &test_config(Some(dir.clone())),
    )
    .await;

    let (status, body) = server.get_text("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("encore"));

    let (status, body) = server.get_text("/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("console.log"));

    let (status, _) = server.get_text("/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // API misses are never answered by the frontend.
    let (status, body) = server.get("/api/typo").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2002);

    let (status, body) = server.get("/api/concerts/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "A");

    let _ = std::fs::remove_dir_all(dir);
}

/// Store whose health check hangs past the request timeout.
#[derive(Debug)]
struct StalledStore(InMemoryStore);

#[async_trait]
impl ConcertStore for StalledStore {
    async fn list_concerts(&self) -> Result<Vec<Concert>, StoreError> {
        self.0.list_concerts().await
    }

    async fn get_concert(&self, id: ConcertId) -> Result<Option<Concert>, StoreError> {
        self.0.get_concert(id).await
    }

    async fn insert_vote(
        &self,
        concert_id: ConcertId,
        vote_type: VoteType,
    ) -> Result<Option<Vote>, StoreError> {
        self.0.insert_vote(concert_id, vote_type).await
    }

    async fn vote_counts(&self) -> Result<BTreeMap<ConcertId, VoteTally>, StoreError> {
        self.0.vote_counts().await
    }

    async fn concert_tallies(&self) -> Result<Vec<(Concert, VoteTally)>, StoreError> {
        self.0.concert_tallies().await
    }

    async fn seed_catalog(&self, catalog: &[NewConcert]) -> Result<usize, StoreError> {
        self.0.seed_catalog(catalog).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        self.0.ping().await
    }
}

#[tokio::test]
async fn slow_request_times_out_with_503() {
    let store = StalledStore(InMemoryStore::new());
    let base = serve(Arc::new(store), &test_config(None)).await;

    let Ok(resp) = reqwest::get(format!("{base}/health")).await else {
        panic!("GET /health failed");
    };
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
