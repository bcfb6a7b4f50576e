//! Integration tests for the Valentine backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;
use crate::store::ContentStore;
use crate::{create_router, AppState};

const SECRET: &str = "test-admin-secret";

/// Test fixture for integration tests.
struct TestFixture {
    /// Sends the admin secret with every request
    admin: Client,
    /// Sends no credentials
    anonymous: Client,
    store: Arc<ContentStore>,
    base_url: String,
}

impl TestFixture {
    async fn new() -> Self {
        let store = Arc::new(ContentStore::new());

        let config = Config {
            admin_secret: SECRET.to_string(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            seed_on_start: false,
        };

        let state = AppState {
            store: store.clone(),
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-admin-auth", SECRET.parse().unwrap());

        TestFixture {
            admin: Client::builder().default_headers(headers).build().unwrap(),
            anonymous: Client::new(),
            store,
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self.anonymous.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn page_count(&self) -> usize {
        let (_, body) = self.get_json("/api/valentine-pages").await;
        body["data"].as_array().unwrap().len()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .anonymous
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_list_pages_without_secret() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/valentine-pages").await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let pages = body["data"].as_array().unwrap();
    assert_eq!(pages.len(), 7);
    assert_eq!(pages[0]["day_number"], 1);
    assert_eq!(pages[0]["title"], "Rose Day");
    assert_eq!(pages[0]["photo_count"], 1);
    assert!(pages[0]["cover_photo_url"].is_string());
    assert_eq!(pages[6]["day_number"], 7);
}

#[tokio::test]
async fn test_get_page_by_day_query() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/valentine-pages?day=3").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Chocolate Day");

    let (status, body) = fixture.get_json("/api/valentine-pages?day=30").await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, body) = fixture.get_json("/api/valentine-pages?day=third").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_get_page_detail() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/valentine-pages/2").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["page"]["id"], 2);
    assert_eq!(body["data"]["page"]["title"], "Propose Day");
    let photos = body["data"]["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["caption"], "Memory for day 2");
    assert_eq!(photos[0]["display_date"], Value::Null);

    let (status, _) = fixture.get_json("/api/valentine-pages/99").await;
    assert_eq!(status, 404);

    let (status, body) = fixture.get_json("/api/valentine-pages/abc").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_mutation_without_secret_is_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .anonymous
        .post(fixture.url("/api/valentine-pages"))
        .json(&json!({ "day_number": 8 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(fixture.page_count().await, 7);
}

#[tokio::test]
async fn test_mutation_with_wrong_secret_is_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .anonymous
        .delete(fixture.url("/api/valentine-pages/1"))
        .header("x-admin-auth", "wrong-secret")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    assert!(fixture.store.get_page_by_id(&1_i64).unwrap().is_some());
}

#[tokio::test]
async fn test_bearer_secret_is_accepted() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .anonymous
        .put(fixture.url("/api/site-settings"))
        .bearer_auth(SECRET)
        .json(&json!({ "home_title": "Our Week" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["home_title"], "Our Week");
}

#[tokio::test]
async fn test_page_crud() {
    let fixture = TestFixture::new().await;

    // Create page
    let create_resp = fixture
        .admin
        .post(fixture.url("/api/valentine-pages"))
        .json(&json!({ "day_number": 8, "title": "Extra" }))
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["success"], true);
    let page_id = create_body["data"]["id"].as_i64().unwrap();
    assert_eq!(page_id, 8);
    assert_eq!(create_body["data"]["photo_count"], 0);

    // Listed last
    let (_, list_body) = fixture.get_json("/api/valentine-pages").await;
    let pages = list_body["data"].as_array().unwrap();
    assert_eq!(pages.last().unwrap()["title"], "Extra");

    // Update page
    let update_resp = fixture
        .admin
        .put(fixture.url(&format!("/api/valentine-pages/{}", page_id)))
        .json(&json!({ "subtitle": "Bonus day", "is_locked": true }))
        .send()
        .await
        .unwrap();

    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["title"], "Extra");
    assert_eq!(update_body["data"]["subtitle"], "Bonus day");
    assert_eq!(update_body["data"]["is_locked"], true);

    // Delete page
    let delete_resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/valentine-pages/{}", page_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(delete_resp.status(), 200);
    let delete_body: Value = delete_resp.json().await.unwrap();
    assert_eq!(delete_body["success"], true);
    assert_eq!(delete_body["data"], Value::Null);

    // Verify deleted
    let (status, _) = fixture
        .get_json(&format!("/api/valentine-pages/{}", page_id))
        .await;
    assert_eq!(status, 404);

    let again = fixture
        .admin
        .delete(fixture.url(&format!("/api/valentine-pages/{}", page_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), 404);
}

#[tokio::test]
async fn test_duplicate_day_number_conflicts() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .post(fixture.url("/api/valentine-pages"))
        .json(&json!({ "day_number": "4" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(fixture.page_count().await, 7);

    let update = fixture
        .admin
        .put(fixture.url("/api/valentine-pages/1"))
        .json(&json!({ "day_number": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status(), 409);
}

#[tokio::test]
async fn test_photo_front_insertion() {
    let fixture = TestFixture::new().await;

    let appended = fixture
        .admin
        .post(fixture.url("/api/page-photos"))
        .json(&json!({ "page_id": 1, "photo_url": "https://example.com/second.jpg" }))
        .send()
        .await
        .unwrap();
    assert_eq!(appended.status(), 200);
    let appended: Value = appended.json().await.unwrap();
    assert_eq!(appended["data"]["display_order"], 1);

    let front = fixture
        .admin
        .post(fixture.url("/api/page-photos"))
        .json(&json!({
            "page_id": "1",
            "photo_url": "https://example.com/front.jpg",
            "caption": "Front",
            "display_date": "2025-02-07",
            "display_order": 0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(front.status(), 200);

    let (_, body) = fixture.get_json("/api/valentine-pages/1/photos").await;
    let photos = body["data"].as_array().unwrap();
    let urls: Vec<&str> = photos
        .iter()
        .map(|p| p["photo_url"].as_str().unwrap())
        .collect();
    let orders: Vec<i64> = photos
        .iter()
        .map(|p| p["display_order"].as_i64().unwrap())
        .collect();

    assert_eq!(urls[0], "https://example.com/front.jpg");
    assert_eq!(urls[2], "https://example.com/second.jpg");
    assert_eq!(orders, vec![0, 1, 2]);

    let (_, page) = fixture.get_json("/api/valentine-pages/1").await;
    assert_eq!(
        page["data"]["page"]["cover_photo_url"],
        "https://example.com/front.jpg"
    );
    assert_eq!(page["data"]["page"]["photo_count"], 3);
}

#[tokio::test]
async fn test_photo_validation_errors() {
    let fixture = TestFixture::new().await;

    let cases = [
        (json!({ "page_id": 1, "photo_url": "" }), 400),
        (json!({ "page_id": 77, "photo_url": "https://example.com/a.jpg" }), 404),
        (json!({ "page_id": "one", "photo_url": "https://example.com/a.jpg" }), 400),
        (
            json!({ "page_id": 1, "photo_url": "https://example.com/a.jpg", "display_date": "7 Feb" }),
            400,
        ),
    ];

    for (body, expected) in cases {
        let resp = fixture
            .admin
            .post(fixture.url("/api/page-photos"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), expected, "{body}");
    }

    assert_eq!(fixture.store.list_photos_for_page(&1_i64).unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreadable_body_uses_error_envelope() {
    let fixture = TestFixture::new().await;

    let malformed = fixture
        .admin
        .post(fixture.url("/api/page-photos"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), 400);
    let body: Value = malformed.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
    assert!(body["error"]["message"].is_string());

    let untyped = fixture
        .admin
        .put(fixture.url("/api/valentine-pages/1"))
        .body(r#"{"title":"Plain"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(untyped.status(), 400);
    let body: Value = untyped.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");

    assert_eq!(fixture.store.list_photos_for_page(&1_i64).unwrap().len(), 1);
    let (_, page) = fixture.get_json("/api/valentine-pages/1").await;
    assert_eq!(page["data"]["page"]["title"], "Rose Day");
}

#[tokio::test]
async fn test_photo_update_and_delete() {
    let fixture = TestFixture::new().await;

    let update = fixture
        .admin
        .put(fixture.url("/api/page-photos/1"))
        .json(&json!({ "caption": "Roses", "display_date": "2025-02-07" }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status(), 200);
    let body: Value = update.json().await.unwrap();
    assert_eq!(body["data"]["caption"], "Roses");
    assert_eq!(body["data"]["display_date"], "2025-02-07");

    let missing = fixture
        .admin
        .put(fixture.url("/api/page-photos/404"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    let delete = fixture
        .admin
        .delete(fixture.url("/api/page-photos/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status(), 200);

    let again = fixture
        .admin
        .delete(fixture.url("/api/page-photos/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), 404);

    let (_, page) = fixture.get_json("/api/valentine-pages/1").await;
    assert_eq!(page["data"]["page"]["photo_count"], 0);
    assert_eq!(page["data"]["page"]["cover_photo_url"], Value::Null);
}

#[tokio::test]
async fn test_delete_page_removes_photos() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .delete(fixture.url("/api/valentine-pages/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let (status, body) = fixture.get_json("/api/valentine-pages/5/photos").await;
    assert_eq!(status, 200);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_site_settings_defaults_on_blank() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .put(fixture.url("/api/site-settings"))
        .json(&json!({
            "home_title": "",
            "home_background_url": "",
            "home_music_url": "https://example.com/home.mp3"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let (status, body) = fixture.get_json("/api/site-settings").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["home_title"], "We are here Together");
    assert_eq!(body["data"]["home_background_url"], Value::Null);
    assert_eq!(body["data"]["home_music_url"], "https://example.com/home.mp3");
    assert!(body["data"]["kukku_profile_url"].is_string());
}

#[tokio::test]
async fn test_null_settings_body_changes_nothing() {
    let fixture = TestFixture::new().await;
    let (_, before) = fixture.get_json("/api/site-settings").await;

    let resp = fixture
        .admin
        .put(fixture.url("/api/site-settings"))
        .header("content-type", "application/json")
        .body("null")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"], before["data"]);

    let (_, after) = fixture.get_json("/api/site-settings").await;
    assert_eq!(after["data"], before["data"]);
}

#[tokio::test]
async fn test_seed_and_reset() {
    let fixture = TestFixture::new().await;

    fixture
        .admin
        .post(fixture.url("/api/valentine-pages"))
        .json(&json!({ "day_number": 8 }))
        .send()
        .await
        .unwrap();

    // No body: plain seed keeps existing content
    let seed = fixture
        .admin
        .post(fixture.url("/api/seed-pages"))
        .send()
        .await
        .unwrap();
    assert_eq!(seed.status(), 200);
    let seed: Value = seed.json().await.unwrap();
    assert_eq!(seed["success"], true);
    assert_eq!(seed["message"], "Pages seeded successfully");
    assert_eq!(seed["count"], 8);

    let reset = fixture
        .admin
        .post(fixture.url("/api/seed-pages"))
        .json(&json!({ "forceReset": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(reset.status(), 200);
    let reset: Value = reset.json().await.unwrap();
    assert_eq!(reset["message"], "Pages reset successfully");
    assert_eq!(reset["count"], 7);

    let (_, list) = fixture.get_json("/api/valentine-pages").await;
    let ids: Vec<i64> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn test_seed_requires_secret() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .anonymous
        .post(fixture.url("/api/seed-pages"))
        .json(&json!({ "forceReset": true }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}
