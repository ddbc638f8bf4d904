use std::path::Path;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::{Value, json};

use storedesk_api::AppConfig;
use storedesk_auth::{Role, TokenClaims};
use storedesk_core::UserId;

const JWT_SECRET: &str = "black-box-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

fn config(data_dir: &Path) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        jwt_secret: SecretString::from(JWT_SECRET.to_string()),
        token_ttl: ChronoDuration::hours(1),
        data_dir: data_dir.to_path_buf(),
        seed: true,
        self_register_roles: vec![Role::User, Role::StoreOwner],
    }
}

impl TestServer {
    async fn spawn(data_dir: &Path) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let cfg = config(data_dir);
        let services = tokio::task::spawn_blocking(move || {
            storedesk_api::app::services::build_services(&cfg)
        })
        .await
        .unwrap()
        .expect("failed to build services");
        let app = storedesk_api::app::build_app(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(client: &reqwest::Client, base_url: &str, email: &str, password: &str) -> String {
    let res = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK, "login failed for {email}");
    let body: Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn register(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    role: &str,
) -> (String, String) {
    let res = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({ "email": email, "password": "pw123", "name": "Tester", "role": role }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn health_is_public_and_everything_else_needs_a_token() {
    let dir = tempfile::tempdir().unwrap();
    let srv = TestServer::spawn(dir.path()).await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    for path in ["/stores", "/products", "/users", "/dashboard/stats", "/auth/me"] {
        let res = client
            .get(format!("{}{}", srv.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "unauthenticated");
    }
}

#[tokio::test]
async fn foreign_and_expired_tokens_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let srv = TestServer::spawn(dir.path()).await;
    let client = reqwest::Client::new();

    let now = Utc::now();
    let fresh = TokenClaims::new(UserId::new(), "x@x.io", Role::Admin, now, ChronoDuration::minutes(10));
    let forged = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &fresh,
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    let stale = TokenClaims::new(
        UserId::new(),
        "x@x.io",
        Role::Admin,
        now - ChronoDuration::hours(3),
        ChronoDuration::hours(1),
    );
    let expired = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &stale,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    for token in [forged, expired, "garbage".to_string()] {
        let res = client
            .get(format!("{}/stores", srv.base_url))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn seeded_accounts_log_in_and_see_their_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let srv = TestServer::spawn(dir.path()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": "admin@admin.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let owner = login(&client, &srv.base_url, "owner@store.com", "owner123").await;
    let me: Value = client
        .get(format!("{}/auth/me", srv.base_url))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["role"], "store_owner");
    assert!(me.get("passwordHash").is_none());

    let stats: Value = client
        .get(format!("{}/dashboard/stats", srv.base_url))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["totalStores"], 1);
    assert_eq!(stats["totalProducts"], 2);
    assert_eq!(stats["totalStock"], 80);
    assert!((stats["totalValue"].as_f64().unwrap() - 18999.2).abs() < 1e-6);

    let admin = login(&client, &srv.base_url, "admin@admin.com", "admin123").await;
    let stats: Value = client
        .get(format!("{}/dashboard/stats", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["totalUsers"], 3);
    assert_eq!(stats["activeStores"], 1);
}

#[tokio::test]
async fn registration_rules() {
    let dir = tempfile::tempdir().unwrap();
    let srv = TestServer::spawn(dir.path()).await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "new@x.io", "user").await;

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "email": "new@x.io", "password": "pw", "name": "Again" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "email": "boss@x.io", "password": "pw", "name": "Boss", "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "email": "", "password": "pw", "name": "Nobody" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_ownership_follows_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let srv = TestServer::spawn(dir.path()).await;
    let client = reqwest::Client::new();

    let admin = login(&client, &srv.base_url, "admin@admin.com", "admin123").await;
    let (owner_a, owner_a_id) = register(&client, &srv.base_url, "a@x.io", "store_owner").await;
    let (owner_b, _) = register(&client, &srv.base_url, "b@x.io", "store_owner").await;
    let (shopper, _) = register(&client, &srv.base_url, "shopper@x.io", "user").await;

    let res = client
        .post(format!("{}/stores", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "name": "S", "description": "d", "category": "c", "ownerId": owner_a_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let store: Value = res.json().await.unwrap();
    assert_eq!(store["ownerId"], owner_a_id.as_str());
    assert_eq!(store["status"], "active");

    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&owner_a)
        .json(&json!({
            "name": "P", "description": "d", "price": "12.5", "stock": 4,
            "category": "c", "storeId": store["id"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let product: Value = res.json().await.unwrap();
    let product_url = format!("{}/products/{}", srv.base_url, product["id"].as_str().unwrap());
    assert_eq!(product["price"], 12.5);
    assert!(product["image"].as_str().unwrap().starts_with("https://"));

    let res = client
        .put(&product_url)
        .bearer_auth(&owner_b)
        .json(&json!({ "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .put(&product_url)
        .bearer_auth(&admin)
        .json(&json!({ "stock": 9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["stock"], 9);
    assert_eq!(updated["price"], 12.5);
    assert!(updated["updatedAt"].is_string());

    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&shopper)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let visible: Vec<Value> = client
        .get(format!("{}/products", srv.base_url))
        .bearer_auth(&shopper)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(visible.len(), 3);

    let owned: Vec<Value> = client
        .get(format!("{}/products", srv.base_url))
        .bearer_auth(&owner_b)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(owned.is_empty());

    let res = client
        .delete(&product_url)
        .bearer_auth(&owner_a)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product deleted successfully");
}

#[tokio::test]
async fn missing_and_malformed_ids_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let srv = TestServer::spawn(dir.path()).await;
    let client = reqwest::Client::new();
    let (shopper, _) = register(&client, &srv.base_url, "s@x.io", "user").await;

    for url in [
        format!("{}/stores/not-an-id", srv.base_url),
        format!("{}/stores/{}", srv.base_url, uuid_like()),
        format!("{}/products/{}", srv.base_url, uuid_like()),
        format!("{}/users/{}", srv.base_url, uuid_like()),
    ] {
        let res = client.delete(&url).bearer_auth(&shopper).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{url}");
    }
}

#[tokio::test]
async fn user_admin_is_admin_only_and_data_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let client = reqwest::Client::new();

    {
        let srv = TestServer::spawn(dir.path()).await;
        let admin = login(&client, &srv.base_url, "admin@admin.com", "admin123").await;
        let (shopper, shopper_id) = register(&client, &srv.base_url, "s@x.io", "user").await;

        let res = client
            .get(format!("{}/users", srv.base_url))
            .bearer_auth(&shopper)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = client
            .post(format!("{}/users", srv.base_url))
            .bearer_auth(&admin)
            .json(&json!({ "email": "ops@x.io", "password": "pw", "name": "Ops", "role": "admin" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = client
            .delete(format!("{}/users/{}", srv.base_url, shopper_id))
            .bearer_auth(&admin)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    assert!(dir.path().join("users.json").exists());

    let srv = TestServer::spawn(dir.path()).await;
    let admin = login(&client, &srv.base_url, "ops@x.io", "pw").await;
    let users: Vec<Value> = client
        .get(format!("{}/users", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    // three seeded + ops; the seed did not run again
    assert_eq!(users.len(), 4);
    assert!(users.iter().all(|u| u["email"] != "s@x.io"));
}

fn uuid_like() -> String {
    UserId::new().to_string()
}
