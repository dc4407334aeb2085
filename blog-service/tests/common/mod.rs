#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::TokenCodec;
use blog_service::config::Config;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::SqlitePostRepository;
use blog_service::outbound::repositories::SqliteUserRepository;
use config::Map;
use serde_json::json;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub pool: SqlitePool,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let environment: Map<String, String> = [("BLOG_JWT__SECRET", JWT_SECRET)]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let config =
            Config::load_from("test", Some(environment)).expect("Failed to load test config");

        let pool = test_pool(&config.database.url).await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let jwt = &config.jwt;

        let authenticator = Arc::new(Authenticator::new(
            jwt.token_codec().expect("Failed to build token codec"),
        ));
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let post_repository = Arc::new(SqlitePostRepository::new(pool.clone()));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repository),
            authenticator,
        ));
        let post_service = Arc::new(PostService::new(post_repository, user_repository));

        let router = create_router(user_service, post_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            pool,
            api_client: reqwest::Client::new(),
            token_codec: jwt.token_codec().expect("Failed to build token codec"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and return the response `data` object
    pub async fn register(&self, name: &str, age: i32, password: &str) -> Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({ "name": name, "age": age, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the access token
    pub async fn login(&self, name: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "name": name, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }
}

/// Fresh in-memory database per test; a single connection keeps it alive.
async fn test_pool(url: &str) -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(url)
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
