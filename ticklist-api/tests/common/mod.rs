/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test user creation with a real password hash
/// - Token generation for both token kinds
/// - Response parsing helpers
///
/// Integration tests need a running PostgreSQL instance; they skip
/// themselves when `DATABASE_URL` is not set.

use axum::body::Body;
use axum::http::Request;
use sqlx::PgPool;
use ticklist_api::app::{build_router, AppState};
use ticklist_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use ticklist_shared::auth::{jwt, password};
use ticklist_shared::db::migrations;
use ticklist_shared::models::user::{CreateUser, User};
use tower::Service as _;
use uuid::Uuid;

/// Password used for every directly-created test user
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub run_id: Uuid,
    pub user: User,
    pub access_token: String,
    pub renewal_token: String,
}

impl TestContext {
    /// Creates a new test context, or None when DATABASE_URL is not set
    ///
    /// Sets up a fresh user with a real Argon2id hash and a token pair
    /// bound to the user's current session epoch. Every email created
    /// through this context embeds `run_id` so cleanup can remove all of
    /// them in one statement.
    pub async fn try_new() -> Option<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").ok()?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            database: DatabaseConfig {
                url: database_url.clone(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                access_secret: "integration-access-secret-0123456789".to_string(),
                renewal_secret: "integration-renewal-secret-012345678".to_string(),
            },
        };

        let db = PgPool::connect(&database_url)
            .await
            .expect("failed to connect to test database");

        migrations::run_migrations(&db)
            .await
            .expect("failed to run migrations");

        let run_id = Uuid::new_v4();

        let user = User::create(
            &db,
            CreateUser {
                email: format!("ctx-{}@example.com", run_id),
                password_hash: password::hash_password(TEST_PASSWORD)
                    .expect("failed to hash test password"),
            },
        )
        .await
        .expect("failed to create test user");

        let tokens = jwt::issue_token_pair(
            user.id,
            user.token_version,
            &config.jwt.access_secret,
            &config.jwt.renewal_secret,
        )
        .expect("failed to issue test tokens");

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Some(TestContext {
            db,
            app,
            config,
            run_id,
            user,
            access_token: tokens.access_token,
            renewal_token: tokens.renewal_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Returns a Cookie header value carrying the renewal token
    pub fn renewal_cookie(&self) -> String {
        format!("refreshToken={}", self.renewal_token)
    }

    /// Returns an email unique to this test run
    pub fn unique_email(&self, prefix: &str) -> String {
        format!("{}-{}@example.com", prefix, self.run_id)
    }

    /// Cleans up every user (and, via cascade, task) this run created
    pub async fn cleanup(&self) {
        sqlx::query("DELETE FROM users WHERE email LIKE $1")
            .bind(format!("%{}%", self.run_id))
            .execute(&self.db)
            .await
            .expect("failed to clean up test data");
    }
}

/// Sends a request through the router and returns the response
pub async fn send(ctx: &TestContext, request: Request<Body>) -> axum::response::Response {
    ctx.app.clone().call(request).await.unwrap()
}

/// Reads a response body as JSON
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!(
            "response body was not JSON: {}",
            String::from_utf8_lossy(&body)
        )
    })
}

/// Builds a JSON POST/PUT request
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Helper to create a task directly in the database
pub async fn create_test_task(
    ctx: &TestContext,
    title: &str,
    due_date: chrono::NaiveDate,
) -> ticklist_shared::models::task::Task {
    use ticklist_shared::models::task::{CreateTask, Task};

    Task::create(
        &ctx.db,
        CreateTask {
            owner_id: ctx.user.id,
            title: title.to_string(),
            description: None,
            status: None,
            due_date,
        },
    )
    .await
    .expect("failed to create test task")
}
