/// Integration tests for task CRUD
///
/// These tests verify owner-scoped task behavior end-to-end:
/// - Create/list/update/delete through the HTTP surface
/// - Validation messages and their effect on stored state
/// - Ownership isolation between users
///
/// Requires a running PostgreSQL (DATABASE_URL); tests skip otherwise.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use common::TestContext;
use serde_json::json;
use ticklist_shared::auth::jwt::{create_token, Claims};
use ticklist_shared::models::user::{CreateUser, User};
use uuid::Uuid;

fn get_tasks_request(auth: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/tasks")
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap()
}

fn delete_task_request(auth: &str, id: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/tasks/{}", id))
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap()
}

fn authed_json_request(
    auth: &str,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", auth)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A created task comes back with defaults filled in and shows up in the list
#[tokio::test]
async fn test_create_and_list_roundtrip() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let response = common::send(
        &ctx,
        authed_json_request(
            &ctx.auth_header(),
            "POST",
            "/tasks",
            json!({ "title": "Water the plants", "dueDate": "2025-01-01" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = common::response_json(response).await;
    assert_eq!(created["title"], "Water the plants");
    assert_eq!(created["status"], "pending");
    assert_eq!(created["dueDate"], "2025-01-01");
    assert_eq!(created["ownerId"], ctx.user.id.to_string());
    assert!(created["id"].is_string());
    assert!(created["description"].is_null());

    let response = common::send(&ctx, get_tasks_request(&ctx.auth_header())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], created["id"]);

    ctx.cleanup().await;
}

/// Missing title or due date is rejected and nothing is stored
#[tokio::test]
async fn test_create_task_missing_fields() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let response = common::send(
        &ctx,
        authed_json_request(
            &ctx.auth_header(),
            "POST",
            "/tasks",
            json!({ "dueDate": "2025-01-01" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Title is required");

    let response = common::send(
        &ctx,
        authed_json_request(
            &ctx.auth_header(),
            "POST",
            "/tasks",
            json!({ "title": "Water the plants" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Due date is mandatory");

    let response = common::send(&ctx, get_tasks_request(&ctx.auth_header())).await;
    let body = common::response_json(response).await;
    assert!(body["tasks"].as_array().unwrap().is_empty());

    ctx.cleanup().await;
}

/// Syntactically broken bodies still come back as a JSON message
#[tokio::test]
async fn test_malformed_body_returns_json_message() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let response = common::send(
        &ctx,
        Request::builder()
            .method("POST")
            .uri("/tasks")
            .header("authorization", ctx.auth_header())
            .header("content-type", "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::response_json(response).await;
    assert!(body["message"].is_string());

    // An unparseable date is also a 400, not a framework rejection
    let response = common::send(
        &ctx,
        authed_json_request(
            &ctx.auth_header(),
            "POST",
            "/tasks",
            json!({ "title": "Water the plants", "dueDate": "not-a-date" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::response_json(response).await;
    assert!(body["message"].is_string());

    ctx.cleanup().await;
}

/// An explicit status on create is honored
#[tokio::test]
async fn test_create_task_with_explicit_status() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let response = common::send(
        &ctx,
        authed_json_request(
            &ctx.auth_header(),
            "POST",
            "/tasks",
            json!({
                "title": "Repot the ficus",
                "dueDate": "2025-03-15",
                "status": "in-progress",
                "description": "It has outgrown the old pot"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = common::response_json(response).await;
    assert_eq!(created["status"], "in-progress");
    assert_eq!(created["description"], "It has outgrown the old pot");

    ctx.cleanup().await;
}

/// Update overwrites title and due date, keeps omitted description and
/// status, and applies them when provided
#[tokio::test]
async fn test_update_task_fallback_semantics() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let response = common::send(
        &ctx,
        authed_json_request(
            &ctx.auth_header(),
            "POST",
            "/tasks",
            json!({
                "title": "Water the plants",
                "description": "Only the balcony ones",
                "dueDate": "2025-01-01"
            }),
        ),
    )
    .await;
    let created = common::response_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Omitting description and status keeps the stored values; the due
    // date is always overwritten
    let response = common::send(
        &ctx,
        authed_json_request(
            &ctx.auth_header(),
            "PUT",
            &format!("/tasks/{}", id),
            json!({ "title": "Water all plants", "dueDate": "2025-02-02" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = common::response_json(response).await;
    assert_eq!(updated["title"], "Water all plants");
    assert_eq!(updated["description"], "Only the balcony ones");
    assert_eq!(updated["status"], "pending");
    assert_eq!(updated["dueDate"], "2025-02-02");

    // Providing them overwrites
    let response = common::send(
        &ctx,
        authed_json_request(
            &ctx.auth_header(),
            "PUT",
            &format!("/tasks/{}", id),
            json!({
                "title": "Water all plants",
                "description": "Done early",
                "status": "completed",
                "dueDate": "2025-02-02"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = common::response_json(response).await;
    assert_eq!(updated["description"], "Done early");
    assert_eq!(updated["status"], "completed");

    ctx.cleanup().await;
}

/// A failed update validation leaves the stored task untouched
#[tokio::test]
async fn test_update_validation_leaves_task_unchanged() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let task = common::create_test_task(
        &ctx,
        "Water the plants",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    )
    .await;

    for (body, message) in [
        (json!({ "dueDate": "2025-06-01" }), "Title is required"),
        (json!({ "title": "Renamed" }), "Due date is mandatory"),
        (
            json!({ "title": "   ", "dueDate": "2025-06-01" }),
            "Title is required",
        ),
    ] {
        let response = common::send(
            &ctx,
            authed_json_request(
                &ctx.auth_header(),
                "PUT",
                &format!("/tasks/{}", task.id),
                body,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = common::response_json(response).await;
        assert_eq!(json["message"], message);
    }

    // Stored task is exactly as created
    let response = common::send(&ctx, get_tasks_request(&ctx.auth_header())).await;
    let body = common::response_json(response).await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Water the plants");
    assert_eq!(tasks[0]["dueDate"], "2025-01-01");

    ctx.cleanup().await;
}

/// Updating or deleting an unknown id is a 404
#[tokio::test]
async fn test_unknown_task_not_found() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let id = Uuid::new_v4();

    let response = common::send(
        &ctx,
        authed_json_request(
            &ctx.auth_header(),
            "PUT",
            &format!("/tasks/{}", id),
            json!({ "title": "Renamed", "dueDate": "2025-06-01" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Task not found");

    let response = common::send(&ctx, delete_task_request(&ctx.auth_header(), &id.to_string())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Task not found");

    ctx.cleanup().await;
}

/// Another user's task is invisible: not listed, and mutations return the
/// same 404 as a task that does not exist at all
#[tokio::test]
async fn test_cross_user_isolation() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let task = common::create_test_task(
        &ctx,
        "Water the plants",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    )
    .await;

    // Second user, reusing the context's hash to skip a redundant Argon2 run
    let other = User::create(
        &ctx.db,
        CreateUser {
            email: ctx.unique_email("other"),
            password_hash: ctx.user.password_hash.clone(),
        },
    )
    .await
    .unwrap();
    let other_auth = format!(
        "Bearer {}",
        create_token(
            &Claims::access(other.id, other.token_version),
            &ctx.config.jwt.access_secret,
        )
        .unwrap()
    );

    // The other user's list does not contain the task
    let response = common::send(&ctx, get_tasks_request(&other_auth)).await;
    let body = common::response_json(response).await;
    assert!(body["tasks"].as_array().unwrap().is_empty());

    // Update and delete behave exactly as if the task did not exist
    let response = common::send(
        &ctx,
        authed_json_request(
            &other_auth,
            "PUT",
            &format!("/tasks/{}", task.id),
            json!({ "title": "Hijacked", "dueDate": "2025-06-01" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let not_owned = common::response_json(response).await;

    let response = common::send(
        &ctx,
        authed_json_request(
            &other_auth,
            "PUT",
            &format!("/tasks/{}", Uuid::new_v4()),
            json!({ "title": "Hijacked", "dueDate": "2025-06-01" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let missing = common::response_json(response).await;
    assert_eq!(not_owned, missing);

    let response = common::send(
        &ctx,
        delete_task_request(&other_auth, &task.id.to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner still sees the task, untouched
    let response = common::send(&ctx, get_tasks_request(&ctx.auth_header())).await;
    let body = common::response_json(response).await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Water the plants");

    ctx.cleanup().await;
}

/// Delete removes the task and a second delete is a 404
#[tokio::test]
async fn test_delete_task() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let task = common::create_test_task(
        &ctx,
        "Water the plants",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    )
    .await;

    let response = common::send(
        &ctx,
        delete_task_request(&ctx.auth_header(), &task.id.to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Task deleted successfully");

    let response = common::send(
        &ctx,
        delete_task_request(&ctx.auth_header(), &task.id.to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::send(&ctx, get_tasks_request(&ctx.auth_header())).await;
    let body = common::response_json(response).await;
    assert!(body["tasks"].as_array().unwrap().is_empty());

    ctx.cleanup().await;
}

/// Tasks are listed newest first
#[tokio::test]
async fn test_task_list_newest_first() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    common::create_test_task(
        &ctx,
        "First task",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    )
    .await;
    // Distinct created_at timestamps, so the ordering is deterministic
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    common::create_test_task(
        &ctx,
        "Second task",
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
    )
    .await;

    let response = common::send(&ctx, get_tasks_request(&ctx.auth_header())).await;
    let body = common::response_json(response).await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Second task");
    assert_eq!(tasks[1]["title"], "First task");

    ctx.cleanup().await;
}

/// Full scenario: signup, login, work with tasks, logout, and the stale
/// token is rejected
#[tokio::test]
async fn test_full_scenario() {
    let Some(ctx) = TestContext::try_new().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };

    let email = ctx.unique_email("scenario");

    // Signup
    let response = common::send(
        &ctx,
        common::json_request(
            "POST",
            "/auth/signup",
            json!({ "email": email, "password": "hunter2" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Login
    let response = common::send(
        &ctx,
        common::json_request(
            "POST",
            "/auth/login",
            json!({ "email": email, "password": "hunter2" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    let auth = format!("Bearer {}", body["accessToken"].as_str().unwrap());

    // Create two tasks
    let response = common::send(
        &ctx,
        authed_json_request(
            &auth,
            "POST",
            "/tasks",
            json!({ "title": "Buy soil", "dueDate": "2025-05-01" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = common::response_json(response).await;

    let response = common::send(
        &ctx,
        authed_json_request(
            &auth,
            "POST",
            "/tasks",
            json!({ "title": "Repot the ficus", "dueDate": "2025-05-02" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let second = common::response_json(response).await;

    let response = common::send(&ctx, get_tasks_request(&auth)).await;
    let body = common::response_json(response).await;
    assert_eq!(body["tasks"].as_array().unwrap().len(), 2);

    // Complete one, delete the other
    let response = common::send(
        &ctx,
        authed_json_request(
            &auth,
            "PUT",
            &format!("/tasks/{}", second["id"].as_str().unwrap()),
            json!({
                "title": "Repot the ficus",
                "status": "completed",
                "dueDate": "2025-05-02"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::response_json(response).await;
    assert_eq!(updated["status"], "completed");

    let response = common::send(
        &ctx,
        delete_task_request(&auth, first["id"].as_str().unwrap()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::send(&ctx, get_tasks_request(&auth)).await;
    let body = common::response_json(response).await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["status"], "completed");

    // Logout strands the token
    let response = common::send(
        &ctx,
        Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .header("authorization", &auth)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::send(&ctx, get_tasks_request(&auth)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Token version mismatch");

    ctx.cleanup().await;
}
