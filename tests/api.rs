use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use glowplan::Database;
use glowplan::api::{AppState, router};

fn test_app() -> Router {
    let db = Database::open_in_memory().expect("in-memory database");
    router(AppState::new(db))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn create_task_applies_defaults_and_returns_201() {
    let app = test_app();

    let (status, task) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "title": "Draft Sociology paper" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["title"], "Draft Sociology paper");
    assert_eq!(task["category"], "personal");
    assert_eq!(task["priority"], "medium");
    assert_eq!(task["list"], "daily");
    assert_eq!(task["done"], false);
    assert!(task["id"].is_i64());
}

#[tokio::test]
async fn invalid_create_is_rejected_and_persists_nothing() {
    let app = test_app();

    let (status, error) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "priority": "high" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().contains("title"));

    let (status, tasks) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn task_list_filter_returns_exact_subset() {
    let app = test_app();

    for (title, list) in [
        ("Groceries", "daily"),
        ("Flashcards", "daily"),
        ("Apply for internship", "master"),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(json!({ "title": title, "list": list })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, daily) = send(&app, "GET", "/api/tasks?list=daily", None).await;
    let daily = daily.as_array().unwrap();
    assert_eq!(daily.len(), 2);
    assert!(daily.iter().all(|t| t["list"] == "daily"));

    let (_, master) = send(&app, "GET", "/api/tasks?list=master", None).await;
    assert_eq!(master.as_array().unwrap().len(), 1);

    let (_, all) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn patch_updates_only_supplied_fields() {
    let app = test_app();

    let (_, task) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "title": "Call mom", "priority": "high" })),
    )
    .await;
    let id = task["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/tasks/{}", id),
        Some(json!({ "done": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["done"], true);
    assert_eq!(updated["title"], "Call mom");
    assert_eq!(updated["priority"], "high");
}

#[tokio::test]
async fn patch_of_missing_id_is_404_and_distinct_from_validation() {
    let app = test_app();

    let (status, error) = send(
        &app,
        "PATCH",
        "/api/tasks/4040",
        Some(json!({ "done": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(error["error"].as_str().unwrap().contains("not found"));

    // A type-violating patch is a 400, not a 404
    let (_, task) = send(&app, "POST", "/api/tasks", Some(json!({ "title": "x" }))).await;
    let id = task["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/tasks/{}", id),
        Some(json!({ "done": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_is_idempotent_at_the_transport_level() {
    let app = test_app();

    let (_, task) = send(&app, "POST", "/api/tasks", Some(json!({ "title": "x" }))).await;
    let id = task["id"].as_i64().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/api/tasks/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    // Deleting the same id again is not distinguished from success
    let (status, _) = send(&app, "DELETE", &format!("/api/tasks/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", "/api/tasks/999999", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn habit_upsert_scenario() {
    let app = test_app();

    // First post creates the row
    let (status, habit) = send(
        &app,
        "POST",
        "/api/habits",
        Some(json!({ "habitKey": "water", "value": 3, "target": 8, "date": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(habit["value"], 3);
    let first_id = habit["id"].as_i64().unwrap();

    // Second post for the same (key, date) replaces value on the same row
    let (status, habit) = send(
        &app,
        "POST",
        "/api/habits",
        Some(json!({ "habitKey": "water", "value": 5, "target": 8, "date": "2024-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(habit["value"], 5);
    assert_eq!(habit["id"].as_i64().unwrap(), first_id);

    let (_, rows) = send(&app, "GET", "/api/habits?date=2024-01-01", None).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["value"], 5);
    assert_eq!(rows[0]["target"], 8);
}

#[tokio::test]
async fn habit_validation_failures_are_400() {
    let app = test_app();

    let (status, error) = send(
        &app,
        "POST",
        "/api/habits",
        Some(json!({ "habitKey": "water", "value": 1, "target": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().contains("target"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/habits",
        Some(json!({ "habitKey": "", "value": 1, "target": 8 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn habit_collection_defaults_to_today() {
    let app = test_app();

    // No explicit date: server stamps today on insert and on read
    let (status, habit) = send(
        &app,
        "POST",
        "/api/habits",
        Some(json!({ "habitKey": "skincare", "value": 1, "target": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(habit["date"].is_string());

    let (_, rows) = send(&app, "GET", "/api/habits", None).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn events_filter_and_not_found() {
    let app = test_app();

    let (status, event) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({ "title": "Biology 101", "date": "2024-05-01", "time": "10:00 AM" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["color"], "#F472B6");
    assert_eq!(event["type"], "class");

    let (_, day) = send(&app, "GET", "/api/events?date=2024-05-01", None).await;
    assert_eq!(day.as_array().unwrap().len(), 1);
    let (_, other_day) = send(&app, "GET", "/api/events?date=2024-05-02", None).await;
    assert_eq!(other_day.as_array().unwrap().len(), 0);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/events/555",
        Some(json!({ "title": "Moved" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn focus_sessions_are_append_only_with_server_timestamp() {
    let app = test_app();

    let (status, session) = send(
        &app,
        "POST",
        "/api/focus-sessions",
        Some(json!({ "duration": 25, "date": "2024-05-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["duration"], 25);
    assert!(session["completedAt"].is_string());

    // A supplied completedAt is ignored, never echoed
    let (status, session) = send(
        &app,
        "POST",
        "/api/focus-sessions",
        Some(json!({ "duration": 25, "date": "2024-05-01", "completedAt": "1970-01-01 00:00:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(session["completedAt"], "1970-01-01 00:00:00");

    let (_, sessions) = send(&app, "GET", "/api/focus-sessions?date=2024-05-01", None).await;
    assert_eq!(sessions.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn creator_studio_families_round_trip() {
    let app = test_app();

    // Ideas
    let (status, idea) = send(
        &app,
        "POST",
        "/api/creator-ideas",
        Some(json!({ "title": "Morning Routine (Aesthetic)" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(idea["status"], "Idea");
    assert_eq!(idea["platform"], "TikTok");
    let idea_id = idea["id"].as_i64().unwrap();

    let (status, idea) = send(
        &app,
        "PATCH",
        &format!("/api/creator-ideas/{}", idea_id),
        Some(json!({ "status": "Editing" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(idea["status"], "Editing");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/creator-ideas/{}", idea_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, ideas) = send(&app, "GET", "/api/creator-ideas", None).await;
    assert_eq!(ideas.as_array().unwrap().len(), 0);

    // Editing tasks
    let (status, task) = send(
        &app,
        "POST",
        "/api/editing-tasks",
        Some(json!({ "title": "Morning Routine Vlog", "deadline": "Today" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["status"], "To Edit");

    // Brand deals
    let (status, deal) = send(
        &app,
        "POST",
        "/api/brand-deals",
        Some(json!({ "name": "Glow Recipe", "amount": "$500" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(deal["status"], "Idea");

    let (status, error) = send(
        &app,
        "POST",
        "/api/brand-deals",
        Some(json!({ "amount": "$500" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().contains("name"));
}
