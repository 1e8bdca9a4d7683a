//! Router tests against an in-memory store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use studylog_core::memory::MemoryStore;
use tower::ServiceExt as _;

use crate::api_router;

fn app() -> Router { api_router(Arc::new(MemoryStore::new())) }

async fn send(
  app:    &Router,
  method: Method,
  uri:    &str,
  body:   Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(json) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(json.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

async fn create_subject(app: &Router, name: &str, weekly_goal: f64) -> String {
  let (status, body) = send(
    app,
    Method::POST,
    "/subjects",
    Some(json!({ "name": name, "weekly_goal": weekly_goal })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  body["subject_id"].as_str().unwrap().to_owned()
}

async fn log_session(app: &Router, subject_id: &str, duration: u32, date: &str) -> String {
  let (status, body) = send(
    app,
    Method::POST,
    "/sessions",
    Some(json!({ "subject_id": subject_id, "duration": duration, "date": date })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  body["session_id"].as_str().unwrap().to_owned()
}

// ── Subjects ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_list_subjects() {
  let app = app();
  let math = create_subject(&app, "Mathematics", 5.0).await;
  let art = create_subject(&app, "Art", 1.0).await;

  let (status, body) = send(&app, Method::GET, "/subjects", None).await;
  assert_eq!(status, StatusCode::OK);
  let ids: Vec<&str> = body
    .as_array()
    .unwrap()
    .iter()
    .map(|s| s["subject_id"].as_str().unwrap())
    .collect();
  assert_eq!(ids, vec![art.as_str(), math.as_str()]);

  let (status, body) = send(&app, Method::GET, &format!("/subjects/{math}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], "Mathematics");
  assert_eq!(body["weekly_goal"], 5.0);
}

#[tokio::test]
async fn blank_subject_name_is_bad_request() {
  let app = app();
  let (status, body) = send(
    &app,
    Method::POST,
    "/subjects",
    Some(json!({ "name": "  ", "weekly_goal": 3 })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("subject name"));
}

#[tokio::test]
async fn non_positive_goal_is_bad_request() {
  let app = app();
  let (status, _) = send(
    &app,
    Method::POST,
    "/subjects",
    Some(json!({ "name": "Physics", "weekly_goal": 0 })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_subject_is_not_found() {
  let app = app();
  let id = uuid::Uuid::new_v4();
  let (status, _) = send(&app, Method::GET, &format!("/subjects/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send(&app, Method::DELETE, &format!("/subjects/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Sessions ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_for_unknown_subject_is_bad_request() {
  let app = app();
  let id = uuid::Uuid::new_v4();
  let (status, body) = send(
    &app,
    Method::POST,
    "/sessions",
    Some(json!({ "subject_id": id, "duration": 30 })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains(&id.to_string()));
}

#[tokio::test]
async fn future_dated_session_is_bad_request() {
  let app = app();
  let math = create_subject(&app, "Mathematics", 5.0).await;
  let (status, _) = send(
    &app,
    Method::POST,
    "/sessions",
    Some(json!({ "subject_id": math, "duration": 30, "date": "2999-01-01T00:00:00Z" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_sessions_filters_by_subject() {
  let app = app();
  let math = create_subject(&app, "Mathematics", 5.0).await;
  let history = create_subject(&app, "History", 2.0).await;
  log_session(&app, &math, 30, "2024-06-10T08:00:00Z").await;
  log_session(&app, &history, 45, "2024-06-10T09:00:00Z").await;

  let (_, all) = send(&app, Method::GET, "/sessions", None).await;
  assert_eq!(all.as_array().unwrap().len(), 2);

  let (status, only) =
    send(&app, Method::GET, &format!("/sessions?subject_id={history}"), None).await;
  assert_eq!(status, StatusCode::OK);
  let only = only.as_array().unwrap();
  assert_eq!(only.len(), 1);
  assert_eq!(only[0]["duration"], 45);
  assert_eq!(only[0]["note"], "");
}

#[tokio::test]
async fn delete_session_then_not_found() {
  let app = app();
  let math = create_subject(&app, "Mathematics", 5.0).await;
  let session = log_session(&app, &math, 30, "2024-06-10T08:00:00Z").await;

  let (status, _) = send(&app, Method::DELETE, &format!("/sessions/{session}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = send(&app, Method::DELETE, &format!("/sessions/{session}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Progress ─────────────────────────────────────────────────────────────────

// 2024-06-09 is a Sunday; 2024-06-12 the following Wednesday.
const WEDNESDAY_NOON: &str = "2024-06-12T12:00:00Z";

#[tokio::test]
async fn weekly_progress_per_subject() {
  let app = app();
  let math = create_subject(&app, "Mathematics", 5.0).await;
  let history = create_subject(&app, "History", 2.0).await;
  let latin = create_subject(&app, "Latin", 4.0).await;

  log_session(&app, &math, 90, "2024-06-10T08:00:00Z").await;
  log_session(&app, &math, 60, "2024-06-11T08:00:00Z").await;
  log_session(&app, &math, 30, "2024-06-08T18:00:00Z").await; // last Saturday
  log_session(&app, &history, 400, "2024-06-11T10:00:00Z").await;

  let (status, body) =
    send(&app, Method::GET, &format!("/progress?now={WEDNESDAY_NOON}"), None).await;
  assert_eq!(status, StatusCode::OK);
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 3);

  let row = |id: &str| {
    rows
      .iter()
      .find(|r| r["subject"]["subject_id"] == id)
      .unwrap()
      .clone()
  };

  let m = row(&math);
  assert_eq!(m["minutes_this_week"], 150);
  assert_eq!(m["hours_this_week"], 2.5);
  assert_eq!(m["percentage"], 50);
  assert_eq!(m["week_start"], "2024-06-09T00:00:00Z");

  let h = row(&history);
  assert_eq!(h["minutes_this_week"], 400);
  assert_eq!(h["percentage"], 100);

  let l = row(&latin);
  assert_eq!(l["minutes_this_week"], 0);
  assert_eq!(l["percentage"], 0);
}

#[tokio::test]
async fn deleted_subject_drops_out_of_progress_but_keeps_sessions() {
  let app = app();
  let math = create_subject(&app, "Mathematics", 5.0).await;
  let history = create_subject(&app, "History", 2.0).await;
  log_session(&app, &math, 60, "2024-06-10T08:00:00Z").await;
  log_session(&app, &history, 60, "2024-06-10T09:00:00Z").await;

  let (status, _) = send(&app, Method::DELETE, &format!("/subjects/{math}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (_, sessions) = send(&app, Method::GET, "/sessions", None).await;
  assert_eq!(sessions.as_array().unwrap().len(), 2);

  let (_, progress) =
    send(&app, Method::GET, &format!("/progress?now={WEDNESDAY_NOON}"), None).await;
  let progress = progress.as_array().unwrap();
  assert_eq!(progress.len(), 1);
  assert_eq!(progress[0]["subject"]["subject_id"], history.as_str());
  assert_eq!(progress[0]["minutes_this_week"], 60);
}

#[tokio::test]
async fn single_subject_progress_follows_client_offset() {
  let app = app();
  let math = create_subject(&app, "Mathematics", 2.0).await;
  log_session(&app, &math, 25, "2024-06-08T16:00:00Z").await; // Sunday 01:00 at +09:00
  log_session(&app, &math, 50, "2024-06-08T14:00:00Z").await; // Saturday 23:00 at +09:00

  // `+` must be percent-encoded in a query string.
  let uri = format!("/subjects/{math}/progress?now=2024-06-09T05:00:00%2B09:00");
  let (status, body) = send(&app, Method::GET, &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["minutes_this_week"], 25);
  assert_eq!(body["week_start"], "2024-06-08T15:00:00Z");

  // The same instant seen from UTC is still the previous week.
  let uri = format!("/subjects/{math}/progress?now=2024-06-08T20:00:00Z");
  let (_, body) = send(&app, Method::GET, &uri, None).await;
  assert_eq!(body["minutes_this_week"], 75);
}

#[tokio::test]
async fn progress_for_missing_subject_is_not_found() {
  let app = app();
  let id = uuid::Uuid::new_v4();
  let (status, _) =
    send(&app, Method::GET, &format!("/subjects/{id}/progress"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
