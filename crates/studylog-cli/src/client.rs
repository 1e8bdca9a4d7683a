//! Async HTTP client wrapping the studylog JSON API.

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use studylog_core::{
  progress::SubjectProgress,
  session::{NewSession, StudySession},
  subject::{NewSubject, Subject},
};
use uuid::Uuid;

/// Connection settings for the studylog API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the studylog JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<ErrorBody>()
    .await
    .map(|b| b.error)
    .unwrap_or_default();
  Err(anyhow!("{what} → {status} {message}"))
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  async fn send(&self, req: RequestBuilder, what: &str) -> Result<Response> {
    let resp = req.send().await.with_context(|| format!("{what} failed"))?;
    check(resp, what).await
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  /// `GET /api/subjects`
  pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
    self
      .send(self.client.get(self.url("/subjects")), "GET /subjects")
      .await?
      .json()
      .await
      .context("deserialising subjects")
  }

  /// `POST /api/subjects`
  pub async fn add_subject(&self, input: &NewSubject) -> Result<Subject> {
    self
      .send(
        self.client.post(self.url("/subjects")).json(input),
        "POST /subjects",
      )
      .await?
      .json()
      .await
      .context("deserialising created subject")
  }

  /// `DELETE /api/subjects/<id>`
  pub async fn delete_subject(&self, id: Uuid) -> Result<()> {
    self
      .send(
        self.client.delete(self.url(&format!("/subjects/{id}"))),
        "DELETE /subjects",
      )
      .await?;
    Ok(())
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  /// `GET /api/sessions`
  pub async fn list_sessions(&self) -> Result<Vec<StudySession>> {
    self
      .send(self.client.get(self.url("/sessions")), "GET /sessions")
      .await?
      .json()
      .await
      .context("deserialising sessions")
  }

  /// `POST /api/sessions`
  pub async fn add_session(&self, input: &NewSession) -> Result<StudySession> {
    self
      .send(
        self.client.post(self.url("/sessions")).json(input),
        "POST /sessions",
      )
      .await?
      .json()
      .await
      .context("deserialising created session")
  }

  /// `DELETE /api/sessions/<id>`
  pub async fn delete_session(&self, id: Uuid) -> Result<()> {
    self
      .send(
        self.client.delete(self.url(&format!("/sessions/{id}"))),
        "DELETE /sessions",
      )
      .await?;
    Ok(())
  }

  // ── Progress ──────────────────────────────────────────────────────────────

  /// `GET /api/progress?now=<local now>`, so the week is this machine's.
  pub async fn progress(&self) -> Result<Vec<SubjectProgress>> {
    let now = Local::now().to_rfc3339();
    self
      .send(
        self.client.get(self.url("/progress")).query(&[("now", now)]),
        "GET /progress",
      )
      .await?
      .json()
      .await
      .context("deserialising progress")
  }
}
