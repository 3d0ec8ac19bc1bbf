//! Keeps the client's view of job applications consistent with the server.
//!
//! Reads go through `Query`s subscribed to cache keys. Writes are plain
//! futures that invalidate the affected keys after the server confirms them
//! and before they resolve, so a caller awaiting a mutation knows the
//! refetch has already been requested. The cached list is never patched in
//! place.

use crate::api::types::{
  CreateJobApplicationRequest, JobApplication, UpdateJobApplicationRequest,
};
use crate::api::{ApiError, JobsClient};
use crate::cache::{QueryCache, QueryKey};
use crate::query::Query;

#[derive(Clone)]
pub struct SyncedJobsClient {
  inner: JobsClient,
  cache: QueryCache,
}

impl SyncedJobsClient {
  pub fn new(inner: JobsClient, cache: QueryCache) -> Self {
    Self { inner, cache }
  }

  #[cfg(test)]
  pub fn cache(&self) -> &QueryCache {
    &self.cache
  }

  pub fn base_url(&self) -> &str {
    self.inner.base_url()
  }

  /// Query for the full list, refetched whenever the list key is invalidated.
  pub fn list_query(&self) -> Query<Vec<JobApplication>> {
    let inner = self.inner.clone();
    Query::new(move || {
      let inner = inner.clone();
      async move { inner.list().await.map_err(|e| e.to_string()) }
    })
    .invalidated_by(self.cache.subscribe(&QueryKey::AllApplications))
  }

  /// Query for one application, refetched whenever its key is invalidated.
  pub fn detail_query(&self, id: &str) -> Query<JobApplication> {
    let inner = self.inner.clone();
    let id = id.to_string();
    let key = QueryKey::application(id.clone());
    Query::new(move || {
      let inner = inner.clone();
      let id = id.clone();
      async move { inner.get(&id).await.map_err(|e| e.to_string()) }
    })
    .invalidated_by(self.cache.subscribe(&key))
  }

  pub async fn create(&self, dto: CreateJobApplicationRequest) -> Result<JobApplication, ApiError> {
    let created = self.inner.create(&dto).await.inspect_err(|e| {
      tracing::warn!(status = ?e.status(), error = %e, "create failed");
    })?;
    tracing::info!(id = %created.id, company = %created.company, "created job application");

    self.cache.invalidate(&QueryKey::AllApplications);
    Ok(created)
  }

  pub async fn update(
    &self,
    id: &str,
    dto: UpdateJobApplicationRequest,
  ) -> Result<JobApplication, ApiError> {
    let updated = self.inner.update(id, &dto).await.inspect_err(|e| {
      tracing::warn!(id, status = ?e.status(), error = %e, "update failed");
    })?;
    tracing::info!(id, "updated job application");

    self.cache.invalidate(&QueryKey::AllApplications);
    self.cache.invalidate(&QueryKey::application(id));
    Ok(updated)
  }

  pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
    self.inner.delete(id).await.inspect_err(|e| {
      tracing::warn!(id, status = ?e.status(), error = %e, "delete failed");
    })?;
    tracing::info!(id, "deleted job application");

    self.cache.invalidate(&QueryKey::AllApplications);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::types::ApplicationStatus;
  use crate::format::status_label;
  use crate::i18n::Language;
  use axum::extract::{Path, State};
  use axum::http::StatusCode;
  use axum::routing::get;
  use axum::{Json, Router};
  use std::sync::{Arc, Mutex};
  use std::time::Duration;

  /// In-memory stand-in for the REST backend.
  #[derive(Clone, Default)]
  struct FakeBackend {
    jobs: Arc<Mutex<Vec<JobApplication>>>,
    next_id: Arc<Mutex<u32>>,
    list_calls: Arc<Mutex<u32>>,
  }

  impl FakeBackend {
    fn list_calls(&self) -> u32 {
      *self.list_calls.lock().unwrap()
    }

    fn job_ids(&self) -> Vec<String> {
      self.jobs.lock().unwrap().iter().map(|j| j.id.clone()).collect()
    }
  }

  fn to_job(id: String, dto: CreateJobApplicationRequest) -> JobApplication {
    JobApplication {
      id,
      company: dto.company,
      role: dto.role,
      location: dto.location,
      is_remote: dto.is_remote,
      referral: dto.referral,
      contact_person: dto.contact_person,
      date_applied: dto.date_applied,
      status: dto.status.code(),
      compensation_range: dto.compensation_range,
      last_touch: dto.last_touch,
      next_action: dto.next_action,
      next_action_date: dto.next_action_date,
      notes: dto.notes,
      link: dto.link,
    }
  }

  async fn list(State(backend): State<FakeBackend>) -> Json<Vec<JobApplication>> {
    *backend.list_calls.lock().unwrap() += 1;
    let jobs = backend.jobs.lock().unwrap().clone();
    Json(jobs)
  }

  async fn create(
    State(backend): State<FakeBackend>,
    Json(dto): Json<CreateJobApplicationRequest>,
  ) -> (StatusCode, Json<JobApplication>) {
    let id = {
      let mut next = backend.next_id.lock().unwrap();
      *next += 1;
      format!("job-{}", next)
    };
    let job = to_job(id, dto);
    backend.jobs.lock().unwrap().push(job.clone());
    (StatusCode::CREATED, Json(job))
  }

  async fn get_one(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
  ) -> Result<Json<JobApplication>, StatusCode> {
    let found = backend
      .jobs
      .lock()
      .unwrap()
      .iter()
      .find(|j| j.id == id)
      .cloned();
    found.map(Json).ok_or(StatusCode::NOT_FOUND)
  }

  async fn update(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    Json(dto): Json<UpdateJobApplicationRequest>,
  ) -> Result<Json<JobApplication>, StatusCode> {
    let mut jobs = backend.jobs.lock().unwrap();
    let slot = jobs
      .iter_mut()
      .find(|j| j.id == id)
      .ok_or(StatusCode::NOT_FOUND)?;
    *slot = to_job(id, dto);
    Ok(Json(slot.clone()))
  }

  async fn delete(State(backend): State<FakeBackend>, Path(id): Path<String>) -> StatusCode {
    let mut jobs = backend.jobs.lock().unwrap();
    let before = jobs.len();
    jobs.retain(|j| j.id != id);
    if jobs.len() == before {
      StatusCode::NOT_FOUND
    } else {
      StatusCode::NO_CONTENT
    }
  }

  async fn start() -> (FakeBackend, SyncedJobsClient) {
    let backend = FakeBackend::default();
    let router = Router::new()
      .route("/api/job-applications", get(list).post(create))
      .route(
        "/api/job-applications/:id",
        get(get_one).put(update).delete(delete),
      )
      .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });

    let jobs = JobsClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    (backend, SyncedJobsClient::new(jobs, QueryCache::new()))
  }

  #[tokio::test]
  async fn test_create_invalidates_list_once_and_returns_entity() {
    let (_backend, client) = start().await;
    let cache = client.cache().clone();

    let created = client
      .create(CreateJobApplicationRequest::new("Acme", "Engineer"))
      .await
      .unwrap();

    assert_eq!(created.company, "Acme");
    assert_eq!(created.id, "job-1");
    assert_eq!(cache.generation(&QueryKey::AllApplications), 1);
    assert_eq!(cache.generation(&QueryKey::application("job-1")), 0);
  }

  #[tokio::test]
  async fn test_create_then_list_refetches_and_shows_planned_row() {
    let (backend, client) = start().await;
    let mut list = client.list_query();
    list.fetch();
    list.settle().await;
    assert_eq!(list.data().map(Vec::len), Some(0));
    assert_eq!(backend.list_calls(), 1);

    let mut dto = CreateJobApplicationRequest::new("Acme", "Engineer");
    dto.status = ApplicationStatus::Planned;
    dto.is_remote = false;
    client.create(dto).await.unwrap();

    // The next poll picks up the invalidation and refetches
    assert!(list.poll());
    list.settle().await;
    assert_eq!(backend.list_calls(), 2);

    let rows = list.data().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].company, "Acme");
    assert_eq!(status_label(rows[0].status, Language::En), "Planned");
  }

  #[tokio::test]
  async fn test_update_invalidates_list_and_entity() {
    let (_backend, client) = start().await;
    let created = client
      .create(CreateJobApplicationRequest::new("Acme", "Engineer"))
      .await
      .unwrap();

    let mut detail = client.detail_query(&created.id);
    detail.fetch();
    detail.settle().await;
    assert_eq!(detail.data().map(|j| j.role.as_str()), Some("Engineer"));

    let mut dto = CreateJobApplicationRequest::new("Acme", "Staff Engineer");
    dto.status = ApplicationStatus::Interviewing;
    let updated = client.update(&created.id, dto).await.unwrap();
    assert_eq!(updated.role, "Staff Engineer");

    let cache = client.cache();
    assert_eq!(cache.generation(&QueryKey::AllApplications), 2);
    assert_eq!(cache.generation(&QueryKey::application(&created.id)), 1);

    assert!(detail.poll());
    detail.settle().await;
    assert_eq!(
      detail.data().map(|j| j.role.as_str()),
      Some("Staff Engineer")
    );
  }

  #[tokio::test]
  async fn test_delete_invalidates_list() {
    let (backend, client) = start().await;
    let created = client
      .create(CreateJobApplicationRequest::new("Acme", "Engineer"))
      .await
      .unwrap();

    client.delete(&created.id).await.unwrap();

    assert_eq!(client.cache().generation(&QueryKey::AllApplications), 2);
    assert!(backend.job_ids().is_empty());
  }

  #[tokio::test]
  async fn test_failed_delete_surfaces_status_and_leaves_list_alone() {
    let (backend, client) = start().await;
    client
      .create(CreateJobApplicationRequest::new("Acme", "Engineer"))
      .await
      .unwrap();

    let mut list = client.list_query();
    list.fetch();
    list.settle().await;
    let generation = client.cache().generation(&QueryKey::AllApplications);

    let err = client.delete("does-not-exist").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Request failed (404)");

    // No invalidation, no refetch, row still present
    assert_eq!(
      client.cache().generation(&QueryKey::AllApplications),
      generation
    );
    assert!(!list.poll());
    assert_eq!(list.data().map(Vec::len), Some(1));
    assert_eq!(backend.job_ids(), vec!["job-1".to_string()]);
  }

  #[tokio::test]
  async fn test_failed_update_does_not_invalidate() {
    let (_backend, client) = start().await;

    let err = client
      .update("missing", CreateJobApplicationRequest::new("Acme", "Engineer"))
      .await
      .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(client.cache().generation(&QueryKey::AllApplications), 0);
    assert_eq!(client.cache().generation(&QueryKey::application("missing")), 0);
  }
}
