use std::time::Duration;

use super::types::{CreateJobApplicationRequest, JobApplication, UpdateJobApplicationRequest};
use super::{ApiError, HttpClient};

const APPLICATIONS_PATH: &str = "/api/job-applications";
const HEALTH_PATH: &str = "/health";

/// Typed client for the job applications API
#[derive(Clone, Debug)]
pub struct JobsClient {
  http: HttpClient,
}

impl JobsClient {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
    Ok(Self {
      http: HttpClient::new(base_url, timeout)?,
    })
  }

  pub fn base_url(&self) -> &str {
    self.http.base_url()
  }

  /// List all job applications
  pub async fn list(&self) -> Result<Vec<JobApplication>, ApiError> {
    let jobs: Option<Vec<JobApplication>> = self.http.get(APPLICATIONS_PATH).await?;
    Ok(jobs.unwrap_or_default())
  }

  /// Get a single job application by id
  pub async fn get(&self, id: &str) -> Result<JobApplication, ApiError> {
    let path = application_path(id);
    self
      .http
      .get(&path)
      .await?
      .ok_or(ApiError::EmptyResponse(path))
  }

  pub async fn create(&self, dto: &CreateJobApplicationRequest) -> Result<JobApplication, ApiError> {
    self
      .http
      .post(APPLICATIONS_PATH, dto)
      .await?
      .ok_or_else(|| ApiError::EmptyResponse(APPLICATIONS_PATH.to_string()))
  }

  pub async fn update(
    &self,
    id: &str,
    dto: &UpdateJobApplicationRequest,
  ) -> Result<JobApplication, ApiError> {
    let path = application_path(id);
    self
      .http
      .put(&path, dto)
      .await?
      .ok_or(ApiError::EmptyResponse(path))
  }

  pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
    // The body, if any, is ignored
    let _: Option<serde_json::Value> = self.http.delete(&application_path(id)).await?;
    Ok(())
  }

  /// Probe the backend health endpoint. Any success status counts as healthy.
  pub async fn health(&self) -> Result<(), ApiError> {
    self.http.get_raw(HEALTH_PATH).await?;
    Ok(())
  }
}

fn application_path(id: &str) -> String {
  format!("{}/{}", APPLICATIONS_PATH, id)
}
