use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use super::ApiError;

/// JSON HTTP client bound to a base URL.
///
/// Every request carries `Content-Type: application/json`. Any non-success
/// status becomes `ApiError::Status`. There are no retries at this level.
#[derive(Clone, Debug)]
pub struct HttpClient {
  client: reqwest::Client,
  base_url: String,
}

impl HttpClient {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
    // Fail early on garbage instead of on the first request
    Url::parse(base_url)?;

    let client = reqwest::Client::builder().timeout(timeout).build()?;

    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn url(&self, path: &str) -> Result<Url, ApiError> {
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
  }

  pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
    self.request(Method::GET, path, None).await
  }

  pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
  where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
  {
    let body = serde_json::to_vec(body)?;
    self.request(Method::POST, path, Some(body)).await
  }

  pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
  where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
  {
    let body = serde_json::to_vec(body)?;
    self.request(Method::PUT, path, Some(body)).await
  }

  pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
    self.request(Method::DELETE, path, None).await
  }

  /// GET without decoding; succeeds on any success status.
  pub async fn get_raw(&self, path: &str) -> Result<reqwest::Response, ApiError> {
    let url = self.url(path)?;
    tracing::debug!(%url, "GET (raw)");

    let response = self.client.get(url).send().await?;
    check_status(response, path).await
  }

  async fn request<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    body: Option<Vec<u8>>,
  ) -> Result<Option<T>, ApiError> {
    let url = self.url(path)?;
    tracing::debug!(%method, %url, "request");

    let mut builder = self
      .client
      .request(method, url)
      .header(CONTENT_TYPE, "application/json");
    if let Some(body) = body {
      builder = builder.body(body);
    }

    let response = check_status(builder.send().await?, path).await?;
    if response.status() == StatusCode::NO_CONTENT {
      return Ok(None);
    }

    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Ok(None);
    }

    Ok(Some(serde_json::from_slice(&bytes)?))
  }
}

async fn check_status(response: reqwest::Response, path: &str) -> Result<reqwest::Response, ApiError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let body = response.text().await.ok().filter(|t| !t.trim().is_empty());
  tracing::warn!(status = status.as_u16(), path, "request failed");

  Err(ApiError::Status {
    status: status.as_u16(),
    body,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::{HeaderMap, StatusCode as AxumStatus};
  use axum::routing::{get, post};
  use axum::{Json, Router};
  use serde_json::{json, Value};

  async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
  }

  fn client(base: &str) -> HttpClient {
    HttpClient::new(base, Duration::from_secs(5)).unwrap()
  }

  #[tokio::test]
  async fn test_get_decodes_json() {
    let base = serve(Router::new().route("/items", get(|| async { Json(json!([1, 2, 3])) }))).await;

    let items: Option<Vec<i32>> = client(&base).get("/items").await.unwrap();
    assert_eq!(items, Some(vec![1, 2, 3]));
  }

  #[tokio::test]
  async fn test_post_sends_json_content_type_and_body() {
    let router = Router::new().route(
      "/echo",
      post(|headers: HeaderMap, Json(body): Json<Value>| async move {
        let content_type = headers
          .get("content-type")
          .and_then(|v| v.to_str().ok())
          .unwrap_or_default()
          .to_string();
        Json(json!({ "contentType": content_type, "body": body }))
      }),
    );
    let base = serve(router).await;

    let echoed: Value = client(&base)
      .post("/echo", &json!({ "company": "Acme" }))
      .await
      .unwrap()
      .unwrap();
    assert_eq!(echoed["contentType"], "application/json");
    assert_eq!(echoed["body"]["company"], "Acme");
  }

  #[tokio::test]
  async fn test_no_content_returns_none() {
    let router = Router::new().route("/gone", axum::routing::delete(|| async { AxumStatus::NO_CONTENT }));
    let base = serve(router).await;

    let result: Option<Value> = client(&base).delete("/gone").await.unwrap();
    assert!(result.is_none());
  }

  #[tokio::test]
  async fn test_error_status_carries_code_and_body() {
    let router = Router::new().route(
      "/broken",
      get(|| async { (AxumStatus::UNPROCESSABLE_ENTITY, "role is required") }),
    );
    let base = serve(router).await;

    let err = client(&base).get::<Value>("/broken").await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "role is required");
  }

  #[tokio::test]
  async fn test_error_status_without_body() {
    let base = serve(Router::new()).await;

    let err = client(&base).get::<Value>("/missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Request failed (404)");
  }

  #[tokio::test]
  async fn test_get_raw_accepts_any_success() {
    let router = Router::new().route("/health", get(|| async { "Healthy" }));
    let base = serve(router).await;

    let response = client(&base).get_raw("/health").await.unwrap();
    assert!(response.status().is_success());
  }

  #[test]
  fn test_url_joining() {
    let c = client("http://localhost:5000/");
    assert_eq!(c.base_url(), "http://localhost:5000");
    assert_eq!(
      c.url("/api/job-applications").unwrap().as_str(),
      "http://localhost:5000/api/job-applications"
    );
    assert_eq!(
      c.url("health").unwrap().as_str(),
      "http://localhost:5000/health"
    );
  }

  #[test]
  fn test_invalid_base_url_is_rejected() {
    assert!(matches!(
      HttpClient::new("not a url", Duration::from_secs(1)),
      Err(ApiError::InvalidUrl(_))
    ));
  }
}
