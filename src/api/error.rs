use thiserror::Error;

/// Failure of a single backend request.
///
/// Status failures are not split into 4xx/5xx kinds; callers only get the code
/// and whatever text the server sent back.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{}", describe_status(.status, .body))]
  Status { status: u16, body: Option<String> },

  #[error("Network error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Invalid response body: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("Invalid URL: {0}")]
  InvalidUrl(#[from] url::ParseError),

  #[error("Empty response from {0}")]
  EmptyResponse(String),
}

impl ApiError {
  /// HTTP status code, if the server answered at all.
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Status { status, .. } => Some(*status),
      ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
      _ => None,
    }
  }
}

fn describe_status(status: &u16, body: &Option<String>) -> String {
  match body.as_deref().map(str::trim) {
    Some(text) if !text.is_empty() => text.to_string(),
    _ => format!("Request failed ({})", status),
  }
}
