use std::fmt;

/// Identity of a cached query result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
  /// The full list of job applications
  AllApplications,
  /// A single job application by id
  Application { id: String },
}

impl QueryKey {
  pub fn application(id: impl Into<String>) -> Self {
    Self::Application { id: id.into() }
  }
}

impl fmt::Display for QueryKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::AllApplications => write!(f, "job_applications"),
      Self::Application { id } => write!(f, "job_applications:{}", id),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display() {
    assert_eq!(QueryKey::AllApplications.to_string(), "job_applications");
    assert_eq!(QueryKey::application("42").to_string(), "job_applications:42");
  }

  #[test]
  fn test_entity_keys_are_distinct() {
    assert_ne!(QueryKey::application("1"), QueryKey::application("2"));
    assert_ne!(QueryKey::application("1"), QueryKey::AllApplications);
  }
}
