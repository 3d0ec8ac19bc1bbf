use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Pipeline stage of an application. Sent over the wire as its ordinal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
  #[default]
  Planned,
  Applied,
  Interviewing,
  Offer,
  Rejected,
  Accepted,
}

impl ApplicationStatus {
  pub const ALL: [ApplicationStatus; 6] = [
    ApplicationStatus::Planned,
    ApplicationStatus::Applied,
    ApplicationStatus::Interviewing,
    ApplicationStatus::Offer,
    ApplicationStatus::Rejected,
    ApplicationStatus::Accepted,
  ];

  pub fn from_code(code: i64) -> Option<Self> {
    usize::try_from(code)
      .ok()
      .and_then(|idx| Self::ALL.get(idx).copied())
  }

  pub fn code(self) -> i64 {
    self as i64
  }

  /// Next status in pipeline order, wrapping around
  pub fn next(self) -> Self {
    Self::ALL[(self as usize + 1) % Self::ALL.len()]
  }

  pub fn prev(self) -> Self {
    Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

impl Serialize for ApplicationStatus {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(self.code())
  }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let code = i64::deserialize(deserializer)?;
    Self::from_code(code)
      .ok_or_else(|| serde::de::Error::custom(format!("unknown application status {}", code)))
  }
}

/// A job application as returned by the backend.
///
/// `status` keeps the raw ordinal so that values this client does not know
/// about still load and render as "Unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
  #[serde(deserialize_with = "deserialize_id")]
  pub id: String,
  pub company: String,
  pub role: String,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub is_remote: bool,
  #[serde(default)]
  pub referral: Option<String>,
  #[serde(default)]
  pub contact_person: Option<String>,
  #[serde(default)]
  pub date_applied: Option<String>,
  #[serde(default)]
  pub status: i64,
  #[serde(default)]
  pub compensation_range: Option<String>,
  #[serde(default)]
  pub last_touch: Option<String>,
  #[serde(default)]
  pub next_action: Option<String>,
  #[serde(default)]
  pub next_action_date: Option<String>,
  #[serde(default)]
  pub notes: Option<String>,
  #[serde(default)]
  pub link: Option<String>,
}

impl JobApplication {
  pub fn status(&self) -> Option<ApplicationStatus> {
    ApplicationStatus::from_code(self.status)
  }

  /// "Company - Role", used in confirmations
  pub fn label(&self) -> String {
    format!("{} - {}", self.company, self.role)
  }
}

/// Ids are opaque; accept numeric ids from backends that use them.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawId {
    Text(String),
    Number(i64),
  }

  Ok(match RawId::deserialize(deserializer)? {
    RawId::Text(s) => s,
    RawId::Number(n) => n.to_string(),
  })
}

/// Body for creating or replacing a job application.
///
/// Optional fields serialize as `null` when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationRequest {
  pub company: String,
  pub role: String,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub is_remote: bool,
  #[serde(default)]
  pub referral: Option<String>,
  #[serde(default)]
  pub contact_person: Option<String>,
  #[serde(default)]
  pub date_applied: Option<String>,
  #[serde(default)]
  pub status: ApplicationStatus,
  #[serde(default)]
  pub compensation_range: Option<String>,
  #[serde(default)]
  pub last_touch: Option<String>,
  #[serde(default)]
  pub next_action: Option<String>,
  #[serde(default)]
  pub next_action_date: Option<String>,
  #[serde(default)]
  pub notes: Option<String>,
  #[serde(default)]
  pub link: Option<String>,
}

pub type CreateJobApplicationRequest = JobApplicationRequest;
pub type UpdateJobApplicationRequest = JobApplicationRequest;

impl JobApplicationRequest {
  #[cfg(test)]
  pub fn new(company: impl Into<String>, role: impl Into<String>) -> Self {
    Self {
      company: company.into(),
      role: role.into(),
      ..Default::default()
    }
  }

  /// Company and role must be non-blank before the request may be sent.
  pub fn is_valid(&self) -> bool {
    !self.company.trim().is_empty() && !self.role.trim().is_empty()
  }
}
