//! Display formatting for job application fields.

use crate::api::types::ApplicationStatus;
use crate::i18n::{Language, Text};

impl ApplicationStatus {
  pub fn text(self) -> Text {
    match self {
      ApplicationStatus::Planned => Text::StatusPlanned,
      ApplicationStatus::Applied => Text::StatusApplied,
      ApplicationStatus::Interviewing => Text::StatusInterviewing,
      ApplicationStatus::Offer => Text::StatusOffer,
      ApplicationStatus::Rejected => Text::StatusRejected,
      ApplicationStatus::Accepted => Text::StatusAccepted,
    }
  }

  pub fn label(self, lang: Language) -> &'static str {
    lang.t(self.text())
  }
}

/// Label for a raw status ordinal; anything outside the known set is "Unknown".
pub fn status_label(code: i64, lang: Language) -> &'static str {
  match ApplicationStatus::from_code(code) {
    Some(status) => status.label(lang),
    None => lang.t(Text::StatusUnknown),
  }
}

/// Date-only part of a stored date, or the empty placeholder.
pub fn format_date(value: Option<&str>, lang: Language) -> String {
  match value.map(str::trim).filter(|v| !v.is_empty()) {
    Some(v) => date_part(v).to_string(),
    None => lang.t(Text::Empty).to_string(),
  }
}

/// Trimmed text, or the empty placeholder when absent or blank.
pub fn format_text(value: Option<&str>, lang: Language) -> String {
  match value.map(str::trim).filter(|v| !v.is_empty()) {
    Some(v) => v.to_string(),
    None => lang.t(Text::Empty).to_string(),
  }
}

pub fn format_bool(value: bool, lang: Language) -> &'static str {
  if value {
    lang.t(Text::Yes)
  } else {
    lang.t(Text::No)
  }
}

/// First ten characters (`YYYY-MM-DD`) of a date or datetime string.
pub fn date_part(value: &str) -> &str {
  match value.char_indices().nth(10) {
    Some((idx, _)) => &value[..idx],
    None => value,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn test_known_statuses_have_distinct_labels() {
    let labels: HashSet<&str> = (0..6).map(|c| status_label(c, Language::En)).collect();
    assert_eq!(labels.len(), 6);
    assert!(!labels.contains("Unknown"));
  }

  #[test]
  fn test_out_of_range_status_is_unknown() {
    for code in [-1, 6, 7, 100, i64::MAX] {
      assert_eq!(status_label(code, Language::En), "Unknown");
    }
    assert_eq!(status_label(42, Language::De), "Unbekannt");
  }

  #[test]
  fn test_status_labels() {
    assert_eq!(status_label(0, Language::En), "Planned");
    assert_eq!(status_label(5, Language::En), "Accepted");
    assert_eq!(status_label(2, Language::De), "Im Interview");
  }

  #[test]
  fn test_format_date_truncates_time() {
    assert_eq!(
      format_date(Some("2024-03-15T10:00:00Z"), Language::En),
      "2024-03-15"
    );
    assert_eq!(format_date(Some("2024-03-15"), Language::En), "2024-03-15");
  }

  #[test]
  fn test_format_date_placeholder() {
    assert_eq!(format_date(None, Language::En), "-");
    assert_eq!(format_date(Some(""), Language::En), "-");
  }

  #[test]
  fn test_format_text() {
    assert_eq!(format_text(Some("  Berlin "), Language::En), "Berlin");
    assert_eq!(format_text(Some("   "), Language::En), "-");
    assert_eq!(format_text(None, Language::De), "-");
  }

  #[test]
  fn test_format_bool() {
    assert_eq!(format_bool(true, Language::En), "Yes");
    assert_eq!(format_bool(false, Language::De), "Nein");
  }

  #[test]
  fn test_date_part_short_input() {
    assert_eq!(date_part("2024"), "2024");
  }
}
