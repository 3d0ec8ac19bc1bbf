use crate::api::types::ApplicationStatus;
use ratatui::prelude::*;

/// Primary accent (headers, focus, keys)
pub const PRIMARY: Color = Color::Rgb(0x7c, 0xc4, 0xff);
/// Secondary accent (success states)
pub const SECONDARY: Color = Color::Rgb(0x6e, 0xe7, 0xb7);
pub const MUTED: Color = Color::DarkGray;
pub const DANGER: Color = Color::Rgb(0xff, 0x6b, 0x6b);

/// Truncate a string to at most `max_len` characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Get the display color for an application status; unknown codes are dimmed
pub fn status_color(status: Option<ApplicationStatus>) -> Color {
  match status {
    Some(ApplicationStatus::Planned) => Color::White,
    Some(ApplicationStatus::Applied) => PRIMARY,
    Some(ApplicationStatus::Interviewing) => Color::Yellow,
    Some(ApplicationStatus::Offer | ApplicationStatus::Accepted) => SECONDARY,
    Some(ApplicationStatus::Rejected) => DANGER,
    None => MUTED,
  }
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  let x = area.x + (area.width - width) / 2;
  let y = area.y + (area.height - height) / 2;
  Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("Müller & Söhne GmbH", 9), "Müller...");
  }

  #[test]
  fn test_status_color_positive_outcomes() {
    assert_eq!(status_color(Some(ApplicationStatus::Offer)), SECONDARY);
    assert_eq!(status_color(Some(ApplicationStatus::Accepted)), SECONDARY);
  }

  #[test]
  fn test_status_color_unknown() {
    assert_eq!(status_color(ApplicationStatus::from_code(42)), MUTED);
  }

  #[test]
  fn test_centered_rect_clamps() {
    let area = Rect::new(0, 0, 40, 10);
    assert_eq!(centered_rect(20, 4, area), Rect::new(10, 3, 20, 4));
    assert_eq!(centered_rect(100, 100, area), area);
  }
}
