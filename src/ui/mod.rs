pub mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::app::App;
use crate::i18n::Text;
use ratatui::prelude::*;
use ratatui::widgets::TableState;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Current view
      Constraint::Length(1), // Footer
    ])
    .split(frame.area());

  let lang = app.language();
  let breadcrumb = app.breadcrumb();
  let base_url = app.base_url().to_string();

  let Some(view) = app.current_view_mut() else {
    return;
  };

  renderfns::draw_header(
    frame,
    chunks[0],
    lang.t(Text::AppTitle),
    &base_url,
    lang.code(),
    &view.shortcuts(),
  );
  view.render(frame, chunks[1]);
  renderfns::draw_footer(frame, chunks[2], &breadcrumb, view.status().as_deref());
}

/// Keep the selection inside `0..len`, selecting the first row when there is none
pub fn ensure_valid_selection(state: &mut TableState, len: usize) {
  match state.selected() {
    _ if len == 0 => state.select(None),
    Some(idx) if idx >= len => state.select(Some(len - 1)),
    None => state.select(Some(0)),
    Some(_) => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_selection_clamped_after_rows_disappear() {
    let mut state = TableState::default();
    state.select(Some(5));
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(2));
  }

  #[test]
  fn test_selection_defaults_to_first_row() {
    let mut state = TableState::default();
    ensure_valid_selection(&mut state, 2);
    assert_eq!(state.selected(), Some(0));

    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }
}
