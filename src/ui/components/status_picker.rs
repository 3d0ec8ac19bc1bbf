use super::KeyResult;
use crate::api::types::ApplicationStatus;
use crate::i18n::{Language, Text};
use crate::ui::renderfns::{centered_rect, status_color, PRIMARY};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

/// Overlay listing every application status; used by the form's status field
#[derive(Debug, Clone, Default)]
pub struct StatusPicker {
  active: bool,
  selected: usize,
}

impl StatusPicker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Show the picker with `current` highlighted
  pub fn show(&mut self, current: ApplicationStatus) {
    self.active = true;
    self.selected = ApplicationStatus::ALL
      .iter()
      .position(|s| *s == current)
      .unwrap_or(0);
  }

  pub fn hide(&mut self) {
    self.active = false;
  }

  /// Emits `Some(status)` on Enter and `None` when cancelled
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<Option<ApplicationStatus>> {
    if !self.active {
      return KeyResult::NotHandled;
    }

    let count = ApplicationStatus::ALL.len();
    match key.code {
      KeyCode::Esc | KeyCode::Char('q') => {
        self.hide();
        KeyResult::Event(None)
      }
      KeyCode::Enter => {
        self.hide();
        KeyResult::Event(ApplicationStatus::ALL.get(self.selected).copied())
      }
      KeyCode::Char('j') | KeyCode::Down => {
        self.selected = (self.selected + 1) % count;
        KeyResult::Handled
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.selected = (self.selected + count - 1) % count;
        KeyResult::Handled
      }
      _ => KeyResult::Handled,
    }
  }

  /// Render the picker overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect, lang: Language) {
    if !self.active {
      return;
    }

    let width = ApplicationStatus::ALL
      .iter()
      .map(|s| s.label(lang).chars().count() as u16)
      .max()
      .unwrap_or(10)
      + 6;
    let height = ApplicationStatus::ALL.len() as u16 + 2;
    let overlay_area = centered_rect(width.max(20), height, area);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(PRIMARY))
      .title(format!(" {} ", lang.t(Text::LabelStatus)));

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let items: Vec<ListItem> = ApplicationStatus::ALL
      .iter()
      .map(|status| {
        ListItem::new(Line::from(Span::styled(
          status.label(lang),
          Style::default().fg(status_color(Some(*status))),
        )))
      })
      .collect();

    let list =
      List::new(items).highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = ListState::default();
    state.select(Some(self.selected));

    frame.render_stateful_widget(list, inner, &mut state);
  }
}
