use super::KeyResult;
use crate::api::types::JobApplication;
use crate::i18n::{Language, Text};
use crate::ui::renderfns::{centered_rect, DANGER, MUTED, PRIMARY};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEvent {
  /// Delete the application with this id
  Confirm(String),
  Cancel,
}

/// "Are you sure?" dialog for deleting one application
#[derive(Debug, Clone)]
pub struct ConfirmDelete {
  target: Option<(String, String)>, // (id, "Company - Role")
  deleting: bool,
}

impl ConfirmDelete {
  pub fn new(job: Option<&JobApplication>) -> Self {
    Self {
      target: job.map(|j| (j.id.clone(), j.label())),
      deleting: false,
    }
  }

  pub fn set_deleting(&mut self, deleting: bool) {
    self.deleting = deleting;
  }

  /// Confirm is only possible with a target and no delete in flight
  pub fn can_confirm(&self) -> bool {
    self.target.is_some() && !self.deleting
  }

  pub fn description(&self, lang: Language) -> String {
    let label = match &self.target {
      Some((_, label)) => label.as_str(),
      None => lang.t(Text::ConfirmDeleteFallbackLabel),
    };
    lang.t(Text::ConfirmDeleteDescription).replace("{label}", label)
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<ConfirmEvent> {
    if self.deleting {
      return KeyResult::Handled;
    }
    match key.code {
      KeyCode::Char('y') | KeyCode::Enter => match &self.target {
        Some((id, _)) => KeyResult::Event(ConfirmEvent::Confirm(id.clone())),
        None => KeyResult::Handled,
      },
      KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q') => {
        KeyResult::Event(ConfirmEvent::Cancel)
      }
      _ => KeyResult::Handled,
    }
  }

  pub fn render_overlay(&self, frame: &mut Frame, area: Rect, lang: Language) {
    let overlay_area = centered_rect(area.width.saturating_sub(4).min(60), 8, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(DANGER))
      .title(format!(" {} ", lang.t(Text::ConfirmDeleteTitle)));

    let confirm_style = if self.can_confirm() {
      Style::default().fg(DANGER).bold()
    } else {
      Style::default().fg(MUTED)
    };
    let actions = if self.deleting {
      Line::from(Span::styled(
        lang.t(Text::Deleting),
        Style::default().fg(Color::Yellow),
      ))
    } else {
      Line::from(vec![
        Span::styled("<y>", confirm_style),
        Span::styled(format!(" {}   ", lang.t(Text::Delete)), Style::default().fg(MUTED)),
        Span::styled("<n>", Style::default().fg(PRIMARY)),
        Span::styled(format!(" {}", lang.t(Text::Cancel)), Style::default().fg(MUTED)),
      ])
    };

    let paragraph = Paragraph::new(vec![
      Line::raw(self.description(lang)),
      Line::raw(""),
      actions,
    ])
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(paragraph, overlay_area);
  }
}
