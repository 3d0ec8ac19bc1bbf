use crate::i18n::{Language, Text};
use crate::sync::SyncedJobsClient;
use crate::ui::renderfns::{centered_rect, MUTED, PRIMARY, SECONDARY};
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::ApplicationsView;
use crate::warmup::{GateStatus, HealthGate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Blocks the app until the backend has answered a health check once
pub struct WarmupView {
  gate: HealthGate,
  client: SyncedJobsClient,
  lang: Language,
}

impl WarmupView {
  pub fn new(gate: HealthGate, client: SyncedJobsClient, lang: Language) -> Self {
    Self { gate, client, lang }
  }

  fn status_lines(&self, status: &GateStatus) -> Vec<Line<'static>> {
    let lang = self.lang;
    let activity = if status.fetching {
      lang.t(Text::WarmupPinging)
    } else {
      lang.t(Text::WarmupWaiting)
    };
    let message = status
      .last_error
      .clone()
      .unwrap_or_else(|| lang.t(Text::WarmupErrorFallback).to_string());

    vec![
      Line::from(Span::styled(
        lang.t(Text::WarmupTitle),
        Style::default().fg(PRIMARY).bold(),
      )),
      Line::raw(""),
      Line::raw(lang.t(Text::WarmupDescription)),
      Line::raw(""),
      Line::from(Span::styled(activity, Style::default().fg(SECONDARY))),
      Line::from(vec![
        Span::styled(
          format!("{}: ", lang.t(Text::WarmupAttempt)),
          Style::default().fg(MUTED),
        ),
        Span::raw((status.failure_count + 1).to_string()),
      ]),
      Line::from(Span::styled(message, Style::default().fg(MUTED))),
      Line::raw(""),
      Line::from(vec![
        Span::styled("<R>", Style::default().fg(PRIMARY)),
        Span::styled(
          format!(" {}", lang.t(Text::WarmupReload)),
          Style::default().fg(MUTED),
        ),
      ]),
    ]
  }
}

impl View for WarmupView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('R') => ViewAction::Reload,
      KeyCode::Char('L') => ViewAction::ToggleLanguage,
      KeyCode::Char('q') | KeyCode::Esc => ViewAction::Quit,
      _ => ViewAction::None,
    }
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let status = self.gate.status();
    let lines = self.status_lines(&status);

    let box_area = centered_rect(area.width.saturating_sub(4).min(72), lines.len() as u16 + 4, area);
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(PRIMARY))
      .title(format!(" {} ", self.lang.t(Text::AppTitle)))
      .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(lines)
      .block(block)
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, box_area);
  }

  fn breadcrumb_label(&self) -> String {
    self.lang.t(Text::WarmupTitle).to_string()
  }

  fn tick(&mut self) -> ViewAction {
    if self.gate.is_healthy() {
      tracing::info!("backend ready, showing applications");
      return ViewAction::Replace(Box::new(ApplicationsView::new(
        self.client.clone(),
        self.lang,
      )));
    }
    ViewAction::None
  }

  fn set_language(&mut self, lang: Language) {
    self.lang = lang;
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("R", self.lang.t(Text::WarmupReload)).with_priority(10),
      ShortcutInfo::new("L", self.lang.t(Text::Language)).with_priority(20),
      ShortcutInfo::new("q", self.lang.t(Text::Quit)).with_priority(30),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::JobsClient;
  use crate::cache::QueryCache;
  use crate::warmup::{Backoff, FixedJitter};
  use crossterm::event::KeyModifiers;
  use std::sync::Arc;
  use std::time::Duration;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn view(healthy: bool) -> WarmupView {
    let gate = HealthGate::spawn(
      move || async move {
        if healthy {
          Ok(())
        } else {
          Err("connection refused")
        }
      },
      Backoff::default(),
      Arc::new(FixedJitter(Duration::ZERO)),
    );
    let jobs = JobsClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    WarmupView::new(gate, SyncedJobsClient::new(jobs, QueryCache::new()), Language::En)
  }

  #[tokio::test]
  async fn test_keys() {
    let mut view = view(false);
    assert!(matches!(view.handle_key(key(KeyCode::Char('R'))), ViewAction::Reload));
    assert!(matches!(
      view.handle_key(key(KeyCode::Char('L'))),
      ViewAction::ToggleLanguage
    ));
    assert!(matches!(view.handle_key(key(KeyCode::Esc)), ViewAction::Quit));
    assert!(matches!(view.handle_key(key(KeyCode::Char('x'))), ViewAction::None));
  }

  #[tokio::test(start_paused = true)]
  async fn test_tick_waits_while_unhealthy() {
    let mut view = view(false);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(matches!(view.tick(), ViewAction::None));
    assert!(view.gate.status().failure_count > 0);
  }

  #[tokio::test]
  async fn test_tick_replaces_itself_once_healthy() {
    let mut view = view(true);
    view.gate.wait_healthy().await;
    assert!(matches!(view.tick(), ViewAction::Replace(_)));
  }
}
