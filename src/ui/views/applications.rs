use crate::api::types::{JobApplication, JobApplicationRequest};
use crate::format::{format_bool, format_date, format_text, status_label};
use crate::i18n::{Language, Text};
use crate::mutation::{Mutation, MutationState};
use crate::query::{Query, QueryState};
use crate::sync::SyncedJobsClient;
use crate::ui::components::{
  ApplicationForm, ConfirmDelete, ConfirmEvent, FormEvent, KeyResult,
};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{status_color, truncate, DANGER, MUTED, PRIMARY};
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

const COLUMNS: [(Text, Constraint); 14] = [
  (Text::LabelCompany, Constraint::Min(12)),
  (Text::LabelRole, Constraint::Min(12)),
  (Text::LabelLocation, Constraint::Length(12)),
  (Text::LabelRemote, Constraint::Length(6)),
  (Text::LabelReferral, Constraint::Length(10)),
  (Text::LabelContactPerson, Constraint::Length(14)),
  (Text::LabelDateApplied, Constraint::Length(10)),
  (Text::LabelStatus, Constraint::Length(12)),
  (Text::LabelCompensation, Constraint::Length(12)),
  (Text::LabelLastTouch, Constraint::Length(10)),
  (Text::LabelNextAction, Constraint::Length(14)),
  (Text::LabelNextActionDate, Constraint::Length(10)),
  (Text::LabelNotes, Constraint::Min(10)),
  (Text::LabelLink, Constraint::Length(5)),
];

const STATUS_COLUMN: usize = 7;

/// Display text for every column of one application, in `COLUMNS` order
fn row_cells(job: &JobApplication, lang: Language) -> Vec<String> {
  let link = match job.link.as_deref().map(str::trim) {
    Some(l) if !l.is_empty() => lang.t(Text::Open).to_string(),
    _ => lang.t(Text::Empty).to_string(),
  };

  vec![
    job.company.clone(),
    job.role.clone(),
    format_text(job.location.as_deref(), lang),
    format_bool(job.is_remote, lang).to_string(),
    format_text(job.referral.as_deref(), lang),
    format_text(job.contact_person.as_deref(), lang),
    format_date(job.date_applied.as_deref(), lang),
    status_label(job.status, lang).to_string(),
    format_text(job.compensation_range.as_deref(), lang),
    format_date(job.last_touch.as_deref(), lang),
    format_text(job.next_action.as_deref(), lang),
    format_date(job.next_action_date.as_deref(), lang),
    format_text(job.notes.as_deref(), lang),
    link,
  ]
}

/// Inline error notice above the table
struct Notice {
  message: String,
  key: &'static str,
  action: Text,
}

fn notice(error: &str, fallback: Text, lang: Language, key: &'static str, action: Text) -> Notice {
  let message = if error.trim().is_empty() {
    lang.t(fallback).to_string()
  } else {
    error.to_string()
  };
  Notice { message, key, action }
}

/// Table of all job applications, with create/edit/delete dialogs
pub struct ApplicationsView {
  client: SyncedJobsClient,
  lang: Language,
  query: Query<Vec<JobApplication>>,
  table_state: TableState,
  form: Option<ApplicationForm>,
  /// Fresh copy of the record open in the edit form
  detail: Option<Query<JobApplication>>,
  confirm: Option<ConfirmDelete>,
  save: Mutation<JobApplication>,
  remove: Mutation<()>,
}

impl ApplicationsView {
  pub fn new(client: SyncedJobsClient, lang: Language) -> Self {
    let mut query = client.list_query();

    // Start fetching immediately
    query.fetch();

    Self {
      client,
      lang,
      query,
      table_state: TableState::default(),
      form: None,
      detail: None,
      confirm: None,
      save: Mutation::new(),
      remove: Mutation::new(),
    }
  }

  fn applications(&self) -> &[JobApplication] {
    self.query.data().map(|v| v.as_slice()).unwrap_or(&[])
  }

  fn selected(&self) -> Option<&JobApplication> {
    self
      .table_state
      .selected()
      .and_then(|idx| self.applications().get(idx))
  }

  fn move_selection(&mut self, delta: isize) {
    let len = self.applications().len();
    if len == 0 {
      return;
    }
    let current = self.table_state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    self.table_state.select(Some(next as usize));
  }

  fn notices(&self) -> Vec<Notice> {
    let lang = self.lang;
    let mut notices = Vec::new();
    if let Some(error) = self.query.error() {
      notices.push(notice(error, Text::ErrorLoadApplications, lang, "r", Text::Refresh));
    }
    if let Some(error) = self.save.error() {
      notices.push(notice(error, Text::ErrorSaveApplication, lang, "x", Text::Dismiss));
    }
    if let Some(error) = self.remove.error() {
      notices.push(notice(error, Text::ErrorDeleteApplication, lang, "x", Text::Dismiss));
    }
    notices
  }

  fn submit(&mut self, id: Option<String>, request: JobApplicationRequest) {
    let client = self.client.clone();
    let sent = match id {
      Some(id) => self.save.mutate(async move {
        client.update(&id, request).await.map_err(|e| e.to_string())
      }),
      None => self.save.mutate(async move {
        client.create(request).await.map_err(|e| e.to_string())
      }),
    };
    if let (true, Some(form)) = (sent, self.form.as_mut()) {
      form.set_submitting(true);
    }
  }

  fn confirm_delete(&mut self, id: String) {
    let client = self.client.clone();
    if self.remove.mutate(async move { client.delete(&id).await.map_err(|e| e.to_string()) }) {
      if let Some(confirm) = self.confirm.as_mut() {
        confirm.set_deleting(true);
      }
    }
  }

  fn handle_dialog_key(&mut self, key: KeyEvent) -> bool {
    if let Some(form) = self.form.as_mut() {
      match form.handle_key(key) {
        KeyResult::Event(FormEvent::Submit { id, request }) => self.submit(id, request),
        KeyResult::Event(FormEvent::Cancel) => {
          self.form = None;
          self.detail = None;
        }
        KeyResult::Handled | KeyResult::NotHandled => {}
      }
      return true;
    }

    if let Some(confirm) = self.confirm.as_mut() {
      match confirm.handle_key(key) {
        KeyResult::Event(ConfirmEvent::Confirm(id)) => self.confirm_delete(id),
        KeyResult::Event(ConfirmEvent::Cancel) => self.confirm = None,
        KeyResult::Handled | KeyResult::NotHandled => {}
      }
      return true;
    }

    false
  }

  fn render_notices(&self, frame: &mut Frame, area: Rect, notices: &[Notice]) {
    let lines: Vec<Line> = notices
      .iter()
      .map(|n| {
        Line::from(vec![
          Span::styled(" ! ", Style::default().fg(Color::Black).bg(DANGER)),
          Span::styled(format!(" {} ", n.message), Style::default().fg(DANGER)),
          Span::styled(format!("<{}>", n.key), Style::default().fg(PRIMARY)),
          Span::styled(format!(" {}", self.lang.t(n.action)), Style::default().fg(MUTED)),
        ])
      })
      .collect();
    frame.render_widget(Paragraph::new(lines), area);
  }

  fn render_table(&mut self, frame: &mut Frame, area: Rect) {
    let lang = self.lang;
    let len = self.applications().len();
    ensure_valid_selection(&mut self.table_state, len);

    let title = match self.query.state() {
      QueryState::Idle | QueryState::Loading => {
        format!(" {} ({}) ", lang.t(Text::TableTitle), lang.t(Text::Loading))
      }
      _ => format!(" {} ({}) ", lang.t(Text::TableTitle), len),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(PRIMARY));

    if len == 0 {
      let content = if self.query.is_loading() {
        lang.t(Text::Loading)
      } else if self.query.is_error() {
        lang.t(Text::ErrorLoadApplications)
      } else {
        lang.t(Text::NoApplications)
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(MUTED));
      frame.render_widget(paragraph, area);
      return;
    }

    let header = Row::new(
      COLUMNS
        .iter()
        .map(|(label, _)| Cell::from(lang.t(*label)))
        .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(PRIMARY).bold());

    let rows: Vec<Row> = self
      .applications()
      .iter()
      .map(|job| {
        let color = status_color(job.status());
        let cells = row_cells(job, lang)
          .into_iter()
          .zip(COLUMNS.iter())
          .enumerate()
          .map(|(idx, (text, (_, width)))| {
            let text = match width {
              Constraint::Length(w) => truncate(&text, *w as usize),
              _ => text,
            };
            if idx == STATUS_COLUMN {
              Cell::from(text).style(Style::default().fg(color))
            } else {
              Cell::from(text)
            }
          })
          .collect::<Vec<_>>();
        Row::new(cells)
      })
      .collect();

    let table = Table::new(rows, COLUMNS.iter().map(|(_, width)| *width))
      .header(header)
      .block(block)
      .column_spacing(1)
      .row_highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut self.table_state);
  }
}

impl View for ApplicationsView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    if self.handle_dialog_key(key) {
      return ViewAction::None;
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
      KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
      KeyCode::Char('g') | KeyCode::Home => self.table_state.select(Some(0)),
      KeyCode::Char('G') | KeyCode::End => {
        let len = self.applications().len();
        self.table_state.select(len.checked_sub(1));
      }
      KeyCode::Char('n') => {
        self.form = Some(ApplicationForm::create());
        self.detail = None;
      }
      KeyCode::Char('e') | KeyCode::Enter => {
        if let Some(job) = self.selected() {
          let mut detail = self.client.detail_query(&job.id);
          detail.fetch();
          self.form = Some(ApplicationForm::edit(job));
          self.detail = Some(detail);
        }
      }
      KeyCode::Char('d') => self.confirm = Some(ConfirmDelete::new(self.selected())),
      KeyCode::Char('r') => self.query.refetch(),
      KeyCode::Char('x') => {
        self.save.reset();
        self.remove.reset();
      }
      KeyCode::Char('L') => return ViewAction::ToggleLanguage,
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Quit,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let notices = self.notices();
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(notices.len() as u16),
        Constraint::Min(1),
      ])
      .split(area);

    self.render_notices(frame, chunks[0], &notices);
    self.render_table(frame, chunks[1]);

    if let Some(form) = &self.form {
      form.render_overlay(frame, area, self.lang, self.save.error());
    }
    if let Some(confirm) = &self.confirm {
      confirm.render_overlay(frame, area, self.lang);
    }
  }

  fn breadcrumb_label(&self) -> String {
    self.lang.t(Text::TableTitle).to_string()
  }

  fn tick(&mut self) -> ViewAction {
    self.query.poll();

    if let Some(detail) = self.detail.as_mut() {
      if detail.poll() {
        if let (Some(job), Some(form)) = (detail.data(), self.form.as_mut()) {
          if form.refresh(job) {
            tracing::debug!(id = %job.id, "edit form refreshed from server");
          }
        }
      }
    }

    match self.save.poll() {
      Some(MutationState::Success(job)) => {
        tracing::debug!(id = %job.id, "save finished, closing dialog");
        self.form = None;
        self.detail = None;
      }
      Some(_) => {
        // Failed: keep the dialog open so the input is not lost
        if let Some(form) = self.form.as_mut() {
          form.set_submitting(false);
        }
      }
      None => {}
    }

    match self.remove.poll() {
      Some(MutationState::Success(())) => self.confirm = None,
      Some(_) => {
        if let Some(confirm) = self.confirm.as_mut() {
          confirm.set_deleting(false);
        }
      }
      None => {}
    }

    ViewAction::None
  }

  fn set_language(&mut self, lang: Language) {
    self.lang = lang;
  }

  fn status(&self) -> Option<String> {
    if self.save.is_pending() {
      Some(self.lang.t(Text::DialogSaving).to_string())
    } else if self.remove.is_pending() {
      Some(self.lang.t(Text::Deleting).to_string())
    } else if self.query.is_fetching() {
      Some(self.lang.t(Text::Loading).to_string())
    } else {
      None
    }
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    let lang = self.lang;
    vec![
      ShortcutInfo::new("n", lang.t(Text::New)).with_priority(10),
      ShortcutInfo::new("e", lang.t(Text::Edit)).with_priority(20),
      ShortcutInfo::new("d", lang.t(Text::Delete)).with_priority(30),
      ShortcutInfo::new("r", lang.t(Text::Refresh)).with_priority(40),
      ShortcutInfo::new("L", lang.t(Text::Language)).with_priority(50),
      ShortcutInfo::new("q", lang.t(Text::Quit)).with_priority(60),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::JobsClient;
  use crate::cache::QueryCache;
  use crossterm::event::KeyModifiers;
  use std::time::Duration;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn job(link: Option<&str>, status: i64) -> JobApplication {
    serde_json::from_value(serde_json::json!({
      "id": "1",
      "company": "Acme",
      "role": "Engineer",
      "isRemote": true,
      "dateApplied": "2024-03-15T10:00:00Z",
      "status": status,
      "link": link,
    }))
    .unwrap()
  }

  fn view() -> ApplicationsView {
    // Nothing listens here; the list fetch just fails in the background
    let jobs = JobsClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    ApplicationsView::new(
      SyncedJobsClient::new(jobs, QueryCache::new()),
      Language::En,
    )
  }

  #[test]
  fn test_row_cells_cover_every_column() {
    let cells = row_cells(&job(Some("https://acme.example/jobs/1"), 0), Language::En);
    assert_eq!(cells.len(), COLUMNS.len());
    assert_eq!(cells[0], "Acme");
    assert_eq!(cells[2], "-");
    assert_eq!(cells[3], "Yes");
    assert_eq!(cells[6], "2024-03-15");
    assert_eq!(cells[STATUS_COLUMN], "Planned");
    assert_eq!(cells[13], "open");
  }

  #[test]
  fn test_row_cells_unknown_status_and_missing_link() {
    let cells = row_cells(&job(None, 17), Language::De);
    assert_eq!(cells[STATUS_COLUMN], "Unbekannt");
    assert_eq!(cells[3], "Ja");
    assert_eq!(cells[13], "-");
  }

  #[test]
  fn test_notice_falls_back_to_localized_message() {
    let n = notice("", Text::ErrorDeleteApplication, Language::En, "x", Text::Dismiss);
    assert_eq!(n.message, "Could not delete application.");

    let n = notice("Request failed (404)", Text::ErrorDeleteApplication, Language::En, "x", Text::Dismiss);
    assert_eq!(n.message, "Request failed (404)");
  }

  #[tokio::test]
  async fn test_new_opens_and_escape_closes_form() {
    let mut view = view();
    assert!(matches!(view.handle_key(key(KeyCode::Char('n'))), ViewAction::None));
    assert!(view.form.is_some());

    view.handle_key(key(KeyCode::Esc));
    assert!(view.form.is_none());
    assert!(view.detail.is_none());
  }

  #[tokio::test]
  async fn test_invalid_form_is_not_submitted() {
    let mut view = view();
    view.handle_key(key(KeyCode::Char('n')));
    view.handle_key(key(KeyCode::Enter));

    assert!(!view.save.is_pending());
    assert!(view.form.is_some());
  }

  #[tokio::test]
  async fn test_delete_without_selection_cannot_confirm() {
    let mut view = view();
    view.handle_key(key(KeyCode::Char('d')));
    view.handle_key(key(KeyCode::Char('y')));

    assert!(!view.remove.is_pending());
    assert!(view.confirm.is_some());
  }

  #[tokio::test]
  async fn test_root_keys() {
    let mut view = view();
    assert!(matches!(
      view.handle_key(key(KeyCode::Char('L'))),
      ViewAction::ToggleLanguage
    ));
    assert!(matches!(view.handle_key(key(KeyCode::Char('q'))), ViewAction::Quit));
  }

  #[tokio::test]
  async fn test_failed_save_is_visible_over_the_open_form() {
    let mut view = view();
    view.handle_key(key(KeyCode::Char('n')));
    for c in "Acme".chars() {
      view.handle_key(key(KeyCode::Char(c)));
    }
    view.handle_key(key(KeyCode::Tab));
    for c in "Engineer".chars() {
      view.handle_key(key(KeyCode::Char(c)));
    }
    view.handle_key(key(KeyCode::Enter));
    assert!(view.save.is_pending());

    for _ in 0..500 {
      view.tick();
      if !view.save.is_pending() {
        break;
      }
      tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(view.form.is_some());
    let error = view.save.error().expect("save should fail").to_string();

    let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(80, 22)).unwrap();
    terminal.draw(|frame| view.render(frame, frame.area())).unwrap();
    let buffer = terminal.backend().buffer();
    let screen: String = buffer
      .content()
      .chunks(buffer.area.width as usize)
      .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
      .collect::<Vec<_>>()
      .join("\n");

    let head: String = error.chars().take(24).collect();
    assert!(screen.contains(&head), "{:?} not on screen:\n{}", head, screen);
  }
}
