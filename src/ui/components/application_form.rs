use super::{InputResult, KeyResult, StatusPicker, TextInput};
use crate::api::types::{ApplicationStatus, JobApplication, JobApplicationRequest};
use crate::format::date_part;
use crate::i18n::{Language, Text};
use crate::ui::renderfns::{centered_rect, status_color, truncate, DANGER, MUTED, PRIMARY};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Form fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Company,
  Role,
  Status,
  DateApplied,
  Remote,
  Location,
  Referral,
  ContactPerson,
  CompensationRange,
  LastTouch,
  NextAction,
  NextActionDate,
  Notes,
  Link,
}

impl Field {
  pub const ALL: [Field; 14] = [
    Field::Company,
    Field::Role,
    Field::Status,
    Field::DateApplied,
    Field::Remote,
    Field::Location,
    Field::Referral,
    Field::ContactPerson,
    Field::CompensationRange,
    Field::LastTouch,
    Field::NextAction,
    Field::NextActionDate,
    Field::Notes,
    Field::Link,
  ];

  fn label(self) -> Text {
    match self {
      Field::Company => Text::LabelCompany,
      Field::Role => Text::LabelRole,
      Field::Status => Text::LabelStatus,
      Field::DateApplied => Text::LabelDateApplied,
      Field::Remote => Text::LabelRemote,
      Field::Location => Text::LabelLocation,
      Field::Referral => Text::LabelReferral,
      Field::ContactPerson => Text::LabelContactPerson,
      Field::CompensationRange => Text::LabelCompensationRange,
      Field::LastTouch => Text::LabelLastTouch,
      Field::NextAction => Text::LabelNextAction,
      Field::NextActionDate => Text::LabelNextActionDate,
      Field::Notes => Text::LabelNotes,
      Field::Link => Text::LabelLink,
    }
  }

  fn is_date(self) -> bool {
    matches!(
      self,
      Field::DateApplied | Field::LastTouch | Field::NextActionDate
    )
  }

  fn is_required(self) -> bool {
    matches!(self, Field::Company | Field::Role)
  }
}

/// Emitted by the form to the view that owns it
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
  /// `id` is set when editing an existing application
  Submit {
    id: Option<String>,
    request: JobApplicationRequest,
  },
  Cancel,
}

/// Create/edit dialog for a job application.
///
/// While a save is pending every key is swallowed, so the dialog can be
/// neither resubmitted nor closed.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
  id: Option<String>,
  company: TextInput,
  role: TextInput,
  status: ApplicationStatus,
  date_applied: TextInput,
  is_remote: bool,
  location: TextInput,
  referral: TextInput,
  contact_person: TextInput,
  compensation_range: TextInput,
  last_touch: TextInput,
  next_action: TextInput,
  next_action_date: TextInput,
  notes: TextInput,
  link: TextInput,
  focus: usize,
  picker: StatusPicker,
  submitting: bool,
  show_required: bool,
  /// Request built from the record the form was opened with
  seed: Option<JobApplicationRequest>,
}

fn text(value: &Option<String>) -> TextInput {
  TextInput::with_value(value.clone().unwrap_or_default())
}

fn date(value: &Option<String>) -> TextInput {
  TextInput::with_value(value.as_deref().map(date_part).unwrap_or_default())
}

fn optional(input: &TextInput) -> Option<String> {
  let value = input.value().trim();
  (!value.is_empty()).then(|| value.to_string())
}

fn optional_date(input: &TextInput) -> Option<String> {
  optional(input).map(|v| date_part(&v).to_string())
}

/// Blank, or a calendar date written as `YYYY-MM-DD`
fn is_valid_date(input: &TextInput) -> bool {
  let value = input.value().trim();
  value.is_empty() || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

impl ApplicationForm {
  /// Empty form for a new application (status Planned, not remote)
  pub fn create() -> Self {
    Self::default()
  }

  /// Form seeded from an existing application. Unknown status codes start as Planned.
  pub fn edit(job: &JobApplication) -> Self {
    let mut form = Self {
      id: Some(job.id.clone()),
      company: TextInput::with_value(job.company.clone()),
      role: TextInput::with_value(job.role.clone()),
      status: job.status().unwrap_or_default(),
      date_applied: date(&job.date_applied),
      is_remote: job.is_remote,
      location: text(&job.location),
      referral: text(&job.referral),
      contact_person: text(&job.contact_person),
      compensation_range: text(&job.compensation_range),
      last_touch: date(&job.last_touch),
      next_action: text(&job.next_action),
      next_action_date: date(&job.next_action_date),
      notes: text(&job.notes),
      link: text(&job.link),
      ..Self::default()
    };
    form.seed = Some(form.to_request());
    form
  }

  /// Reseed from a fresher copy of the record being edited, unless the user
  /// has already changed something. Returns whether the form was replaced.
  pub fn refresh(&mut self, job: &JobApplication) -> bool {
    let untouched = self.seed.as_ref() == Some(&self.to_request());
    if self.submitting || !untouched || self.id.as_deref() != Some(job.id.as_str()) {
      return false;
    }
    let focus = self.focus;
    *self = Self::edit(job);
    self.focus = focus;
    true
  }

  pub fn is_edit(&self) -> bool {
    self.id.is_some()
  }

  pub fn set_submitting(&mut self, submitting: bool) {
    self.submitting = submitting;
  }

  pub fn is_valid(&self) -> bool {
    self.to_request().is_valid() && self.invalid_date().is_none()
  }

  /// First date field whose text is not a `YYYY-MM-DD` date
  fn invalid_date(&self) -> Option<Field> {
    Field::ALL.into_iter().filter(|f| f.is_date()).find(|f| {
      self
        .input(*f)
        .is_some_and(|input| !is_valid_date(input))
    })
  }

  /// Request body: text trimmed, blanks sent as null, dates reduced to `YYYY-MM-DD`
  pub fn to_request(&self) -> JobApplicationRequest {
    JobApplicationRequest {
      company: self.company.value().trim().to_string(),
      role: self.role.value().trim().to_string(),
      status: self.status,
      is_remote: self.is_remote,
      location: optional(&self.location),
      date_applied: optional_date(&self.date_applied),
      referral: optional(&self.referral),
      contact_person: optional(&self.contact_person),
      compensation_range: optional(&self.compensation_range),
      last_touch: optional_date(&self.last_touch),
      next_action: optional(&self.next_action),
      next_action_date: optional_date(&self.next_action_date),
      notes: optional(&self.notes),
      link: optional(&self.link),
    }
  }

  fn focused(&self) -> Field {
    Field::ALL[self.focus]
  }

  fn input(&self, field: Field) -> Option<&TextInput> {
    match field {
      Field::Company => Some(&self.company),
      Field::Role => Some(&self.role),
      Field::DateApplied => Some(&self.date_applied),
      Field::Location => Some(&self.location),
      Field::Referral => Some(&self.referral),
      Field::ContactPerson => Some(&self.contact_person),
      Field::CompensationRange => Some(&self.compensation_range),
      Field::LastTouch => Some(&self.last_touch),
      Field::NextAction => Some(&self.next_action),
      Field::NextActionDate => Some(&self.next_action_date),
      Field::Notes => Some(&self.notes),
      Field::Link => Some(&self.link),
      Field::Status | Field::Remote => None,
    }
  }

  fn input_mut(&mut self, field: Field) -> Option<&mut TextInput> {
    match field {
      Field::Company => Some(&mut self.company),
      Field::Role => Some(&mut self.role),
      Field::DateApplied => Some(&mut self.date_applied),
      Field::Location => Some(&mut self.location),
      Field::Referral => Some(&mut self.referral),
      Field::ContactPerson => Some(&mut self.contact_person),
      Field::CompensationRange => Some(&mut self.compensation_range),
      Field::LastTouch => Some(&mut self.last_touch),
      Field::NextAction => Some(&mut self.next_action),
      Field::NextActionDate => Some(&mut self.next_action_date),
      Field::Notes => Some(&mut self.notes),
      Field::Link => Some(&mut self.link),
      Field::Status | Field::Remote => None,
    }
  }

  fn submit(&mut self) -> KeyResult<FormEvent> {
    if !self.is_valid() {
      self.show_required = true;
      return KeyResult::Handled;
    }
    KeyResult::Event(FormEvent::Submit {
      id: self.id.clone(),
      request: self.to_request(),
    })
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<FormEvent> {
    if self.picker.is_active() {
      if let KeyResult::Event(Some(status)) = self.picker.handle_key(key) {
        self.status = status;
      }
      return KeyResult::Handled;
    }

    if self.submitting {
      return KeyResult::Handled;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let field = self.focused();

    match key.code {
      KeyCode::Esc => return KeyResult::Event(FormEvent::Cancel),
      KeyCode::Tab | KeyCode::Down => {
        self.focus = (self.focus + 1) % Field::ALL.len();
        return KeyResult::Handled;
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
        return KeyResult::Handled;
      }
      KeyCode::Char('s') if ctrl => return self.submit(),
      KeyCode::Char('t') if ctrl && field.is_date() => {
        let today = chrono::Local::now().date_naive();
        if let Some(input) = self.input_mut(field) {
          input.set_value(today.format("%Y-%m-%d").to_string());
        }
        return KeyResult::Handled;
      }
      _ => {}
    }

    match field {
      Field::Status => match key.code {
        KeyCode::Enter => self.picker.show(self.status),
        KeyCode::Left | KeyCode::Char('h') => self.status = self.status.prev(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
          self.status = self.status.next()
        }
        _ => {}
      },
      Field::Remote => match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
          self.is_remote = !self.is_remote
        }
        _ => {}
      },
      _ => {
        let Some(input) = self.input_mut(field) else {
          return KeyResult::Handled;
        };
        match input.handle_key(key) {
          InputResult::Submitted(_) => return self.submit(),
          InputResult::Cancelled => return KeyResult::Event(FormEvent::Cancel),
          InputResult::Consumed | InputResult::NotHandled => {}
        }
      }
    }
    KeyResult::Handled
  }

  fn field_value(&self, field: Field, lang: Language) -> Span<'static> {
    match field {
      Field::Status => Span::styled(
        format!("< {} >", self.status.label(lang)),
        Style::default().fg(status_color(Some(self.status))),
      ),
      Field::Remote => Span::raw(if self.is_remote { "[x]" } else { "[ ]" }),
      _ => Span::raw(
        self
          .input(field)
          .map(|i| i.value().to_string())
          .unwrap_or_default(),
      ),
    }
  }

  /// Render the dialog centered in `area`. `error` is the last failed save, if any.
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect, lang: Language, error: Option<&str>) {
    let label_width = Field::ALL
      .iter()
      .map(|f| lang.t(f.label()).chars().count() + usize::from(f.is_required()))
      .max()
      .unwrap_or(12) as u16
      + 1;

    let height = Field::ALL.len() as u16 + 7;
    let overlay_area = centered_rect(area.width.saturating_sub(4).min(80), height, area);
    frame.render_widget(Clear, overlay_area);

    let title = if self.is_edit() {
      lang.t(Text::DialogTitleEdit)
    } else {
      lang.t(Text::DialogTitleCreate)
    };
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(PRIMARY))
      .title(format!(" {} ", title));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = vec![
      Line::from(Span::styled(
        lang.t(Text::DialogDescription),
        Style::default().fg(MUTED),
      )),
      Line::raw(""),
    ];

    for (idx, field) in Field::ALL.iter().enumerate() {
      let focused = idx == self.focus;
      let marker = if field.is_required() { "*" } else { "" };
      let label = format!(
        "{:>width$}",
        format!("{}{}", lang.t(field.label()), marker),
        width = label_width as usize
      );
      let flagged = self.show_required
        && (Some(*field) == self.invalid_date()
          || (field.is_required() && self.input(*field).is_some_and(|i| i.value().trim().is_empty())));
      let label_style = if flagged {
        Style::default().fg(DANGER).bold()
      } else if focused {
        Style::default().fg(PRIMARY).bold()
      } else {
        Style::default().fg(MUTED)
      };
      lines.push(Line::from(vec![
        Span::styled(label, label_style),
        Span::raw("  "),
        self.field_value(*field, lang),
      ]));
    }

    match error.filter(|_| !self.submitting) {
      Some(message) => lines.push(Line::from(Span::styled(
        truncate(message, inner.width as usize),
        Style::default().fg(DANGER),
      ))),
      None => lines.push(Line::raw("")),
    }
    lines.push(self.hint_line(lang));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);

    // Terminal cursor on the focused text field
    if !self.submitting && !self.picker.is_active() {
      if let Some(input) = self.input(self.focused()) {
        let x = inner.x + label_width + 2 + input.cursor_position() as u16;
        let y = inner.y + 2 + self.focus as u16;
        if x < inner.right() && y < inner.bottom() {
          frame.set_cursor_position(Position::new(x, y));
        }
      }
    }

    self.picker.render_overlay(frame, area, lang);
  }

  fn hint_line(&self, lang: Language) -> Line<'static> {
    if self.submitting {
      return Line::from(Span::styled(
        lang.t(Text::DialogSaving),
        Style::default().fg(Color::Yellow),
      ));
    }
    if self.show_required && !self.is_valid() {
      let message = if self.to_request().is_valid() {
        Text::DialogInvalidDate
      } else {
        Text::DialogRequired
      };
      return Line::from(Span::styled(lang.t(message), Style::default().fg(DANGER)));
    }

    let submit = if self.is_edit() {
      lang.t(Text::Save)
    } else {
      lang.t(Text::Create)
    };
    // Submit hint is dimmed while the form cannot be sent
    let submit_style = if self.is_valid() {
      Style::default().fg(PRIMARY)
    } else {
      Style::default().fg(MUTED)
    };

    let mut spans = vec![
      Span::styled("<Enter>", submit_style),
      Span::styled(format!(" {}  ", submit), Style::default().fg(MUTED)),
      Span::styled("<Esc>", Style::default().fg(PRIMARY)),
      Span::styled(format!(" {}  ", lang.t(Text::Cancel)), Style::default().fg(MUTED)),
      Span::styled("<Tab>", Style::default().fg(PRIMARY)),
      Span::styled(format!(" {}", lang.t(Text::NextField)), Style::default().fg(MUTED)),
    ];
    if self.focused().is_date() {
      spans.push(Span::styled("  <Ctrl-T>", Style::default().fg(PRIMARY)));
      spans.push(Span::styled(
        format!(" {}", lang.t(Text::Today)),
        Style::default().fg(MUTED),
      ));
    }
    Line::from(spans)
  }
}
