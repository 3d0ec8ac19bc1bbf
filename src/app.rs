use crate::api::JobsClient;
use crate::cache::QueryCache;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::i18n::Language;
use crate::sync::SyncedJobsClient;
use crate::ui;
use crate::ui::view::{View, ViewAction};
use crate::ui::views::WarmupView;
use crate::warmup::{HealthGate, RandomJitter};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Main application state
pub struct App {
  config: Config,
  lang: Language,
  base_url: String,

  /// Navigation stack - root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  should_quit: bool,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let lang = config.resolved_language();
    let mut app = Self {
      base_url: config.api.base_url.clone(),
      config,
      lang,
      view_stack: Vec::new(),
      should_quit: false,
    };
    app.reload()?;
    Ok(app)
  }

  /// Rebuild everything below the config: client, cache, gate and views.
  fn reload(&mut self) -> Result<()> {
    let jobs = JobsClient::new(&self.config.api.base_url, self.config.api.timeout())?;
    let client = SyncedJobsClient::new(jobs.clone(), QueryCache::new());

    let gate = HealthGate::spawn(
      move || {
        let jobs = jobs.clone();
        async move { jobs.health().await }
      },
      self.config.warmup.backoff(),
      Arc::new(RandomJitter),
    );

    tracing::info!(base_url = %client.base_url(), "starting warm-up");
    self.base_url = client.base_url().to_string();
    self.view_stack = vec![Box::new(WarmupView::new(gate, client, self.lang))];
    Ok(())
  }

  pub async fn run(&mut self) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = self.event_loop().await;

    restore_terminal();
    result
  }

  async fn event_loop(&mut self) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut events = EventHandler::new(TICK_RATE);

    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(Event::Key(key)) => self.handle_key(key)?,
        Some(Event::Tick) => self.tick()?,
        Some(Event::Resize) => {}
        None => break,
      }
    }

    Ok(())
  }

  fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return Ok(());
    }

    let action = match self.view_stack.last_mut() {
      Some(view) => view.handle_key(key),
      None => ViewAction::Quit,
    };
    self.apply(action)
  }

  fn tick(&mut self) -> Result<()> {
    let action = match self.view_stack.last_mut() {
      Some(view) => view.tick(),
      None => ViewAction::None,
    };
    self.apply(action)
  }

  fn apply(&mut self, action: ViewAction) -> Result<()> {
    match action {
      ViewAction::None => {}
      ViewAction::Replace(view) => {
        self.view_stack.pop();
        self.view_stack.push(view);
      }
      ViewAction::Reload => {
        tracing::info!("reload requested");
        self.reload()?;
      }
      ViewAction::ToggleLanguage => {
        self.lang = self.lang.toggle();
        tracing::debug!(lang = self.lang.code(), "language changed");
        for view in &mut self.view_stack {
          view.set_language(self.lang);
        }
      }
      ViewAction::Quit => self.should_quit = true,
    }
    Ok(())
  }

  // Accessors for UI rendering
  pub fn current_view_mut(&mut self) -> Option<&mut Box<dyn View>> {
    self.view_stack.last_mut()
  }

  pub fn language(&self) -> Language {
    self.lang
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn breadcrumb(&self) -> Vec<String> {
    self
      .view_stack
      .iter()
      .map(|v| v.breadcrumb_label())
      .collect()
  }
}

/// Leave raw mode and the alternate screen; safe to call more than once.
pub fn restore_terminal() {
  if let Err(e) = disable_raw_mode() {
    tracing::warn!(error = %e, "failed to disable raw mode");
  }
  if let Err(e) = stdout().execute(LeaveAlternateScreen) {
    tracing::warn!(error = %e, "failed to leave alternate screen");
  }
}
