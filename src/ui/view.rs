use crate::i18n::Language;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// A keyboard shortcut hint for display in the header
#[derive(Debug, Clone)]
pub struct ShortcutInfo {
  pub key: &'static str,
  pub label: &'static str,
  pub priority: u8, // Lower = shown first
}

impl ShortcutInfo {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self {
      key,
      label,
      priority: 100,
    }
  }

  pub const fn with_priority(mut self, priority: u8) -> Self {
    self.priority = priority;
    self
  }
}

/// Actions that a view can request in response to user input or a tick
pub enum ViewAction {
  /// No action needed
  None,
  /// Swap the current view for another
  Replace(Box<dyn View>),
  /// Throw away all state and start again from the warm-up screen
  Reload,
  /// Switch between the supported UI languages
  ToggleLanguage,
  Quit,
}

/// Trait for view behavior
///
/// Views handle their own dialogs and return actions for the App to execute:
/// App → View → Components
///
/// Views that load data asynchronously use Query<T> / Mutation<T> internally
/// and poll them in `tick()`.
pub trait View {
  /// Handle a key event, returning an action for App to execute
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

  /// Render the view to the frame
  fn render(&mut self, frame: &mut Frame, area: Rect);

  /// Get the breadcrumb label for this view
  fn breadcrumb_label(&self) -> String;

  /// Called on each tick to poll async work
  fn tick(&mut self) -> ViewAction {
    ViewAction::None
  }

  /// Called on every view in the stack when the UI language changes
  fn set_language(&mut self, lang: Language);

  /// Short status text for the footer (e.g. a pending request)
  fn status(&self) -> Option<String> {
    None
  }

  /// Keyboard shortcuts to display in the header
  fn shortcuts(&self) -> Vec<ShortcutInfo>;
}
