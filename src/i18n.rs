//! English and German UI strings.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  #[default]
  En,
  De,
}

impl Language {
  /// Parse a language tag such as "de", "DE" or "de_DE.UTF-8".
  pub fn from_tag(tag: &str) -> Option<Self> {
    let tag = tag.trim().to_lowercase();
    if tag.starts_with("de") {
      Some(Language::De)
    } else if tag.starts_with("en") {
      Some(Language::En)
    } else {
      None
    }
  }

  /// Pick German when the locale says so, English otherwise.
  pub fn detect(locale: Option<&str>) -> Self {
    match locale.and_then(Self::from_tag) {
      Some(Language::De) => Language::De,
      _ => Language::En,
    }
  }

  pub fn toggle(self) -> Self {
    match self {
      Language::En => Language::De,
      Language::De => Language::En,
    }
  }

  pub fn code(self) -> &'static str {
    match self {
      Language::En => "EN",
      Language::De => "DE",
    }
  }

  pub fn t(self, text: Text) -> &'static str {
    match self {
      Language::En => en(text),
      Language::De => de(text),
    }
  }
}

/// Translatable UI strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
  AppTitle,

  WarmupTitle,
  WarmupDescription,
  WarmupPinging,
  WarmupWaiting,
  WarmupAttempt,
  WarmupReload,
  WarmupErrorFallback,

  Loading,
  Yes,
  No,
  Open,
  Cancel,
  Create,
  Save,
  Deleting,
  Delete,
  Edit,
  New,
  Refresh,
  Language,
  Dismiss,
  NextField,
  Today,
  Quit,
  Empty,

  ErrorLoadApplications,
  ErrorSaveApplication,
  ErrorDeleteApplication,

  TableTitle,
  NoApplications,

  StatusPlanned,
  StatusApplied,
  StatusInterviewing,
  StatusOffer,
  StatusRejected,
  StatusAccepted,
  StatusUnknown,

  LabelCompany,
  LabelRole,
  LabelStatus,
  LabelDateApplied,
  LabelLocation,
  LabelRemote,
  LabelReferral,
  LabelContactPerson,
  LabelCompensation,
  LabelCompensationRange,
  LabelLastTouch,
  LabelNextAction,
  LabelNextActionDate,
  LabelLink,
  LabelNotes,

  DialogTitleCreate,
  DialogTitleEdit,
  DialogDescription,
  DialogSaving,
  DialogRequired,
  DialogInvalidDate,

  ConfirmDeleteTitle,
  /// Contains a `{label}` placeholder
  ConfirmDeleteDescription,
  ConfirmDeleteFallbackLabel,
}

fn en(text: Text) -> &'static str {
  match text {
    Text::AppTitle => "ApplyVault",

    Text::WarmupTitle => "Starting ApplyVault…",
    Text::WarmupDescription => {
      "This demo uses a backend with a cold start. The first request can take a moment. \
       Usually this takes no longer than one or two minutes."
    }
    Text::WarmupPinging => "Pinging backend…",
    Text::WarmupWaiting => "Waiting for next attempt…",
    Text::WarmupAttempt => "Attempt",
    Text::WarmupReload => "reload",
    Text::WarmupErrorFallback => "The backend is still starting.",

    Text::Loading => "Loading...",
    Text::Yes => "Yes",
    Text::No => "No",
    Text::Open => "open",
    Text::Cancel => "cancel",
    Text::Create => "create",
    Text::Save => "save",
    Text::Deleting => "Deleting...",
    Text::Delete => "delete",
    Text::Edit => "edit",
    Text::New => "new",
    Text::Refresh => "refresh",
    Text::Language => "language",
    Text::Dismiss => "dismiss",
    Text::NextField => "next field",
    Text::Today => "today",
    Text::Quit => "quit",
    Text::Empty => "-",

    Text::ErrorLoadApplications => "Could not load applications.",
    Text::ErrorSaveApplication => "Could not save application.",
    Text::ErrorDeleteApplication => "Could not delete application.",

    Text::TableTitle => "Applications",
    Text::NoApplications => "No applications yet. Press 'n' to add one.",

    Text::StatusPlanned => "Planned",
    Text::StatusApplied => "Applied",
    Text::StatusInterviewing => "Interviewing",
    Text::StatusOffer => "Offer",
    Text::StatusRejected => "Rejected",
    Text::StatusAccepted => "Accepted",
    Text::StatusUnknown => "Unknown",

    Text::LabelCompany => "Company",
    Text::LabelRole => "Role",
    Text::LabelStatus => "Status",
    Text::LabelDateApplied => "Date applied",
    Text::LabelLocation => "Location",
    Text::LabelRemote => "Remote",
    Text::LabelReferral => "Referral",
    Text::LabelContactPerson => "Contact person",
    Text::LabelCompensation => "Compensation",
    Text::LabelCompensationRange => "Compensation range",
    Text::LabelLastTouch => "Last touch",
    Text::LabelNextAction => "Next action",
    Text::LabelNextActionDate => "Next action date",
    Text::LabelLink => "Link",
    Text::LabelNotes => "Notes",

    Text::DialogTitleCreate => "New application",
    Text::DialogTitleEdit => "Edit application",
    Text::DialogDescription => "Fill in the application details and save your changes.",
    Text::DialogSaving => "Saving...",
    Text::DialogRequired => "Company and role are required",
    Text::DialogInvalidDate => "Dates must be YYYY-MM-DD",

    Text::ConfirmDeleteTitle => "Delete application",
    Text::ConfirmDeleteDescription => {
      "Are you sure you want to delete {label}? This action cannot be undone."
    }
    Text::ConfirmDeleteFallbackLabel => "this application",
  }
}

fn de(text: Text) -> &'static str {
  match text {
    Text::AppTitle => "ApplyVault",

    Text::WarmupTitle => "ApplyVault wird gestartet…",
    Text::WarmupDescription => {
      "Diese Demo nutzt ein Backend mit Kaltstart. Der erste Aufruf kann einen Moment dauern. \
       In der Regel dauert das nicht länger als ein bis zwei Minuten."
    }
    Text::WarmupPinging => "Backend wird geprüft…",
    Text::WarmupWaiting => "Warten auf nächsten Versuch…",
    Text::WarmupAttempt => "Versuch",
    Text::WarmupReload => "neu laden",
    Text::WarmupErrorFallback => "Das Backend startet noch.",

    Text::Loading => "Wird geladen...",
    Text::Yes => "Ja",
    Text::No => "Nein",
    Text::Open => "öffnen",
    Text::Cancel => "abbrechen",
    Text::Create => "erstellen",
    Text::Save => "speichern",
    Text::Deleting => "Wird gelöscht...",
    Text::Delete => "löschen",
    Text::Edit => "bearbeiten",
    Text::New => "neu",
    Text::Refresh => "aktualisieren",
    Text::Language => "Sprache",
    Text::Dismiss => "schließen",
    Text::NextField => "nächstes Feld",
    Text::Today => "heute",
    Text::Quit => "beenden",
    Text::Empty => "-",

    Text::ErrorLoadApplications => "Bewerbungen konnten nicht geladen werden.",
    Text::ErrorSaveApplication => "Bewerbung konnte nicht gespeichert werden.",
    Text::ErrorDeleteApplication => "Bewerbung konnte nicht gelöscht werden.",

    Text::TableTitle => "Bewerbungen",
    Text::NoApplications => "Noch keine Bewerbungen. Mit 'n' eine neue anlegen.",

    Text::StatusPlanned => "Geplant",
    Text::StatusApplied => "Beworben",
    Text::StatusInterviewing => "Im Interview",
    Text::StatusOffer => "Angebot",
    Text::StatusRejected => "Abgelehnt",
    Text::StatusAccepted => "Angenommen",
    Text::StatusUnknown => "Unbekannt",

    Text::LabelCompany => "Unternehmen",
    Text::LabelRole => "Rolle",
    Text::LabelStatus => "Status",
    Text::LabelDateApplied => "Bewerbungsdatum",
    Text::LabelLocation => "Standort",
    Text::LabelRemote => "Remote",
    Text::LabelReferral => "Empfehlung",
    Text::LabelContactPerson => "Ansprechperson",
    Text::LabelCompensation => "Vergütung",
    Text::LabelCompensationRange => "Vergütungsspanne",
    Text::LabelLastTouch => "Letzter Kontakt",
    Text::LabelNextAction => "Nächster Schritt",
    Text::LabelNextActionDate => "Datum nächster Schritt",
    Text::LabelLink => "Link",
    Text::LabelNotes => "Notizen",

    Text::DialogTitleCreate => "Neue Bewerbung",
    Text::DialogTitleEdit => "Bewerbung bearbeiten",
    Text::DialogDescription => "Fülle die Bewerbungsdaten aus und speichere die Änderungen.",
    Text::DialogSaving => "Wird gespeichert...",
    Text::DialogRequired => "Unternehmen und Rolle sind Pflichtfelder",
    Text::DialogInvalidDate => "Datumsangaben im Format JJJJ-MM-TT",

    Text::ConfirmDeleteTitle => "Bewerbung löschen",
    Text::ConfirmDeleteDescription => {
      "Möchtest du {label} wirklich löschen? Diese Aktion kann nicht rückgängig gemacht werden."
    }
    Text::ConfirmDeleteFallbackLabel => "diese Bewerbung",
  }
}
