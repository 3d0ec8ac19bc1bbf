mod application_form;
mod confirm_delete;
mod input;
mod key_result;
mod status_picker;

pub use application_form::{ApplicationForm, FormEvent};
pub use confirm_delete::{ConfirmDelete, ConfirmEvent};
pub use input::{InputResult, TextInput};
pub use key_result::KeyResult;
pub use status_picker::StatusPicker;
