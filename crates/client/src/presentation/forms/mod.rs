//! Modal form controllers.
//!
//! Every form follows the same contract: open blank for create or
//! pre-filled for edit, validate locally before any network call,
//! gate submission on an in-flight flag, merge the server's response
//! into state on success and close, stay open on failure.

pub mod character_form;
pub mod scenario_form;
pub mod settings_form;

pub use character_form::CharacterForm;
pub use scenario_form::{ScenarioForm, SectionVisibility};
pub use settings_form::SettingsForm;

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Round trip succeeded; the form has closed.
    Saved,
    /// Local validation failed before any network call; focus should
    /// return to the named field.
    Rejected { field: &'static str },
    /// The round trip failed; the form stays open with submit
    /// re-enabled and the error already surfaced as a notification.
    Failed,
    /// A submit was already running; this one was ignored.
    InFlight,
}
