//! Add/edit form contract shared by every back-office resource.

use chrono::{DateTime, Utc};
use opsdesk_core::{AppResult, FieldErrors, RecordId};

use crate::TableRecord;

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Empty form; every required field must be supplied.
    Create,
    /// Form pre-filled from an existing record.
    Edit,
}

/// Values stamped onto records when a form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormContext {
    /// Submission time.
    pub now: DateTime<Utc>,
    /// Display name of the operator submitting the form.
    pub operator: String,
}

impl FormContext {
    /// Creates a context stamped with the current time.
    #[must_use]
    pub fn now(operator: impl Into<String>) -> Self {
        Self {
            now: Utc::now(),
            operator: operator.into(),
        }
    }
}

/// Raw form state for one resource.
///
/// Forms hold the unparsed strings an operator typed. `validate` reports one
/// message per failing field; `into_record` and `apply_to` re-run the same
/// checks so an invalid form can never reach a collection.
pub trait RecordForm: Clone + Send + Sync + 'static {
    /// Record type produced by the form.
    type Record: TableRecord;

    /// Builds an edit-mode form pre-filled from `record`.
    fn from_record(record: &Self::Record) -> Self;

    /// Checks every field.
    fn validate(&self, mode: FormMode) -> Result<(), FieldErrors>;

    /// Builds a new record (create mode).
    fn into_record(self, id: RecordId, context: &FormContext) -> AppResult<Self::Record>;

    /// Writes the form onto an existing record (edit mode).
    fn apply_to(self, record: &mut Self::Record, context: &FormContext) -> AppResult<()>;
}
