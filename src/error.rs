//! Error Types
//!
//! Two families of failures exist in the service:
//! - [`RosterError`]: storage-level faults (disk I/O, malformed data lines).
//! - [`ActionError`]: user-facing rejections produced by the dispatcher. The `Display`
//!   text of each variant is the exact status message rendered on the page.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed line: {0}")]
    MalformedLine(String),
}

/// Rejections returned to the user as an inline status message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("All fields are required.")]
    MissingFields,

    #[error("Fields must not contain '|' or line breaks.")]
    ForbiddenCharacters,

    #[error("Student ID already exists.")]
    DuplicateId,

    #[error("Student not found.")]
    StudentNotFound,

    #[error("Invalid grade value. Please enter a number.")]
    InvalidGradeValue,

    #[error("Grade must be between 0 and 100.")]
    GradeOutOfRange,

    #[error("Invalid grade index.")]
    InvalidGradeIndex,

    #[error("Unknown action.")]
    UnknownAction,

    #[error("Could not save changes.")]
    PersistFailed,
}
