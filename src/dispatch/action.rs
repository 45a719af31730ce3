//! Action Decoding
//!
//! Turns the raw form body into a typed [`Action`]. Field presence, delimiter checks
//! and index/grade parsing happen here. The one exception is the value of
//! `add_grade`, which is parsed by the service after the student lookup.

use super::types::Section;
use crate::error::ActionError;
use crate::roster::StudentPatch;
use crate::roster::format::FIELD_DELIMITER;

use serde::Deserialize;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 100.0;

/// Raw form body. Field names match the HTML forms rendered by the page.
#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    pub action: Option<String>,

    pub sid: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
    pub dob: Option<String>,

    pub edit_sid: Option<String>,
    pub edit_first: Option<String>,
    pub edit_last: Option<String>,
    pub edit_dob: Option<String>,

    pub delete_sid: Option<String>,

    pub grade_sid: Option<String>,
    pub grade_value: Option<String>,

    pub edit_grade_sid: Option<String>,
    pub grade_index: Option<String>,
    pub new_grade: Option<String>,

    pub delete_grade_sid: Option<String>,
    pub delete_grade_index: Option<String>,

    pub avg_sid: Option<String>,
}

/// A request that changes the roster. Each one is applied and then persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddStudent {
        id: String,
        first: String,
        last: String,
        dob: String,
    },
    EditStudent {
        id: String,
        patch: StudentPatch,
    },
    DeleteStudent {
        id: String,
    },
    /// `grade` is the trimmed form value. It is parsed only once the student is found.
    AddGrade {
        id: String,
        grade: String,
    },
    EditGrade {
        id: String,
        index: usize,
        value: f64,
    },
    DeleteGrade {
        id: String,
        index: usize,
    },
}

impl Mutation {
    pub fn section(&self) -> Section {
        match self {
            Mutation::AddStudent { .. } => Section::AddStudent,
            Mutation::EditStudent { .. } => Section::EditStudent,
            Mutation::DeleteStudent { .. } => Section::DeleteStudent,
            Mutation::AddGrade { .. } => Section::AddGrade,
            Mutation::EditGrade { .. } => Section::EditGrade,
            Mutation::DeleteGrade { .. } => Section::DeleteGrade,
        }
    }

    pub fn name(&self) -> &'static str {
        self.section().action_name()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Mutate(Mutation),
    ViewAverage { id: String },
    Highest,
    Lowest,
}

impl Action {
    pub fn section(&self) -> Section {
        match self {
            Action::Mutate(mutation) => mutation.section(),
            Action::ViewAverage { .. } => Section::ViewAverage,
            Action::Highest => Section::HighestScorer,
            Action::Lowest => Section::LowestScorer,
        }
    }

    pub fn name(&self) -> &'static str {
        self.section().action_name()
    }
}

impl From<Mutation> for Action {
    fn from(mutation: Mutation) -> Self {
        Action::Mutate(mutation)
    }
}

/// A form that named an action but failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub section: Section,
    pub error: ActionError,
}

impl ActionForm {
    /// Decodes the form. `Ok(None)` means no action was submitted.
    pub fn decode(self, fallback: Section) -> Result<Option<Action>, Rejected> {
        let Some(name) = self
            .action
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            return Ok(None);
        };
        let section = section_for(name).unwrap_or(fallback);
        let reject = |error| Rejected { section, error };

        let action: Action = match name {
            "add_student" => {
                let id = required(&self.sid).map_err(reject)?;
                let first = required(&self.first).map_err(reject)?;
                let last = required(&self.last).map_err(reject)?;
                let dob = required(&self.dob).map_err(reject)?;
                for field in [&id, &first, &last, &dob] {
                    storable(field).map_err(reject)?;
                }
                Mutation::AddStudent {
                    id,
                    first,
                    last,
                    dob,
                }
                .into()
            }
            "edit_student" => {
                let id = required(&self.edit_sid).map_err(reject)?;
                let patch = StudentPatch {
                    first: optional(&self.edit_first),
                    last: optional(&self.edit_last),
                    dob: optional(&self.edit_dob),
                };
                for field in [&patch.first, &patch.last, &patch.dob].into_iter().flatten() {
                    storable(field).map_err(reject)?;
                }
                Mutation::EditStudent { id, patch }.into()
            }
            "delete_student" => Mutation::DeleteStudent {
                id: required(&self.delete_sid).map_err(reject)?,
            }
            .into(),
            "add_grade" => Mutation::AddGrade {
                id: required(&self.grade_sid).map_err(reject)?,
                grade: required(&self.grade_value).map_err(reject)?,
            }
            .into(),
            "edit_grade" => {
                let id = required(&self.edit_grade_sid).map_err(reject)?;
                let raw_index = required(&self.grade_index).map_err(reject)?;
                let raw_value = required(&self.new_grade).map_err(reject)?;
                Mutation::EditGrade {
                    id,
                    index: parse_index(&raw_index).map_err(reject)?,
                    value: parse_grade(&raw_value).map_err(reject)?,
                }
                .into()
            }
            "delete_grade" => {
                let id = required(&self.delete_grade_sid).map_err(reject)?;
                let raw_index = required(&self.delete_grade_index).map_err(reject)?;
                Mutation::DeleteGrade {
                    id,
                    index: parse_index(&raw_index).map_err(reject)?,
                }
                .into()
            }
            "view_average" => Action::ViewAverage {
                id: required(&self.avg_sid).map_err(reject)?,
            },
            "highest" => Action::Highest,
            "lowest" => Action::Lowest,
            _ => return Err(reject(ActionError::UnknownAction)),
        };

        Ok(Some(action))
    }
}

fn section_for(action: &str) -> Option<Section> {
    Section::ALL
        .into_iter()
        .find(|section| section.action_name() == action)
}

fn optional(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(field: &Option<String>) -> Result<String, ActionError> {
    optional(field).ok_or(ActionError::MissingFields)
}

fn storable(field: &str) -> Result<(), ActionError> {
    if field.contains(FIELD_DELIMITER) || field.contains(['\r', '\n']) {
        return Err(ActionError::ForbiddenCharacters);
    }
    Ok(())
}

/// Parses a grade and checks it lies in `[MIN_GRADE, MAX_GRADE]`.
pub fn parse_grade(raw: &str) -> Result<f64, ActionError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ActionError::InvalidGradeValue)?;
    if !value.is_finite() {
        return Err(ActionError::InvalidGradeValue);
    }
    if !(MIN_GRADE..=MAX_GRADE).contains(&value) {
        return Err(ActionError::GradeOutOfRange);
    }
    Ok(value)
}

/// Parses a grade position. Negative or non-numeric input is an invalid index.
pub fn parse_index(raw: &str) -> Result<usize, ActionError> {
    raw.trim()
        .parse()
        .map_err(|_| ActionError::InvalidGradeIndex)
}
