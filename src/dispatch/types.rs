use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page panel highlighted after a request. Has no effect on business logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    AddStudent,
    EditStudent,
    DeleteStudent,
    AddGrade,
    EditGrade,
    DeleteGrade,
    ViewAverage,
    HighestScorer,
    LowestScorer,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::AddStudent,
        Section::EditStudent,
        Section::DeleteStudent,
        Section::AddGrade,
        Section::EditGrade,
        Section::DeleteGrade,
        Section::ViewAverage,
        Section::HighestScorer,
        Section::LowestScorer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::AddStudent => "add-student",
            Section::EditStudent => "edit-student",
            Section::DeleteStudent => "delete-student",
            Section::AddGrade => "add-grade",
            Section::EditGrade => "edit-grade",
            Section::DeleteGrade => "delete-grade",
            Section::ViewAverage => "view-average",
            Section::HighestScorer => "highest-scorer",
            Section::LowestScorer => "lowest-scorer",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::AddStudent => "Add Student",
            Section::EditStudent => "Edit Student",
            Section::DeleteStudent => "Delete Student",
            Section::AddGrade => "Add Grade",
            Section::EditGrade => "Edit Grade",
            Section::DeleteGrade => "Delete Grade",
            Section::ViewAverage => "View Average",
            Section::HighestScorer => "Highest Scorer",
            Section::LowestScorer => "Lowest Scorer",
        }
    }

    /// Value of the `action` form field submitted from this section's form.
    pub fn action_name(&self) -> &'static str {
        match self {
            Section::AddStudent => "add_student",
            Section::EditStudent => "edit_student",
            Section::DeleteStudent => "delete_student",
            Section::AddGrade => "add_grade",
            Section::EditGrade => "edit_grade",
            Section::DeleteGrade => "delete_grade",
            Section::ViewAverage => "view_average",
            Section::HighestScorer => "highest",
            Section::LowestScorer => "lowest",
        }
    }

    /// Resolves the `section` query parameter, falling back to the default panel.
    pub fn from_param(param: Option<&str>) -> Self {
        param.and_then(|p| p.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}

/// What a request produced: an optional status message, an optional computed
/// result line, and the section to show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub message: Option<String>,
    pub result: Option<String>,
    pub section: Section,
}

impl Outcome {
    pub fn message(section: Section, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            result: None,
            section,
        }
    }

    pub fn result(section: Section, result: impl Into<String>) -> Self {
        Self {
            message: None,
            result: Some(result.into()),
            section,
        }
    }

    pub fn idle(section: Section) -> Self {
        Self {
            message: None,
            result: None,
            section,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SectionParams {
    pub section: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RosterStats {
    pub students: usize,
    pub grades: usize,
}
