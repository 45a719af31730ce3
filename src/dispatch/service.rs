use super::action::{Action, Mutation, parse_grade};
use super::types::{Outcome, RosterStats};
use crate::error::{ActionError, Result};
use crate::presentation::page;
use crate::roster::{Roster, RosterFiles, StudentRecord};

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const NO_GRADES: &str = "No grades available.";

/// Owns the roster and its backing files.
///
/// Queries and page rendering share a read lock. A mutation holds the write lock
/// across apply + persist, and works on a copy that replaces the live roster only
/// once the files have been written.
pub struct RosterService {
    roster: RwLock<Roster>,
    files: RosterFiles,
}

impl RosterService {
    /// Opens the data directory and loads whatever roster it holds.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Arc<Self>> {
        let files = RosterFiles::open(data_dir)?;
        let roster = files.load()?;
        tracing::info!(
            "Loaded {} students with {} grades from {}",
            roster.len(),
            roster.grade_count(),
            files.data_dir().display()
        );
        Ok(Arc::new(Self {
            roster: RwLock::new(roster),
            files,
        }))
    }

    pub async fn snapshot(&self) -> Roster {
        self.roster.read().await.clone()
    }

    pub async fn stats(&self) -> RosterStats {
        let roster = self.roster.read().await;
        RosterStats {
            students: roster.len(),
            grades: roster.grade_count(),
        }
    }

    pub async fn render(&self, outcome: &Outcome) -> String {
        let roster = self.roster.read().await;
        page::render(
            &roster,
            outcome.message.as_deref(),
            outcome.result.as_deref(),
            outcome.section,
        )
    }

    /// Runs one decoded action and reports what the page should show.
    pub async fn execute(&self, action: Action) -> Outcome {
        let section = action.section();
        tracing::debug!("Dispatching action {}", action.name());

        match action {
            Action::ViewAverage { id } => {
                let roster = self.roster.read().await;
                // An unknown id reads the same as a student with no grades.
                match roster.get(&id).and_then(|s| s.average().map(|avg| (s, avg))) {
                    Some((student, avg)) => Outcome::result(
                        section,
                        format!("{} → Average: {:.2}", student.full_name(), avg),
                    ),
                    None => Outcome::result(section, NO_GRADES),
                }
            }
            Action::Highest => {
                let roster = self.roster.read().await;
                Outcome::result(section, ranking_line(roster.highest_average()))
            }
            Action::Lowest => {
                let roster = self.roster.read().await;
                Outcome::result(section, ranking_line(roster.lowest_average()))
            }
            Action::Mutate(mutation) => match self.commit(mutation).await {
                Ok(message) => Outcome::message(section, message),
                Err(e) => Outcome::message(section, e.to_string()),
            },
        }
    }

    async fn commit(&self, mutation: Mutation) -> std::result::Result<&'static str, ActionError> {
        let mut live = self.roster.write().await;
        let mut working = live.clone();

        let message = apply(&mut working, &mutation).inspect_err(|e| {
            tracing::debug!("Rejected {}: {}", mutation.name(), e);
        })?;

        if let Err(e) = self.files.save(&working) {
            tracing::error!("Failed to persist {}: {}", mutation.name(), e);
            return Err(ActionError::PersistFailed);
        }

        *live = working;
        tracing::info!("{}: {}", mutation.name(), message);
        Ok(message)
    }
}

/// Applies `mutation` to `roster`, returning the confirmation message.
pub fn apply(
    roster: &mut Roster,
    mutation: &Mutation,
) -> std::result::Result<&'static str, ActionError> {
    match mutation {
        Mutation::AddStudent {
            id,
            first,
            last,
            dob,
        } => {
            let record = StudentRecord::new(id.clone(), first.clone(), last.clone(), dob.clone());
            if !roster.insert(record) {
                return Err(ActionError::DuplicateId);
            }
            Ok("Student added.")
        }
        Mutation::EditStudent { id, patch } => {
            if !roster.apply_patch(id, patch.clone()) {
                return Err(ActionError::StudentNotFound);
            }
            Ok("Student updated.")
        }
        Mutation::DeleteStudent { id } => {
            roster.remove(id).ok_or(ActionError::StudentNotFound)?;
            Ok("Student deleted.")
        }
        Mutation::AddGrade { id, grade } => {
            let student = roster.get_mut(id).ok_or(ActionError::StudentNotFound)?;
            student.grades.push(parse_grade(grade)?);
            Ok("Grade added.")
        }
        Mutation::EditGrade { id, index, value } => {
            let student = roster.get_mut(id).ok_or(ActionError::StudentNotFound)?;
            let slot = student
                .grades
                .get_mut(*index)
                .ok_or(ActionError::InvalidGradeIndex)?;
            *slot = *value;
            Ok("Grade updated.")
        }
        Mutation::DeleteGrade { id, index } => {
            let student = roster.get_mut(id).ok_or(ActionError::StudentNotFound)?;
            if *index >= student.grades.len() {
                return Err(ActionError::InvalidGradeIndex);
            }
            student.grades.remove(*index);
            Ok("Grade deleted.")
        }
    }
}

fn ranking_line(ranked: Option<(&StudentRecord, f64)>) -> String {
    match ranked {
        Some((student, avg)) => format!("{} → {:.2}", student.full_name(), avg),
        None => NO_GRADES.to_string(),
    }
}
