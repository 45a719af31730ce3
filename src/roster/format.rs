//! Line Codec
//!
//! Pipe-delimited line formats of the two data files:
//! - students: `id|first|last|dob`
//! - grades: `id|g1,g2,...,gn` (an empty list is written as `id|`)

use super::types::StudentRecord;
use crate::error::{Result, RosterError};

pub const FIELD_DELIMITER: char = '|';
pub const GRADE_DELIMITER: char = ',';

/// Descriptive fields of a student, as read from one students-file line.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentLine {
    pub id: String,
    pub first: String,
    pub last: String,
    pub dob: String,
}

/// One grades-file line.
#[derive(Debug, Clone, PartialEq)]
pub struct GradesLine {
    pub id: String,
    pub grades: Vec<f64>,
}

pub fn parse_student_line(line: &str) -> Result<StudentLine> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    match fields.as_slice() {
        [id, first, last, dob] if !id.is_empty() => Ok(StudentLine {
            id: id.to_string(),
            first: first.to_string(),
            last: last.to_string(),
            dob: dob.to_string(),
        }),
        _ => Err(RosterError::MalformedLine(line.to_string())),
    }
}

pub fn parse_grades_line(line: &str) -> Result<GradesLine> {
    let Some((id, grade_str)) = line.split_once(FIELD_DELIMITER) else {
        return Err(RosterError::MalformedLine(line.to_string()));
    };
    if id.is_empty() || grade_str.contains(FIELD_DELIMITER) {
        return Err(RosterError::MalformedLine(line.to_string()));
    }

    let grades = if grade_str.trim().is_empty() {
        Vec::new()
    } else {
        grade_str
            .split(GRADE_DELIMITER)
            .map(|g| g.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| RosterError::MalformedLine(line.to_string()))?
    };

    Ok(GradesLine {
        id: id.to_string(),
        grades,
    })
}

pub fn format_student_line(student: &StudentRecord) -> String {
    format!(
        "{}|{}|{}|{}\n",
        student.id, student.first, student.last, student.dob
    )
}

pub fn format_grades_line(student: &StudentRecord) -> String {
    let grade_str = student
        .grades
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{}|{}\n", student.id, grade_str)
}
