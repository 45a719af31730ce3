use super::format::{
    format_grades_line, format_student_line, parse_grades_line, parse_student_line,
};
use super::types::{Roster, StudentRecord};
use crate::error::{Result, RosterError};

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const STUDENTS_FILE: &str = "students.txt";
pub const GRADES_FILE: &str = "grades.txt";

/// Location of the two backing files of a roster.
#[derive(Debug, Clone)]
pub struct RosterFiles {
    data_dir: PathBuf,
}

impl RosterFiles {
    /// Binds to `data_dir`, creating it if it does not exist yet.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            tracing::info!("Creating data directory {}", data_dir.display());
        }
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn students_path(&self) -> PathBuf {
        self.data_dir.join(STUDENTS_FILE)
    }

    pub fn grades_path(&self) -> PathBuf {
        self.data_dir.join(GRADES_FILE)
    }

    /// Rebuilds a roster from disk.
    ///
    /// A missing file contributes nothing. Malformed lines and grade rows whose id
    /// has no student are skipped with a warning.
    pub fn load(&self) -> Result<Roster> {
        let mut roster = Roster::new();

        if let Some(text) = read_if_exists(&self.students_path())? {
            for line in non_blank_lines(&text) {
                match parse_student_line(line) {
                    Ok(row) => {
                        let record = StudentRecord::new(row.id, row.first, row.last, row.dob);
                        if let Some(previous) = roster.upsert(record) {
                            tracing::warn!(
                                "Duplicate student id {} in {}, keeping the later line",
                                previous.id,
                                STUDENTS_FILE
                            );
                        }
                    }
                    Err(e) => tracing::warn!("Skipping line in {}: {}", STUDENTS_FILE, e),
                }
            }
        }

        if let Some(text) = read_if_exists(&self.grades_path())? {
            for line in non_blank_lines(&text) {
                match parse_grades_line(line) {
                    Ok(row) => match roster.get_mut(&row.id) {
                        Some(student) => student.grades = row.grades,
                        None => tracing::warn!(
                            "Skipping grades for unknown student id {}",
                            row.id
                        ),
                    },
                    Err(e) => tracing::warn!("Skipping line in {}: {}", GRADES_FILE, e),
                }
            }
        }

        Ok(roster)
    }

    /// Writes both files in full. Each file is replaced atomically, students first,
    /// so a crash in between leaves at worst a stale grades file.
    pub fn save(&self, roster: &Roster) -> Result<()> {
        let students: String = roster.iter().map(format_student_line).collect();
        let grades: String = roster.iter().map(format_grades_line).collect();

        self.replace_file(&self.students_path(), &students)?;
        self.replace_file(&self.grades_path(), &grades)?;
        Ok(())
    }

    fn replace_file(&self, path: &Path, contents: &str) -> Result<()> {
        // The temp file must live on the same filesystem for the rename to be atomic.
        let mut temp_file = NamedTempFile::new_in(&self.data_dir)?;
        {
            let mut writer = BufWriter::new(&mut temp_file);
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }
        temp_file.as_file().sync_all()?;

        temp_file
            .persist(path)
            .map_err(|e| RosterError::Persist {
                path: path.display().to_string(),
                source: e.error,
            })?;
        Ok(())
    }
}

fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}
