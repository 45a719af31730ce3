//! Record Store Module
//!
//! Holds the student roster in memory and persists it to two pipe-delimited files.
//!
//! ## Core Concepts
//! - **Roster**: Insertion-ordered mapping from student id to [`types::StudentRecord`].
//! - **Line Codec**: `format` parses and writes the `students.txt` / `grades.txt` lines.
//! - **Persistence**: `RosterFiles` loads both files at startup and rewrites them in full
//!   after every mutation, each through a temp-file-and-rename.

pub mod files;
pub mod format;
pub mod types;

pub use files::RosterFiles;
pub use types::{Roster, StudentPatch, StudentRecord};

#[cfg(test)]
mod tests;
