//! Record Store Tests
//!
//! Validates the in-memory roster and its file persistence.
//!
//! ## Test Scopes
//! - **Line Codec**: Parsing and formatting of `students.txt` / `grades.txt` lines.
//! - **Roster**: Insertion order, patching, averages and best/worst ranking.
//! - **RosterFiles**: Load/save against a temporary data directory, including
//!   missing files and inconsistent data.

#[cfg(test)]
mod tests {
    use crate::roster::files::{GRADES_FILE, STUDENTS_FILE};
    use crate::roster::format::{
        format_grades_line, format_student_line, parse_grades_line, parse_student_line,
    };
    use crate::roster::{Roster, RosterFiles, StudentPatch, StudentRecord};
    use std::fs;

    fn student(id: &str, first: &str, last: &str, grades: &[f64]) -> StudentRecord {
        let mut record = StudentRecord::new(
            id.to_string(),
            first.to_string(),
            last.to_string(),
            "2001-02-03".to_string(),
        );
        record.grades = grades.to_vec();
        record
    }

    // ============================================================
    // LINE CODEC TESTS
    // ============================================================

    #[test]
    fn test_parse_student_line() {
        let row = parse_student_line("s1|Ada|Lovelace|1815-12-10").unwrap();

        assert_eq!(row.id, "s1");
        assert_eq!(row.first, "Ada");
        assert_eq!(row.last, "Lovelace");
        assert_eq!(row.dob, "1815-12-10");
    }

    #[test]
    fn test_parse_student_line_rejects_wrong_field_count() {
        assert!(parse_student_line("s1|Ada|Lovelace").is_err());
        assert!(parse_student_line("s1|Ada|Lovelace|1815|extra").is_err());
        assert!(parse_student_line("|Ada|Lovelace|1815").is_err());
    }

    #[test]
    fn test_parse_grades_line() {
        let row = parse_grades_line("s1|70,85.5,90").unwrap();

        assert_eq!(row.id, "s1");
        assert_eq!(row.grades, vec![70.0, 85.5, 90.0]);
    }

    #[test]
    fn test_parse_grades_line_empty_list() {
        let row = parse_grades_line("s1|").unwrap();
        assert!(row.grades.is_empty());
    }

    #[test]
    fn test_parse_grades_line_rejects_garbage() {
        assert!(parse_grades_line("s1").is_err());
        assert!(parse_grades_line("s1|70,abc").is_err());
        assert!(parse_grades_line("s1|70,NaN").is_err());
        assert!(parse_grades_line("s1|70|80").is_err());
    }

    #[test]
    fn test_format_lines() {
        let record = student("s1", "Ada", "Lovelace", &[70.0, 85.5]);

        assert_eq!(format_student_line(&record), "s1|Ada|Lovelace|2001-02-03\n");
        assert_eq!(format_grades_line(&record), "s1|70,85.5\n");
    }

    #[test]
    fn test_format_grades_line_without_grades() {
        let record = student("s1", "Ada", "Lovelace", &[]);
        assert_eq!(format_grades_line(&record), "s1|\n");
    }

    // ============================================================
    // ROSTER TESTS
    // ============================================================

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut roster = Roster::new();
        assert!(roster.insert(student("s1", "Ada", "Lovelace", &[90.0])));

        let inserted = roster.insert(student("s1", "Other", "Person", &[]));

        assert!(!inserted);
        let existing = roster.get("s1").unwrap();
        assert_eq!(existing.first, "Ada");
        assert_eq!(existing.grades, vec![90.0]);
    }

    #[test]
    fn test_remove_preserves_order_of_others() {
        let mut roster = Roster::new();
        for id in ["a", "b", "c", "d"] {
            roster.insert(student(id, "F", "L", &[]));
        }

        roster.remove("b");

        let ids: Vec<&str> = roster.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_apply_patch_only_touches_supplied_fields() {
        let mut roster = Roster::new();
        roster.insert(student("s1", "Ada", "Lovelace", &[]));

        let patched = roster.apply_patch(
            "s1",
            StudentPatch {
                last: Some("King".to_string()),
                ..Default::default()
            },
        );

        assert!(patched);
        let record = roster.get("s1").unwrap();
        assert_eq!(record.first, "Ada");
        assert_eq!(record.last, "King");
        assert_eq!(record.dob, "2001-02-03");
    }

    #[test]
    fn test_apply_patch_unknown_student() {
        let mut roster = Roster::new();
        assert!(!roster.apply_patch("missing", StudentPatch::default()));
    }

    #[test]
    fn test_average() {
        let record = student("s1", "Ada", "Lovelace", &[70.0, 80.0, 90.0]);
        assert_eq!(record.average(), Some(80.0));

        let empty = student("s2", "Alan", "Turing", &[]);
        assert_eq!(empty.average(), None);
    }

    #[test]
    fn test_highest_and_lowest_average() {
        let mut roster = Roster::new();
        roster.insert(student("a", "Ann", "A", &[50.0, 70.0]));
        roster.insert(student("n", "No", "Grades", &[]));
        roster.insert(student("b", "Bob", "B", &[90.0]));

        let (top, top_avg) = roster.highest_average().unwrap();
        let (bottom, bottom_avg) = roster.lowest_average().unwrap();

        assert_eq!(top.id, "b");
        assert_eq!(top_avg, 90.0);
        assert_eq!(bottom.id, "a");
        assert_eq!(bottom_avg, 60.0);
    }

    #[test]
    fn test_ranking_ties_go_to_first_encountered() {
        let mut roster = Roster::new();
        roster.insert(student("first", "F", "One", &[80.0]));
        roster.insert(student("second", "S", "Two", &[80.0]));

        assert_eq!(roster.highest_average().unwrap().0.id, "first");
        assert_eq!(roster.lowest_average().unwrap().0.id, "first");
    }

    #[test]
    fn test_ranking_without_grades() {
        let mut roster = Roster::new();
        assert!(roster.highest_average().is_none());

        roster.insert(student("s1", "Ada", "Lovelace", &[]));
        assert!(roster.highest_average().is_none());
        assert!(roster.lowest_average().is_none());
    }

    // ============================================================
    // ROSTER FILES TESTS
    // ============================================================

    #[test]
    fn test_open_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().join("nested").join("data");

        let files = RosterFiles::open(&data_dir).unwrap();

        assert!(data_dir.is_dir());
        assert!(files.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let files = RosterFiles::open(tmp.path()).unwrap();

        let mut roster = Roster::new();
        roster.insert(student("s2", "Alan", "Turing", &[88.5, 92.0, 0.1]));
        roster.insert(student("s1", "Ada", "Lovelace", &[]));
        files.save(&roster).unwrap();

        let loaded = files.load().unwrap();

        assert_eq!(loaded, roster);
        let ids: Vec<&str> = loaded.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s1"]);
    }

    #[test]
    fn test_save_writes_expected_file_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let files = RosterFiles::open(tmp.path()).unwrap();

        let mut roster = Roster::new();
        roster.insert(student("s1", "Ada", "Lovelace", &[70.0, 85.5]));
        roster.insert(student("s2", "Alan", "Turing", &[]));
        files.save(&roster).unwrap();

        let students = fs::read_to_string(tmp.path().join(STUDENTS_FILE)).unwrap();
        let grades = fs::read_to_string(tmp.path().join(GRADES_FILE)).unwrap();
        assert_eq!(
            students,
            "s1|Ada|Lovelace|2001-02-03\ns2|Alan|Turing|2001-02-03\n"
        );
        assert_eq!(grades, "s1|70,85.5\ns2|\n");
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let files = RosterFiles::open(tmp.path()).unwrap();

        let mut roster = Roster::new();
        roster.insert(student("s1", "Ada", "Lovelace", &[70.0]));
        roster.insert(student("s2", "Alan", "Turing", &[]));
        files.save(&roster).unwrap();

        roster.remove("s1");
        files.save(&roster).unwrap();

        let loaded = files.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(!loaded.contains("s1"));

        // No temp files left behind
        let entries = fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 2);
    }

    #[test]
    fn test_load_skips_orphan_grade_rows() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(STUDENTS_FILE), "s1|Ada|Lovelace|1815\n").unwrap();
        fs::write(tmp.path().join(GRADES_FILE), "ghost|50,60\ns1|90\n").unwrap();

        let loaded = RosterFiles::open(tmp.path()).unwrap().load().unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("s1").unwrap().grades, vec![90.0]);
        assert!(!loaded.contains("ghost"));
    }

    #[test]
    fn test_load_skips_malformed_and_blank_lines() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(STUDENTS_FILE),
            "s1|Ada|Lovelace|1815\n\nbroken line\r\ns2|Alan|Turing|1912\r\n",
        )
        .unwrap();
        fs::write(tmp.path().join(GRADES_FILE), "s1|abc\ns2|75\n").unwrap();

        let loaded = RosterFiles::open(tmp.path()).unwrap().load().unwrap();

        assert_eq!(loaded.len(), 2);
        assert!(loaded.get("s1").unwrap().grades.is_empty());
        assert_eq!(loaded.get("s2").unwrap().grades, vec![75.0]);
        assert_eq!(loaded.get("s2").unwrap().dob, "1912");
    }

    #[test]
    fn test_load_trims_surrounding_whitespace() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(STUDENTS_FILE),
            "  s1|Ada|Lovelace|1815 \n\t\n",
        )
        .unwrap();
        fs::write(tmp.path().join(GRADES_FILE), " s1|90,80\t\n").unwrap();

        let loaded = RosterFiles::open(tmp.path()).unwrap().load().unwrap();

        let record = loaded.get("s1").unwrap();
        assert_eq!(record.dob, "1815");
        assert_eq!(record.grades, vec![90.0, 80.0]);
    }

    #[test]
    fn test_load_students_without_grades_file() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(STUDENTS_FILE), "s1|Ada|Lovelace|1815\n").unwrap();

        let loaded = RosterFiles::open(tmp.path()).unwrap().load().unwrap();

        assert_eq!(loaded.len(), 1);
        assert!(loaded.get("s1").unwrap().grades.is_empty());
    }

    #[test]
    fn test_load_reads_legacy_float_formatting() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(STUDENTS_FILE), "s1|Ada|Lovelace|1815\n").unwrap();
        fs::write(tmp.path().join(GRADES_FILE), "s1|85.0,90.0,77.25\n").unwrap();

        let loaded = RosterFiles::open(tmp.path()).unwrap().load().unwrap();

        assert_eq!(loaded.get("s1").unwrap().grades, vec![85.0, 90.0, 77.25]);
    }
}
