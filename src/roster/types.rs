use indexmap::IndexMap;

/// A single student entry. `grades` are addressed by position, so their order is
/// the order in which they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub id: String,
    pub first: String,
    pub last: String,
    pub dob: String,
    pub grades: Vec<f64>,
}

impl StudentRecord {
    pub fn new(id: String, first: String, last: String, dob: String) -> Self {
        Self {
            id,
            first,
            last,
            dob,
            grades: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    /// Arithmetic mean of the grades, `None` when there are none.
    pub fn average(&self) -> Option<f64> {
        if self.grades.is_empty() {
            return None;
        }
        Some(self.grades.iter().sum::<f64>() / self.grades.len() as f64)
    }
}

/// Partial update for a student's descriptive fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub first: Option<String>,
    pub last: Option<String>,
    pub dob: Option<String>,
}

/// In-memory roster keyed by student id, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    students: IndexMap<String, StudentRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn grade_count(&self) -> usize {
        self.students.values().map(|s| s.grades.len()).sum()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.students.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.students.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut StudentRecord> {
        self.students.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.students.values()
    }

    /// Inserts a new record. Returns `false` and leaves the roster untouched if the
    /// id is already taken.
    pub fn insert(&mut self, record: StudentRecord) -> bool {
        if self.students.contains_key(&record.id) {
            return false;
        }
        self.students.insert(record.id.clone(), record);
        true
    }

    /// Replaces or inserts a record, keeping the original position of an existing id.
    pub(crate) fn upsert(&mut self, record: StudentRecord) -> Option<StudentRecord> {
        self.students.insert(record.id.clone(), record)
    }

    /// Removes a record and its grades, preserving the order of the others.
    pub fn remove(&mut self, id: &str) -> Option<StudentRecord> {
        self.students.shift_remove(id)
    }

    pub fn apply_patch(&mut self, id: &str, patch: StudentPatch) -> bool {
        let Some(student) = self.students.get_mut(id) else {
            return false;
        };
        if let Some(first) = patch.first {
            student.first = first;
        }
        if let Some(last) = patch.last {
            student.last = last;
        }
        if let Some(dob) = patch.dob {
            student.dob = dob;
        }
        true
    }

    /// Student with the highest average among those with at least one grade.
    /// Ties go to the student encountered first.
    pub fn highest_average(&self) -> Option<(&StudentRecord, f64)> {
        self.extreme_average(|candidate, best| candidate > best)
    }

    /// Student with the lowest average among those with at least one grade.
    /// Ties go to the student encountered first.
    pub fn lowest_average(&self) -> Option<(&StudentRecord, f64)> {
        self.extreme_average(|candidate, best| candidate < best)
    }

    fn extreme_average<F>(&self, better: F) -> Option<(&StudentRecord, f64)>
    where
        F: Fn(f64, f64) -> bool,
    {
        let mut best: Option<(&StudentRecord, f64)> = None;
        for student in self.students.values() {
            let Some(avg) = student.average() else {
                continue;
            };
            match best {
                Some((_, current)) if !better(avg, current) => {}
                _ => best = Some((student, avg)),
            }
        }
        best
    }
}
