//! Major definitions and remaining-requirement computation.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::Serialize;

/// Grades that count toward completing a course unless a major overrides them.
pub const DEFAULT_PASSING_GRADES: [&str; 7] = ["A", "A-", "B+", "B", "B-", "C+", "C"];

/// Kind of course declaration within a major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// `R`: the course is required.
    Required,
    /// `E`: the course is one of the electives.
    Elective,
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "R" => Ok(Flag::Required),
            "E" => Ok(Flag::Elective),
            _ => Err(s.to_string()),
        }
    }
}

/// State of a student's elective requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "courses", rename_all = "snake_case")]
pub enum ElectiveStatus {
    /// No elective passed yet; any of these courses would satisfy it.
    Remaining(BTreeSet<String>),
    /// At least one elective has been passed.
    Satisfied,
    /// The major declares no electives at all.
    NoneDeclared,
}

impl ElectiveStatus {
    /// Courses still available to satisfy the requirement, if any.
    pub fn courses(&self) -> Option<&BTreeSet<String>> {
        match self {
            ElectiveStatus::Remaining(courses) => Some(courses),
            _ => None,
        }
    }

    /// Whether the student still needs an elective.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, ElectiveStatus::Remaining(_))
    }
}

/// A student's standing against their major's requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Courses passed with a passing grade.
    pub completed: BTreeSet<String>,
    /// Required courses not yet passed.
    pub remaining_required: BTreeSet<String>,
    /// Elective requirement state.
    pub remaining_electives: ElectiveStatus,
}

/// A major with its required and elective course sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Major {
    name: String,
    required: BTreeSet<String>,
    electives: BTreeSet<String>,
    passing_grades: BTreeSet<String>,
}

impl Major {
    /// Create a major with no courses and the default passing grades.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: BTreeSet::new(),
            electives: BTreeSet::new(),
            passing_grades: DEFAULT_PASSING_GRADES.iter().map(|g| g.to_string()).collect(),
        }
    }

    /// Replace the passing grade set.
    pub fn with_passing_grades<I, S>(mut self, grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.passing_grades = grades.into_iter().map(Into::into).collect();
        self
    }

    /// Record a course declaration. Returns false if it was already declared.
    pub fn add_course(&mut self, flag: Flag, course: impl Into<String>) -> bool {
        match flag {
            Flag::Required => self.required.insert(course.into()),
            Flag::Elective => self.electives.insert(course.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn electives(&self) -> &BTreeSet<String> {
        &self.electives
    }

    /// Whether a grade counts toward completion.
    pub fn is_passing(&self, grade: &str) -> bool {
        self.passing_grades.contains(grade)
    }

    /// Compute remaining requirements from a student's course-to-grade map.
    pub fn remaining(&self, grades: &BTreeMap<String, String>) -> Progress {
        let completed: BTreeSet<String> = grades
            .iter()
            .filter(|(_, grade)| self.is_passing(grade))
            .map(|(course, _)| course.clone())
            .collect();

        let remaining_required = self.required.difference(&completed).cloned().collect();

        let remaining_electives = if self.electives.is_empty() {
            ElectiveStatus::NoneDeclared
        } else if self.electives.intersection(&completed).next().is_some() {
            ElectiveStatus::Satisfied
        } else {
            ElectiveStatus::Remaining(self.electives.clone())
        };

        Progress {
            completed,
            remaining_required,
            remaining_electives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sfen() -> Major {
        let mut major = Major::new("SFEN");
        for course in ["SSW 540", "SSW 555", "SSW 564", "SSW 567"] {
            major.add_course(Flag::Required, course);
        }
        for course in ["CS 501", "CS 513", "CS 545"] {
            major.add_course(Flag::Elective, course);
        }
        major
    }

    fn grades(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(c, g)| (c.to_string(), g.to_string()))
            .collect()
    }

    #[test]
    fn test_flag_parse_case_insensitive() {
        assert_eq!("R".parse::<Flag>(), Ok(Flag::Required));
        assert_eq!("e".parse::<Flag>(), Ok(Flag::Elective));
        assert_eq!("X".parse::<Flag>(), Err("X".to_string()));
    }

    #[test]
    fn test_add_course_idempotent() {
        let mut major = sfen();
        let before = major.clone();

        assert!(!major.add_course(Flag::Required, "SSW 540"));
        assert!(!major.add_course(Flag::Elective, "CS 501"));
        assert_eq!(major, before);
    }

    #[test]
    fn test_failing_grades_not_completed() {
        let progress = sfen().remaining(&grades(&[("SSW 540", "A"), ("SSW 555", "C-")]));

        assert_eq!(progress.completed.len(), 1);
        assert!(progress.completed.contains("SSW 540"));
        assert!(progress.remaining_required.contains("SSW 555"));
        assert_eq!(progress.remaining_required.len(), 3);
    }

    #[test]
    fn test_elective_satisfied_marker() {
        let progress = sfen().remaining(&grades(&[("CS 545", "B+")]));

        assert_eq!(progress.remaining_electives, ElectiveStatus::Satisfied);
        assert!(progress.remaining_electives.courses().is_none());
    }

    #[test]
    fn test_failed_elective_leaves_all_remaining() {
        let major = sfen();
        let progress = major.remaining(&grades(&[("CS 545", "D")]));

        assert_eq!(
            progress.remaining_electives,
            ElectiveStatus::Remaining(major.electives().clone())
        );
    }

    #[test]
    fn test_no_electives_declared_is_distinct() {
        let mut major = Major::new("NONE");
        major.add_course(Flag::Required, "SYS 611");

        let progress = major.remaining(&grades(&[("SYS 611", "A")]));

        assert_eq!(progress.remaining_electives, ElectiveStatus::NoneDeclared);
        assert_ne!(progress.remaining_electives, ElectiveStatus::Satisfied);
        assert!(progress.remaining_required.is_empty());
    }

    #[test]
    fn test_remaining_is_subset_of_declared() {
        let major = sfen();
        let progress = major.remaining(&grades(&[
            ("SSW 540", "A"),
            ("SSW 810", "A"),
            ("CS 501", "F"),
        ]));

        assert!(progress.remaining_required.is_subset(major.required()));
        if let Some(courses) = progress.remaining_electives.courses() {
            assert!(courses.is_subset(major.electives()));
        }
    }

    #[test]
    fn test_custom_passing_grades() {
        let major = sfen().with_passing_grades(["A"]);
        let progress = major.remaining(&grades(&[("SSW 540", "A"), ("SSW 555", "B")]));

        assert!(major.is_passing("A"));
        assert!(!major.is_passing("B"));
        assert_eq!(progress.completed.len(), 1);
    }
}
