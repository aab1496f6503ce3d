//! Major catalog.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use super::major::{Flag, Major, Progress, DEFAULT_PASSING_GRADES};
use crate::error::{Error, Result};

/// All majors declared in a load, in first-sighting order.
#[derive(Debug, Clone)]
pub struct MajorCatalog {
    majors: IndexMap<String, Major>,
    passing_grades: BTreeSet<String>,
}

impl MajorCatalog {
    /// Create an empty catalog using the default passing grades.
    pub fn new() -> Self {
        Self::with_passing_grades(DEFAULT_PASSING_GRADES)
    }

    /// Create an empty catalog whose majors use the given passing grades.
    pub fn with_passing_grades<I, S>(grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            majors: IndexMap::new(),
            passing_grades: grades.into_iter().map(Into::into).collect(),
        }
    }

    /// Declare a required (`R`) or elective (`E`) course for a major.
    ///
    /// The major is created on first use. Repeating a declaration is a no-op.
    pub fn declare(&mut self, major: &str, flag: &str, course: &str) -> Result<()> {
        let flag: Flag = flag.parse().map_err(|flag| Error::InvalidFlag {
            flag,
            course: course.to_string(),
        })?;

        let passing = &self.passing_grades;
        let entry = self.majors.entry(major.to_string()).or_insert_with(|| {
            tracing::debug!(major, "new major");
            Major::new(major).with_passing_grades(passing.iter().cloned())
        });
        entry.add_course(flag, course);
        Ok(())
    }

    /// Look up a major by name.
    pub fn get(&self, name: &str) -> Result<&Major> {
        self.majors.get(name).ok_or_else(|| Error::UnknownMajor {
            name: name.to_string(),
        })
    }

    /// Compute a student's progress in the named major.
    pub fn remaining(&self, major: &str, grades: &BTreeMap<String, String>) -> Result<Progress> {
        Ok(self.get(major)?.remaining(grades))
    }

    /// Iterate majors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Major> {
        self.majors.values()
    }

    pub fn len(&self) -> usize {
        self.majors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.majors.is_empty()
    }
}

impl Default for MajorCatalog {
    fn default() -> Self {
        Self::new()
    }
}
