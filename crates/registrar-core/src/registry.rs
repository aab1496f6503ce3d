//! Student and instructor registries.

use std::collections::BTreeMap;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::{EntityKind, Error, Result};

/// An entity keyed by CWID.
pub trait Entity {
    /// Registry this entity belongs to, for error messages.
    const KIND: EntityKind;

    fn cwid(&self) -> &str;
}

/// A student and the grades they have earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    cwid: String,
    name: String,
    major: String,
    courses: BTreeMap<String, String>,
}

impl Student {
    /// Create a student. The major is not validated here; see
    /// [`University::add_student`](crate::University::add_student).
    pub fn new(cwid: impl Into<String>, name: impl Into<String>, major: impl Into<String>) -> Self {
        Self {
            cwid: cwid.into(),
            name: name.into(),
            major: major.into(),
            courses: BTreeMap::new(),
        }
    }

    /// Note that the student earned a grade in a course.
    ///
    /// A later grade for the same course replaces the earlier one; the
    /// replaced grade is returned.
    pub fn add_course(&mut self, course: impl Into<String>, grade: impl Into<String>) -> Option<String> {
        self.courses.insert(course.into(), grade.into())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    /// Course to grade map.
    pub fn courses(&self) -> &BTreeMap<String, String> {
        &self.courses
    }

    pub fn grade(&self, course: &str) -> Option<&str> {
        self.courses.get(course).map(String::as_str)
    }
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn cwid(&self) -> &str {
        &self.cwid
    }
}

/// An instructor and the number of grade records per course they taught.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructor {
    cwid: String,
    name: String,
    department: String,
    courses: IndexMap<String, u32>,
}

impl Instructor {
    pub fn new(
        cwid: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            cwid: cwid.into(),
            name: name.into(),
            department: department.into(),
            courses: IndexMap::new(),
        }
    }

    /// Count one more grade record for a course. Returns the new count.
    pub fn add_student(&mut self, course: impl Into<String>) -> u32 {
        let count = self.courses.entry(course.into()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    /// Course to grade-record count, in first-taught order.
    pub fn courses(&self) -> &IndexMap<String, u32> {
        &self.courses
    }

    pub fn count(&self, course: &str) -> u32 {
        self.courses.get(course).copied().unwrap_or(0)
    }
}

impl Entity for Instructor {
    const KIND: EntityKind = EntityKind::Instructor;

    fn cwid(&self) -> &str {
        &self.cwid
    }
}

/// Insertion-ordered set of entities with unique CWIDs.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entities: IndexMap<String, T>,
}

impl<T: Entity> Registry<T> {
    pub fn new() -> Self {
        Self {
            entities: IndexMap::new(),
        }
    }

    /// Register an entity. Fails if its CWID is already present.
    pub fn insert(&mut self, entity: T) -> Result<&mut T> {
        match self.entities.entry(entity.cwid().to_string()) {
            Entry::Occupied(entry) => Err(Error::DuplicateId {
                kind: T::KIND,
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(entity)),
        }
    }

    pub fn get(&self, cwid: &str) -> Result<&T> {
        self.entities.get(cwid).ok_or_else(|| Self::unknown(cwid))
    }

    pub fn get_mut(&mut self, cwid: &str) -> Result<&mut T> {
        self.entities.get_mut(cwid).ok_or_else(|| Self::unknown(cwid))
    }

    pub fn contains(&self, cwid: &str) -> bool {
        self.entities.contains_key(cwid)
    }

    /// Fail with `UnknownId` unless the CWID is registered.
    pub fn require(&self, cwid: &str) -> Result<()> {
        if self.contains(cwid) {
            Ok(())
        } else {
            Err(Self::unknown(cwid))
        }
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn unknown(cwid: &str) -> Error {
        Error::UnknownId {
            kind: T::KIND,
            id: cwid.to_string(),
        }
    }
}

impl<T: Entity> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
