//! Report projection.
//!
//! Rows are derived on request from the linked model and carry everything a
//! presentation layer (table, JSON, CSV, HTML) needs.

use serde::Serialize;

use crate::catalog::{ElectiveStatus, Major};
use crate::registry::{Entity, Instructor, Student};
use crate::University;

/// One student summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRow {
    pub cwid: String,
    pub name: String,
    pub major: String,
    /// Passed courses, sorted.
    pub completed_courses: Vec<String>,
    pub remaining_required: Vec<String>,
    pub remaining_electives: ElectiveStatus,
}

impl StudentRow {
    pub const HEADERS: [&'static str; 6] = [
        "CWID",
        "Name",
        "Major",
        "Completed Courses",
        "Remaining Required",
        "Remaining Electives",
    ];

    /// Project a student against their major.
    pub fn project(student: &Student, major: &Major) -> Self {
        let progress = major.remaining(student.courses());
        Self {
            cwid: student.cwid().to_string(),
            name: student.name().to_string(),
            major: student.major().to_string(),
            completed_courses: progress.completed.into_iter().collect(),
            remaining_required: progress.remaining_required.into_iter().collect(),
            remaining_electives: progress.remaining_electives,
        }
    }
}

/// One instructor/course row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructorRow {
    pub cwid: String,
    pub name: String,
    pub department: String,
    pub course: String,
    /// Number of grade records for this instructor and course.
    pub students: u32,
}

impl InstructorRow {
    pub const HEADERS: [&'static str; 5] = ["CWID", "Name", "Department", "Course", "#Students"];

    /// One row per course taught, in first-taught order.
    pub fn project(instructor: &Instructor) -> Vec<Self> {
        instructor
            .courses()
            .iter()
            .map(|(course, count)| Self {
                cwid: instructor.cwid().to_string(),
                name: instructor.name().to_string(),
                department: instructor.department().to_string(),
                course: course.clone(),
                students: *count,
            })
            .collect()
    }
}

/// One major row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MajorRow {
    pub major: String,
    pub required: Vec<String>,
    pub electives: Vec<String>,
}

impl MajorRow {
    pub const HEADERS: [&'static str; 3] = ["Major", "Required Courses", "Elective Courses"];

    pub fn project(major: &Major) -> Self {
        Self {
            major: major.name().to_string(),
            required: major.required().iter().cloned().collect(),
            electives: major.electives().iter().cloned().collect(),
        }
    }
}

impl University {
    /// Student summary, in registration order.
    pub fn student_rows(&self) -> Vec<StudentRow> {
        // Registration rejects unknown majors and the catalog only grows,
        // so every lookup succeeds.
        self.students()
            .iter()
            .filter_map(|student| {
                let major = self.catalog().get(student.major()).ok()?;
                Some(StudentRow::project(student, major))
            })
            .collect()
    }

    /// Instructor summary, one row per instructor and course.
    pub fn instructor_rows(&self) -> Vec<InstructorRow> {
        self.instructors()
            .iter()
            .flat_map(InstructorRow::project)
            .collect()
    }

    /// Major summary, in declaration order.
    pub fn major_rows(&self) -> Vec<MajorRow> {
        self.catalog().iter().map(MajorRow::project).collect()
    }
}
