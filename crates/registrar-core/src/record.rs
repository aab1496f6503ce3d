//! Typed record shapes for each input file.

/// A fixed-arity record decoded from one line of a source.
pub trait Record: Sized {
    /// Number of fields on each line.
    const FIELDS: usize;

    /// Build the record from exactly [`Self::FIELDS`] fields.
    fn from_fields(fields: Vec<String>) -> Self;
}

/// Take fields in order. The decoder guarantees the arity, so a missing
/// field can only be an empty string.
fn field_iter(fields: Vec<String>) -> impl FnMut() -> String {
    let mut iter = fields.into_iter();
    move || iter.next().unwrap_or_default()
}

/// `majors.txt`: one course declaration for a major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorRecord {
    pub major: String,
    pub flag: String,
    pub course: String,
}

impl Record for MajorRecord {
    const FIELDS: usize = 3;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut next = field_iter(fields);
        Self {
            major: next(),
            flag: next(),
            course: next(),
        }
    }
}

/// `students.txt`: one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub cwid: String,
    pub name: String,
    pub major: String,
}

impl Record for StudentRecord {
    const FIELDS: usize = 3;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut next = field_iter(fields);
        Self {
            cwid: next(),
            name: next(),
            major: next(),
        }
    }
}

/// `instructors.txt`: one instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorRecord {
    pub cwid: String,
    pub name: String,
    pub department: String,
}

impl Record for InstructorRecord {
    const FIELDS: usize = 3;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut next = field_iter(fields);
        Self {
            cwid: next(),
            name: next(),
            department: next(),
        }
    }
}

/// `grades.txt`: a grade a student earned in a course taught by an instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRecord {
    pub student_cwid: String,
    pub course: String,
    pub grade: String,
    pub instructor_cwid: String,
}

impl Record for GradeRecord {
    const FIELDS: usize = 4;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut next = field_iter(fields);
        Self {
            student_cwid: next(),
            course: next(),
            grade: next(),
            instructor_cwid: next(),
        }
    }
}
