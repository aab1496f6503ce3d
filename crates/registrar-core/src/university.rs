//! Load sequence and grade linking.

use std::io::BufRead;
use std::path::PathBuf;

use crate::catalog::MajorCatalog;
use crate::error::Result;
use crate::reader::{ReaderOptions, Records, DEFAULT_SEPARATOR};
use crate::record::{GradeRecord, InstructorRecord, MajorRecord, Record, StudentRecord};
use crate::registry::{Instructor, Registry, Student};

/// Default file holding major declarations.
pub const DEFAULT_MAJORS_FILE: &str = "majors.txt";

/// Default file holding students.
pub const DEFAULT_STUDENTS_FILE: &str = "students.txt";

/// Default file holding instructors.
pub const DEFAULT_INSTRUCTORS_FILE: &str = "instructors.txt";

/// Default file holding grades.
pub const DEFAULT_GRADES_FILE: &str = "grades.txt";

/// Where and how to read a university's data files.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Directory containing the data files.
    pub data_dir: PathBuf,
    /// Major declarations file name, relative to `data_dir`.
    pub majors_file: String,
    /// Students file name, relative to `data_dir`.
    pub students_file: String,
    /// Instructors file name, relative to `data_dir`.
    pub instructors_file: String,
    /// Grades file name, relative to `data_dir`.
    pub grades_file: String,
    /// Separator and header handling, shared by all files.
    pub options: ReaderOptions,
    /// Passing grades for every major. `None` keeps the defaults.
    pub passing_grades: Option<Vec<String>>,
}

impl LoadConfig {
    /// Create a configuration reading the default file names from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            majors_file: DEFAULT_MAJORS_FILE.to_string(),
            students_file: DEFAULT_STUDENTS_FILE.to_string(),
            instructors_file: DEFAULT_INSTRUCTORS_FILE.to_string(),
            grades_file: DEFAULT_GRADES_FILE.to_string(),
            options: ReaderOptions::new(DEFAULT_SEPARATOR),
            passing_grades: None,
        }
    }

    /// Set the field separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.options.separator = separator;
        self
    }

    /// Skip a header line at the top of every file.
    pub fn with_header(mut self, header: bool) -> Self {
        self.options.header = header;
        self
    }

    /// Override the passing grade set.
    pub fn with_passing_grades<I, S>(mut self, grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.passing_grades = Some(grades.into_iter().map(Into::into).collect());
        self
    }

    /// Override the four file names.
    pub fn with_file_names(
        mut self,
        majors: impl Into<String>,
        students: impl Into<String>,
        instructors: impl Into<String>,
        grades: impl Into<String>,
    ) -> Self {
        self.majors_file = majors.into();
        self.students_file = students.into();
        self.instructors_file = instructors.into();
        self.grades_file = grades.into();
        self
    }

    pub fn majors_path(&self) -> PathBuf {
        self.data_dir.join(&self.majors_file)
    }

    pub fn students_path(&self) -> PathBuf {
        self.data_dir.join(&self.students_file)
    }

    pub fn instructors_path(&self) -> PathBuf {
        self.data_dir.join(&self.instructors_file)
    }

    pub fn grades_path(&self) -> PathBuf {
        self.data_dir.join(&self.grades_file)
    }
}

/// A source record that has just been applied to a [`University`].
#[derive(Debug, Clone, Copy)]
pub enum Linked<'a> {
    Major(&'a MajorRecord),
    Student(&'a StudentRecord),
    Instructor(&'a InstructorRecord),
    Grade(&'a GradeRecord),
}

/// Source records that update a [`University`] when applied.
pub trait Apply: Record {
    fn apply(&self, university: &mut University) -> Result<()>;

    fn linked(&self) -> Linked<'_>;
}

impl Apply for MajorRecord {
    fn apply(&self, university: &mut University) -> Result<()> {
        university
            .catalog
            .declare(&self.major, &self.flag, &self.course)
    }

    fn linked(&self) -> Linked<'_> {
        Linked::Major(self)
    }
}

impl Apply for StudentRecord {
    fn apply(&self, university: &mut University) -> Result<()> {
        university.add_student(self.cwid.as_str(), self.name.as_str(), self.major.as_str())?;
        Ok(())
    }

    fn linked(&self) -> Linked<'_> {
        Linked::Student(self)
    }
}

impl Apply for InstructorRecord {
    fn apply(&self, university: &mut University) -> Result<()> {
        university.add_instructor(
            self.cwid.as_str(),
            self.name.as_str(),
            self.department.as_str(),
        )?;
        Ok(())
    }

    fn linked(&self) -> Linked<'_> {
        Linked::Instructor(self)
    }
}

impl Apply for GradeRecord {
    fn apply(&self, university: &mut University) -> Result<()> {
        university.apply_grade(
            &self.student_cwid,
            &self.course,
            &self.grade,
            &self.instructor_cwid,
        )
    }

    fn linked(&self) -> Linked<'_> {
        Linked::Grade(self)
    }
}

/// The linked model: majors, students, and instructors.
#[derive(Debug, Clone, Default)]
pub struct University {
    catalog: MajorCatalog,
    students: Registry<Student>,
    instructors: Registry<Instructor>,
}

impl University {
    /// Create an empty model with a prepared catalog.
    pub fn new(catalog: MajorCatalog) -> Self {
        Self {
            catalog,
            students: Registry::new(),
            instructors: Registry::new(),
        }
    }

    /// Load all four files in dependency order.
    ///
    /// Any error aborts the whole load; no partially linked model is returned.
    pub fn load(config: &LoadConfig) -> Result<Self> {
        Self::load_with(config, |_| Ok(()))
    }

    /// Load like [`University::load`], handing each record to `on_record`
    /// right after it has been applied.
    ///
    /// An error from `on_record` aborts the load the same way a linking error
    /// does, and is reported at the record's source and line.
    pub fn load_with<F>(config: &LoadConfig, mut on_record: F) -> Result<Self>
    where
        F: FnMut(Linked<'_>) -> Result<()>,
    {
        let catalog = match &config.passing_grades {
            Some(grades) => MajorCatalog::with_passing_grades(grades.iter().cloned()),
            None => MajorCatalog::new(),
        };
        let mut university = Self::new(catalog);
        let options = config.options;

        university.apply_records(
            Records::<MajorRecord, _>::open(config.majors_path(), options)?,
            &mut on_record,
        )?;
        university.apply_records(
            Records::<StudentRecord, _>::open(config.students_path(), options)?,
            &mut on_record,
        )?;
        university.apply_records(
            Records::<InstructorRecord, _>::open(config.instructors_path(), options)?,
            &mut on_record,
        )?;
        university.apply_records(
            Records::<GradeRecord, _>::open(config.grades_path(), options)?,
            &mut on_record,
        )?;

        tracing::info!(
            dir = %config.data_dir.display(),
            majors = university.catalog.len(),
            students = university.students.len(),
            instructors = university.instructors.len(),
            "university loaded"
        );
        Ok(university)
    }

    /// Apply every record of one source in order, stopping at the first error.
    ///
    /// Errors raised while applying a record name its source and line.
    pub fn apply_records<T, R, F>(
        &mut self,
        mut records: Records<T, R>,
        mut on_record: F,
    ) -> Result<usize>
    where
        T: Apply,
        R: BufRead,
        F: FnMut(Linked<'_>) -> Result<()>,
    {
        let mut count = 0;
        while let Some(record) = records.next() {
            let record = record?;
            record
                .apply(self)
                .and_then(|()| on_record(record.linked()))
                .map_err(|err| records.locate(err))?;
            count += 1;
        }
        tracing::debug!(source = records.source_name(), records = count, "source applied");
        Ok(count)
    }

    /// Register a student in a declared major.
    pub fn add_student(
        &mut self,
        cwid: impl Into<String>,
        name: impl Into<String>,
        major: impl Into<String>,
    ) -> Result<&Student> {
        let major = major.into();
        self.catalog.get(&major)?;
        let student = self.students.insert(Student::new(cwid, name, major))?;
        Ok(&*student)
    }

    /// Register an instructor.
    pub fn add_instructor(
        &mut self,
        cwid: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Result<&Instructor> {
        let instructor = self
            .instructors
            .insert(Instructor::new(cwid, name, department))?;
        Ok(&*instructor)
    }

    /// Record that a student earned `grade` in `course` taught by an instructor.
    ///
    /// Both CWIDs are checked before either side is updated.
    pub fn apply_grade(
        &mut self,
        student_cwid: &str,
        course: &str,
        grade: &str,
        instructor_cwid: &str,
    ) -> Result<()> {
        self.students.require(student_cwid)?;
        self.instructors.require(instructor_cwid)?;

        if let Some(previous) = self.students.get_mut(student_cwid)?.add_course(course, grade) {
            tracing::debug!(
                student = student_cwid,
                course,
                previous = %previous,
                grade,
                "grade replaced"
            );
        }
        self.instructors.get_mut(instructor_cwid)?.add_student(course);
        Ok(())
    }

    pub fn catalog(&self) -> &MajorCatalog {
        &self.catalog
    }

    pub fn students(&self) -> &Registry<Student> {
        &self.students
    }

    pub fn instructors(&self) -> &Registry<Instructor> {
        &self.instructors
    }

    pub fn student(&self, cwid: &str) -> Result<&Student> {
        self.students.get(cwid)
    }

    pub fn instructor(&self, cwid: &str) -> Result<&Instructor> {
        self.instructors.get(cwid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EntityKind, Error};
    use std::io::Cursor;

    fn records<T: Record>(name: &str, data: &'static str) -> Records<T, Cursor<&'static str>> {
        Records::new(name, Cursor::new(data), ReaderOptions::default())
    }

    fn sfen() -> University {
        let mut university = University::default();
        university
            .apply_records(
                records::<MajorRecord>("majors.txt", "SFEN\tR\tSSW 540\nSFEN\tR\tSSW 555\n"),
                |_| Ok(()),
            )
            .unwrap();
        university
    }

    #[test]
    fn test_unknown_major_not_registered() {
        let mut university = sfen();
        let err = university.add_student("1", "A", "BIO").unwrap_err();

        assert!(matches!(err, Error::UnknownMajor { ref name } if name == "BIO"));
        assert!(university.students().is_empty());
    }

    #[test]
    fn test_grade_links_both_sides() {
        let mut university = sfen();
        university.add_student("1", "A", "SFEN").unwrap();
        university.add_instructor("99", "B", "SFEN").unwrap();

        university.apply_grade("1", "SSW 540", "A", "99").unwrap();
        university.apply_grade("1", "SSW 540", "B", "99").unwrap();

        assert_eq!(university.student("1").unwrap().grade("SSW 540"), Some("B"));
        assert_eq!(university.instructor("99").unwrap().count("SSW 540"), 2);
    }

    #[test]
    fn test_unknown_instructor_leaves_student_untouched() {
        let mut university = sfen();
        university.add_student("1", "A", "SFEN").unwrap();

        let err = university.apply_grade("1", "SSW 540", "A", "99").unwrap_err();

        assert!(matches!(
            err,
            Error::UnknownId { kind: EntityKind::Instructor, ref id } if id == "99"
        ));
        assert!(university.student("1").unwrap().courses().is_empty());
    }

    #[test]
    fn test_unknown_student() {
        let mut university = sfen();
        university.add_instructor("99", "B", "SFEN").unwrap();

        let err = university.apply_grade("2", "SSW 540", "A", "99").unwrap_err();

        assert!(matches!(err, Error::UnknownId { kind: EntityKind::Student, .. }));
        assert!(university.instructor("99").unwrap().courses().is_empty());
    }

    #[test]
    fn test_load_stops_on_first_error() {
        let mut university = sfen();
        let err = university
            .apply_records(
                records::<StudentRecord>("students.txt", "1\tA\tSFEN\n2\tB\n3\tC\tSFEN\n"),
                |_| Ok(()),
            )
            .unwrap_err();

        assert!(matches!(err, Error::SchemaMismatch { line: 2, .. }));
        assert_eq!(university.students().len(), 1);
    }

    #[test]
    fn test_linking_error_names_source_and_line() {
        let mut university = sfen();
        university.add_student("1", "A", "SFEN").unwrap();
        university.add_instructor("99", "B", "SFEN").unwrap();

        let err = university
            .apply_records(
                records::<GradeRecord>("grades.txt", "1\tSSW 540\tA\t99\n1\tSSW 540\tA\t77\n"),
                |_| Ok(()),
            )
            .unwrap_err();

        assert_eq!(err.to_string(), "grades.txt line 2: unknown instructor id '77'");
        assert!(matches!(
            err.root(),
            Error::UnknownId { kind: EntityKind::Instructor, id } if id == "77"
        ));
    }

    #[test]
    fn test_hook_sees_applied_records_in_order() {
        let mut university = sfen();
        let mut seen = Vec::new();
        university
            .apply_records(
                records::<StudentRecord>("students.txt", "1\tA\tSFEN\n2\tB\tSFEN\n"),
                |record| {
                    if let Linked::Student(student) = record {
                        seen.push(student.cwid.clone());
                    }
                    Ok(())
                },
            )
            .unwrap();

        assert_eq!(seen, vec!["1", "2"]);
    }

    #[test]
    fn test_config_paths() {
        let config = LoadConfig::new("/data")
            .with_file_names("m.tsv", "s.tsv", "i.tsv", "g.tsv")
            .with_separator('|')
            .with_header(true);

        assert_eq!(config.majors_path(), PathBuf::from("/data/m.tsv"));
        assert_eq!(config.grades_path(), PathBuf::from("/data/g.tsv"));
        assert_eq!(config.options.separator, '|');
        assert!(config.options.header);
    }
}
