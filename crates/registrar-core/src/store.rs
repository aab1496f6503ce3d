//! SQLite store for the instructor web view.
//!
//! The store keeps the four sources as relations so that summaries can be
//! computed with SQL. Imports are validated by a full in-memory load first, so
//! the store never holds records that would fail linking.

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode, OpenFlags};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::university::{Linked, LoadConfig, University};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS majors (
        major TEXT NOT NULL,
        flag TEXT NOT NULL,
        course TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS students (
        cwid TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        major TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS instructors (
        cwid TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        dept TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS grades (
        student_cwid TEXT NOT NULL,
        course TEXT NOT NULL,
        grade TEXT NOT NULL,
        instructor_cwid TEXT NOT NULL,
        FOREIGN KEY (student_cwid) REFERENCES students(cwid),
        FOREIGN KEY (instructor_cwid) REFERENCES instructors(cwid)
    );

    CREATE INDEX IF NOT EXISTS idx_grades_instructor ON grades(instructor_cwid);
"#;

/// Grade rows per instructor and course.
///
/// Grouping is by instructor and course, matching the in-memory
/// instructor summary.
const INSTRUCTOR_SUMMARY: &str = r#"
    SELECT i.cwid, i.name, i.dept, g.course, COUNT(*) AS students
    FROM instructors i
    JOIN grades g ON i.cwid = g.instructor_cwid
    GROUP BY i.cwid, g.course
    ORDER BY MIN(i.rowid), MIN(g.rowid)
"#;

/// One row of the instructor summary query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructorSummary {
    pub cwid: String,
    pub name: String,
    pub department: String,
    pub course: String,
    pub students: u32,
}

/// A SQLite database holding university records.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Open an existing store without write access.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            if e.sqlite_error_code() == Some(ErrorCode::CannotOpen) {
                Error::NotFound {
                    path: path.to_path_buf(),
                    source: e.into(),
                }
            } else {
                Error::Store(e)
            }
        })?;
        Ok(Self { conn })
    }

    /// Create an empty in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Replace the store's contents with the files described by `config`.
    ///
    /// Each record is written in the same pass that links it, inside one
    /// transaction; nothing is committed unless the whole load succeeds.
    /// Returns the loaded model.
    pub fn import(&mut self, config: &LoadConfig) -> Result<University> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM grades; DELETE FROM students; DELETE FROM instructors; DELETE FROM majors;",
        )?;

        let mut rows = 0usize;
        let university = {
            let mut majors =
                tx.prepare("INSERT INTO majors (major, flag, course) VALUES (?1, ?2, ?3)")?;
            let mut students =
                tx.prepare("INSERT INTO students (cwid, name, major) VALUES (?1, ?2, ?3)")?;
            let mut instructors =
                tx.prepare("INSERT INTO instructors (cwid, name, dept) VALUES (?1, ?2, ?3)")?;
            let mut grades = tx.prepare(
                "INSERT INTO grades (student_cwid, course, grade, instructor_cwid) VALUES (?1, ?2, ?3, ?4)",
            )?;

            University::load_with(config, |record| {
                rows += match record {
                    Linked::Major(r) => majors.execute(params![r.major, r.flag, r.course])?,
                    Linked::Student(r) => students.execute(params![r.cwid, r.name, r.major])?,
                    Linked::Instructor(r) => {
                        instructors.execute(params![r.cwid, r.name, r.department])?
                    }
                    Linked::Grade(r) => grades.execute(params![
                        r.student_cwid,
                        r.course,
                        r.grade,
                        r.instructor_cwid
                    ])?,
                };
                Ok(())
            })?
        };
        tx.commit()?;

        tracing::info!(rows, "store import committed");
        Ok(university)
    }

    /// Grade-record counts per instructor and course.
    pub fn instructor_summary(&self) -> Result<Vec<InstructorSummary>> {
        let mut stmt = self.conn.prepare(INSTRUCTOR_SUMMARY)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(InstructorSummary {
                    cwid: row.get(0)?,
                    name: row.get(1)?,
                    department: row.get(2)?,
                    course: row.get(3)?,
                    students: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Number of grade rows stored.
    pub fn grade_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM grades", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dataset(dir: &Path) {
        fs::write(
            dir.join("majors.txt"),
            "SFEN\tR\tSSW 540\nSFEN\tR\tSSW 555\nSFEN\tE\tCS 501\n",
        )
        .unwrap();
        fs::write(dir.join("students.txt"), "1\tA\tSFEN\n2\tC\tSFEN\n").unwrap();
        fs::write(dir.join("instructors.txt"), "99\tB\tSFEN\n98\tD\tSFEN\n").unwrap();
        fs::write(
            dir.join("grades.txt"),
            "1\tSSW 540\tA\t99\n2\tSSW 540\tB\t98\n2\tSSW 555\tA\t99\n1\tSSW 555\tC\t99\n",
        )
        .unwrap();
    }

    #[test]
    fn test_summary_is_per_instructor() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());

        let mut store = Store::open_in_memory().unwrap();
        let university = store.import(&LoadConfig::new(dir.path())).unwrap();
        let summary = store.instructor_summary().unwrap();

        let rows: Vec<_> = summary
            .iter()
            .map(|r| (r.cwid.as_str(), r.course.as_str(), r.students))
            .collect();
        assert_eq!(
            rows,
            vec![("99", "SSW 540", 1), ("99", "SSW 555", 2), ("98", "SSW 540", 1)]
        );

        // Same counts as the in-memory instructor summary
        let memory: Vec<_> = university
            .instructor_rows()
            .into_iter()
            .map(|r| (r.cwid, r.course, r.students))
            .collect();
        let stored: Vec<_> = summary
            .into_iter()
            .map(|r| (r.cwid, r.course, r.students))
            .collect();
        assert_eq!(memory, stored);
    }

    #[test]
    fn test_failed_load_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(dir.path().join("grades.txt"), "1\tSSW 540\tA\t77\n").unwrap();

        let mut store = Store::open_in_memory().unwrap();
        let err = store.import(&LoadConfig::new(dir.path())).unwrap_err();

        assert!(matches!(err.root(), Error::UnknownId { .. }));
        assert!(err.to_string().contains("grades.txt line 1"));
        assert_eq!(store.grade_count().unwrap(), 0);
    }

    #[test]
    fn test_failed_reimport_keeps_previous_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        let mut store = Store::open_in_memory().unwrap();
        store.import(&LoadConfig::new(dir.path())).unwrap();

        // Bad record after good ones: the earlier inserts must roll back
        fs::write(
            dir.path().join("grades.txt"),
            "1\tSSW 540\tA\t99\n2\tSSW 555\tB\t77\n",
        )
        .unwrap();
        assert!(store.import(&LoadConfig::new(dir.path())).is_err());

        assert_eq!(store.grade_count().unwrap(), 4);
        assert_eq!(store.instructor_summary().unwrap().len(), 3);
    }

    #[test]
    fn test_reimport_replaces_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        let db = dir.path().join("registrar.db");

        let mut store = Store::open(&db).unwrap();
        store.import(&LoadConfig::new(dir.path())).unwrap();
        store.import(&LoadConfig::new(dir.path())).unwrap();
        assert_eq!(store.grade_count().unwrap(), 4);
        drop(store);

        let reader = Store::open_read_only(&db).unwrap();
        assert_eq!(reader.instructor_summary().unwrap().len(), 3);
    }

    #[test]
    fn test_read_only_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.db");

        assert!(matches!(
            Store::open_read_only(&missing),
            Err(Error::NotFound { .. })
        ));
    }
}
