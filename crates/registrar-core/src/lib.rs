//! Registrar Core - record decoding, entity linking, and degree-progress reports.
//!
//! Data is loaded in a fixed order (majors, students, instructors, grades) into a
//! [`University`], which then answers report queries without further mutation.

pub mod catalog;
pub mod error;
pub mod reader;
pub mod record;
pub mod registry;
pub mod report;
pub mod store;
pub mod university;

pub use catalog::{ElectiveStatus, Flag, Major, MajorCatalog, Progress, DEFAULT_PASSING_GRADES};
pub use error::{EntityKind, Error, Result};
pub use reader::{ReaderOptions, RecordReader, Records};
pub use record::{GradeRecord, InstructorRecord, MajorRecord, Record, StudentRecord};
pub use registry::{Entity, Instructor, Registry, Student};
pub use report::{InstructorRow, MajorRow, StudentRow};
pub use store::{InstructorSummary, Store};
pub use university::{Apply, Linked, LoadConfig, University};
