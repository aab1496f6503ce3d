//! Major catalog.
//!
//! Majors are declared course by course from `majors.txt` and answer the
//! remaining-requirement question for a student's grades.

mod catalog;
mod major;

pub use catalog::MajorCatalog;
pub use major::{ElectiveStatus, Flag, Major, Progress, DEFAULT_PASSING_GRADES};
