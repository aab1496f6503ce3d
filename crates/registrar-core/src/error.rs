//! Core error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which registry an identifier was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Student registry.
    Student,
    /// Instructor registry.
    Instructor,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Student => write!(f, "student"),
            EntityKind::Instructor => write!(f, "instructor"),
        }
    }
}

/// Errors raised while loading or querying university records.
///
/// Every variant is fatal for the load that produced it. A partially linked
/// model is never returned to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Source file or database could not be opened.
    #[error("can't open '{}': {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading a source failed after it was opened, including non-UTF-8 input.
    #[error("can't read {source_name} on line {line}: {source}")]
    Read {
        source_name: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A line split into the wrong number of fields.
    #[error("{source_name} has {actual} fields on line {line} but expected {expected}")]
    SchemaMismatch {
        source_name: String,
        actual: usize,
        line: usize,
        expected: usize,
    },

    /// Major declaration with a flag other than R or E.
    #[error("flag '{flag}' is invalid for course '{course}'")]
    InvalidFlag { flag: String, course: String },

    /// Identifier registered twice.
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: EntityKind, id: String },

    /// Identifier not present in the registry.
    #[error("unknown {kind} id '{id}'")]
    UnknownId { kind: EntityKind, id: String },

    /// Major name not declared in the catalog.
    #[error("unknown major '{name}'")]
    UnknownMajor { name: String },

    /// A record was decoded but could not be applied to the model.
    #[error("{source_name} line {line}: {source}")]
    InRecord {
        source_name: String,
        line: usize,
        #[source]
        source: Box<Error>,
    },

    /// Relational store failure.
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl Error {
    /// The error with any record location stripped.
    pub fn root(&self) -> &Error {
        match self {
            Error::InRecord { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_message() {
        let err = Error::SchemaMismatch {
            source_name: "grades.txt".to_string(),
            actual: 3,
            line: 7,
            expected: 4,
        };
        assert_eq!(
            err.to_string(),
            "grades.txt has 3 fields on line 7 but expected 4"
        );
    }

    #[test]
    fn test_lookup_messages_name_registry() {
        let err = Error::UnknownId {
            kind: EntityKind::Instructor,
            id: "98765".to_string(),
        };
        assert_eq!(err.to_string(), "unknown instructor id '98765'");

        let err = Error::DuplicateId {
            kind: EntityKind::Student,
            id: "10103".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate student id '10103'");
    }

    #[test]
    fn test_record_location_wraps_cause() {
        let err = Error::InRecord {
            source_name: "grades.txt".to_string(),
            line: 2,
            source: Box::new(Error::UnknownId {
                kind: EntityKind::Instructor,
                id: "77".to_string(),
            }),
        };

        assert_eq!(err.to_string(), "grades.txt line 2: unknown instructor id '77'");
        assert!(matches!(
            err.root(),
            Error::UnknownId { kind: EntityKind::Instructor, id } if id == "77"
        ));
    }
}
