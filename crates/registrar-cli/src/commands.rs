//! Report commands.

use std::path::PathBuf;

use clap::Subcommand;
use registrar_core::{LoadConfig, Store, University};

use crate::formatter::Formatter;

/// A report to print, or an export to run.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Completed and remaining courses per student
    Students,
    /// Grade records per instructor and course
    Instructors,
    /// Required and elective courses per major
    Majors,
    /// All three summaries
    All,
    /// Load the data directory into a SQLite database for the web view
    Export {
        /// Database file to create or replace
        #[arg(long)]
        db: PathBuf,
    },
}

/// Execute a command and return its formatted output.
pub fn execute(
    command: &Command,
    config: &LoadConfig,
    formatter: &dyn Formatter,
) -> Result<String, registrar_core::Error> {
    let output = match command {
        Command::Students => formatter.format_students(&University::load(config)?.student_rows()),
        Command::Instructors => {
            formatter.format_instructors(&University::load(config)?.instructor_rows())
        }
        Command::Majors => formatter.format_majors(&University::load(config)?.major_rows()),
        Command::All => {
            let university = University::load(config)?;
            formatter.format_all(
                &university.student_rows(),
                &university.instructor_rows(),
                &university.major_rows(),
            )
        }
        Command::Export { db } => {
            let mut store = Store::open(db)?;
            let university = store.import(config)?;
            formatter.format_message(&format!(
                "Exported {} students and {} instructors to {}",
                university.students().len(),
                university.instructors().len(),
                db.display()
            ))
        }
    };
    Ok(output)
}
