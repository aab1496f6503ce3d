//! Output formatters for report rows.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use registrar_core::{ElectiveStatus, InstructorRow, MajorRow, StudentRow};

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Trait for formatting reports.
pub trait Formatter: Send + Sync {
    /// Format the student summary.
    fn format_students(&self, rows: &[StudentRow]) -> String;

    /// Format the instructor summary.
    fn format_instructors(&self, rows: &[InstructorRow]) -> String;

    /// Format the major summary.
    fn format_majors(&self, rows: &[MajorRow]) -> String;

    /// Format all three summaries together.
    fn format_all(
        &self,
        students: &[StudentRow],
        instructors: &[InstructorRow],
        majors: &[MajorRow],
    ) -> String {
        format!(
            "Student Summary\n{}\n\nInstructor Summary\n{}\n\nMajor Summary\n{}",
            self.format_students(students),
            self.format_instructors(instructors),
            self.format_majors(majors)
        )
    }

    /// Format a simple message.
    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_students(&self, rows: &[StudentRow]) -> String {
        render_table(&StudentRow::HEADERS, rows.iter().map(student_cells))
    }

    fn format_instructors(&self, rows: &[InstructorRow]) -> String {
        render_table(&InstructorRow::HEADERS, rows.iter().map(instructor_cells))
    }

    fn format_majors(&self, rows: &[MajorRow]) -> String {
        render_table(&MajorRow::HEADERS, rows.iter().map(major_cells))
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_students(&self, rows: &[StudentRow]) -> String {
        serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_instructors(&self, rows: &[InstructorRow]) -> String {
        serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_majors(&self, rows: &[MajorRow]) -> String {
        serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_all(
        &self,
        students: &[StudentRow],
        instructors: &[InstructorRow],
        majors: &[MajorRow],
    ) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "students": students,
            "instructors": instructors,
            "majors": majors,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({
            "message": message
        })
        .to_string()
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_students(&self, rows: &[StudentRow]) -> String {
        render_csv(&StudentRow::HEADERS, rows.iter().map(student_cells))
    }

    fn format_instructors(&self, rows: &[InstructorRow]) -> String {
        render_csv(&InstructorRow::HEADERS, rows.iter().map(instructor_cells))
    }

    fn format_majors(&self, rows: &[MajorRow]) -> String {
        render_csv(&MajorRow::HEADERS, rows.iter().map(major_cells))
    }
}

fn student_cells(row: &StudentRow) -> Vec<String> {
    vec![
        row.cwid.clone(),
        row.name.clone(),
        row.major.clone(),
        format_list(&row.completed_courses),
        format_list(&row.remaining_required),
        format_electives(&row.remaining_electives),
    ]
}

fn instructor_cells(row: &InstructorRow) -> Vec<String> {
    vec![
        row.cwid.clone(),
        row.name.clone(),
        row.department.clone(),
        row.course.clone(),
        row.students.to_string(),
    ]
}

fn major_cells(row: &MajorRow) -> Vec<String> {
    vec![
        row.major.clone(),
        format_list(&row.required),
        format_list(&row.electives),
    ]
}

/// Format a course list as a display string.
fn format_list(courses: &[String]) -> String {
    courses.join(", ")
}

/// `None` means the elective requirement is met; `N/A` means the major has no electives.
fn format_electives(status: &ElectiveStatus) -> String {
    match status {
        ElectiveStatus::Remaining(courses) => courses
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        ElectiveStatus::Satisfied => "None".to_string(),
        ElectiveStatus::NoneDeclared => "N/A".to_string(),
    }
}

fn render_table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut table = Table::new();
    table.set_header(headers.iter().map(Cell::new).collect::<Vec<_>>());

    let mut count = 0;
    for cells in rows {
        table.add_row(cells.into_iter().map(Cell::new).collect::<Vec<_>>());
        count += 1;
    }

    format!("{}\n{} row(s)", table, count)
}

fn render_csv(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut output = String::new();
    let headers: Vec<String> = headers.iter().map(|h| format_csv_field(h)).collect();
    output.push_str(&headers.join(","));
    output.push('\n');

    for cells in rows {
        let cells: Vec<String> = cells.iter().map(|c| format_csv_field(c)).collect();
        output.push_str(&cells.join(","));
        output.push('\n');
    }

    output
}

/// Quote a field when it contains a separator, quote, or newline.
fn format_csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", escape_csv(s))
    } else {
        s.to_string()
    }
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}
