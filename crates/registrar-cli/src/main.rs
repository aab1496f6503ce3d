//! Registrar Command-Line Client
//!
//! Loads a directory of university data files and prints student, instructor,
//! and major summaries.

mod commands;
mod formatter;

use clap::Parser;
use commands::Command;
use formatter::OutputFormat;
use registrar_core::LoadConfig;
use std::path::PathBuf;

/// Registrar Command-Line Client
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(version, about = "University records and degree progress reports")]
pub struct Args {
    /// Directory containing majors.txt, students.txt, instructors.txt, and grades.txt
    #[arg(short = 'd', long, default_value = ".")]
    pub dir: PathBuf,

    /// Field separator ("tab" or a single character)
    #[arg(short = 's', long, default_value = "tab", value_parser = parse_separator)]
    pub separator: char,

    /// Skip the first line of every file
    #[arg(long)]
    pub header: bool,

    /// Comma-separated passing grades (default: A,A-,B+,B,B-,C+,C)
    #[arg(long, value_delimiter = ',')]
    pub passing: Option<Vec<String>>,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

fn parse_separator(value: &str) -> Result<char, String> {
    match value {
        "tab" | "\\t" => Ok('\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(format!("separator must be a single character, got '{}'", value)),
            }
        }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("registrar_cli=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = LoadConfig::new(&args.dir)
        .with_separator(args.separator)
        .with_header(args.header);
    if let Some(grades) = args.passing {
        config = config.with_passing_grades(grades);
    }

    tracing::debug!(dir = %args.dir.display(), format = %args.format, "loading");

    let formatter = formatter::create_formatter(args.format);
    let output = commands::execute(&args.command, &config, &*formatter)?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator("tab"), Ok('\t'));
        assert_eq!(parse_separator("\\t"), Ok('\t'));
        assert_eq!(parse_separator(","), Ok(','));
        assert!(parse_separator("ab").is_err());
        assert!(parse_separator("").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "registrar",
            "--dir",
            "/data",
            "--passing",
            "A,B",
            "--format",
            "json",
            "instructors",
        ]);

        assert_eq!(args.dir, PathBuf::from("/data"));
        assert_eq!(args.separator, '\t');
        assert_eq!(args.passing, Some(vec!["A".to_string(), "B".to_string()]));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.command, Command::Instructors);
    }
}
