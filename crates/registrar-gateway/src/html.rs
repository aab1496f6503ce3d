//! HTML rendering for the instructor page.

use std::fmt::Write;

use registrar_core::InstructorSummary;

const STYLE: &str = "body { font-family: sans-serif; margin: 2em; } \
table { border-collapse: collapse; } \
th, td { border: 1px solid #999; padding: 4px 10px; text-align: left; } \
th { background: #eee; }";

/// Render the instructor summary page.
pub fn instructor_page(title: &str, table_title: &str, rows: &[InstructorSummary]) -> String {
    let mut body = String::new();
    for row in rows {
        // Writing to a String cannot fail
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.cwid),
            escape(&row.name),
            escape(&row.department),
            escape(&row.course),
            row.students
        );
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <table>\n\
         <caption>{table_title}</caption>\n\
         <thead><tr><th>CWID</th><th>Name</th><th>Department</th><th>Course</th><th>Students</th></tr></thead>\n\
         <tbody>\n{body}</tbody>\n\
         </table>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        table_title = escape(table_title),
        body = body,
    )
}

/// Escape text for inclusion in HTML content or attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("Einstein, A"), "Einstein, A");
        assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn test_page_rows() {
        let rows = vec![InstructorSummary {
            cwid: "98765".to_string(),
            name: "Einstein, A".to_string(),
            department: "SFEN".to_string(),
            course: "SSW 567".to_string(),
            students: 4,
        }];
        let page = instructor_page("Instructors Summary", "Counts", &rows);

        assert!(page.contains("<title>Instructors Summary</title>"));
        assert!(page.contains("<caption>Counts</caption>"));
        assert!(page.contains("<td>98765</td><td>Einstein, A</td><td>SFEN</td><td>SSW 567</td><td>4</td>"));
    }
}
