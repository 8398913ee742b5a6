use std::io::{self, Write};

use console::style;

use crate::application::commands::{CountCheck, GenerateTemplateSqlResult};

/// First report line, printed as soon as extraction is done.
pub fn write_found<W: Write>(mut writer: W, found: usize) -> io::Result<()> {
    writeln!(writer, "Found {found} templates")
}

pub fn write_report<W: Write>(mut writer: W, result: &GenerateTemplateSqlResult) -> io::Result<()> {
    let found = result.records.len();

    writeln!(
        writer,
        "{} {}",
        style("Generated").green(),
        style(result.output_path.display()).bold()
    )?;
    writeln!(
        writer,
        "File size: {:.2} KB",
        result.output_bytes as f64 / 1024.0
    )?;
    writeln!(writer, "Templates: {found}")?;

    if !result.skipped.is_empty() {
        writeln!(
            writer,
            "{}",
            style(format!("Skipped {} template blocks:", result.skipped.len())).yellow()
        )?;
        for block in &result.skipped {
            writeln!(
                writer,
                "  - line {}: {} ({})",
                block.line,
                block.title.as_deref().unwrap_or("<untitled>"),
                block.reason
            )?;
        }
    }

    if let CountCheck::Mismatched { expected, found } = result.count_check {
        writeln!(
            writer,
            "{}",
            style(format!("WARNING: Expected {expected} templates but found {found}"))
                .yellow()
                .bold()
        )?;
        writeln!(writer, "Listing found templates:")?;
        for record in &result.records {
            writeln!(writer, "  - {} ({})", record.title(), record.difficulty())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{write_found, write_report};
    use crate::{
        application::commands::{CountCheck, GenerateTemplateSqlResult},
        domain::template_record::{SkipReason, SkippedBlock, TemplateRecord},
    };

    fn record(title: &str, difficulty: &str) -> TemplateRecord {
        TemplateRecord::new(title, "desc", difficulty, "script").expect("record should be created")
    }

    fn render(result: &GenerateTemplateSqlResult) -> String {
        console::set_colors_enabled(false);
        let mut output = Vec::new();
        write_report(&mut output, result).expect("report should be written");
        String::from_utf8(output).expect("report should be utf8")
    }

    #[test]
    fn found_line_stands_alone() {
        let mut output = Vec::new();
        write_found(&mut output, 3).expect("report should be written");

        assert_eq!(
            String::from_utf8(output).expect("report should be utf8"),
            "Found 3 templates\n"
        );
    }

    #[test]
    fn mismatch_lists_every_template() {
        let result = GenerateTemplateSqlResult {
            output_path: PathBuf::from("out.sql"),
            output_bytes: 2048,
            records: vec![
                record("Morning Routine", "easy"),
                record("Evening Reflection", "medium"),
                record("Weekly Review", "hard"),
            ],
            skipped: Vec::new(),
            count_check: CountCheck::Mismatched {
                expected: 40,
                found: 3,
            },
        };

        let report = render(&result);

        assert_eq!(
            report,
            "Generated out.sql\n\
             File size: 2.00 KB\n\
             Templates: 3\n\
             WARNING: Expected 40 templates but found 3\n\
             Listing found templates:\n\
             \x20 - Morning Routine (easy)\n\
             \x20 - Evening Reflection (medium)\n\
             \x20 - Weekly Review (hard)\n"
        );
    }

    #[test]
    fn matched_count_prints_no_warning_but_lists_skipped_blocks() {
        let result = GenerateTemplateSqlResult {
            output_path: PathBuf::from("out.sql"),
            output_bytes: 512,
            records: vec![record("Only", "easy")],
            skipped: vec![SkippedBlock {
                line: 42,
                title: Some("Busy".to_string()),
                reason: SkipReason::PatternMismatch,
            }],
            count_check: CountCheck::Matched { count: 1 },
        };

        let report = render(&result);

        assert!(report.contains("File size: 0.50 KB\n"));
        assert!(report.contains(
            "Skipped 1 template blocks:\n  - line 42: Busy (does not match the expected field layout)\n"
        ));
        assert!(!report.contains("WARNING"));
    }
}
