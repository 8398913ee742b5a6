use std::ops::Range;

use regex::Regex;
use tracing::debug;

use crate::domain::{
    errors::{TemplateSqlError, TemplateSqlResult},
    template_record::{Extraction, SkipReason, SkippedBlock, TemplateRecord},
};

// title, description, category, difficulty, optional isBuiltIn marker, backtick script.
// Inside the script a backtick followed by a comma is kept; any other backtick closes it.
const TEMPLATE_PATTERN: &str = r"title:\s*'([^']+)',\s*description:\s*'([^']+)',\s*category:\s*'([^']+)',\s*difficulty:\s*'([^']+)',\s*(?:isBuiltIn:\s*true,\s*)?script:\s*`((?:[^`]|`,)*)`";

const TITLE_ANCHOR_PATTERN: &str = r#"title:\s*['"`]([^'"`\n]*)"#;

// `},` / `{` line pair followed by a quoted title: the start of another object literal.
const OBJECT_BOUNDARY_PATTERN: &str =
    r#"(?m)^[ \t]*\},?[ \t]*\n[ \t]*\{[ \t]*\n(?:[ \t]*id:[^\n]*\n)?[ \t]*(title:\s*['"`]([^'"`\n]*))"#;

#[derive(Debug, Clone)]
pub struct TemplateExtractor {
    template_regex: Regex,
    title_anchor_regex: Regex,
    object_boundary_regex: Regex,
}

impl TemplateExtractor {
    pub fn new() -> TemplateSqlResult<Self> {
        Ok(Self {
            template_regex: compile(TEMPLATE_PATTERN)?,
            title_anchor_regex: compile(TITLE_ANCHOR_PATTERN)?,
            object_boundary_regex: compile(OBJECT_BOUNDARY_PATTERN)?,
        })
    }

    /// Pulls every well-formed template block out of `document`, in document order.
    ///
    /// Blocks that open a quoted `title:` field but do not fit the layout are
    /// not fatal; they come back in [`Extraction::skipped`] with their line.
    /// So do blocks whose header was captured by the previous block's script.
    pub fn extract(&self, document: &str) -> Extraction {
        let mut extraction = Extraction::default();
        let mut matched_spans: Vec<Range<usize>> = Vec::new();

        for captures in self.template_regex.captures_iter(document) {
            let Some(whole_match) = captures.get(0) else {
                continue;
            };
            matched_spans.push(whole_match.range());

            if let Some(script) = captures.get(5) {
                for boundary in self.object_boundary_regex.captures_iter(script.as_str()) {
                    let Some(anchor) = boundary.get(1) else {
                        continue;
                    };
                    extraction.skipped.push(SkippedBlock {
                        line: line_of(document, script.start() + anchor.start()),
                        title: boundary.get(2).and_then(|group| non_blank(group.as_str())),
                        reason: SkipReason::MergedIntoPrevious,
                    });
                }
            }

            let field = |index: usize| captures.get(index).map_or("", |group| group.as_str());
            let title = field(1);
            match TemplateRecord::new(title, field(2), field(4), field(5)) {
                Ok(record) => {
                    debug!(title = record.title(), "extracted template");
                    extraction.records.push(record);
                }
                Err(error) => {
                    extraction.skipped.push(SkippedBlock {
                        line: line_of(document, whole_match.start()),
                        title: non_blank(title),
                        reason: skip_reason(error),
                    });
                }
            }
        }

        for anchor in self.title_anchor_regex.captures_iter(document) {
            let Some(anchor_match) = anchor.get(0) else {
                continue;
            };
            let start = anchor_match.start();
            if matched_spans.iter().any(|span| span.contains(&start)) {
                continue;
            }
            extraction.skipped.push(SkippedBlock {
                line: line_of(document, start),
                title: anchor.get(1).and_then(|group| non_blank(group.as_str())),
                reason: SkipReason::PatternMismatch,
            });
        }

        extraction.skipped.sort_by_key(|block| block.line);
        for block in &extraction.skipped {
            debug!(
                line = block.line,
                title = block.title.as_deref().unwrap_or("<unknown>"),
                reason = %block.reason,
                "skipped template block"
            );
        }

        extraction
    }
}

fn skip_reason(error: TemplateSqlError) -> SkipReason {
    match error {
        TemplateSqlError::BlankField(field) => SkipReason::BlankField(field),
        other => SkipReason::Rejected(other.to_string()),
    }
}

fn compile(pattern: &str) -> TemplateSqlResult<Regex> {
    Regex::new(pattern).map_err(|error| TemplateSqlError::InvalidPattern(error.to_string()))
}

fn line_of(document: &str, byte_offset: usize) -> usize {
    document[..byte_offset].matches('\n').count() + 1
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
