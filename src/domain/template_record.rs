use std::fmt::{self, Display};

use crate::domain::errors::{TemplateSqlError, TemplateSqlResult};

/// One template pulled out of the source document.
///
/// All fields are non-blank and `script` is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    title: String,
    description: String,
    difficulty: String,
    script: String,
}

impl TemplateRecord {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: impl Into<String>,
        script: impl Into<String>,
    ) -> TemplateSqlResult<Self> {
        let title = ensure_not_blank(title.into(), "title")?;
        let description = ensure_not_blank(description.into(), "description")?;
        let difficulty = ensure_not_blank(difficulty.into(), "difficulty")?;
        let script = ensure_not_blank(script.into(), "script")?;

        Ok(Self {
            title,
            description,
            difficulty,
            script: script.trim().to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn script(&self) -> &str {
        &self.script
    }
}

fn ensure_not_blank(value: String, field: &'static str) -> TemplateSqlResult<String> {
    if value.trim().is_empty() {
        return Err(TemplateSqlError::BlankField(field));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    PatternMismatch,
    /// The block's header ended up inside the script of the block before it.
    MergedIntoPrevious,
    BlankField(&'static str),
    Rejected(String),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PatternMismatch => f.write_str("does not match the expected field layout"),
            SkipReason::MergedIntoPrevious => {
                f.write_str("swallowed by the script of the previous template")
            }
            SkipReason::BlankField(field) => write!(f, "field `{field}` is blank"),
            SkipReason::Rejected(message) => f.write_str(message),
        }
    }
}

/// A block that looked like a template but produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBlock {
    pub line: usize,
    pub title: Option<String>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<TemplateRecord>,
    pub skipped: Vec<SkippedBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_script_but_keeps_other_fields() {
        let record = TemplateRecord::new("Title", "Desc", "easy", "\n  # Body\n\n")
            .expect("record should be created");

        assert_eq!(record.script(), "# Body");
        assert_eq!(record.title(), "Title");
    }

    #[test]
    fn rejects_blank_fields() {
        let error = TemplateRecord::new("Title", "   ", "easy", "body")
            .expect_err("blank description should be rejected");
        assert_eq!(error, TemplateSqlError::BlankField("description"));

        let error = TemplateRecord::new("Title", "Desc", "easy", "\n\t")
            .expect_err("blank script should be rejected");
        assert_eq!(error, TemplateSqlError::BlankField("script"));
    }
}
