use std::path::PathBuf;

use crate::{
    domain::template_record::{SkippedBlock, TemplateRecord},
    infrastructure::sql_insert_renderer::InsertRenderOptions,
};

#[derive(Debug, Clone)]
pub struct GenerateTemplateSqlCommand {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub render_options: InsertRenderOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCheck {
    Matched { count: usize },
    Mismatched { expected: usize, found: usize },
}

impl CountCheck {
    pub fn evaluate(expected: usize, found: usize) -> Self {
        if expected == found {
            CountCheck::Matched { count: found }
        } else {
            CountCheck::Mismatched { expected, found }
        }
    }
}

/// Output of the in-memory pipeline, before anything touches the disk.
#[derive(Debug, Clone)]
pub struct GeneratedTemplateSql {
    pub sql: String,
    pub records: Vec<TemplateRecord>,
    pub skipped: Vec<SkippedBlock>,
    pub count_check: CountCheck,
}

#[derive(Debug, Clone)]
pub struct GenerateTemplateSqlResult {
    pub output_path: PathBuf,
    pub output_bytes: usize,
    pub records: Vec<TemplateRecord>,
    pub skipped: Vec<SkippedBlock>,
    pub count_check: CountCheck,
}
