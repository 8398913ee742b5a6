use std::{fs, io};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    application::commands::{
        CountCheck, GenerateTemplateSqlCommand, GenerateTemplateSqlResult, GeneratedTemplateSql,
    },
    domain::errors::TemplateSqlError,
    infrastructure::{
        sql_insert_renderer::{InsertRenderOptions, SqlInsertRenderer},
        sql_insert_verifier::SqlInsertVerifier,
        template_extractor::TemplateExtractor,
    },
};

#[derive(Debug, Default)]
pub struct GenerateTemplateSqlUseCase;

impl GenerateTemplateSqlUseCase {
    /// Runs the pipeline and overwrites the output file.
    ///
    /// `on_generated` sees the extraction before anything is written, so the
    /// count can be reported even when persisting fails.
    pub fn execute<F>(
        &self,
        command: GenerateTemplateSqlCommand,
        on_generated: F,
    ) -> Result<GenerateTemplateSqlResult>
    where
        F: FnOnce(&GeneratedTemplateSql) -> io::Result<()>,
    {
        let document = fs::read_to_string(&command.input_path).with_context(|| {
            format!("Unable to read template source: {}", command.input_path.display())
        })?;
        info!(path = %command.input_path.display(), bytes = document.len(), "read template source");

        let generated = self.generate(&document, command.render_options)?;
        on_generated(&generated)?;

        fs::write(&command.output_path, &generated.sql).with_context(|| {
            format!("Unable to write file: {}", command.output_path.display())
        })?;
        info!(path = %command.output_path.display(), "wrote generated sql");

        Ok(GenerateTemplateSqlResult {
            output_path: command.output_path,
            output_bytes: generated.sql.len(),
            records: generated.records,
            skipped: generated.skipped,
            count_check: generated.count_check,
        })
    }

    /// Extract, render and verify without touching the filesystem.
    pub fn generate(
        &self,
        document: &str,
        render_options: InsertRenderOptions,
    ) -> Result<GeneratedTemplateSql> {
        let expected_count = render_options.expected_count;
        let dialect = render_options.dialect;

        let extraction = TemplateExtractor::new()?.extract(document);
        debug!(
            records = extraction.records.len(),
            skipped = extraction.skipped.len(),
            "extraction finished"
        );

        let renderer = SqlInsertRenderer::new(render_options)?;
        let insert = renderer.render_insert(&extraction.records);
        if let Some(insert) = &insert {
            let verified = SqlInsertVerifier::new(dialect)
                .verify(insert)
                .context("Generated INSERT statement did not pass verification")?;
            if verified.row_count() != extraction.records.len() {
                return Err(TemplateSqlError::RowCountMismatch {
                    expected: extraction.records.len(),
                    actual: verified.row_count(),
                }
                .into());
            }
            if let Some(row) = verified
                .rows
                .iter()
                .find(|row| row.len() != verified.columns.len())
            {
                return Err(TemplateSqlError::ColumnCountMismatch {
                    columns: verified.columns.len(),
                    values: row.len(),
                }
                .into());
            }
        }
        let sql = renderer.render_script(extraction.records.len(), insert.as_deref());

        Ok(GeneratedTemplateSql {
            sql,
            count_check: CountCheck::evaluate(expected_count, extraction.records.len()),
            records: extraction.records,
            skipped: extraction.skipped,
        })
    }
}
