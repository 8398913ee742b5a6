use regex::Regex;

use crate::domain::{
    errors::{TemplateSqlError, TemplateSqlResult},
    sql_dialect::SqlDialectKind,
    template_record::TemplateRecord,
};

pub const DEFAULT_TABLE_NAME: &str = "templates";
pub const DEFAULT_TEMPLATE_TYPE: &str = "life";
pub const DEFAULT_EXPECTED_COUNT: usize = 40;

const INSERT_COLUMNS: &str = "title, description, difficulty, script, type, org, created_at";
const RULE: &str = "-- =====================================================================";
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertRenderOptions {
    pub table_name: String,
    pub template_type: String,
    pub dialect: SqlDialectKind,
    pub expected_count: usize,
}

impl Default for InsertRenderOptions {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            template_type: DEFAULT_TEMPLATE_TYPE.to_string(),
            dialect: SqlDialectKind::default(),
            expected_count: DEFAULT_EXPECTED_COUNT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqlInsertRenderer {
    options: InsertRenderOptions,
}

impl SqlInsertRenderer {
    pub fn new(options: InsertRenderOptions) -> TemplateSqlResult<Self> {
        let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
            .map_err(|error| TemplateSqlError::InvalidPattern(error.to_string()))?;
        if !identifier.is_match(options.table_name.trim()) {
            return Err(TemplateSqlError::InvalidTableName(options.table_name));
        }

        Ok(Self {
            options: InsertRenderOptions {
                table_name: options.table_name.trim().to_string(),
                ..options
            },
        })
    }

    /// Wraps an INSERT from [`Self::render_insert`] into the full script:
    /// header, the INSERT (or a no-op comment) and the verification query.
    pub fn render_script(&self, record_count: usize, insert: Option<&str>) -> String {
        let mut sql = self.header(record_count);

        match insert {
            Some(insert) => sql.push_str(insert),
            None => sql.push_str("-- No templates were extracted; nothing to insert.\n"),
        }

        sql.push_str(&self.verification_query());
        sql
    }

    /// Renders the single multi-row INSERT, or `None` when `records` is empty.
    pub fn render_insert(&self, records: &[TemplateRecord]) -> Option<String> {
        if records.is_empty() {
            return None;
        }

        let mut sql = format!(
            "INSERT INTO {} ({INSERT_COLUMNS}) VALUES\n",
            self.options.table_name
        );
        let rows = records
            .iter()
            .map(|record| self.render_row(record))
            .collect::<Vec<_>>();
        sql.push_str(&rows.join(",\n"));
        sql.push_str(";\n");
        Some(sql)
    }

    fn render_row(&self, record: &TemplateRecord) -> String {
        let values = [
            self.quote(record.title()),
            self.quote(record.description()),
            self.quote(record.difficulty()),
            self.quote(record.script()),
            self.quote(&self.options.template_type),
            "NULL".to_string(),
            self.options.dialect.now_expression().to_string(),
        ];
        format!("(\n  {}\n)", values.join(",\n  "))
    }

    fn quote(&self, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 2);
        escaped.push('\'');
        let escapes_backslash = self.options.dialect.escapes_backslash();
        for character in value.chars() {
            match character {
                '\'' => escaped.push_str("''"),
                '\\' if escapes_backslash => escaped.push_str("\\\\"),
                other => escaped.push(other),
            }
        }
        escaped.push('\'');
        escaped
    }

    fn header(&self, record_count: usize) -> String {
        let InsertRenderOptions {
            table_name,
            dialect,
            ..
        } = &self.options;

        format!(
            "{RULE}\n\
             -- INSERT {record_count} TEMPLATES WITH FULL SCRIPTS\n\
             {RULE}\n\
             -- Contains the complete script body of every extracted template\n\
             -- Target dialect: {dialect}\n\
             --\n\
             -- Run this in your SQL editor to populate the {table_name} table\n\
             {RULE}\n\n"
        )
    }

    fn verification_query(&self) -> String {
        let InsertRenderOptions {
            table_name,
            dialect,
            expected_count,
            ..
        } = &self.options;
        let length = dialect.length_function();

        format!(
            "\n{RULE}\n\
             -- Verification\n\
             {RULE}\n\
             SELECT\n\
             \x20 id,\n\
             \x20 title,\n\
             \x20 difficulty,\n\
             \x20 {length}(script) as script_chars,\n\
             \x20 SUBSTRING(script, 1, {PREVIEW_CHARS}) as script_preview\n\
             FROM {table_name}\n\
             WHERE org IS NULL\n\
             ORDER BY id;\n\n\
             -- Should show {expected_count} templates with script_chars > 1000 for each\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, difficulty: &str, script: &str) -> TemplateRecord {
        TemplateRecord::new(title, format!("About {title}"), difficulty, script)
            .expect("record should be created")
    }

    fn render(renderer: &SqlInsertRenderer, records: &[TemplateRecord]) -> String {
        renderer.render_script(records.len(), renderer.render_insert(records).as_deref())
    }

    fn renderer(dialect: SqlDialectKind) -> SqlInsertRenderer {
        SqlInsertRenderer::new(InsertRenderOptions {
            dialect,
            ..InsertRenderOptions::default()
        })
        .expect("renderer should be created")
    }

    #[test]
    fn renders_one_row_per_record_in_order() {
        let records = vec![
            record("Morning Routine", "easy", "Wake up"),
            record("Evening Reflection", "medium", "Wind down"),
        ];

        let insert = renderer(SqlDialectKind::PostgreSql)
            .render_insert(&records)
            .expect("insert should be rendered");

        assert_eq!(
            insert,
            "INSERT INTO templates (title, description, difficulty, script, type, org, created_at) VALUES\n\
             (\n  'Morning Routine',\n  'About Morning Routine',\n  'easy',\n  'Wake up',\n  'life',\n  NULL,\n  NOW()\n),\n\
             (\n  'Evening Reflection',\n  'About Evening Reflection',\n  'medium',\n  'Wind down',\n  'life',\n  NULL,\n  NOW()\n);\n"
        );
    }

    #[test]
    fn doubles_single_quotes_in_every_text_field() {
        let records = vec![
            TemplateRecord::new("Don't Stop", "It's \"quoted\"", "o'hard", "Say 'hi'\nthen go")
                .expect("record should be created"),
        ];

        let insert = renderer(SqlDialectKind::PostgreSql)
            .render_insert(&records)
            .expect("insert should be rendered");

        assert!(insert.contains("'Don''t Stop'"));
        assert!(insert.contains("'It''s \"quoted\"'"));
        assert!(insert.contains("'o''hard'"));
        assert!(insert.contains("'Say ''hi''\nthen go'"));
    }

    #[test]
    fn doubles_backslashes_only_for_dialects_that_escape_them() {
        let records = vec![record("Paths", "easy", r"C:\temp")];

        let mysql = renderer(SqlDialectKind::MySql)
            .render_insert(&records)
            .expect("insert should be rendered");
        let postgres = renderer(SqlDialectKind::PostgreSql)
            .render_insert(&records)
            .expect("insert should be rendered");

        assert!(mysql.contains(r"'C:\\temp'"));
        assert!(postgres.contains(r"'C:\temp'"));
    }

    #[test]
    fn render_script_embeds_the_given_insert_once() {
        let renderer = renderer(SqlDialectKind::PostgreSql);
        let insert = renderer
            .render_insert(&[record("One", "easy", "x")])
            .expect("insert should be rendered");

        let sql = renderer.render_script(1, Some(&insert));

        assert_eq!(sql.matches(insert.as_str()).count(), 1);
        assert_eq!(sql.matches("INSERT INTO").count(), 1);
        assert!(sql.starts_with(&renderer.header(1)));
    }

    #[test]
    fn empty_input_renders_no_insert_statement() {
        let renderer = renderer(SqlDialectKind::PostgreSql);

        assert!(renderer.render_insert(&[]).is_none());

        let sql = render(&renderer, &[]);
        assert!(!sql.contains("INSERT INTO"));
        assert!(sql.contains("-- No templates were extracted; nothing to insert."));
        assert!(sql.contains("ORDER BY id;"));
    }

    #[test]
    fn script_ends_with_verification_query_and_expected_count() {
        let sql = render(&renderer(SqlDialectKind::PostgreSql), &[record("One", "easy", "x")]);

        let insert_at = sql.find("INSERT INTO templates").expect("insert should exist");
        let select_at = sql.find("SELECT\n").expect("verification should exist");
        assert!(insert_at < select_at);
        assert!(sql.contains("  LENGTH(script) as script_chars,"));
        assert!(sql.contains("  SUBSTRING(script, 1, 100) as script_preview"));
        assert!(sql.contains("FROM templates\nWHERE org IS NULL\nORDER BY id;"));
        assert!(sql.ends_with("-- Should show 40 templates with script_chars > 1000 for each\n"));
    }

    #[test]
    fn mssql_uses_its_own_timestamp_and_length_functions() {
        let sql = render(&renderer(SqlDialectKind::MsSql), &[record("One", "easy", "x")]);

        assert!(sql.contains("  GETDATE()\n);"));
        assert!(sql.contains("LEN(script) as script_chars"));
    }

    #[test]
    fn custom_table_and_type_are_used() {
        let renderer = SqlInsertRenderer::new(InsertRenderOptions {
            table_name: " public.persona_templates ".to_string(),
            template_type: "health's".to_string(),
            ..InsertRenderOptions::default()
        })
        .expect("renderer should be created");

        let sql = render(&renderer, &[record("One", "easy", "x")]);

        assert!(sql.contains("INSERT INTO public.persona_templates ("));
        assert!(sql.contains("  'health''s',\n  NULL,"));
        assert!(sql.contains("FROM public.persona_templates\n"));
    }

    #[test]
    fn rejects_table_names_that_are_not_identifiers() {
        let error = SqlInsertRenderer::new(InsertRenderOptions {
            table_name: "templates; DROP TABLE users".to_string(),
            ..InsertRenderOptions::default()
        })
        .expect_err("table name should be rejected");

        assert!(matches!(error, TemplateSqlError::InvalidTableName(_)));
    }
}
