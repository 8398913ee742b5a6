use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use crate::{
    application::commands::GenerateTemplateSqlCommand,
    domain::sql_dialect::SqlDialectKind,
    infrastructure::sql_insert_renderer::{
        DEFAULT_EXPECTED_COUNT, DEFAULT_TABLE_NAME, DEFAULT_TEMPLATE_TYPE, InsertRenderOptions,
    },
};

const DEFAULT_INPUT: &str = "frontend/src/config/templateLibrary.ts";
const DEFAULT_OUTPUT: &str = "INSERT_TEMPLATES_WITH_FULL_SCRIPTS.sql";

#[derive(Debug, Parser)]
#[command(
    name = "template-sql-gen",
    version,
    about = "Extract built-in templates from a source file into an SQL insert script"
)]
struct CliArgs {
    #[arg(long, short = 'i', default_value = DEFAULT_INPUT, help = "Template source file")]
    input: PathBuf,
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT, help = "Generated SQL file, overwritten")]
    output: PathBuf,
    #[arg(long, short = 'n', default_value_t = DEFAULT_EXPECTED_COUNT)]
    expected: usize,
    #[arg(long, short = 't', default_value = DEFAULT_TABLE_NAME)]
    table: String,
    #[arg(long, default_value = DEFAULT_TEMPLATE_TYPE, help = "Value written to the `type` column")]
    template_type: String,
    #[arg(long, short = 'd', value_enum, default_value_t = CliDialect::Postgres)]
    dialect: CliDialect,
    #[arg(long, help = "Fail when the number of templates differs from --expected")]
    strict: bool,
    #[arg(long, help = "Prompt for every setting")]
    interactive: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDialect {
    Generic,
    Mysql,
    Postgres,
    Sqlite,
    Mssql,
    Snowflake,
    Duckdb,
}

impl From<CliDialect> for SqlDialectKind {
    fn from(value: CliDialect) -> Self {
        match value {
            CliDialect::Generic => SqlDialectKind::Generic,
            CliDialect::Mysql => SqlDialectKind::MySql,
            CliDialect::Postgres => SqlDialectKind::PostgreSql,
            CliDialect::Sqlite => SqlDialectKind::Sqlite,
            CliDialect::Mssql => SqlDialectKind::MsSql,
            CliDialect::Snowflake => SqlDialectKind::Snowflake,
            CliDialect::Duckdb => SqlDialectKind::DuckDb,
        }
    }
}

#[derive(Debug)]
pub struct CliRequest {
    pub command: GenerateTemplateSqlCommand,
    pub strict: bool,
}

pub fn collect_generate_request() -> Result<CliRequest> {
    let args = CliArgs::parse();
    if args.interactive {
        return collect_interactive_request(args);
    }
    collect_request_from_args(args)
}

fn collect_request_from_args(args: CliArgs) -> Result<CliRequest> {
    let table_name = ensure_non_empty_value(args.table, "Table name")?;
    let template_type = ensure_non_empty_value(args.template_type, "Template type")?;

    Ok(CliRequest {
        command: GenerateTemplateSqlCommand {
            input_path: args.input,
            output_path: args.output,
            render_options: InsertRenderOptions {
                table_name,
                template_type,
                dialect: args.dialect.into(),
                expected_count: args.expected,
            },
        },
        strict: args.strict,
    })
}

fn collect_interactive_request(defaults: CliArgs) -> Result<CliRequest> {
    let theme = ColorfulTheme::default();

    println!();
    println!(
        "{}",
        style(" TEMPLATE SQL GENERATOR ")
            .black()
            .on_cyan()
            .bold()
            .underlined()
    );
    println!("{}", style("Turn built-in templates into an INSERT script").dim());
    println!();

    let input_path: String = Input::with_theme(&theme)
        .with_prompt("Template source file")
        .default(defaults.input.display().to_string())
        .validate_with(|value: &String| {
            if PathBuf::from(value.trim()).is_file() {
                Ok(())
            } else {
                Err("File does not exist")
            }
        })
        .interact_text()?;

    let output_path: String = Input::with_theme(&theme)
        .with_prompt("Output file")
        .default(defaults.output.display().to_string())
        .interact_text()?;
    let output_path = PathBuf::from(output_path.trim());

    let expected_count: usize = Input::with_theme(&theme)
        .with_prompt("Expected number of templates")
        .default(defaults.expected)
        .interact_text()?;

    let table_name: String = Input::with_theme(&theme)
        .with_prompt("Target table (supports schema.table)")
        .default(defaults.table)
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("Table name must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let dialect_items = SqlDialectKind::ALL
        .iter()
        .map(|dialect| dialect.as_str())
        .collect::<Vec<_>>();
    let default_dialect = SqlDialectKind::from(defaults.dialect);
    let selected_dialect_index = Select::with_theme(&theme)
        .with_prompt("SQL dialect")
        .default(
            SqlDialectKind::ALL
                .iter()
                .position(|dialect| *dialect == default_dialect)
                .unwrap_or(0),
        )
        .items(&dialect_items)
        .interact()?;
    let dialect = SqlDialectKind::ALL[selected_dialect_index];

    if output_path.exists() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} already exists, overwrite it?", output_path.display()))
            .default(true)
            .interact()?;
        if !overwrite {
            return Err(anyhow!("Aborted: {} was left untouched", output_path.display()));
        }
    }

    let strict = Confirm::with_theme(&theme)
        .with_prompt("Fail when the template count does not match?")
        .default(defaults.strict)
        .interact()?;

    Ok(CliRequest {
        command: GenerateTemplateSqlCommand {
            input_path: PathBuf::from(input_path.trim()),
            output_path,
            render_options: InsertRenderOptions {
                table_name: table_name.trim().to_string(),
                template_type: ensure_non_empty_value(defaults.template_type, "Template type")?,
                dialect,
                expected_count,
            },
        },
        strict,
    })
}

fn ensure_non_empty_value(value: String, field_name: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(anyhow!("{field_name} must not be empty"));
    }
    Ok(value)
}
