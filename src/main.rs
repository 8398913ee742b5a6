mod application;
mod domain;
mod infrastructure;
mod interfaces;

use std::io;

use anyhow::Result;
use console::style;
use tracing_subscriber::EnvFilter;

use crate::application::{
    commands::CountCheck, use_cases::generate_template_sql::GenerateTemplateSqlUseCase,
};
use crate::domain::errors::TemplateSqlError;
use crate::interfaces::{
    cli::collect_generate_request,
    report::{write_found, write_report},
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let request = collect_generate_request()?;
    let use_case = GenerateTemplateSqlUseCase;

    println!("{}", style("Extracting templates...").cyan());
    let result = use_case.execute(request.command, |generated| {
        write_found(io::stdout().lock(), generated.records.len())
    })?;
    write_report(io::stdout().lock(), &result)?;

    if let CountCheck::Mismatched { expected, found } = result.count_check {
        if request.strict {
            return Err(TemplateSqlError::CountMismatch { expected, found }.into());
        }
    }
    Ok(())
}
