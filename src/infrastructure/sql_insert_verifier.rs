use sqlparser::{
    ast::{Expr, SetExpr, Statement, Value, ValueWithSpan},
    parser::Parser,
};

use crate::domain::{
    errors::{TemplateSqlError, TemplateSqlResult},
    sql_dialect::SqlDialectKind,
};

/// An INSERT statement read back through the SQL parser.
///
/// Each row keeps the decoded text of its single-quoted literals; anything
/// else (`NULL`, `NOW()`, ...) is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedInsert {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl VerifiedInsert {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqlInsertVerifier {
    dialect: SqlDialectKind,
}

impl SqlInsertVerifier {
    pub fn new(dialect: SqlDialectKind) -> Self {
        Self { dialect }
    }

    pub fn verify(&self, insert_sql: &str) -> TemplateSqlResult<VerifiedInsert> {
        let mut statements = self
            .dialect
            .with_dialect(|dialect| Parser::parse_sql(dialect, insert_sql))
            .map_err(|error| TemplateSqlError::ParseFailed(error.to_string()))?;

        if statements.len() != 1 {
            return Err(TemplateSqlError::MultipleStatements(statements.len()));
        }

        let Statement::Insert(insert) = statements.remove(0) else {
            return Err(TemplateSqlError::UnexpectedStatement);
        };
        let columns = insert.columns.iter().map(ToString::to_string).collect();

        let Some(source) = insert.source else {
            return Err(TemplateSqlError::MissingValues);
        };
        let query = *source;
        let SetExpr::Values(values) = *query.body else {
            return Err(TemplateSqlError::MissingValues);
        };

        let rows = values
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(literal_text).collect())
            .collect();

        Ok(VerifiedInsert { columns, rows })
    }
}

fn literal_text(expr: Expr) -> Option<String> {
    match expr {
        Expr::Value(ValueWithSpan {
            value: Value::SingleQuotedString(text),
            ..
        }) => Some(text),
        _ => None,
    }
}
