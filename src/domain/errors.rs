use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateSqlError {
    #[error("Template field `{0}` must not be blank")]
    BlankField(&'static str),

    #[error("Invalid table name: {0}, expected an identifier like `templates` or `public.templates`")]
    InvalidTableName(String),

    #[error("Unable to compile template pattern: {0}")]
    InvalidPattern(String),

    #[error("Generated SQL failed to parse: {0}")]
    ParseFailed(String),

    #[error("Generated SQL must contain exactly one statement, but got {0}")]
    MultipleStatements(usize),

    #[error("Generated SQL is not an INSERT statement")]
    UnexpectedStatement,

    #[error("Generated INSERT has no VALUES list")]
    MissingValues,

    #[error("Generated INSERT has {actual} rows, but {expected} templates were extracted")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("Generated INSERT row has {values} values for {columns} columns")]
    ColumnCountMismatch { columns: usize, values: usize },

    #[error("Expected {expected} templates but found {found}")]
    CountMismatch { expected: usize, found: usize },

    #[error(
        "Unsupported dialect: {0}. Available values: generic,mysql,postgres,sqlite,mssql,snowflake,duckdb"
    )]
    UnsupportedDialect(String),
}

pub type TemplateSqlResult<T> = Result<T, TemplateSqlError>;
