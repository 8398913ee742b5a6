use std::str::FromStr;

use sqlparser::dialect::{
    Dialect, DuckDbDialect, GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
    SQLiteDialect, SnowflakeDialect,
};

use crate::domain::errors::TemplateSqlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialectKind {
    Generic,
    MySql,
    #[default]
    PostgreSql,
    Sqlite,
    MsSql,
    Snowflake,
    DuckDb,
}

impl SqlDialectKind {
    pub const ALL: [SqlDialectKind; 7] = [
        SqlDialectKind::Generic,
        SqlDialectKind::MySql,
        SqlDialectKind::PostgreSql,
        SqlDialectKind::Sqlite,
        SqlDialectKind::MsSql,
        SqlDialectKind::Snowflake,
        SqlDialectKind::DuckDb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SqlDialectKind::Generic => "generic",
            SqlDialectKind::MySql => "mysql",
            SqlDialectKind::PostgreSql => "postgres",
            SqlDialectKind::Sqlite => "sqlite",
            SqlDialectKind::MsSql => "mssql",
            SqlDialectKind::Snowflake => "snowflake",
            SqlDialectKind::DuckDb => "duckdb",
        }
    }

    /// Expression the database evaluates at insert time for `created_at`.
    pub fn now_expression(self) -> &'static str {
        match self {
            SqlDialectKind::Sqlite => "CURRENT_TIMESTAMP",
            SqlDialectKind::MsSql => "GETDATE()",
            _ => "NOW()",
        }
    }

    pub fn length_function(self) -> &'static str {
        match self {
            SqlDialectKind::MsSql => "LEN",
            _ => "LENGTH",
        }
    }

    /// Whether `\` starts an escape sequence inside a single-quoted literal.
    pub fn escapes_backslash(self) -> bool {
        self.with_dialect(|dialect| dialect.supports_string_literal_backslash_escape())
    }

    pub fn with_dialect<T>(self, f: impl FnOnce(&dyn Dialect) -> T) -> T {
        match self {
            SqlDialectKind::Generic => f(&GenericDialect {}),
            SqlDialectKind::MySql => f(&MySqlDialect {}),
            SqlDialectKind::PostgreSql => f(&PostgreSqlDialect {}),
            SqlDialectKind::Sqlite => f(&SQLiteDialect {}),
            SqlDialectKind::MsSql => f(&MsSqlDialect {}),
            SqlDialectKind::Snowflake => f(&SnowflakeDialect {}),
            SqlDialectKind::DuckDb => f(&DuckDbDialect {}),
        }
    }
}

impl std::fmt::Display for SqlDialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialectKind {
    type Err = TemplateSqlError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(SqlDialectKind::Generic),
            "mysql" => Ok(SqlDialectKind::MySql),
            "postgres" | "postgresql" => Ok(SqlDialectKind::PostgreSql),
            "sqlite" => Ok(SqlDialectKind::Sqlite),
            "mssql" | "sqlserver" | "sql_server" => Ok(SqlDialectKind::MsSql),
            "snowflake" => Ok(SqlDialectKind::Snowflake),
            "duckdb" | "duck_db" => Ok(SqlDialectKind::DuckDb),
            _ => Err(TemplateSqlError::UnsupportedDialect(value.to_string())),
        }
    }
}
