//! SQL dialects.
//!
//! Unlike the teacher's `SqlDialect` trait (one `Box<dyn SqlDialect>` per
//! database, each a zero-sized struct implementing a shared interface),
//! spec §3/§9 call for dialects to be immutable *value records* handed out
//! by identity from a small registry keyed on a database-type enum. Six
//! `&'static SqlDialect` instances are built once behind `lazy_static!`,
//! mirroring the teacher's use of that crate for one-time static state.

mod functions;

pub use functions::{CanonicalFunction, ConcatStyle};

use lazy_static::lazy_static;
use std::collections::HashMap;

/// The six dialects this engine targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseType {
    Sqlite,
    MySql,
    PostgreSql,
    SqlServer,
    Oracle,
    Db2,
}

impl DatabaseType {
    /// Returns the canonical, process-wide dialect record for this database
    /// type. Callers never construct a `SqlDialect` themselves.
    pub fn dialect(self) -> &'static SqlDialect {
        match self {
            DatabaseType::Sqlite => &SQLITE,
            DatabaseType::MySql => &MYSQL,
            DatabaseType::PostgreSql => &POSTGRESQL,
            DatabaseType::SqlServer => &SQL_SERVER,
            DatabaseType::Oracle => &ORACLE,
            DatabaseType::Db2 => &DB2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DatabaseType::Sqlite => "sqlite",
            DatabaseType::MySql => "mysql",
            DatabaseType::PostgreSql => "postgresql",
            DatabaseType::SqlServer => "sqlserver",
            DatabaseType::Oracle => "oracle",
            DatabaseType::Db2 => "db2",
        }
    }
}

/// Whether `LIMIT`/paging uses the common `LIMIT n [OFFSET m]` form or the
/// standard `FETCH FIRST n ROWS ONLY` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStyle {
    Limit,
    FetchFirst,
}

/// An immutable, per-dialect syntax record. Six instances exist for the
/// lifetime of the process; every resolver/translator consults one by
/// reference.
#[derive(Debug)]
pub struct SqlDialect {
    pub database_type: DatabaseType,
    pub column_left: char,
    pub column_right: char,
    pub string_left: char,
    pub string_right: char,
    pub parameter_prefix: char,
    pub limit_style: LimitStyle,
    function_map: HashMap<CanonicalFunction, &'static str>,
}

impl SqlDialect {
    /// Wraps an identifier in this dialect's quote characters. Every
    /// emitted identifier in the crate goes through this single function,
    /// which is the invariant spec §3 requires ("every emitted identifier
    /// is wrapped exactly once").
    pub fn wrap_identifier(&self, id: &str) -> String {
        format!("{}{}{}", self.column_left, id, self.column_right)
    }

    /// Quotes and escapes a string literal, doubling embedded quote
    /// characters per the SQL standard.
    pub fn quote_string(&self, value: &str) -> String {
        let escaped = value.replace(self.string_left, "''");
        format!("{}{}{}", self.string_left, escaped, self.string_right)
    }

    /// Builds a parameter marker, e.g. `@id`, `$id`, `:id`, `?id`.
    pub fn parameter_marker(&self, name: &str) -> String {
        format!("{}{}", self.parameter_prefix, name)
    }

    /// The string-concatenation rendering for this dialect: `||` on most,
    /// `CONCAT(a, b)` on MySQL, `+` on SQL Server.
    pub fn concat_operator(&self) -> ConcatStyle {
        functions::concat_style(self.database_type)
    }

    pub fn string_concat(&self, left: &str, right: &str) -> String {
        match self.concat_operator() {
            ConcatStyle::Operator(op) => format!("{left} {op} {right}"),
            ConcatStyle::Function(func) => format!("{func}({left}, {right})"),
        }
    }

    /// Looks up a canonical function's SQL name for this dialect, falling
    /// back to the canonical name uppercased when the dialect has no
    /// override (spec §4.5: "fall back to the canonical name uppercased").
    pub fn translate_function(&self, function: CanonicalFunction) -> &str {
        self.function_map
            .get(&function)
            .copied()
            .unwrap_or_else(|| function.fallback_name())
    }

    /// Renders a `LIMIT`/`FETCH FIRST` clause, with an optional offset.
    pub fn limit_clause(&self, count_expr: &str, offset_expr: Option<&str>) -> String {
        match self.limit_style {
            LimitStyle::Limit => match offset_expr {
                Some(offset) => format!("LIMIT {count_expr} OFFSET {offset}"),
                None => format!("LIMIT {count_expr}"),
            },
            LimitStyle::FetchFirst => {
                let mut clause = String::new();
                if let Some(offset) = offset_expr {
                    clause.push_str(&format!("OFFSET {offset} ROWS "));
                }
                clause.push_str(&format!("FETCH FIRST {count_expr} ROWS ONLY"));
                clause
            }
        }
    }

    /// The dialect-appropriate current-timestamp expression, used by the
    /// translator for `DateTime.Now`-shaped calls.
    pub fn now_expression(&self) -> &'static str {
        match self.database_type {
            DatabaseType::Sqlite => "CURRENT_TIMESTAMP",
            DatabaseType::MySql => "NOW()",
            DatabaseType::PostgreSql => "NOW()",
            DatabaseType::SqlServer => "GETDATE()",
            DatabaseType::Oracle => "SYSDATE",
            DatabaseType::Db2 => "CURRENT TIMESTAMP",
        }
    }
}

lazy_static! {
    static ref SQLITE: SqlDialect = SqlDialect {
        database_type: DatabaseType::Sqlite,
        column_left: '[',
        column_right: ']',
        string_left: '\'',
        string_right: '\'',
        parameter_prefix: '@',
        limit_style: LimitStyle::Limit,
        function_map: functions::function_map(DatabaseType::Sqlite),
    };
    static ref MYSQL: SqlDialect = SqlDialect {
        database_type: DatabaseType::MySql,
        column_left: '`',
        column_right: '`',
        string_left: '\'',
        string_right: '\'',
        parameter_prefix: '@',
        limit_style: LimitStyle::Limit,
        function_map: functions::function_map(DatabaseType::MySql),
    };
    static ref POSTGRESQL: SqlDialect = SqlDialect {
        database_type: DatabaseType::PostgreSql,
        column_left: '"',
        column_right: '"',
        string_left: '\'',
        string_right: '\'',
        parameter_prefix: '$',
        limit_style: LimitStyle::Limit,
        function_map: functions::function_map(DatabaseType::PostgreSql),
    };
    static ref SQL_SERVER: SqlDialect = SqlDialect {
        database_type: DatabaseType::SqlServer,
        column_left: '[',
        column_right: ']',
        string_left: '\'',
        string_right: '\'',
        parameter_prefix: '@',
        limit_style: LimitStyle::FetchFirst,
        function_map: functions::function_map(DatabaseType::SqlServer),
    };
    static ref ORACLE: SqlDialect = SqlDialect {
        database_type: DatabaseType::Oracle,
        column_left: '"',
        column_right: '"',
        string_left: '\'',
        string_right: '\'',
        parameter_prefix: ':',
        limit_style: LimitStyle::FetchFirst,
        function_map: functions::function_map(DatabaseType::Oracle),
    };
    static ref DB2: SqlDialect = SqlDialect {
        database_type: DatabaseType::Db2,
        column_left: '"',
        column_right: '"',
        string_left: '\'',
        string_right: '\'',
        parameter_prefix: '?',
        limit_style: LimitStyle::FetchFirst,
        function_map: functions::function_map(DatabaseType::Db2),
    };
}

/// Free-function form of [`SqlDialect::wrap_identifier`], matching the
/// "one query operation `wrap_identifier(dialect, id) -> quoted`" shape
/// spec §4.1 describes for the registry.
pub fn wrap_identifier(dialect: &SqlDialect, id: &str) -> String {
    dialect.wrap_identifier(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_quoting_per_dialect() {
        assert_eq!(DatabaseType::Sqlite.dialect().wrap_identifier("id"), "[id]");
        assert_eq!(DatabaseType::MySql.dialect().wrap_identifier("id"), "`id`");
        assert_eq!(
            DatabaseType::PostgreSql.dialect().wrap_identifier("id"),
            "\"id\""
        );
        assert_eq!(
            DatabaseType::SqlServer.dialect().wrap_identifier("id"),
            "[id]"
        );
        assert_eq!(DatabaseType::Oracle.dialect().wrap_identifier("id"), "\"id\"");
        assert_eq!(DatabaseType::Db2.dialect().wrap_identifier("id"), "\"id\"");
    }

    #[test]
    fn parameter_markers_per_dialect() {
        assert_eq!(DatabaseType::Sqlite.dialect().parameter_marker("id"), "@id");
        assert_eq!(DatabaseType::MySql.dialect().parameter_marker("id"), "@id");
        assert_eq!(
            DatabaseType::SqlServer.dialect().parameter_marker("id"),
            "@id"
        );
        assert_eq!(
            DatabaseType::PostgreSql.dialect().parameter_marker("id"),
            "$id"
        );
        assert_eq!(DatabaseType::Oracle.dialect().parameter_marker("id"), ":id");
        assert_eq!(DatabaseType::Db2.dialect().parameter_marker("id"), "?id");
    }

    #[test]
    fn string_concat_per_dialect() {
        assert_eq!(
            DatabaseType::PostgreSql.dialect().string_concat("a", "b"),
            "a || b"
        );
        assert_eq!(
            DatabaseType::MySql.dialect().string_concat("a", "b"),
            "CONCAT(a, b)"
        );
        assert_eq!(
            DatabaseType::SqlServer.dialect().string_concat("a", "b"),
            "a + b"
        );
    }

    #[test]
    fn limit_clause_per_dialect() {
        assert_eq!(DatabaseType::Sqlite.dialect().limit_clause("10", None), "LIMIT 10");
        assert_eq!(
            DatabaseType::Oracle.dialect().limit_clause("10", None),
            "FETCH FIRST 10 ROWS ONLY"
        );
        assert_eq!(
            DatabaseType::SqlServer.dialect().limit_clause("10", Some("20")),
            "OFFSET 20 ROWS FETCH FIRST 10 ROWS ONLY"
        );
    }

    #[test]
    fn dialect_instances_are_stable_identities() {
        let a = DatabaseType::Sqlite.dialect();
        let b = DatabaseType::Sqlite.dialect();
        assert!(std::ptr::eq(a, b));
    }
}
