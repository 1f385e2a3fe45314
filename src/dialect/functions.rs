//! Canonical function names and their per-dialect translations.
//!
//! Grounded on the teacher's `translate_common_function` (one big match over
//! a function name string per dialect); here the match key is a closed enum
//! instead of a string, so an unrecognized canonical function is a compile
//! error rather than a silent no-op.

use super::DatabaseType;
use std::collections::HashMap;

/// The function surface the expression translator can emit, independent of
/// any one dialect's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalFunction {
    Substring,
    Length,
    ToUpper,
    ToLower,
    Trim,
    Replace,
    Abs,
    Round,
    Ceiling,
    Floor,
    Sqrt,
    Power,
    /// String concatenation as an explicit function call; most dialects
    /// route this through [`ConcatStyle`] instead, but the enum variant
    /// exists for parity with the dialect function map spec §4.1 names.
    Concat,
    /// `Max`/`Greatest` — the two-or-more-argument greatest-of variant,
    /// distinct from a single-column `MAX(...)` aggregate.
    Greatest,
    /// Current-timestamp, usually rendered via [`super::SqlDialect::now_expression`]
    /// rather than this map, but named here for completeness of the
    /// canonical function set.
    Now,
}

impl CanonicalFunction {
    /// The name used when a dialect has no override: the canonical variant
    /// name, uppercased.
    pub fn fallback_name(self) -> &'static str {
        match self {
            CanonicalFunction::Substring => "SUBSTRING",
            CanonicalFunction::Length => "LENGTH",
            CanonicalFunction::ToUpper => "UPPER",
            CanonicalFunction::ToLower => "LOWER",
            CanonicalFunction::Trim => "TRIM",
            CanonicalFunction::Replace => "REPLACE",
            CanonicalFunction::Abs => "ABS",
            CanonicalFunction::Round => "ROUND",
            CanonicalFunction::Ceiling => "CEILING",
            CanonicalFunction::Floor => "FLOOR",
            CanonicalFunction::Sqrt => "SQRT",
            CanonicalFunction::Power => "POWER",
            CanonicalFunction::Concat => "CONCAT",
            CanonicalFunction::Greatest => "GREATEST",
            CanonicalFunction::Now => "NOW",
        }
    }
}

/// How a dialect spells string concatenation: an infix operator or a
/// variadic function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcatStyle {
    Operator(&'static str),
    Function(&'static str),
}

pub fn concat_style(database_type: DatabaseType) -> ConcatStyle {
    match database_type {
        DatabaseType::SqlServer => ConcatStyle::Operator("+"),
        DatabaseType::MySql => ConcatStyle::Function("CONCAT"),
        _ => ConcatStyle::Operator("||"),
    }
}

/// Builds the override table for one dialect; entries absent here fall back
/// to [`CanonicalFunction::fallback_name`].
pub fn function_map(database_type: DatabaseType) -> HashMap<CanonicalFunction, &'static str> {
    use CanonicalFunction::*;

    let mut map = HashMap::new();
    match database_type {
        DatabaseType::Sqlite => {
            map.insert(Substring, "SUBSTR");
            map.insert(Ceiling, "CEIL");
        }
        DatabaseType::MySql => {
            map.insert(Substring, "SUBSTRING");
            map.insert(Power, "POW");
        }
        DatabaseType::PostgreSql => {
            map.insert(Substring, "SUBSTR");
        }
        DatabaseType::SqlServer => {
            map.insert(Substring, "SUBSTRING");
            map.insert(Length, "LEN");
            map.insert(Ceiling, "CEILING");
        }
        DatabaseType::Oracle => {
            map.insert(Substring, "SUBSTR");
            map.insert(Greatest, "GREATEST");
        }
        DatabaseType::Db2 => {
            map.insert(Substring, "SUBSTR");
            map.insert(Ceiling, "CEIL");
        }
    }
    map
}
