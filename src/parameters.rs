//! Parameter extraction utility (spec §4.9).
//!
//! Grounded directly on the pack's `samurmaykrr-zqlz` `parameters/extractor.rs`:
//! one regex per marker style, string/comment masking before scanning, and
//! a dedup pass that preserves first-occurrence order.

use crate::dialect::SqlDialect;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref STRING_OR_COMMENT: Regex =
        Regex::new(r"'(?:[^'\\]|\\.)*'|--[^\n]*|/\*[\s\S]*?\*/").expect("valid regex");
    static ref AT_NAMED: Regex = Regex::new(r"@([a-zA-Z_][a-zA-Z0-9_]*)").expect("valid regex");
    static ref DOLLAR_NAMED: Regex = Regex::new(r"\$([a-zA-Z_][a-zA-Z0-9_]*)").expect("valid regex");
    static ref COLON_NAMED: Regex = Regex::new(r":([a-zA-Z_][a-zA-Z0-9_]*)").expect("valid regex");
    static ref QUESTION_NAMED: Regex = Regex::new(r"\?([a-zA-Z_][a-zA-Z0-9_]*)").expect("valid regex");
}

fn pattern_for(prefix: char) -> &'static Regex {
    match prefix {
        '@' => &AT_NAMED,
        '$' => &DOLLAR_NAMED,
        ':' => &COLON_NAMED,
        '?' => &QUESTION_NAMED,
        _ => &AT_NAMED,
    }
}

fn mask(sql: &str) -> String {
    let mut masked = sql.to_string();
    for m in STRING_OR_COMMENT.find_iter(sql).collect::<Vec<_>>().into_iter().rev() {
        let replacement: String = std::iter::repeat('#').take(m.as_str().len()).collect();
        masked.replace_range(m.start()..m.end(), &replacement);
    }
    masked
}

/// Scans `sql` for parameter markers of `dialect`'s style, ignoring
/// anything inside string literals or comments.
pub fn extract_parameters(sql: &str, dialect: &SqlDialect) -> HashSet<String> {
    let masked = mask(sql);
    pattern_for(dialect.parameter_prefix)
        .captures_iter(&masked)
        .map(|c| c[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DatabaseType;

    #[test]
    fn extracts_named_parameters_per_dialect() {
        let params = extract_parameters("SELECT * FROM users WHERE id = @id AND name = @name", DatabaseType::Sqlite.dialect());
        assert_eq!(params, ["id", "name"].into_iter().map(String::from).collect());
    }

    #[test]
    fn ignores_markers_inside_string_literals() {
        let params = extract_parameters("SELECT '@notaparam' AS note WHERE id = @id", DatabaseType::Sqlite.dialect());
        assert_eq!(params, ["id"].into_iter().map(String::from).collect());
    }

    #[test]
    fn postgres_uses_dollar_prefix() {
        let params = extract_parameters("SELECT * FROM users WHERE id = $id", DatabaseType::PostgreSql.dialect());
        assert_eq!(params, ["id"].into_iter().map(String::from).collect());
    }
}
