//! Post-render injection scanner.
//!
//! Grounded on the pack's `samurmaykrr-zqlz` parameter extractor: mask
//! string literals and comments first with a regex, then pattern-match on
//! the masked text so quoted SQL keywords never trigger a false positive.
//! The guard is conservative by design — false positives are preferable to
//! false negatives (spec §4.6).

use crate::error::{SecurityError, SecurityResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref STRING_OR_COMMENT: Regex =
        Regex::new(r"'(?:[^'\\]|\\.)*'|--[^\n]*|/\*[\s\S]*?\*/").expect("valid regex");
    static ref DISALLOWED_KEYWORD: Regex =
        Regex::new(r"(?i)\b(UNION|DROP|EXEC|EXECUTE)\b").expect("valid regex");
}

/// Replaces every string literal and comment with a run of `#` of the same
/// byte length, so keyword/terminator scans never look inside one.
fn mask(sql: &str) -> String {
    let mut masked = sql.to_string();
    for m in STRING_OR_COMMENT.find_iter(sql).collect::<Vec<_>>().into_iter().rev() {
        let replacement: String = std::iter::repeat('#').take(m.as_str().len()).collect();
        masked.replace_range(m.start()..m.end(), &replacement);
    }
    masked
}

/// Runs the injection guard over a fully rendered SQL statement, the only
/// argument it needs — directive option bodies have already been
/// substituted away by the time this runs, so `--` inside an option (e.g.
/// `orderby --desc`) never reaches this scanner as raw text (spec §4.2,
/// §9: "implementers must keep that filtering step honest").
pub fn check(sql: &str) -> SecurityResult<()> {
    let masked = mask(sql);

    if let Some(m) = DISALLOWED_KEYWORD.find(&masked) {
        return Err(SecurityError::DisallowedKeyword {
            keyword: masked[m.start()..m.end()].to_string(),
        });
    }

    check_unbalanced_quotes(sql)?;
    check_statement_terminators(&masked)?;
    check_stray_comments(&masked, sql)?;

    Ok(())
}

fn check_unbalanced_quotes(sql: &str) -> SecurityResult<()> {
    let mut in_string = false;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' {
            if in_string && chars.peek() == Some(&'\'') {
                chars.next();
                continue;
            }
            in_string = !in_string;
        }
    }
    if in_string {
        return Err(SecurityError::UnbalancedQuotes);
    }
    Ok(())
}

fn check_statement_terminators(masked: &str) -> SecurityResult<()> {
    let trimmed = masked.trim_end();
    for (i, c) in masked.char_indices() {
        let is_final_char = i + c.len_utf8() == trimmed.len();
        if c == ';' && !is_final_char {
            return Err(SecurityError::MultipleStatements { position: i });
        }
    }
    Ok(())
}

fn check_stray_comments(masked: &str, _original: &str) -> SecurityResult<()> {
    if masked.contains("--") || masked.contains("/*") {
        let marker = if masked.contains("--") { "--" } else { "/*" };
        return Err(SecurityError::UnexpectedComment {
            marker: marker.to_string(),
        });
    }
    Ok(())
}
