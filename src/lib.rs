//! # sqltmpl
//!
//! A dialect-agnostic SQL template engine. Compiles a `{{…}}`
//! placeholder-rich template string into a concrete SQL statement for one
//! of six relational dialects, through three coupled subsystems: a
//! placeholder resolver, a per-dialect quoting/function policy, and an
//! expression translator for typed predicates and update projections.
//!
//! ## Usage Example
//!
//! ```rust
//! use sqltmpl::{prepare, ColumnMeta, DatabaseType, DbType, PlaceholderContext};
//!
//! let columns = vec![
//!     ColumnMeta::new("id", "Id", DbType::Int64, false),
//!     ColumnMeta::new("name", "Name", DbType::String, false),
//! ];
//! let context = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", columns);
//!
//! let template = prepare(
//!     "SELECT {{columns}} FROM {{table}} WHERE id = {{arg --param id}}",
//!     &context,
//! )
//! .unwrap();
//!
//! assert_eq!(template.sql, "SELECT [id], [name] FROM [users] WHERE id = @id");
//! ```

pub mod column;
pub mod context;
pub mod convert;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod injection_guard;
pub mod name_mapper;
pub mod parameters;
pub mod template;
pub mod value;

pub use column::ColumnMeta;
pub use context::PlaceholderContext;
pub use dialect::{CanonicalFunction, DatabaseType, SqlDialect};
pub use error::{
    ArgumentError, BindingError, ConversionError, EngineError, ParseError, SecurityError,
    TranslationError,
};
pub use expr::{translate, Expr, ExpressionBlockResult};
pub use template::{Sentinel, Template};
pub use value::{DbType, Guid, Value};

use std::collections::HashMap;

/// Compiles `template` against `context`, resolving every static
/// directive immediately and deferring dynamic ones to [`render`].
pub fn prepare(template: &str, context: &PlaceholderContext) -> Result<Template, ParseError> {
    template::prepare(template, context)
}

/// Resolves every remaining dynamic directive in `template` against
/// `parameters`, then runs the final SQL through the injection guard
/// ([`injection_guard::check`]), per spec §2's pipeline: tokens -> handler
/// outputs -> concatenated SQL -> optional dynamic render -> injection
/// scan -> final SQL. Returns [`EngineError::Security`] when the guard
/// rejects the result.
pub fn render(
    template: &Template,
    parameters: &HashMap<String, Option<Value>>,
) -> Result<String, EngineError> {
    template::render_checked(template, parameters)
}

/// Resolves `template` exactly like [`render`] but skips the injection
/// guard, for callers who scan the statement some other way.
pub fn render_unchecked(
    template: &Template,
    parameters: &HashMap<String, Option<Value>>,
) -> Result<String, BindingError> {
    template::render(template, parameters)
}

/// Scans a raw SQL string for parameter markers of `dialect`'s style.
pub fn extract_parameters(sql: &str, dialect: &SqlDialect) -> std::collections::HashSet<String> {
    parameters::extract_parameters(sql, dialect)
}

/// Cheaply checks whether a raw template string *could* require `render`
/// once prepared — a pre-check; [`prepare`] remains authoritative.
pub fn contains_dynamic(template: &str) -> bool {
    template::contains_dynamic(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_prepare_and_render_round_trip() {
        let columns = vec![ColumnMeta::new("id", "Id", DbType::Int64, false)];
        let context = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", columns);
        let template = prepare("SELECT {{table}} WHERE id IN {{in --param ids}}", &context).unwrap();

        let mut params = HashMap::new();
        params.insert(
            "ids".to_string(),
            Some(Value::List(vec![Value::I64(1), Value::I64(2)])),
        );
        let sql = render(&template, &params).unwrap();
        assert_eq!(sql, "[users] WHERE id IN (@ids_0, @ids_1)");
    }

    #[test]
    fn render_rejects_sql_with_disallowed_keyword() {
        let context = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", vec![]);
        let template = prepare("DROP TABLE {{table}}", &context).unwrap();
        let params = HashMap::new();
        let err = render(&template, &params).unwrap_err();
        assert!(matches!(err, EngineError::Security(_)));
    }

    #[test]
    fn render_unchecked_skips_the_injection_guard() {
        let context = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", vec![]);
        let template = prepare("DROP TABLE {{table}}", &context).unwrap();
        let params = HashMap::new();
        assert_eq!(render_unchecked(&template, &params).unwrap(), "DROP TABLE [users]");
    }

    #[test]
    fn contains_dynamic_matches_prepare_outcome() {
        let context = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", vec![]);
        assert!(!contains_dynamic("{{table}}"));
        assert!(contains_dynamic("{{in --param ids}}"));

        let static_tpl = prepare("{{table}}", &context).unwrap();
        assert!(!static_tpl.has_dynamic_placeholders);
        let dynamic_tpl = prepare("{{table}} WHERE id IN {{in --param ids}}", &context).unwrap();
        assert!(dynamic_tpl.has_dynamic_placeholders);
    }
}
