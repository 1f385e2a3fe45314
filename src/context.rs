//! Per-`prepare` call context.
//!
//! One [`PlaceholderContext`] is built per `prepare` call and is immutable
//! thereafter — no handler, static or dynamic, ever mutates it. Mirrors the
//! teacher's practice of threading a single read-only options/config value
//! through a pipeline rather than reaching for global state.

use crate::column::ColumnMeta;
use crate::dialect::SqlDialect;
use crate::error::BindingError;

/// Resolves a `{{var --name IDENT}}` directive to the literal text that
/// replaces it, verbatim, during `prepare`.
///
/// spec.md describes this as a `(instance, variable_name) -> string`
/// callback with an opaque `instance` handed back unchanged; the idiomatic
/// Rust rendering folds `instance` into the closure's capture rather than
/// threading an `&dyn Any` through the call (see DESIGN.md).
///
/// A provider should return [`BindingError::UnknownVariable`] for a name it
/// doesn't recognize, rather than panicking or inventing a value.
pub type VarProvider<'a> = Box<dyn Fn(&str) -> Result<String, BindingError> + 'a>;

/// Everything a `prepare` call needs to resolve directives against one
/// table: which dialect to emit SQL for, the table's name, its columns,
/// and (optionally) a way to resolve `{{var}}` directives.
pub struct PlaceholderContext<'a> {
    pub dialect: &'static SqlDialect,
    pub table_name: String,
    pub columns: Vec<ColumnMeta>,
    pub var_provider: Option<VarProvider<'a>>,
}

impl<'a> PlaceholderContext<'a> {
    pub fn new(dialect: &'static SqlDialect, table_name: impl Into<String>, columns: Vec<ColumnMeta>) -> Self {
        Self {
            dialect,
            table_name: table_name.into(),
            columns,
            var_provider: None,
        }
    }

    pub fn with_var_provider(mut self, provider: VarProvider<'a>) -> Self {
        self.var_provider = Some(provider);
        self
    }

    /// Looks up a column by its emitted SQL name.
    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Looks up a column by its source-side property name, case-sensitive,
    /// as `--exclude`/`--inline` require.
    pub fn column_by_property(&self, property_name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.property_name == property_name)
    }

    /// Resolves a `{{var}}` directive's name via `var_provider`, producing
    /// [`BindingError::NoVarProvider`] when none was configured.
    pub fn resolve_var(&self, name: &str) -> Result<String, BindingError> {
        match &self.var_provider {
            Some(provider) => provider(name),
            None => Err(BindingError::NoVarProvider {
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DatabaseType;
    use crate::value::DbType;

    fn sample_columns() -> Vec<ColumnMeta> {
        vec![
            ColumnMeta::new("id", "Id", DbType::Int64, false),
            ColumnMeta::new("first_name", "FirstName", DbType::String, true),
        ]
    }

    #[test]
    fn column_lookup_by_name_and_property() {
        let ctx = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", sample_columns());
        assert_eq!(ctx.column("id").unwrap().property_name, "Id");
        assert_eq!(ctx.column_by_property("FirstName").unwrap().name, "first_name");
        assert!(ctx.column("missing").is_none());
    }

    #[test]
    fn resolve_var_without_provider_is_binding_error() {
        let ctx = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", sample_columns());
        let err = ctx.resolve_var("tenant").unwrap_err();
        assert_eq!(
            err,
            BindingError::NoVarProvider {
                name: "tenant".to_string()
            }
        );
    }

    #[test]
    fn resolve_var_with_provider() {
        let ctx = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", sample_columns())
            .with_var_provider(Box::new(|name| Ok(format!("'{name}'"))));
        assert_eq!(ctx.resolve_var("tenant").unwrap(), "'tenant'");
    }
}
