use super::{filtered_columns, static_only_render, Handler, HandlerKind};
use crate::context::PlaceholderContext;
use crate::error::{BindingResult, ParseResult};
use crate::template::options::OptionString;
use crate::value::Value;
use std::collections::HashMap;

pub struct SetHandler;

impl Handler for SetHandler {
    fn name(&self) -> &'static str {
        "set"
    }

    fn classify(&self, _options: &OptionString) -> HandlerKind {
        HandlerKind::Static
    }

    fn process(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
    ) -> ParseResult<(String, Vec<String>)> {
        let inline: Vec<(String, String)> = options.get_all_key_value("inline");
        let columns = filtered_columns(context, options);

        let mut parameters = Vec::new();
        let pairs: Vec<String> = columns
            .iter()
            .map(|c| {
                match inline.iter().find(|(k, _)| k == &c.property_name) {
                    Some((_, expr)) => {
                        let wrapped_expr = wrap_identifiers_in_expr(expr, context);
                        format!("{} = {}", context.dialect.wrap_identifier(&c.name), wrapped_expr)
                    }
                    None => {
                        parameters.push(c.name.clone());
                        format!(
                            "{} = {}",
                            context.dialect.wrap_identifier(&c.name),
                            context.dialect.parameter_marker(&c.name)
                        )
                    }
                }
            })
            .collect();

        Ok((pairs.join(", "), parameters))
    }

    fn render(
        &self,
        _context: &PlaceholderContext,
        _options: &OptionString,
        _parameters: &HashMap<String, Option<Value>>,
    ) -> BindingResult<(String, Vec<String>)> {
        static_only_render(self.name())
    }
}

/// Wraps any identifier run in `expr` that matches a known column's
/// `property_name`, leaving everything else (operators, numbers, literal
/// text) untouched.
fn wrap_identifiers_in_expr(expr: &str, context: &PlaceholderContext) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut token = String::new();

    let flush = |token: &mut String, out: &mut String| {
        if token.is_empty() {
            return;
        }
        match context.columns.iter().find(|c| &c.property_name == token) {
            Some(col) => out.push_str(&context.dialect.wrap_identifier(&col.name)),
            None => out.push_str(token),
        }
        token.clear();
    };

    for ch in expr.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            token.push(ch);
        } else {
            flush(&mut token, &mut out);
            out.push(ch);
        }
    }
    flush(&mut token, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnMeta;
    use crate::dialect::DatabaseType;
    use crate::value::DbType;

    #[test]
    fn inline_override_wraps_identifiers_in_expr() {
        let columns = vec![
            ColumnMeta::new("id", "Id", DbType::Int64, false),
            ColumnMeta::new("name", "Name", DbType::String, false),
            ColumnMeta::new("version", "Version", DbType::Int32, false),
        ];
        let ctx = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", columns);
        let (sql, _) = SetHandler
            .process(
                &ctx,
                &OptionString::parse("--exclude Id --inline Version=Version+1"),
            )
            .unwrap();
        assert_eq!(sql, "[name] = @name, [version] = [version]+1");
    }
}
