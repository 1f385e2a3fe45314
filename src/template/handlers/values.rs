use super::{filtered_columns, Handler, HandlerKind};
use crate::context::PlaceholderContext;
use crate::error::{BindingError, BindingResult, ParseResult};
use crate::template::options::OptionString;
use crate::value::Value;
use std::collections::HashMap;

pub struct ValuesHandler;

impl Handler for ValuesHandler {
    fn name(&self) -> &'static str {
        "values"
    }

    fn classify(&self, options: &OptionString) -> HandlerKind {
        if options.get("param").is_some() {
            HandlerKind::Dynamic
        } else {
            HandlerKind::Static
        }
    }

    fn process(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
    ) -> ParseResult<(String, Vec<String>)> {
        let columns = filtered_columns(context, options);
        let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
        let sql = names
            .iter()
            .map(|name| context.dialect.parameter_marker(name))
            .collect::<Vec<_>>()
            .join(", ");
        Ok((sql, names))
    }

    fn render(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
        parameters: &HashMap<String, Option<Value>>,
    ) -> BindingResult<(String, Vec<String>)> {
        let name = options.get("param").ok_or_else(|| BindingError::MissingParameter {
            directive: "values".to_string(),
            name: "param".to_string(),
        })?;

        let value = parameters.get(name).cloned().flatten().unwrap_or(Value::Null);

        let sql = match value {
            Value::Null => "NULL".to_string(),
            Value::List(items) if items.is_empty() => "NULL".to_string(),
            Value::List(items) => (0..items.len())
                .map(|i| context.dialect.parameter_marker(&format!("{name}{i}")))
                .collect::<Vec<_>>()
                .join(", "),
            _ => context.dialect.parameter_marker(name),
        };

        Ok((sql, vec![name.to_string()]))
    }
}
