use super::{dynamic_only_process, Handler, HandlerKind};
use crate::context::PlaceholderContext;
use crate::error::{BindingError, BindingResult, ParseResult};
use crate::template::options::OptionString;
use crate::value::Value;
use std::collections::HashMap;

pub struct InHandler;

impl Handler for InHandler {
    fn name(&self) -> &'static str {
        "in"
    }

    fn classify(&self, _options: &OptionString) -> HandlerKind {
        HandlerKind::Dynamic
    }

    fn process(
        &self,
        _context: &PlaceholderContext,
        _options: &OptionString,
    ) -> ParseResult<(String, Vec<String>)> {
        dynamic_only_process(self.name())
    }

    fn render(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
        parameters: &HashMap<String, Option<Value>>,
    ) -> BindingResult<(String, Vec<String>)> {
        let name = options.get("param").ok_or_else(|| BindingError::MissingParameter {
            directive: "in".to_string(),
            name: "param".to_string(),
        })?;

        let value = parameters.get(name).cloned().flatten().unwrap_or(Value::Null);

        let sql = match value {
            Value::Null => "(NULL)".to_string(),
            Value::List(items) if items.is_empty() => "(NULL)".to_string(),
            Value::List(items) => {
                let markers: Vec<String> = (0..items.len())
                    .map(|i| context.dialect.parameter_marker(&format!("{name}_{i}")))
                    .collect();
                format!("({})", markers.join(", "))
            }
            _ => format!("({})", context.dialect.parameter_marker(&format!("{name}_0"))),
        };

        Ok((sql, vec![name.to_string()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DatabaseType;

    fn ctx() -> PlaceholderContext<'static> {
        PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", vec![])
    }

    #[test]
    fn empty_or_null_collection_is_in_null() {
        let mut params = HashMap::new();
        params.insert("ids".to_string(), Some(Value::List(vec![])));
        let (sql, _) = InHandler.render(&ctx(), &OptionString::parse("--param ids"), &params).unwrap();
        assert_eq!(sql, "(NULL)");

        let params2 = HashMap::new();
        let (sql2, _) = InHandler.render(&ctx(), &OptionString::parse("--param ids"), &params2).unwrap();
        assert_eq!(sql2, "(NULL)");
    }

    #[test]
    fn three_items_expand_with_contiguous_suffixes() {
        let mut params = HashMap::new();
        params.insert(
            "ids".to_string(),
            Some(Value::List(vec![Value::I64(1), Value::I64(2), Value::I64(3)])),
        );
        let (sql, _) = InHandler.render(&ctx(), &OptionString::parse("--param ids"), &params).unwrap();
        assert_eq!(sql, "(@ids_0, @ids_1, @ids_2)");
    }

    #[test]
    fn missing_param_option_is_binding_error() {
        let params = HashMap::new();
        let err = InHandler.render(&ctx(), &OptionString::parse(""), &params).unwrap_err();
        assert_eq!(
            err,
            BindingError::MissingParameter {
                directive: "in".to_string(),
                name: "param".to_string()
            }
        );
    }
}
