use super::Handler;
use crate::context::PlaceholderContext;
use crate::error::{BindingError, BindingResult, ParseError, ParseResult};
use crate::template::handlers::HandlerKind;
use crate::template::options::OptionString;
use crate::value::Value;
use std::collections::HashMap;

pub struct LimitHandler;

impl Handler for LimitHandler {
    fn name(&self) -> &'static str {
        "limit"
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
        let count = options.get("count").ok_or_else(|| ParseError::MissingOption {
            directive_text: "limit".to_string(),
            option: "count".to_string(),
            position: 0,
        })?;
        let offset = options.get("offset");
        Ok((context.dialect.limit_clause(count, offset), Vec::new()))
    }

    fn render(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
        parameters: &HashMap<String, Option<Value>>,
    ) -> BindingResult<(String, Vec<String>)> {
        let name = options.get("param").ok_or_else(|| BindingError::MissingParameter {
            directive: "limit".to_string(),
            name: "param".to_string(),
        })?;

        if !parameters.contains_key(name) {
            return Err(BindingError::MissingParameter {
                directive: "limit".to_string(),
                name: name.to_string(),
            });
        }

        let marker = context.dialect.parameter_marker(name);
        let offset = options.get("offset");
        Ok((context.dialect.limit_clause(&marker, offset), vec![name.to_string()]))
    }
}
