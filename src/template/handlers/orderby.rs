use super::{static_only_render, Handler, HandlerKind};
use crate::context::PlaceholderContext;
use crate::error::{BindingResult, ParseError, ParseResult};
use crate::template::options::OptionString;
use crate::value::Value;
use std::collections::HashMap;

pub struct OrderByHandler;

impl Handler for OrderByHandler {
    fn name(&self) -> &'static str {
        "orderby"
    }

    fn classify(&self, _options: &OptionString) -> HandlerKind {
        HandlerKind::Static
    }

    fn process(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
    ) -> ParseResult<(String, Vec<String>)> {
        let column = options.positional.first().ok_or_else(|| ParseError::MissingOption {
            directive_text: "orderby".to_string(),
            option: "<column>".to_string(),
            position: 0,
        })?;

        let mut sql = format!("ORDER BY {}", context.dialect.wrap_identifier(column));
        if options.has("desc") {
            sql.push_str(" DESC");
        } else if options.has("asc") {
            sql.push_str(" ASC");
        }
        Ok((sql, Vec::new()))
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
