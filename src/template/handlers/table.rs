use super::{static_only_render, Handler, HandlerKind};
use crate::context::PlaceholderContext;
use crate::error::{BindingResult, ParseResult};
use crate::template::options::OptionString;
use crate::value::Value;
use std::collections::HashMap;

pub struct TableHandler;

impl Handler for TableHandler {
    fn name(&self) -> &'static str {
        "table"
    }

    fn classify(&self, _options: &OptionString) -> HandlerKind {
        HandlerKind::Static
    }

    fn process(
        &self,
        context: &PlaceholderContext,
        _options: &OptionString,
    ) -> ParseResult<(String, Vec<String>)> {
        Ok((context.dialect.wrap_identifier(&context.table_name), Vec::new()))
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
