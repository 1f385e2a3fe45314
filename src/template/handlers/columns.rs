use super::{filtered_columns, static_only_render, Handler, HandlerKind};
use crate::context::PlaceholderContext;
use crate::error::{BindingResult, ParseResult};
use crate::template::options::OptionString;
use crate::value::Value;
use std::collections::HashMap;

pub struct ColumnsHandler;

impl Handler for ColumnsHandler {
    fn name(&self) -> &'static str {
        "columns"
    }

    fn classify(&self, _options: &OptionString) -> HandlerKind {
        HandlerKind::Static
    }

    fn process(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
    ) -> ParseResult<(String, Vec<String>)> {
        let columns = filtered_columns(context, options);
        let sql = columns
            .iter()
            .map(|c| context.dialect.wrap_identifier(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnMeta;
    use crate::dialect::DatabaseType;
    use crate::value::DbType;

    #[test]
    fn empty_columns_emits_empty_string() {
        let ctx = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", vec![]);
        let (sql, _) = ColumnsHandler.process(&ctx, &OptionString::parse("")).unwrap();
        assert_eq!(sql, "");
    }

    #[test]
    fn exclude_filters_by_property_name() {
        let columns = vec![
            ColumnMeta::new("id", "Id", DbType::Int64, false),
            ColumnMeta::new("name", "Name", DbType::String, false),
        ];
        let ctx = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", columns);
        let (sql, _) = ColumnsHandler
            .process(&ctx, &OptionString::parse("--exclude Id"))
            .unwrap();
        assert_eq!(sql, "[name]");
    }
}
