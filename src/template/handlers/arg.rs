use super::{static_only_render, Handler, HandlerKind};
use crate::context::PlaceholderContext;
use crate::error::{BindingError, BindingResult, ParseResult};
use crate::template::options::OptionString;
use crate::value::Value;
use std::collections::HashMap;

pub struct ArgHandler;

impl Handler for ArgHandler {
    fn name(&self) -> &'static str {
        "arg"
    }

    fn classify(&self, _options: &OptionString) -> HandlerKind {
        HandlerKind::Static
    }

    fn process(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
    ) -> ParseResult<(String, Vec<String>)> {
        let param = options.get("param").ok_or(crate::error::ParseError::Binding(
            BindingError::ArgMissingParam { position: 0 },
        ))?;
        let alias = options.get("name").unwrap_or(param);
        Ok((context.dialect.parameter_marker(alias), vec![param.to_string()]))
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
    use crate::dialect::DatabaseType;

    fn ctx() -> PlaceholderContext<'static> {
        PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", vec![])
    }

    #[test]
    fn emits_marker_for_param() {
        let (sql, params) = ArgHandler.process(&ctx(), &OptionString::parse("--param id")).unwrap();
        assert_eq!(sql, "@id");
        assert_eq!(params, vec!["id".to_string()]);
    }

    #[test]
    fn name_alias_renames_marker_but_binds_original_param() {
        let (sql, params) = ArgHandler
            .process(&ctx(), &OptionString::parse("--param userId --name uid"))
            .unwrap();
        assert_eq!(sql, "@uid");
        assert_eq!(params, vec!["userId".to_string()]);
    }

    #[test]
    fn missing_param_is_hard_error() {
        let err = ArgHandler.process(&ctx(), &OptionString::parse("")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ParseError::Binding(BindingError::ArgMissingParam { .. })
        ));
    }
}
