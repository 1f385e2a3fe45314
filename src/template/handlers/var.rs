use super::{static_only_render, Handler, HandlerKind};
use crate::context::PlaceholderContext;
use crate::error::{BindingError, BindingResult, ParseError, ParseResult};
use crate::template::options::OptionString;
use crate::value::Value;
use std::collections::HashMap;

pub struct VarHandler;

impl Handler for VarHandler {
    fn name(&self) -> &'static str {
        "var"
    }

    fn classify(&self, _options: &OptionString) -> HandlerKind {
        // "dynamic at prepare" per spec §4.3: it consults var_provider, but
        // that happens during `prepare`, not `render` — from the engine's
        // two-phase perspective it is Static.
        HandlerKind::Static
    }

    fn process(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
    ) -> ParseResult<(String, Vec<String>)> {
        let name = options.get("name").ok_or_else(|| ParseError::MissingOption {
            directive_text: "var".to_string(),
            option: "name".to_string(),
            position: 0,
        })?;
        let text = context.resolve_var(name)?;
        Ok((text, Vec::new()))
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

    #[test]
    fn inlines_provider_result_verbatim() {
        let ctx = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", vec![])
            .with_var_provider(Box::new(|name| Ok(format!("/* {name} */"))));
        let (sql, params) = VarHandler.process(&ctx, &OptionString::parse("--name tenant")).unwrap();
        assert_eq!(sql, "/* tenant */");
        assert!(params.is_empty());
    }

    #[test]
    fn missing_provider_is_hard_error() {
        let ctx = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", vec![]);
        let err = VarHandler.process(&ctx, &OptionString::parse("--name tenant")).unwrap_err();
        assert!(matches!(err, ParseError::Binding(_)));
    }

    #[test]
    fn provider_rejecting_an_unknown_name_propagates_as_parse_error() {
        let ctx = PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", vec![]).with_var_provider(
            Box::new(|name| {
                Err(BindingError::UnknownVariable {
                    name: name.to_string(),
                })
            }),
        );
        let err = VarHandler.process(&ctx, &OptionString::parse("--name tenant")).unwrap_err();
        assert_eq!(
            err,
            ParseError::Binding(BindingError::UnknownVariable {
                name: "tenant".to_string()
            })
        );
    }
}
