//! Directive handler registry.
//!
//! Each handler is a small struct implementing [`Handler`] — the "tagged
//! variant plus small trait" shape spec §9 calls for rather than an
//! inheritance hierarchy. A handler returns the resolved text *and* the
//! list of parameter names it introduced, so [`crate::template::Template`]
//! can build `parameter_order` without a second pass over the SQL.

mod arg;
mod columns;
mod in_;
mod limit;
mod orderby;
mod set;
mod table;
mod values;
mod var;

use crate::context::PlaceholderContext;
use crate::error::{BindingResult, ParseResult};
use crate::template::options::OptionString;
use crate::value::Value;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Whether a handler, given its options, resolves fully during `prepare`
/// or must defer to `render`. Some handlers (`values`, `limit`) decide this
/// per invocation based on whether `--param` was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Static,
    Dynamic,
}

pub trait Handler: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, options: &OptionString) -> HandlerKind;

    /// Resolves a static invocation, returning the SQL text and the
    /// parameter names it introduced (driver-bound, in emission order).
    fn process(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
    ) -> ParseResult<(String, Vec<String>)>;

    /// Resolves a dynamic invocation at render time.
    fn render(
        &self,
        context: &PlaceholderContext,
        options: &OptionString,
        parameters: &HashMap<String, Option<Value>>,
    ) -> BindingResult<(String, Vec<String>)>;
}

fn build_registry() -> HashMap<&'static str, Box<dyn Handler>> {
    let handlers: Vec<Box<dyn Handler>> = vec![
        Box::new(table::TableHandler),
        Box::new(columns::ColumnsHandler),
        Box::new(values::ValuesHandler),
        Box::new(set::SetHandler),
        Box::new(in_::InHandler),
        Box::new(limit::LimitHandler),
        Box::new(orderby::OrderByHandler),
        Box::new(arg::ArgHandler),
        Box::new(var::VarHandler),
    ];
    handlers.into_iter().map(|h| (h.name(), h)).collect()
}

lazy_static! {
    /// The closed set of directive handlers named by spec §4.3 — `table`,
    /// `columns`, `values`, `set`, `in`, `limit`, `orderby`, `arg`, `var`.
    /// `if`/`/if` is a block construct handled directly by
    /// [`crate::template`], not a registry entry.
    pub static ref REGISTRY: HashMap<&'static str, Box<dyn Handler>> = build_registry();
}

/// Shared `--exclude` filtering: returns the columns from `context` whose
/// `property_name` is not in the exclude set, preserving `context.columns`
/// order (spec invariant: "column metadata ordering is preserved").
pub(crate) fn filtered_columns<'a>(
    context: &'a PlaceholderContext,
    options: &OptionString,
) -> Vec<&'a crate::column::ColumnMeta> {
    let excluded = options.get_all_comma_split("exclude");
    context
        .columns
        .iter()
        .filter(|c| !excluded.iter().any(|e| e == &c.property_name))
        .collect()
}

/// A handler invoked statically but asked to render, or vice versa, is a
/// programming error in the dispatch table, not a runtime condition — these
/// helpers make the mismatch panic loudly instead of returning a
/// misleading error.
pub(crate) fn static_only_render(name: &'static str) -> ! {
    unreachable!("handler '{name}' is never dynamic; render() should not be called");
}

pub(crate) fn dynamic_only_process(name: &'static str) -> ! {
    unreachable!("handler '{name}' is never static; process() should not be called");
}
