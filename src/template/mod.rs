//! Two-phase template compilation.
//!
//! `prepare` walks the directive list exactly once: static handlers resolve
//! immediately, dynamic ones are replaced with [`Sentinel`]s carrying their
//! original option string. `render` walks only the sentinel positions.
//! Mirrors the teacher's `Transpiler::transpile` single-pass-then-assemble
//! shape, split across two calls instead of one.

pub mod conditions;
pub mod handlers;
pub mod options;
pub mod scanner;

use crate::context::PlaceholderContext;
use crate::dialect::SqlDialect;
use crate::error::{BindingError, BindingResult, EngineResult, ParseError, ParseResult};
use crate::value::Value;
use conditions::Condition;
use options::OptionString;
use scanner::RawToken;
use std::collections::HashMap;

/// A deferred directive invocation, carrying what `render` needs to
/// re-invoke the correct handler.
#[derive(Debug, Clone)]
pub struct Sentinel {
    pub handler_name: String,
    pub options: OptionString,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Dynamic(Sentinel),
    If { condition: Condition, body: Vec<Segment> },
}

fn segments_have_dynamic_content(segments: &[Segment]) -> bool {
    segments.iter().any(|s| match s {
        Segment::Literal(_) => false,
        Segment::Dynamic(_) => true,
        Segment::If { .. } => true,
    })
}

fn preview(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Dynamic(sentinel) => {
                out.push_str(&format!("{{{{{}}}}}", sentinel.handler_name))
            }
            Segment::If { body, .. } => {
                out.push_str("{{if}}");
                out.push_str(&preview(body));
                out.push_str("{{/if}}");
            }
        }
    }
    out
}

/// The result of `prepare`: either fully resolved SQL (`has_dynamic_placeholders
/// == false`) or a template that still needs `render`.
pub struct Template {
    /// The resolved SQL when `has_dynamic_placeholders` is false; otherwise
    /// a best-effort preview (dynamic/if segments shown as their directive
    /// shape) not intended for execution.
    pub sql: String,
    pub has_dynamic_placeholders: bool,
    /// Parameter names required to render this template, in left-to-right
    /// discovery order, deduplicated to first occurrence. Positional
    /// dialects (DB2) rely on this order to align bindings.
    pub parameter_order: Vec<String>,
    dialect: &'static SqlDialect,
    segments: Vec<Segment>,
}

/// Compiles `template` against `context`, resolving every static directive
/// immediately.
pub fn prepare(template: &str, context: &PlaceholderContext) -> ParseResult<Template> {
    let tokens = scanner::scan(template)?;

    struct Frame {
        condition: Option<Condition>,
        body: Vec<Segment>,
        position: usize,
    }

    let mut stack = vec![Frame {
        condition: None,
        body: Vec::new(),
        position: 0,
    }];
    let mut parameter_order: Vec<String> = Vec::new();

    let mut push_param = |parameter_order: &mut Vec<String>, name: &str| {
        if !parameter_order.iter().any(|p| p == name) {
            parameter_order.push(name.to_string());
        }
    };

    for token in tokens {
        match token {
            RawToken::Literal(text) => {
                stack.last_mut().unwrap().body.push(Segment::Literal(text));
            }
            RawToken::Directive { text, position } => {
                let (name, rest) = scanner::split_name(&text);

                if name == "if" {
                    let condition = Condition::parse(rest, position)?;
                    stack.push(Frame {
                        condition: Some(condition),
                        body: Vec::new(),
                        position,
                    });
                    continue;
                }

                if name == "/if" {
                    if stack.len() == 1 {
                        return Err(ParseError::UnmatchedEndIf { position });
                    }
                    let frame = stack.pop().unwrap();
                    let condition = frame.condition.expect("non-root frame always has a condition");
                    stack
                        .last_mut()
                        .unwrap()
                        .body
                        .push(Segment::If { condition, body: frame.body });
                    continue;
                }

                let handler = handlers::REGISTRY.get(name).ok_or_else(|| {
                    ParseError::UnknownDirective {
                        name: name.to_string(),
                        directive_text: text.clone(),
                        position,
                    }
                })?;

                let opts = OptionString::parse(rest);
                log::trace!("dispatching directive '{name}' at position {position}");

                match handler.classify(&opts) {
                    handlers::HandlerKind::Static => {
                        let (resolved, params) = handler.process(context, &opts)?;
                        for p in &params {
                            push_param(&mut parameter_order, p);
                        }
                        stack.last_mut().unwrap().body.push(Segment::Literal(resolved));
                    }
                    handlers::HandlerKind::Dynamic => {
                        if let Some(p) = opts.get("param") {
                            push_param(&mut parameter_order, p);
                        }
                        stack.last_mut().unwrap().body.push(Segment::Dynamic(Sentinel {
                            handler_name: name.to_string(),
                            options: opts,
                        }));
                    }
                }
            }
        }
    }

    if stack.len() > 1 {
        let unclosed = stack.last().unwrap();
        return Err(ParseError::UnclosedIf { position: unclosed.position });
    }

    let segments = stack.pop().unwrap().body;
    let has_dynamic_placeholders = segments_have_dynamic_content(&segments);
    let sql = if has_dynamic_placeholders {
        preview(&segments)
    } else {
        concat_literals(&segments)
    };

    Ok(Template {
        sql,
        has_dynamic_placeholders,
        parameter_order,
        dialect: context.dialect,
        segments,
    })
}

fn concat_literals(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| match s {
            Segment::Literal(text) => text.clone(),
            Segment::Dynamic(_) | Segment::If { .. } => {
                unreachable!("concat_literals called on segments with dynamic content")
            }
        })
        .collect()
}

/// Resolves every remaining dynamic sentinel and `{{if}}` block against
/// `parameters`, producing the final SQL.
pub fn render(template: &Template, parameters: &HashMap<String, Option<Value>>) -> BindingResult<String> {
    if !template.has_dynamic_placeholders {
        return Ok(template.sql.clone());
    }

    let context = PlaceholderContext::new(template.dialect, String::new(), Vec::new());
    render_segments(&template.segments, &context, parameters)
}

/// Resolves `template` exactly like [`render`], then runs the final SQL
/// through [`crate::injection_guard::check`] (spec §2's pipeline: "...
/// optional dynamic render -> injection scan -> final SQL"). This is the
/// path callers should use; bare [`render`] is kept for reuse by callers
/// who have already scanned the statement themselves.
pub fn render_checked(template: &Template, parameters: &HashMap<String, Option<Value>>) -> EngineResult<String> {
    let sql = render(template, parameters)?;
    crate::injection_guard::check(&sql)?;
    Ok(sql)
}

fn render_segments(
    segments: &[Segment],
    context: &PlaceholderContext,
    parameters: &HashMap<String, Option<Value>>,
) -> BindingResult<String> {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Dynamic(sentinel) => {
                let handler = handlers::REGISTRY
                    .get(sentinel.handler_name.as_str())
                    .expect("sentinel handler name was validated during prepare");
                let (resolved, _params) = handler.render(context, &sentinel.options, parameters)?;
                out.push_str(&resolved);
            }
            Segment::If { condition, body } => {
                if condition.evaluate(parameters) {
                    out.push_str(&render_segments(body, context, parameters)?);
                }
            }
        }
    }
    Ok(out)
}

/// Scans a raw template string for any directive that is not guaranteed
/// static regardless of context — i.e. whether `prepare` *could* produce a
/// template still needing `render`. A cheap pre-check; `prepare` remains
/// the source of truth.
pub fn contains_dynamic(template: &str) -> bool {
    let Ok(tokens) = scanner::scan(template) else {
        return false;
    };
    tokens.iter().any(|t| match t {
        RawToken::Directive { text, .. } => {
            let (name, rest) = scanner::split_name(text);
            if name == "if" || name == "/if" {
                return true;
            }
            matches!(name, "in") || OptionString::parse(rest).get("param").is_some()
        }
        RawToken::Literal(_) => false,
    })
}
