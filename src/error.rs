//! Error type definitions
//!
//! Defines all error types used in sqltmpl, mirroring the resolver's own
//! subsystem boundaries: a directive cannot fail to translate an
//! expression, and an expression cannot fail to bind a variable, so each
//! gets its own enum rather than one undifferentiated error type.

use thiserror::Error;

/// Errors raised while preparing a template: unbalanced `{{…}}`, an unknown
/// directive name, or a directive missing a required option.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unbalanced directive braces starting at position {position}")]
    UnbalancedBraces { position: usize },

    #[error("unknown directive '{name}' in '{directive_text}' (position: {position})")]
    UnknownDirective {
        name: String,
        directive_text: String,
        position: usize,
    },

    #[error(
        "directive '{directive_text}' is missing required option '--{option}' (position: {position})"
    )]
    MissingOption {
        directive_text: String,
        option: String,
        position: usize,
    },

    #[error("unmatched '{{{{/if}}}}' with no preceding '{{{{if}}}}' (position: {position})")]
    UnmatchedEndIf { position: usize },

    #[error(
        "'{{{{if}}}}' block starting at position {position} was never closed with '{{{{/if}}}}'"
    )]
    UnclosedIf { position: usize },

    #[error(
        "invalid condition '{condition}' in '{{{{if}}}}' (position: {position}); expected one of null=, notnull=, empty=, notempty="
    )]
    InvalidCondition { condition: String, position: usize },

    #[error("binding error during prepare: {0}")]
    Binding(#[from] BindingError),
}

/// Errors raised by a dynamic handler: a missing variable provider, an
/// unknown variable, or a required parameter absent at render time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindingError {
    #[error(
        "'{{{{var --name {name}}}}}' requires a var_provider, but none was supplied to the PlaceholderContext"
    )]
    NoVarProvider { name: String },

    /// A `var_provider` closure returns this for a name it doesn't
    /// recognize (see [`crate::context::VarProvider`]'s docs).
    #[error("var_provider could not resolve variable '{name}'")]
    UnknownVariable { name: String },

    #[error("'{{{{arg}}}}' requires a '--param NAME' option (position: {position})")]
    ArgMissingParam { position: usize },

    #[error(
        "directive '{directive}' requires parameter '{name}', but it was not supplied to render"
    )]
    MissingParameter { directive: String, name: String },
}

/// Errors raised by the expression translator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslationError {
    #[error("unsupported method call '{method}' for dialect '{dialect}'")]
    UnsupportedMethod { method: String, dialect: String },
}

/// Errors raised by the driver-boundary type coercion in [`crate::convert`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("cannot convert {from_type} to {to_type}: {reason}")]
    Failed {
        from_type: String,
        to_type: String,
        reason: String,
    },
}

/// Raised when the injection guard rejects a rendered SQL statement.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SecurityError {
    #[error("rendered SQL contains disallowed keyword '{keyword}' outside a string literal")]
    DisallowedKeyword { keyword: String },

    #[error(
        "rendered SQL appears to contain multiple statements (unexpected ';' at byte {position})"
    )]
    MultipleStatements { position: usize },

    #[error(
        "rendered SQL contains an unexpected comment marker '{marker}' not produced by a directive option"
    )]
    UnexpectedComment { marker: String },

    #[error("rendered SQL has unbalanced quote characters")]
    UnbalancedQuotes,
}

/// Raised by [`crate::name_mapper::to_snake_case`] when passed a null input
/// where one is disallowed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("argument '{parameter_name}' must not be null")]
    Null { parameter_name: String },
}

/// Unified error returned by the crate's top-level `prepare`/`render` entry
/// points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("template parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("parameter binding error: {0}")]
    Binding(#[from] BindingError),

    #[error("expression translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("type conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("security error: {0}")]
    Security(#[from] SecurityError),

    #[error("argument error: {0}")]
    Argument(#[from] ArgumentError),
}

pub type ParseResult<T> = Result<T, ParseError>;
pub type BindingResult<T> = Result<T, BindingError>;
pub type TranslationResult<T> = Result<T, TranslationError>;
pub type ConversionResult<T> = Result<T, ConversionError>;
pub type SecurityResult<T> = Result<T, SecurityError>;
pub type ArgumentResult<T> = Result<T, ArgumentError>;
pub type EngineResult<T> = Result<T, EngineError>;
