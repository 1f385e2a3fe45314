//! `{{if <cond>}}…{{/if}}` condition parsing and evaluation.
//!
//! Conditions are pure inspections of the render-time parameter map;
//! absent parameters are treated as null (spec §4.2).

use crate::error::ParseError;
use crate::value::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Null(String),
    NotNull(String),
    Empty(String),
    NotEmpty(String),
}

impl Condition {
    pub fn parse(text: &str, position: usize) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidCondition {
            condition: text.to_string(),
            position,
        };

        if let Some(param) = text.strip_prefix("notnull=") {
            Ok(Condition::NotNull(param.to_string()))
        } else if let Some(param) = text.strip_prefix("null=") {
            Ok(Condition::Null(param.to_string()))
        } else if let Some(param) = text.strip_prefix("notempty=") {
            Ok(Condition::NotEmpty(param.to_string()))
        } else if let Some(param) = text.strip_prefix("empty=") {
            Ok(Condition::Empty(param.to_string()))
        } else {
            Err(invalid())
        }
    }

    /// Evaluates this condition against the render-time parameter map. An
    /// absent key is treated as `Value::Null`.
    pub fn evaluate(&self, parameters: &HashMap<String, Option<Value>>) -> bool {
        let lookup = |name: &str| -> Value {
            match parameters.get(name) {
                Some(Some(v)) => v.clone(),
                _ => Value::Null,
            }
        };

        match self {
            Condition::Null(name) => matches!(lookup(name), Value::Null),
            Condition::NotNull(name) => !matches!(lookup(name), Value::Null),
            Condition::Empty(name) => lookup(name).is_empty_or_null(),
            Condition::NotEmpty(name) => !lookup(name).is_empty_or_null(),
        }
    }
}
