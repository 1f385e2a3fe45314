//! Expression AST consumed by the expression translator.
//!
//! A minimal AST for hosts that do not already carry a typed expression
//! representation of their own, per spec §9: `{Binary, Unary, Member,
//! Constant, Call, NewObject}`. Hosts with closures-as-data can bind to
//! that representation directly instead of constructing this one.

pub mod translator;

use crate::value::Value;

pub use translator::{translate, ExpressionBlockResult};

/// The target of a property access.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberPath {
    /// Access on the bound entity parameter, e.g. `u.Age` inside `u =>
    /// u.Age > 18`. Carries the source-side property name.
    Entity(String),
    /// Access on anything else. The host has already evaluated the
    /// sub-expression to a runtime value by the time it reaches the
    /// translator (spec §4.5: "evaluate the sub-expression to a runtime
    /// value and bind as a parameter").
    External(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Member(MemberPath),
    Constant(Value),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Call {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    /// An update projection's object initializer: `u => new { Name = x }`.
    /// Preserves source order.
    NewObject(Vec<(String, Expr)>),
}
