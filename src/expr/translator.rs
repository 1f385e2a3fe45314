//! AST → SQL compilation.
//!
//! A single recursive function with an output buffer and a parameter
//! counter, per spec §9 ("no CPS or coroutines are needed"). Grounded on
//! the teacher's `SqlGenerator::generate_expression` dispatch shape,
//! generalized from dplyr verbs to a predicate/projection AST.

use super::{BinaryOp, Expr, MemberPath, UnaryOp};
use crate::context::PlaceholderContext;
use crate::dialect::{CanonicalFunction, DatabaseType, SqlDialect};
use crate::error::{TranslationError, TranslationResult};
use crate::value::{DbType, Value};
use indexmap::IndexMap;

/// `(sql_fragment, parameter_map)`, the output of translating one AST.
/// `parameters` is ordered by first-bind position — generated parameter
/// tokens (`@p0`, `$p0`, …) to their bound runtime value.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionBlockResult {
    pub sql: String,
    pub parameters: IndexMap<String, Value>,
}

pub fn translate<'a>(
    expr: &Expr,
    context: &'a PlaceholderContext<'a>,
) -> TranslationResult<ExpressionBlockResult> {
    let mut translator = Translator {
        dialect: context.dialect,
        context,
        counter: 0,
        parameters: IndexMap::new(),
    };
    let sql = translator.visit_as_predicate(expr)?;
    Ok(ExpressionBlockResult {
        sql,
        parameters: translator.parameters,
    })
}

struct Translator<'a> {
    dialect: &'static SqlDialect,
    context: &'a PlaceholderContext<'a>,
    counter: usize,
    parameters: IndexMap<String, Value>,
}

impl<'a> Translator<'a> {
    fn bind(&mut self, value: Value) -> String {
        let marker = self.dialect.parameter_marker(&format!("p{}", self.counter));
        self.counter += 1;
        self.parameters.insert(marker.clone(), value);
        marker
    }

    fn wrapped_column(&self, property_name: &str) -> String {
        match self.context.column_by_property(property_name) {
            Some(col) => self.dialect.wrap_identifier(&col.name),
            None => {
                let snake = crate::name_mapper::to_snake_case(Some(property_name))
                    .unwrap_or_else(|_| property_name.to_string());
                self.dialect.wrap_identifier(&snake)
            }
        }
    }

    fn column_db_type(&self, property_name: &str) -> Option<DbType> {
        self.context.column_by_property(property_name).map(|c| c.db_type)
    }

    fn is_string_like(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Constant(Value::Str(_)) => true,
            Expr::Member(MemberPath::External(Value::Str(_))) => true,
            Expr::Member(MemberPath::Entity(name)) => {
                matches!(self.column_db_type(name), Some(DbType::String))
            }
            _ => false,
        }
    }

    /// Renders a boolean-valued member access used directly as a predicate
    /// (spec §4.5: "Boolean member -> col = 1 (or TRUE where the dialect
    /// supports it)").
    fn boolean_predicate(&self, sql: &str) -> String {
        let literal = match self.dialect.database_type {
            DatabaseType::PostgreSql => "TRUE",
            _ => "1",
        };
        format!("{sql} = {literal}")
    }

    /// Visits `expr` in a boolean-predicate position (the translation root,
    /// or an `And`/`Or` operand): a `DbType::Boolean` entity member is
    /// normalized to `col = 1`/`col = TRUE` rather than emitted bare.
    fn visit_as_predicate(&mut self, expr: &Expr) -> TranslationResult<String> {
        if let Expr::Member(MemberPath::Entity(name)) = expr {
            if self.column_db_type(name) == Some(DbType::Boolean) {
                let col = self.wrapped_column(name);
                return Ok(self.boolean_predicate(&col));
            }
        }
        self.visit(expr)
    }

    fn visit(&mut self, expr: &Expr) -> TranslationResult<String> {
        match expr {
            Expr::Member(MemberPath::Entity(name)) => Ok(self.wrapped_column(name)),
            Expr::Member(MemberPath::External(value)) => Ok(self.bind(value.clone())),
            Expr::Constant(value) => Ok(self.bind(value.clone())),
            Expr::Binary { op, left, right } => self.visit_binary(*op, left, right),
            Expr::Unary { op, expr } => self.visit_unary(*op, expr),
            Expr::Call { target, method, args } => self.visit_call(target.as_deref(), method, args),
            Expr::NewObject(fields) => self.visit_new_object(fields),
        }
    }

    fn visit_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> TranslationResult<String> {
        if op == BinaryOp::Add && (self.is_string_like(left) || self.is_string_like(right)) {
            let l = self.visit(left)?;
            let r = self.visit(right)?;
            return Ok(self.dialect.string_concat(&l, &r));
        }

        if op == BinaryOp::And || op == BinaryOp::Or {
            let operator = if op == BinaryOp::And { "AND" } else { "OR" };
            let l = self.visit_as_predicate(left)?;
            let r = self.visit_as_predicate(right)?;
            return Ok(format!("({l} {operator} {r})"));
        }

        let operator = match op {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
        };

        let l = self.visit(left)?;
        let r = self.visit(right)?;
        Ok(format!("({l} {operator} {r})"))
    }

    fn visit_unary(&mut self, op: UnaryOp, expr: &Expr) -> TranslationResult<String> {
        match op {
            UnaryOp::Not => {
                let inner = self.visit_as_predicate(expr)?;
                Ok(format!("NOT ({inner})"))
            }
        }
    }

    fn visit_call(&mut self, target: Option<&Expr>, method: &str, args: &[Expr]) -> TranslationResult<String> {
        match (target, method) {
            (Some(target), "Contains") => self.visit_pattern_call(target, args, "%{}%"),
            (Some(target), "StartsWith") => self.visit_pattern_call(target, args, "{}%"),
            (Some(target), "EndsWith") => self.visit_pattern_call(target, args, "%{}"),
            (None, "Now") | (Some(_), "Now") => Ok(self.dialect.now_expression().to_string()),
            (Some(target), method) => {
                let canonical = canonical_function(method);
                let target_sql = self.visit(target)?;
                let mut rendered_args = Vec::with_capacity(args.len() + 1);
                rendered_args.push(target_sql);
                for arg in args {
                    rendered_args.push(self.visit(arg)?);
                }
                let name = canonical
                    .map(|f| self.dialect.translate_function(f).to_string())
                    .unwrap_or_else(|| method.to_uppercase());
                Ok(format!("{name}({})", rendered_args.join(", ")))
            }
            (None, method) => Err(TranslationError::UnsupportedMethod {
                method: method.to_string(),
                dialect: self.dialect.database_type.name().to_string(),
            }),
        }
    }

    fn visit_pattern_call(&mut self, target: &Expr, args: &[Expr], pattern: &str) -> TranslationResult<String> {
        let [arg] = args else {
            return Err(TranslationError::UnsupportedMethod {
                method: "pattern match".to_string(),
                dialect: self.dialect.database_type.name().to_string(),
            });
        };
        let target_sql = self.visit(target)?;
        let value = match arg {
            Expr::Constant(v) | Expr::Member(MemberPath::External(v)) => v.clone(),
            other => {
                let rendered = self.visit(other)?;
                Value::Str(rendered)
            }
        };
        let pattern_value = match value {
            Value::Str(s) => Value::Str(pattern.replace("{}", &s)),
            other => other,
        };
        let marker = self.bind(pattern_value);
        Ok(format!("{target_sql} LIKE {marker}"))
    }

    fn visit_new_object(&mut self, fields: &[(String, Expr)]) -> TranslationResult<String> {
        let mut pairs = Vec::with_capacity(fields.len());
        for (name, value_expr) in fields {
            let col = self.wrapped_column(name);
            let rhs = self.visit(value_expr)?;
            pairs.push(format!("{col} = {rhs}"));
        }
        Ok(pairs.join(", "))
    }
}

fn canonical_function(method: &str) -> Option<CanonicalFunction> {
    Some(match method {
        "Substring" => CanonicalFunction::Substring,
        "Length" => CanonicalFunction::Length,
        "ToUpper" => CanonicalFunction::ToUpper,
        "ToLower" => CanonicalFunction::ToLower,
        "Trim" => CanonicalFunction::Trim,
        "Replace" => CanonicalFunction::Replace,
        "Abs" => CanonicalFunction::Abs,
        "Round" => CanonicalFunction::Round,
        "Ceiling" => CanonicalFunction::Ceiling,
        "Floor" => CanonicalFunction::Floor,
        "Sqrt" => CanonicalFunction::Sqrt,
        "Power" => CanonicalFunction::Power,
        "Concat" => CanonicalFunction::Concat,
        "Max" | "Greatest" => CanonicalFunction::Greatest,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnMeta;
    use crate::dialect::DatabaseType;

    fn users_context() -> PlaceholderContext<'static> {
        let columns = vec![
            ColumnMeta::new("age", "Age", DbType::Int32, false),
            ColumnMeta::new("name", "Name", DbType::String, false),
            ColumnMeta::new("is_active", "IsActive", DbType::Boolean, false),
        ];
        PlaceholderContext::new(DatabaseType::Sqlite.dialect(), "users", columns)
    }

    #[test]
    fn predicate_with_and_and_comparisons() {
        let ctx = users_context();
        let expr = Expr::Binary {
            op: BinaryOp::And,
            left: Box::new(Expr::Binary {
                op: BinaryOp::Gt,
                left: Box::new(Expr::Member(MemberPath::Entity("Age".to_string()))),
                right: Box::new(Expr::Constant(Value::I64(18))),
            }),
            right: Box::new(Expr::Binary {
                op: BinaryOp::Eq,
                left: Box::new(Expr::Member(MemberPath::Entity("Name".to_string()))),
                right: Box::new(Expr::Constant(Value::Str("John".to_string()))),
            }),
        };

        let result = translate(&expr, &ctx).unwrap();
        assert_eq!(result.sql, "([age] > @p0 AND [name] = @p1)");
        assert_eq!(result.parameters.get("@p0"), Some(&Value::I64(18)));
        assert_eq!(result.parameters.get("@p1"), Some(&Value::Str("John".to_string())));
    }

    #[test]
    fn string_concat_uses_dialect_style() {
        let ctx = PlaceholderContext::new(DatabaseType::MySql.dialect(), "users", vec![
            ColumnMeta::new("name", "Name", DbType::String, false),
        ]);
        let expr = Expr::Binary {
            op: BinaryOp::Add,
            left: Box::new(Expr::Member(MemberPath::Entity("Name".to_string()))),
            right: Box::new(Expr::Constant(Value::Str(" Jr".to_string()))),
        };
        let result = translate(&expr, &ctx).unwrap();
        assert_eq!(result.sql, "CONCAT(`name`, @p0)");
    }

    #[test]
    fn boolean_member_at_predicate_root_normalizes_to_equality() {
        let ctx = users_context();
        let expr = Expr::Member(MemberPath::Entity("IsActive".to_string()));
        let result = translate(&expr, &ctx).unwrap();
        assert_eq!(result.sql, "[is_active] = 1");
    }

    #[test]
    fn boolean_member_as_and_operand_normalizes_to_equality() {
        let ctx = users_context();
        let expr = Expr::Binary {
            op: BinaryOp::And,
            left: Box::new(Expr::Member(MemberPath::Entity("IsActive".to_string()))),
            right: Box::new(Expr::Binary {
                op: BinaryOp::Gt,
                left: Box::new(Expr::Member(MemberPath::Entity("Age".to_string()))),
                right: Box::new(Expr::Constant(Value::I64(18))),
            }),
        };
        let result = translate(&expr, &ctx).unwrap();
        assert_eq!(result.sql, "([is_active] = 1 AND ([age] > @p0))");
    }

    #[test]
    fn unary_not_on_boolean_member() {
        let ctx = users_context();
        let expr = Expr::Unary {
            op: UnaryOp::Not,
            expr: Box::new(Expr::Member(MemberPath::Entity("IsActive".to_string()))),
        };
        let result = translate(&expr, &ctx).unwrap();
        assert_eq!(result.sql, "NOT ([is_active] = 1)");
    }

    #[test]
    fn contains_translates_to_like_with_wildcards() {
        let ctx = users_context();
        let expr = Expr::Call {
            target: Some(Box::new(Expr::Member(MemberPath::Entity("Name".to_string())))),
            method: "Contains".to_string(),
            args: vec![Expr::Constant(Value::Str("oh".to_string()))],
        };
        let result = translate(&expr, &ctx).unwrap();
        assert_eq!(result.sql, "[name] LIKE @p0");
        assert_eq!(result.parameters.get("@p0"), Some(&Value::Str("%oh%".to_string())));
    }

    #[test]
    fn new_object_preserves_source_order() {
        let ctx = users_context();
        let expr = Expr::NewObject(vec![
            ("Name".to_string(), Expr::Constant(Value::Str("Bob".to_string()))),
            ("Age".to_string(), Expr::Constant(Value::I64(30))),
        ]);
        let result = translate(&expr, &ctx).unwrap();
        assert_eq!(result.sql, "[name] = @p0, [age] = @p1");
    }
}
