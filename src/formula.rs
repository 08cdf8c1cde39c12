//! The restricted `If.when` formula language (spec.md §4.4 `If`, §9 Design
//! Notes: "a tiny formula grammar, not a general expression evaluator").
//!
//! Grammar (spec.md §4.4):
//!
//! ```text
//! formula    := "=" expr
//! expr       := comparison | "AND(" expr ("," expr)* ")" | "OR(" expr ("," expr)* ")"
//! comparison := operand op operand
//! op         := "=" | "!=" | "<" | ">" | "<=" | ">="
//! operand    := input-name | number | quoted-string | "true" | "false" | "null"
//! ```
//!
//! Bare booleans (`when="isAdmin"`, no leading `=`) are also accepted as a
//! truthiness check against the named input, per spec.md §4.4's "or a bare
//! input name, interpreted as truthy".
//!
//! This is a hand-rolled recursive-descent parser over a pre-tokenized
//! stream: no parser-combinator crate, because the grammar is this small.

use serde_json::{Map, Value};
use std::fmt;

/// Any failure while parsing or evaluating a formula. Callers fold this
/// into a `prop_validation` [`crate::context::RenderIssue`] (spec.md §7) —
/// it never becomes a hard [`crate::error::PromptError`].
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaError(pub String);

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FormulaError {}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Input(String),
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Cmp(Operand, CmpOp, Operand),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Truthy(String),
}

/// A parsed `If.when` formula, ready to evaluate against a set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula(Expr);

impl Formula {
    /// Parses `source` (the literal `when` prop value) into a `Formula`.
    pub fn parse(source: &str) -> Result<Formula, FormulaError> {
        let trimmed = source.trim();
        if let Some(rest) = trimmed.strip_prefix('=') {
            let mut p = Parser::new(rest.trim());
            let expr = p.parse_expr()?;
            p.expect_end()?;
            Ok(Formula(expr))
        } else if is_identifier(trimmed) {
            Ok(Formula(Expr::Truthy(trimmed.to_string())))
        } else {
            Err(FormulaError(format!(
                "invalid `when` formula: {trimmed:?} (expected a bare input name or a leading `=`)"
            )))
        }
    }

    /// Evaluates the formula against `inputs` (the `RenderContext.inputs`
    /// map). Missing input names evaluate to `null`.
    pub fn evaluate(&self, inputs: &Map<String, Value>) -> Result<bool, FormulaError> {
        eval_expr(&self.0, inputs)
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().map(|c| c.is_ascii_alphabetic() || c == '_').unwrap_or(false)
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn eval_expr(expr: &Expr, inputs: &Map<String, Value>) -> Result<bool, FormulaError> {
    match expr {
        Expr::Truthy(name) => Ok(is_truthy(lookup(name, inputs))),
        Expr::And(parts) => {
            for p in parts {
                if !eval_expr(p, inputs)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Expr::Or(parts) => {
            for p in parts {
                if eval_expr(p, inputs)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Expr::Cmp(lhs, op, rhs) => {
            let l = resolve_operand(lhs, inputs);
            let r = resolve_operand(rhs, inputs);
            compare(&l, *op, &r)
        }
    }
}

fn lookup<'a>(name: &str, inputs: &'a Map<String, Value>) -> &'a Value {
    static NULL: Value = Value::Null;
    inputs.get(name).unwrap_or(&NULL)
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn resolve_operand(op: &Operand, inputs: &Map<String, Value>) -> Value {
    match op {
        Operand::Input(name) => lookup(name, inputs).clone(),
        Operand::Number(n) => Value::from(*n),
        Operand::Str(s) => Value::from(s.clone()),
        Operand::Bool(b) => Value::from(*b),
        Operand::Null => Value::Null,
    }
}

fn compare(l: &Value, op: CmpOp, r: &Value) -> Result<bool, FormulaError> {
    match op {
        CmpOp::Eq => Ok(values_equal(l, r)),
        CmpOp::Ne => Ok(!values_equal(l, r)),
        CmpOp::Lt | CmpOp::Gt | CmpOp::Le | CmpOp::Ge => {
            let (lf, rf) = (as_number(l), as_number(r));
            match (lf, rf) {
                (Some(a), Some(b)) => Ok(match op {
                    CmpOp::Lt => a < b,
                    CmpOp::Gt => a > b,
                    CmpOp::Le => a <= b,
                    CmpOp::Ge => a >= b,
                    CmpOp::Eq | CmpOp::Ne => unreachable!(),
                }),
                _ => Err(FormulaError(
                    "ordering comparison requires two numeric operands".to_string(),
                )),
            }
        }
    }
}

fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn values_equal(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => l == r,
    }
}

/// Recursive-descent parser over the formula grammar above.
struct Parser<'a> {
    src: &'a str,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser { src: src.trim_start() }
    }

    fn expect_end(&self) -> Result<(), FormulaError> {
        if self.src.is_empty() {
            Ok(())
        } else {
            Err(FormulaError(format!("unexpected trailing input: {:?}", self.src)))
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, FormulaError> {
        if let Some(rest) = self.src.strip_prefix("AND(") {
            self.src = rest;
            let parts = self.parse_arg_list()?;
            return Ok(Expr::And(parts));
        }
        if let Some(rest) = self.src.strip_prefix("OR(") {
            self.src = rest;
            let parts = self.parse_arg_list()?;
            return Ok(Expr::Or(parts));
        }
        self.parse_comparison()
    }

    fn parse_arg_list(&mut self) -> Result<Vec<Expr>, FormulaError> {
        let mut parts = Vec::new();
        loop {
            self.skip_ws();
            parts.push(self.parse_expr()?);
            self.skip_ws();
            if let Some(rest) = self.src.strip_prefix(',') {
                self.src = rest;
                continue;
            }
            if let Some(rest) = self.src.strip_prefix(')') {
                self.src = rest;
                break;
            }
            return Err(FormulaError(format!(
                "expected `,` or `)` in argument list, found {:?}",
                self.src
            )));
        }
        Ok(parts)
    }

    fn parse_comparison(&mut self) -> Result<Expr, FormulaError> {
        let lhs = self.parse_operand()?;
        self.skip_ws();
        let op = self.parse_op()?;
        self.skip_ws();
        let rhs = self.parse_operand()?;
        Ok(Expr::Cmp(lhs, op, rhs))
    }

    fn parse_op(&mut self) -> Result<CmpOp, FormulaError> {
        for (token, op) in [
            ("<=", CmpOp::Le),
            (">=", CmpOp::Ge),
            ("!=", CmpOp::Ne),
            ("=", CmpOp::Eq),
            ("<", CmpOp::Lt),
            (">", CmpOp::Gt),
        ] {
            if let Some(rest) = self.src.strip_prefix(token) {
                self.src = rest;
                return Ok(op);
            }
        }
        Err(FormulaError(format!(
            "expected a comparison operator, found {:?}",
            self.src
        )))
    }

    fn parse_operand(&mut self) -> Result<Operand, FormulaError> {
        self.skip_ws();
        if let Some(rest) = self.src.strip_prefix('"') {
            let end = rest.find('"').ok_or_else(|| {
                FormulaError("unterminated string literal in formula".to_string())
            })?;
            let (s, rest) = rest.split_at(end);
            self.src = &rest[1..];
            return Ok(Operand::Str(s.to_string()));
        }
        if let Some(rest) = self.src.strip_prefix("true") {
            self.src = rest;
            return Ok(Operand::Bool(true));
        }
        if let Some(rest) = self.src.strip_prefix("false") {
            self.src = rest;
            return Ok(Operand::Bool(false));
        }
        if let Some(rest) = self.src.strip_prefix("null") {
            self.src = rest;
            return Ok(Operand::Null);
        }
        let end = self
            .src
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'))
            .unwrap_or(self.src.len());
        if end == 0 {
            return Err(FormulaError(format!(
                "expected an operand, found {:?}",
                self.src
            )));
        }
        let (token, rest) = self.src.split_at(end);
        self.src = rest;
        if let Ok(n) = token.parse::<f64>() {
            Ok(Operand::Number(n))
        } else {
            Ok(Operand::Input(token.to_string()))
        }
    }

    fn skip_ws(&mut self) {
        self.src = self.src.trim_start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inputs(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn bare_name_is_truthy_check() {
        let f = Formula::parse("isAdmin").unwrap();
        assert!(f.evaluate(&inputs(&[("isAdmin", json!(true))])).unwrap());
        assert!(!f.evaluate(&inputs(&[("isAdmin", json!(false))])).unwrap());
        assert!(!f.evaluate(&Map::new()).unwrap());
    }

    #[test]
    fn numeric_comparison() {
        let f = Formula::parse("=age >= 18").unwrap();
        assert!(f.evaluate(&inputs(&[("age", json!(21))])).unwrap());
        assert!(!f.evaluate(&inputs(&[("age", json!(10))])).unwrap());
    }

    #[test]
    fn string_equality() {
        let f = Formula::parse("=role = \"admin\"").unwrap();
        assert!(f.evaluate(&inputs(&[("role", json!("admin"))])).unwrap());
        assert!(!f.evaluate(&inputs(&[("role", json!("guest"))])).unwrap());
    }

    #[test]
    fn and_or_combinators() {
        let f = Formula::parse("=AND(age >= 18, role = \"admin\")").unwrap();
        assert!(f
            .evaluate(&inputs(&[("age", json!(30)), ("role", json!("admin"))]))
            .unwrap());
        assert!(!f
            .evaluate(&inputs(&[("age", json!(10)), ("role", json!("admin"))]))
            .unwrap());

        let g = Formula::parse("=OR(age >= 18, role = \"admin\")").unwrap();
        assert!(g
            .evaluate(&inputs(&[("age", json!(10)), ("role", json!("admin"))]))
            .unwrap());
    }

    #[test]
    fn ordering_requires_numbers() {
        let f = Formula::parse("=name >= 18").unwrap();
        let err = f
            .evaluate(&inputs(&[("name", json!("abc"))]))
            .unwrap_err();
        assert!(err.0.contains("numeric"));
    }

    #[test]
    fn malformed_formula_is_rejected() {
        assert!(Formula::parse("=42").is_err());
        assert!(Formula::parse("not a valid thing!").is_err());
    }
}
