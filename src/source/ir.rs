//! The intermediate representation `transform` lowers prompt source into,
//! and `evaluate` interprets against a component registry (spec.md §6
//! build-time surface: "transform(source, filename, options) -> lowered
//! code").
//!
//! Fully owned (no borrow from the `oxc_allocator::Allocator` the parser
//! used) so it can outlive the parse call that produced it.

use serde_json::Value;

/// An expression appearing in attribute-value or child-expression position.
#[derive(Clone, Debug)]
pub enum IrExpr {
    StringLit(String),
    NumberLit(f64),
    BoolLit(bool),
    NullLit,
    /// An array or object literal, parsed from its source span as JSON — a
    /// deliberately restricted subset of JS literal syntax (mirrors
    /// `crate::formula`'s restricted grammar for `If.when`).
    Json(Value),
    /// A bare identifier referencing a `const`/auto-hoisted binding.
    Identifier(String),
    /// A dotted member chain off a bound identifier (`gh.stars`).
    Member(String, Vec<String>),
    Element(IrElement),
    Fragment(Vec<IrChild>),
}

/// A child of an element or fragment: literal text or an embedded
/// expression (`{expr}`).
#[derive(Clone, Debug)]
pub enum IrChild {
    Text(String),
    Expr(IrExpr),
}

#[derive(Clone, Debug)]
pub struct IrAttr {
    pub name: String,
    pub value: IrExpr,
}

#[derive(Clone, Debug)]
pub struct IrElement {
    pub type_name: String,
    pub attrs: Vec<IrAttr>,
    pub children: Vec<IrChild>,
}

/// A fully-lowered module: its top-level `const` bindings in declaration
/// order (so sequential evaluation can resolve forward-defined names), any
/// bare top-level expression statements (elements written without an
/// explicit binding, relying on `hoistName` auto-binding — spec.md §4.2),
/// and its root expression (the `export default` value).
#[derive(Clone, Debug)]
pub struct LoweredModule {
    pub bindings: Vec<(String, IrExpr)>,
    pub statements: Vec<IrExpr>,
    pub root: IrExpr,
}
