//! Interprets a [`LoweredModule`] against a [`ComponentRegistry`] into a
//! concrete [`Element`] tree (spec.md §6 build-time surface: "evaluate the
//! lowered code in a controlled scope").
//!
//! Name resolution (`const` bindings and `hoistName` auto-binding, spec.md
//! §4.2) happens entirely here, at build time, rather than by consulting
//! [`crate::context::RenderContext::hoisted`] at render time: as each
//! binding is evaluated, its name is recorded against either the concrete
//! [`Element`] it produced or the literal JSON value it produced, in
//! declaration order, so later references resolve against a fully concrete
//! target. A bare identifier (`{name}`) embeds the referenced element (or
//! literal) directly, matching ordinary JSX value-embedding; a member chain
//! (`{gh.stars}`) instead builds a [`crate::deferred::DeferredRef`], matching
//! the proxy property-access protocol (spec.md §3) — only that access form
//! defers to a resolved value discovered later in the render walk. An
//! unresolvable identifier is a hard build-time [`PromptError::Lowering`],
//! not a render-time diagnostic: `ErrorCode::InvalidIdentifier` is reserved
//! for a hypothetical future render-time binding model and unused by this
//! evaluator (see DESIGN.md).

use super::ir::{IrChild, IrElement, IrExpr, LoweredModule};
use crate::component::ComponentRegistry;
use crate::error::PromptError;
use crate::factory;
use crate::node::{Element, Node, Props};
use serde_json::Value;
use std::collections::HashMap;

/// What a name in scope resolves to.
enum Binding {
    /// A `const`/auto-hoisted binding that produced an element.
    Elem(Element),
    /// A `const` binding that produced a plain literal value.
    Val(Value),
}

type Scope = HashMap<String, Binding>;

/// Evaluates `module` into its root [`Element`], using `registry` only to
/// decide which bare top-level statements auto-bind via `hoistName`.
pub fn evaluate(module: &LoweredModule, registry: &ComponentRegistry) -> Result<Element, PromptError> {
    let mut scope = Scope::new();

    for (name, expr) in &module.bindings {
        let node = eval_child_expr(expr, &scope, registry)?;
        scope.insert(name.clone(), node_to_binding(node)?);
    }

    for expr in &module.statements {
        let node = eval_child_expr(expr, &scope, registry)?;
        if let Node::Element(el) = &node {
            if let Some(name) = auto_hoist_name(el, registry) {
                scope.insert(name, Binding::Elem(el.clone()));
            }
        }
    }

    match eval_child_expr(&module.root, &scope, registry)? {
        Node::Element(el) => Ok(el),
        other => Ok(factory::fragment(vec![other])),
    }
}

fn auto_hoist_name(el: &Element, registry: &ComponentRegistry) -> Option<String> {
    let type_name = el.type_name()?;
    let component = registry.get(type_name)?;
    if !component.hoist_name() {
        return None;
    }
    el.props().get("name")?.as_str().map(str::to_string)
}

fn node_to_binding(node: Node) -> Result<Binding, PromptError> {
    match node {
        Node::Element(el) => Ok(Binding::Elem(el)),
        other => node_to_value(other).map(Binding::Val),
    }
}

fn node_to_value(node: Node) -> Result<Value, PromptError> {
    match node {
        Node::Text(s) => Ok(Value::String(s)),
        Node::Number(n) => Ok(number_value(n)),
        Node::Bool(b) => Ok(Value::Bool(b)),
        Node::Null => Ok(Value::Null),
        Node::List(items) => items
            .into_iter()
            .map(node_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Node::Ref(_) => Err(PromptError::Lowering(
            "a deferred reference cannot itself be bound to a name; bind the element it targets instead".to_string(),
        )),
        Node::Element(_) => unreachable!("handled by node_to_binding before node_to_value"),
    }
}

fn number_value(n: f64) -> Value {
    serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

fn value_to_node(v: &Value) -> Node {
    match v {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(*b),
        Value::Number(n) => Node::Number(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => Node::text(s.clone()),
        Value::Array(items) => Node::List(items.iter().map(value_to_node).collect()),
        Value::Object(_) => Node::text(v.to_string()),
    }
}

fn navigate(root: &Value, path: &[String]) -> Value {
    let mut cur = root.clone();
    for segment in path {
        cur = cur.get(segment).cloned().unwrap_or(Value::Null);
    }
    cur
}

fn eval_element(ir: &IrElement, scope: &Scope, registry: &ComponentRegistry) -> Result<Node, PromptError> {
    let children = eval_children(&ir.children, scope, registry)?;
    if ir.type_name == "Fragment" {
        return Ok(Node::Element(factory::fragment(children)));
    }
    let mut props = Props::new();
    for attr in &ir.attrs {
        props.insert(attr.name.clone(), eval_prop_expr(&attr.value, scope)?);
    }
    let el = factory::jsx(ir.type_name.clone(), props, children)?;
    Ok(Node::Element(el))
}

fn eval_children(children: &[IrChild], scope: &Scope, registry: &ComponentRegistry) -> Result<Vec<Node>, PromptError> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        out.push(match child {
            IrChild::Text(s) => Node::text(s.clone()),
            IrChild::Expr(e) => eval_child_expr(e, scope, registry)?,
        });
    }
    Ok(out)
}

fn eval_child_expr(expr: &IrExpr, scope: &Scope, registry: &ComponentRegistry) -> Result<Node, PromptError> {
    match expr {
        IrExpr::StringLit(s) => Ok(Node::text(s.clone())),
        IrExpr::NumberLit(n) => Ok(Node::Number(*n)),
        IrExpr::BoolLit(b) => Ok(Node::Bool(*b)),
        IrExpr::NullLit => Ok(Node::Null),
        IrExpr::Json(v) => Ok(value_to_node(v)),
        IrExpr::Identifier(name) => match scope.get(name) {
            Some(Binding::Elem(el)) => Ok(Node::Element(el.clone())),
            Some(Binding::Val(v)) => Ok(value_to_node(v)),
            None => Err(unknown_identifier(name)),
        },
        IrExpr::Member(root, path) => match scope.get(root) {
            Some(Binding::Elem(el)) => {
                let mut r = el.whole();
                for segment in path {
                    r = r.field(segment.clone());
                }
                Ok(Node::Ref(r))
            }
            Some(Binding::Val(v)) => Ok(value_to_node(&navigate(v, path))),
            None => Err(unknown_identifier(root)),
        },
        IrExpr::Element(ir) => eval_element(ir, scope, registry),
        IrExpr::Fragment(children) => {
            let kids = eval_children(children, scope, registry)?;
            Ok(Node::Element(factory::fragment(kids)))
        }
    }
}

fn eval_prop_expr(expr: &IrExpr, scope: &Scope) -> Result<Value, PromptError> {
    match expr {
        IrExpr::StringLit(s) => Ok(Value::String(s.clone())),
        IrExpr::NumberLit(n) => Ok(number_value(*n)),
        IrExpr::BoolLit(b) => Ok(Value::Bool(*b)),
        IrExpr::NullLit => Ok(Value::Null),
        IrExpr::Json(v) => Ok(v.clone()),
        IrExpr::Identifier(name) => match scope.get(name) {
            Some(Binding::Val(v)) => Ok(v.clone()),
            Some(Binding::Elem(_)) => Err(PromptError::Lowering(format!(
                "'{name}' is an element and can't be used as a literal prop value; pass it as a child instead"
            ))),
            None => Err(unknown_identifier(name)),
        },
        IrExpr::Member(root, path) => match scope.get(root) {
            Some(Binding::Val(v)) => Ok(navigate(v, path)),
            Some(Binding::Elem(_)) => Err(PromptError::Lowering(format!(
                "'{root}.{}' depends on a resolved value not known until render; pass it as a child instead",
                path.join(".")
            ))),
            None => Err(unknown_identifier(root)),
        },
        IrExpr::Element(_) | IrExpr::Fragment(_) => Err(PromptError::Lowering(
            "element/fragment expressions are not supported as prop values".to_string(),
        )),
    }
}

fn unknown_identifier(name: &str) -> PromptError {
    PromptError::Lowering(format!("unknown identifier '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DEFAULT_REGISTRY;
    use crate::node::ElementType;
    use crate::source::ir::IrAttr;

    fn text_ir(s: &str) -> IrExpr {
        IrExpr::StringLit(s.to_string())
    }

    #[test]
    fn evaluates_a_bare_element_root() {
        let module = LoweredModule {
            bindings: Vec::new(),
            statements: Vec::new(),
            root: IrExpr::Element(IrElement {
                type_name: "Task".to_string(),
                attrs: vec![IrAttr { name: "verb".to_string(), value: text_ir("summarize") }],
                children: Vec::new(),
            }),
        };
        let el = evaluate(&module, &DEFAULT_REGISTRY).unwrap();
        assert_eq!(el.type_name(), Some("Task"));
        assert_eq!(el.props().get("verb").and_then(Value::as_str), Some("summarize"));
    }

    #[test]
    fn const_binding_can_be_embedded_by_identifier() {
        let module = LoweredModule {
            bindings: vec![(
                "u".to_string(),
                IrExpr::Element(IrElement {
                    type_name: "Ask.Text".to_string(),
                    attrs: vec![IrAttr { name: "name".to_string(), value: text_ir("u") }],
                    children: Vec::new(),
                }),
            )],
            statements: Vec::new(),
            root: IrExpr::Element(IrElement {
                type_name: "Task".to_string(),
                attrs: Vec::new(),
                children: vec![
                    IrChild::Text("hi ".to_string()),
                    IrChild::Expr(IrExpr::Identifier("u".to_string())),
                ],
            }),
        };
        let el = evaluate(&module, &DEFAULT_REGISTRY).unwrap();
        let embedded = el
            .children()
            .iter()
            .find_map(|n| match n {
                Node::Element(e) => Some(e),
                _ => None,
            })
            .expect("ask.text embedded as a child");
        assert_eq!(embedded.type_name(), Some("Ask.Text"));
    }

    #[test]
    fn member_access_on_an_element_binding_builds_a_deferred_ref() {
        let module = LoweredModule {
            bindings: vec![(
                "gh".to_string(),
                IrExpr::Element(IrElement {
                    type_name: "Json".to_string(),
                    attrs: vec![IrAttr {
                        name: "value".to_string(),
                        value: IrExpr::Json(serde_json::json!({"stars": 5})),
                    }],
                    children: Vec::new(),
                }),
            )],
            statements: Vec::new(),
            root: IrExpr::Element(IrElement {
                type_name: "Task".to_string(),
                attrs: Vec::new(),
                children: vec![IrChild::Expr(IrExpr::Member(
                    "gh".to_string(),
                    vec!["stars".to_string()],
                ))],
            }),
        };
        let el = evaluate(&module, &DEFAULT_REGISTRY).unwrap();
        assert!(matches!(el.children()[0], Node::Ref(_)));
    }

    #[test]
    fn unknown_identifier_is_a_lowering_error() {
        let module = LoweredModule {
            bindings: Vec::new(),
            statements: Vec::new(),
            root: IrExpr::Identifier("missing".to_string()),
        };
        assert!(matches!(
            evaluate(&module, &DEFAULT_REGISTRY),
            Err(PromptError::Lowering(_))
        ));
    }

    #[test]
    fn bare_statement_auto_hoists_by_name_prop() {
        let module = LoweredModule {
            bindings: Vec::new(),
            statements: vec![IrExpr::Element(IrElement {
                type_name: "Ask.Text".to_string(),
                attrs: vec![IrAttr { name: "name".to_string(), value: text_ir("city") }],
                children: Vec::new(),
            })],
            root: IrExpr::Element(IrElement {
                type_name: "Task".to_string(),
                attrs: Vec::new(),
                children: vec![IrChild::Expr(IrExpr::Identifier("city".to_string()))],
            }),
        };
        let el = evaluate(&module, &DEFAULT_REGISTRY).unwrap();
        assert!(matches!(el.children()[0], Node::Element(_)));
    }

    #[test]
    fn fragment_root_wraps_bare_text() {
        let module = LoweredModule {
            bindings: Vec::new(),
            statements: Vec::new(),
            root: text_ir("just text"),
        };
        let el = evaluate(&module, &DEFAULT_REGISTRY).unwrap();
        assert_eq!(el.ty(), &ElementType::Fragment);
    }
}
