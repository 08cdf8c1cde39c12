//! Parses preprocessed prompt source with `oxc_parser` and walks the AST
//! directly into a [`LoweredModule`] (spec.md §6 build-time surface:
//! "transform(source', filename, options) -> lowered-code").
//!
//! The walk supports a deliberately restricted subset of JS/JSX — enough to
//! author prompt element trees, not a general-purpose interpreter: `const`
//! bindings, JSX elements/fragments with string/number/bool/null/array/
//! object/identifier/member-chain attribute and child expressions, and a
//! single `export default`. Anything outside that subset is a lowering
//! error rather than a silent partial result.

use super::ir::{IrAttr, IrChild, IrElement, IrExpr, LoweredModule};
use crate::error::PromptError;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPatternKind, Expression, ExportDefaultDeclarationKind, JSXAttributeItem,
    JSXAttributeName, JSXAttributeValue, JSXChild, JSXElement, JSXElementName, JSXFragment,
    JSXMemberExpressionObject, Statement,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};

/// Parses and lowers `source` (already preprocessed) into owned IR.
pub fn transform(source: &str, filename: &str) -> Result<LoweredModule, PromptError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_module(true)
        .with_typescript(filename.ends_with(".tsx") || filename.ends_with(".ts"))
        .with_jsx(true);

    let parsed = Parser::new(&allocator, source, source_type).parse();
    if !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(PromptError::SourceParse(message));
    }

    let mut bindings = Vec::new();
    let mut statements = Vec::new();
    let mut root = None;

    for stmt in &parsed.program.body {
        match stmt {
            Statement::ImportDeclaration(_) => {}
            Statement::VariableDeclaration(decl) => {
                for declarator in &decl.declarations {
                    let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
                        return Err(PromptError::Lowering(
                            "only simple `const name = ...` bindings are supported".to_string(),
                        ));
                    };
                    let Some(init) = &declarator.init else {
                        return Err(PromptError::Lowering(format!(
                            "binding '{}' has no initializer",
                            id.name
                        )));
                    };
                    bindings.push((id.name.to_string(), lower_expr(init, source)?));
                }
            }
            Statement::ExportDefaultDeclaration(decl) => {
                let ExportDefaultDeclarationKind::Expression(expr) = &decl.declaration else {
                    return Err(PromptError::Lowering(
                        "export default must be an expression".to_string(),
                    ));
                };
                root = Some(lower_expr(expr, source)?);
            }
            Statement::ExpressionStatement(expr_stmt) => {
                // A bare element statement with no explicit binding — its
                // only purpose is `hoistName` auto-binding (spec.md §4.2),
                // resolved once `evaluate` has the registry available.
                statements.push(lower_expr(&expr_stmt.expression, source)?);
            }
            other => {
                return Err(PromptError::Lowering(format!(
                    "unsupported top-level statement: {other:?}"
                )));
            }
        }
    }

    let root = root.ok_or_else(|| {
        PromptError::Lowering("prompt source has no `export default`".to_string())
    })?;

    Ok(LoweredModule { bindings, statements, root })
}

fn lower_expr(expr: &Expression, source: &str) -> Result<IrExpr, PromptError> {
    match expr {
        Expression::StringLiteral(lit) => Ok(IrExpr::StringLit(lit.value.to_string())),
        Expression::NumericLiteral(lit) => Ok(IrExpr::NumberLit(lit.value)),
        Expression::BooleanLiteral(lit) => Ok(IrExpr::BoolLit(lit.value)),
        Expression::NullLiteral(_) => Ok(IrExpr::NullLit),
        Expression::Identifier(id) => Ok(IrExpr::Identifier(id.name.to_string())),
        Expression::ParenthesizedExpression(inner) => lower_expr(&inner.expression, source),
        Expression::StaticMemberExpression(member) => lower_member_chain(
            &Expression::StaticMemberExpression(member.clone()),
            source,
        ),
        Expression::ArrayExpression(_) | Expression::ObjectExpression(_) => {
            lower_literal_via_json(expr, source)
        }
        Expression::JSXElement(el) => Ok(IrExpr::Element(lower_jsx_element(el, source)?)),
        Expression::JSXFragment(frag) => Ok(IrExpr::Fragment(lower_jsx_children(
            &frag.children,
            source,
        )?)),
        other => Err(PromptError::Lowering(format!(
            "unsupported expression at byte {}: {other:?}",
            other.span().start
        ))),
    }
}

/// Flattens a (possibly nested) `StaticMemberExpression` chain into a root
/// identifier plus a dotted path — `gh.profile.stars` becomes
/// `Member("gh", ["profile", "stars"])`.
fn lower_member_chain(expr: &Expression, _source: &str) -> Result<IrExpr, PromptError> {
    fn walk(expr: &Expression, path: &mut Vec<String>) -> Result<String, PromptError> {
        match expr {
            Expression::StaticMemberExpression(member) => {
                let root = walk(&member.object, path)?;
                path.push(member.property.name.to_string());
                Ok(root)
            }
            Expression::Identifier(id) => Ok(id.name.to_string()),
            other => Err(PromptError::Lowering(format!(
                "unsupported member-access base: {other:?}"
            ))),
        }
    }
    let mut path = Vec::new();
    let root = walk(expr, &mut path)?;
    Ok(IrExpr::Member(root, path))
}

/// Array/object literals are sliced out of the original source text by span
/// and parsed as JSON, sidestepping a full walk of oxc's array/object
/// element AST (spread, elision, shorthand, computed keys) in favor of a
/// restricted, well-understood literal grammar.
fn lower_literal_via_json(expr: &Expression, source: &str) -> Result<IrExpr, PromptError> {
    let span = expr.span();
    let text = &source[span.start as usize..span.end as usize];
    serde_json::from_str(text)
        .map(IrExpr::Json)
        .map_err(|e| PromptError::Lowering(format!("literal is not valid JSON ({e}): {text}")))
}

fn jsx_element_name(name: &JSXElementName) -> Result<String, PromptError> {
    match name {
        JSXElementName::Identifier(ident) => Ok(ident.name.to_string()),
        JSXElementName::IdentifierReference(ident) => Ok(ident.name.to_string()),
        JSXElementName::MemberExpression(member) => jsx_member_expression_name(member),
        other => Err(PromptError::Lowering(format!(
            "unsupported element name form: {other:?}"
        ))),
    }
}

fn jsx_member_expression_name(
    expr: &oxc_ast::ast::JSXMemberExpression,
) -> Result<String, PromptError> {
    let object_name = match &expr.object {
        JSXMemberExpressionObject::IdentifierReference(ident) => ident.name.to_string(),
        JSXMemberExpressionObject::MemberExpression(inner) => jsx_member_expression_name(inner)?,
        other => {
            return Err(PromptError::Lowering(format!(
                "unsupported dotted component name base: {other:?}"
            )))
        }
    };
    Ok(format!("{object_name}.{}", expr.property.name))
}

fn lower_jsx_element(el: &JSXElement, source: &str) -> Result<IrElement, PromptError> {
    let type_name = jsx_element_name(&el.opening_element.name)?;
    let mut attrs = Vec::new();
    for item in &el.opening_element.attributes {
        match item {
            JSXAttributeItem::Attribute(attr) => {
                let name = match &attr.name {
                    JSXAttributeName::Identifier(ident) => ident.name.to_string(),
                    JSXAttributeName::NamespacedName(ns) => {
                        format!("{}:{}", ns.namespace.name, ns.name.name)
                    }
                };
                let value = match &attr.value {
                    None => IrExpr::BoolLit(true),
                    Some(JSXAttributeValue::StringLiteral(lit)) => {
                        IrExpr::StringLit(lit.value.to_string())
                    }
                    Some(JSXAttributeValue::ExpressionContainer(container)) => {
                        match container.expression.as_expression() {
                            Some(expr) => lower_expr(expr, source)?,
                            None => continue, // {} (JSXEmptyExpression) — nothing to bind
                        }
                    }
                    Some(JSXAttributeValue::Element(inner)) => {
                        IrExpr::Element(lower_jsx_element(inner, source)?)
                    }
                    Some(JSXAttributeValue::Fragment(frag)) => {
                        IrExpr::Fragment(lower_jsx_children(&frag.children, source)?)
                    }
                };
                attrs.push(IrAttr { name, value });
            }
            JSXAttributeItem::SpreadAttribute(_) => {
                return Err(PromptError::Lowering(
                    "spread attributes ({...props}) are not supported".to_string(),
                ));
            }
        }
    }

    let children = lower_jsx_children(&el.children, source)?;
    Ok(IrElement { type_name, attrs, children })
}

fn lower_jsx_children(children: &[JSXChild], source: &str) -> Result<Vec<IrChild>, PromptError> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match child {
            JSXChild::Text(text) => {
                let value = text.value.as_str();
                if value.trim().is_empty() {
                    continue;
                }
                out.push(IrChild::Text(value.to_string()));
            }
            JSXChild::Element(el) => out.push(IrChild::Expr(IrExpr::Element(lower_jsx_element(
                el, source,
            )?))),
            JSXChild::Fragment(frag) => out.push(IrChild::Expr(IrExpr::Fragment(
                lower_jsx_children(&frag.children, source)?,
            ))),
            JSXChild::ExpressionContainer(container) => match container.expression.as_expression() {
                Some(expr) => out.push(IrChild::Expr(lower_expr(expr, source)?)),
                None => {}
            },
            JSXChild::Spread(_) => {
                return Err(PromptError::Lowering(
                    "spread children ({...x}) are not supported".to_string(),
                ));
            }
        }
    }
    Ok(out)
}

#[allow(unused)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::preprocess::preprocess;

    #[test]
    fn lowers_a_simple_element_with_string_prop() {
        let src = preprocess(r#"<Task verb="summarize" />"#, "a.prompt");
        let module = transform(&src, "a.prompt").unwrap();
        match &module.root {
            IrExpr::Element(el) => {
                assert_eq!(el.type_name, "Task");
                assert_eq!(el.attrs.len(), 1);
                assert_eq!(el.attrs[0].name, "verb");
                match &el.attrs[0].value {
                    IrExpr::StringLit(s) => assert_eq!(s, "summarize"),
                    other => panic!("unexpected value: {other:?}"),
                }
            }
            other => panic!("expected element root: {other:?}"),
        }
    }

    #[test]
    fn lowers_dotted_component_names() {
        let src = preprocess(r#"<Ask.Text name="u" />"#, "a.prompt");
        let module = transform(&src, "a.prompt").unwrap();
        match &module.root {
            IrExpr::Element(el) => assert_eq!(el.type_name, "Ask.Text"),
            other => panic!("expected element root: {other:?}"),
        }
    }

    #[test]
    fn lowers_bindings_and_identifier_children() {
        let src = preprocess(
            r#"const u = <Ask.Text name="u" />;
<Task>hello {u}</Task>"#,
            "a.prompt",
        );
        let module = transform(&src, "a.prompt").unwrap();
        assert_eq!(module.bindings.len(), 1);
        assert_eq!(module.bindings[0].0, "u");
        match &module.root {
            IrExpr::Element(el) => {
                assert_eq!(el.type_name, "Task");
                assert!(el
                    .children
                    .iter()
                    .any(|c| matches!(c, IrChild::Expr(IrExpr::Identifier(name)) if name == "u")));
            }
            other => panic!("expected element root: {other:?}"),
        }
    }

    #[test]
    fn lowers_array_literal_props_via_json() {
        let src = preprocess(r#"<ForEach items={[1, 2, 3]} />"#, "a.prompt");
        let module = transform(&src, "a.prompt").unwrap();
        match &module.root {
            IrExpr::Element(el) => match &el.attrs[0].value {
                IrExpr::Json(v) => assert_eq!(v, &serde_json::json!([1, 2, 3])),
                other => panic!("unexpected value: {other:?}"),
            },
            other => panic!("expected element root: {other:?}"),
        }
    }

    #[test]
    fn member_chain_child_lowers_to_member_expr() {
        let src = preprocess(
            r#"const gh = <Json value={1} />;
<Task>{gh.stars}</Task>"#,
            "a.prompt",
        );
        let module = transform(&src, "a.prompt").unwrap();
        match &module.root {
            IrExpr::Element(el) => {
                assert!(el.children.iter().any(|c| matches!(
                    c,
                    IrChild::Expr(IrExpr::Member(root, path))
                        if root == "gh" && path == &vec!["stars".to_string()]
                )));
            }
            other => panic!("expected element root: {other:?}"),
        }
    }
}
