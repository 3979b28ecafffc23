use debundle_common::ModuleId;
use debundle_ecmascript::{AstSnippet, EcmaCompiler, ExpressionExt};
use debundle_error::DebundleError;
use oxc::{
  allocator::{self, Box, TakeIn},
  ast::ast::{
    Argument, ArrayExpressionElement, CallExpression, Expression, JSXChild, JSXElement,
    JSXElementName, ObjectPropertyKind, PropertyKey,
  },
  ast_visit::{VisitMut, walk_mut},
  span::{GetSpan, Span},
};
use rustc_hash::FxHashMap;

const FACTORY_NAMES: [&str; 2] = ["jsx", "jsxs"];
const MERGE_HELPERS: [&str; 6] =
  ["__assign", "_extends", "merge", "_objectSpread", "_objectSpread2", "Object.assign"];

/// The module being rewritten, named in error messages.
#[derive(Debug, Clone, Copy)]
pub struct JsxContext<'me> {
  pub module_id: &'me ModuleId,
  pub module_path: &'me str,
}

/// Turns `jsx("div", {id: "x", children: ...})` calls back into `<div id="x">...</div>`. Calls are
/// rewritten bottom-up, so elements nested in props or children are already JSX when their parent
/// is built.
///
/// An element with no children is always printed self-closing. Whether the source wrote `<a></a>`
/// or `<a />` is not visible in the compiled call.
pub struct JsxReconstructor<'me, 'ast> {
  snippet: &'me AstSnippet<'ast>,
  ctx: JsxContext<'me>,
  errors: Vec<anyhow::Error>,
}

enum PropItem<'ast> {
  Spread(Expression<'ast>, Span),
  Attribute(String, Expression<'ast>, Span),
}

impl<'me, 'ast> JsxReconstructor<'me, 'ast> {
  pub fn new(snippet: &'me AstSnippet<'ast>, ctx: JsxContext<'me>) -> Self {
    Self { snippet, ctx, errors: vec![] }
  }

  pub fn into_errors(self) -> Vec<anyhow::Error> {
    self.errors
  }

  fn type_assertion(&self, expected: &str, found: &Expression<'_>) -> anyhow::Error {
    self.type_assertion_text(expected, EcmaCompiler::print_expression(found))
  }

  fn type_assertion_text(&self, expected: &str, source_text: String) -> anyhow::Error {
    DebundleError::TypeAssertion {
      expected: expected.to_string(),
      source_text,
      module_id: self.ctx.module_id.to_string(),
      module_path: self.ctx.module_path.to_string(),
    }
    .into()
  }

  fn reconstruct(
    &self,
    call: &mut CallExpression<'ast>,
  ) -> anyhow::Result<Option<Box<'ast, JSXElement<'ast>>>> {
    let is_factory = call.callee.callee_name().is_some_and(|name| FACTORY_NAMES.contains(&name));
    if !is_factory
      || call.arguments.is_empty()
      || call.arguments.len() > 3
      || call.arguments.iter().any(Argument::is_spread)
    {
      return Ok(None);
    }

    let span = call.span;
    let mut arguments =
      call.arguments.take_in(self.snippet.alloc()).into_iter().filter_map(argument_expression);
    let name = arguments.next().map(|name| self.element_name(&name, span));
    let props = arguments.next();
    let key = arguments.next().filter(|key| !key.is_void_zero());
    let Some(name) = name else {
      return Ok(None);
    };

    let mut items = vec![];
    match props.map(without_parens) {
      None | Some(Expression::NullLiteral(_)) => {}
      Some(props) if props.is_void_zero() => {}
      Some(Expression::ObjectExpression(object)) => self.collect_props(object.unbox(), &mut items)?,
      Some(Expression::CallExpression(merge)) if is_merge_helper(&merge.callee) => {
        let merge = merge.unbox();
        for argument in merge.arguments {
          let argument = match argument {
            Argument::SpreadElement(spread) => {
              let text = format!("...{}", EcmaCompiler::print_expression(&spread.argument));
              return Err(self.type_assertion_text("an object or identifier", text));
            }
            argument => argument.into_expression(),
          };
          match without_parens(argument) {
            Expression::ObjectExpression(object) => self.collect_props(object.unbox(), &mut items)?,
            Expression::Identifier(ident) => {
              let span = ident.span;
              items.push(PropItem::Spread(Expression::Identifier(ident), span));
            }
            other => return Err(self.type_assertion("an object or identifier", &other)),
          }
        }
      }
      Some(props) => {
        let span = props.span();
        items.push(PropItem::Spread(props, span));
      }
    }

    let mut attributes = self.snippet.builder.vec();
    let mut children = self.snippet.builder.vec();
    if let Some(key) = key {
      let span = key.span();
      attributes.push(self.snippet.jsx_attribute("key", key, span));
    }
    for item in items {
      match item {
        PropItem::Spread(argument, span) => {
          attributes.push(self.snippet.jsx_spread_attribute(argument, span));
        }
        PropItem::Attribute(name, value, _) if name == "children" => {
          self.collect_children(value, &mut children);
        }
        PropItem::Attribute(name, value, span) => {
          attributes.push(self.snippet.jsx_attribute(&name, value, span));
        }
      }
    }

    Ok(Some(self.snippet.jsx_element(name, attributes, children, span)))
  }

  /// Adds the properties of `object`. A repeated key replaces the earlier value but keeps the
  /// earlier position.
  fn collect_props(
    &self,
    object: oxc::ast::ast::ObjectExpression<'ast>,
    items: &mut Vec<PropItem<'ast>>,
  ) -> anyhow::Result<()> {
    let mut positions = items
      .iter()
      .enumerate()
      .filter_map(|(index, item)| match item {
        PropItem::Attribute(name, ..) => Some((name.clone(), index)),
        PropItem::Spread(..) => None,
      })
      .collect::<FxHashMap<_, _>>();

    for property in object.properties {
      let property = match property {
        ObjectPropertyKind::ObjectProperty(property) => property.unbox(),
        ObjectPropertyKind::SpreadProperty(spread) => {
          let spread = spread.unbox();
          items.push(PropItem::Spread(spread.argument, spread.span));
          continue;
        }
      };
      let name = match &property.key {
        PropertyKey::StaticIdentifier(ident) => ident.name.to_string(),
        PropertyKey::StringLiteral(lit) => lit.value.to_string(),
        key => {
          let text = key.as_expression().map(EcmaCompiler::print_expression).unwrap_or_default();
          return Err(self.type_assertion_text("a named property", text));
        }
      };
      let item = PropItem::Attribute(name.clone(), property.value, property.span);
      match positions.get(&name) {
        Some(&index) => items[index] = item,
        None => {
          positions.insert(name, items.len());
          items.push(item);
        }
      }
    }
    Ok(())
  }

  fn collect_children(
    &self,
    value: Expression<'ast>,
    children: &mut allocator::Vec<'ast, JSXChild<'ast>>,
  ) {
    match without_parens(value) {
      Expression::ArrayExpression(array) => {
        for element in array.unbox().elements {
          match element {
            ArrayExpressionElement::Elision(_) => {}
            ArrayExpressionElement::SpreadElement(spread) => {
              let spread = spread.unbox();
              children.push(self.snippet.jsx_spread_child(spread.argument, spread.span));
            }
            element => {
              let child = element.into_expression();
              if !child.is_void_zero() && !matches!(child, Expression::NullLiteral(_)) {
                children.push(self.snippet.jsx_child(child));
              }
            }
          }
        }
      }
      Expression::NullLiteral(_) => {}
      child if child.is_void_zero() => {}
      child => children.push(self.snippet.jsx_child(child)),
    }
  }

  fn element_name(&self, expr: &Expression<'ast>, span: Span) -> JSXElementName<'ast> {
    match expr.skip_parens() {
      Expression::StringLiteral(lit) => return self.snippet.jsx_name(&lit.value, span),
      Expression::Identifier(ident) => return self.snippet.jsx_name(&ident.name, span),
      Expression::StaticMemberExpression(_) => {
        if let Some(name) =
          member_path(expr).and_then(|path| self.snippet.jsx_member_name(&path, span))
        {
          return name;
        }
      }
      _ => {}
    }
    self.snippet.jsx_name(&EcmaCompiler::print_expression(expr), span)
  }
}

impl<'ast> VisitMut<'ast> for JsxReconstructor<'_, 'ast> {
  fn visit_expression(&mut self, expr: &mut Expression<'ast>) {
    walk_mut::walk_expression(self, expr);

    let Expression::CallExpression(call) = expr else {
      return;
    };
    match self.reconstruct(call) {
      Ok(Some(element)) => *expr = Expression::JSXElement(element),
      Ok(None) => {}
      Err(err) => self.errors.push(err),
    }
  }
}

fn argument_expression(argument: Argument<'_>) -> Option<Expression<'_>> {
  match argument {
    Argument::SpreadElement(_) => None,
    argument => Some(argument.into_expression()),
  }
}

fn without_parens(mut expr: Expression<'_>) -> Expression<'_> {
  while let Expression::ParenthesizedExpression(paren) = expr {
    expr = paren.unbox().expression;
  }
  expr
}

fn is_merge_helper(callee: &Expression<'_>) -> bool {
  callee.qualified_callee_name().is_some_and(|name| MERGE_HELPERS.contains(&name.as_str()))
}

/// `["a", "b", "c"]` for `a.b.c`.
fn member_path<'e>(expr: &'e Expression<'_>) -> Option<Vec<&'e str>> {
  match expr.skip_parens() {
    Expression::Identifier(ident) => Some(vec![ident.name.as_str()]),
    Expression::StaticMemberExpression(member) => {
      let mut path = member_path(&member.object)?;
      path.push(member.property.name.as_str());
      Some(path)
    }
    _ => None,
  }
}
