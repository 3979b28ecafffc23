use std::path::Path;

use debundle_common::{ChunkId, ModuleId};
use debundle_ecmascript::{AnnotatedTree, ClosureKind, ExpressionExt, NodeIdx, NodeKind};
use debundle_error::{BuildResult, DebundleError};
use oxc::{
  ast::ast::{ArrayExpressionElement, Expression, ObjectPropertyKind, PropertyKey},
  span::GetSpan,
};

use crate::utils::literal::{expression_kind, literal_chunk_id};

/// One `(id, closure)` pair of a module container.
#[derive(Debug, Clone, Copy)]
pub struct ContainerEntry<'a> {
  pub node: NodeIdx,
  pub closure: ClosureKind<'a>,
}

/// Reads the modules out of an array or object literal. Object keys are kept as written, array
/// elements are keyed by position. `null` entries and holes are skipped.
pub fn parse_module_container<'a>(
  tree: &AnnotatedTree<'a>,
  container: &'a Expression<'a>,
  config: &Path,
) -> BuildResult<Vec<(ModuleId, ContainerEntry<'a>)>> {
  let mut entries = vec![];
  match container.skip_parens() {
    Expression::ObjectExpression(object) => {
      for property in &object.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
          return Err(container_entry_error(tree, property.span(), "a keyed module").into());
        };
        let Some(id) = property_key_id(&property.key) else {
          return Err(container_entry_error(tree, property.key.span(), "a module id key").into());
        };
        if let Some(entry) = container_entry(tree, &id, &property.value)? {
          entries.push((id, entry));
        }
      }
    }
    Expression::ArrayExpression(array) => {
      for (index, element) in array.elements.iter().enumerate() {
        let value = match element {
          ArrayExpressionElement::Elision(_) => continue,
          ArrayExpressionElement::SpreadElement(spread) => {
            return Err(container_entry_error(tree, spread.span, "a module closure").into());
          }
          element => element.to_expression(),
        };
        let id = ModuleId::Number(index as u64);
        if let Some(entry) = container_entry(tree, &id, value)? {
          entries.push((id, entry));
        }
      }
    }
    other => {
      return Err(
        DebundleError::ModuleContainerParse {
          found: expression_kind(other).to_string(),
          config: config.to_path_buf(),
        }
        .into(),
      );
    }
  }
  Ok(entries)
}

fn property_key_id(key: &PropertyKey<'_>) -> Option<ModuleId> {
  match key {
    PropertyKey::StaticIdentifier(ident) => Some(ModuleId::from(ident.name.as_str())),
    PropertyKey::StringLiteral(lit) => Some(ModuleId::from(lit.value.as_str())),
    PropertyKey::NumericLiteral(lit) => Some(ModuleId::from_number(lit.value, lit.raw.as_deref())),
    _ => None,
  }
}

fn container_entry<'a>(
  tree: &AnnotatedTree<'a>,
  id: &ModuleId,
  value: &'a Expression<'a>,
) -> BuildResult<Option<ContainerEntry<'a>>> {
  let value = value.skip_parens();
  if matches!(value, Expression::NullLiteral(_)) {
    return Ok(None);
  }
  let node = match value {
    Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_) => {
      tree.node_at(value.span())
    }
    _ => None,
  };
  let entry =
    node.and_then(|node| Some(ContainerEntry { node, closure: tree.kind(node).as_closure()? }));
  entry.map(Some).ok_or_else(|| {
    DebundleError::TypeAssertion {
      expected: "a module closure".to_string(),
      source_text: tree.slice(value.span()).to_string(),
      module_id: id.to_string(),
      module_path: String::new(),
    }
    .into()
  })
}

fn container_entry_error(
  tree: &AnnotatedTree<'_>,
  span: oxc::span::Span,
  expected: &str,
) -> DebundleError {
  DebundleError::TypeAssertion {
    expected: expected.to_string(),
    source_text: tree.slice(span).to_string(),
    module_id: String::new(),
    module_path: String::new(),
  }
}

/// Finds the `[chunkIds, modules]` pair of a chunk file: the first array or call, in pre-order,
/// whose first element is a non-empty array of literals and whose second is an array or object.
pub fn find_module_list<'a>(
  tree: &AnnotatedTree<'a>,
) -> Option<(Vec<ChunkId>, &'a Expression<'a>)> {
  tree.nodes().find_map(|(_, node)| {
    let (first, second) = match node.kind {
      NodeKind::Array(array) if array.elements.len() >= 2 => {
        (array.elements[0].as_expression()?, array.elements[1].as_expression()?)
      }
      NodeKind::Call(call) if call.arguments.len() >= 2 => {
        (call.arguments[0].as_expression()?, call.arguments[1].as_expression()?)
      }
      _ => return None,
    };
    let Expression::ArrayExpression(ids) = first.skip_parens() else {
      return None;
    };
    let is_container = matches!(
      second.skip_parens(),
      Expression::ArrayExpression(_) | Expression::ObjectExpression(_)
    );
    if ids.elements.is_empty() || !is_container {
      return None;
    }
    let ids = ids
      .elements
      .iter()
      .map(|element| element.as_expression().and_then(literal_chunk_id))
      .collect::<Option<Vec<_>>>()?;
    Some((ids, second))
  })
}
