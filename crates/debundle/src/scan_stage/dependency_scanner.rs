use arcstr::ArcStr;
use debundle_common::{Dependency, DependencyBinding, DependencyKind, DependencyTarget, ModuleId};
use debundle_ecmascript::{AnnotatedTree, ExpressionExt, ModuleScope, NodeIdx, NodeKind};
use debundle_error::{BuildResult, DebundleError};
use oxc::{
  ast::ast::{Argument, CallExpression, Expression},
  span::{GetSpan, Span},
};

use crate::{
  types::bootstrap::ParamSlots,
  utils::literal::{literal_chunk_id, literal_module_id},
};

/// How far above a reference to `require` the call using it may sit. `require.t(x).bind(null, 5)`
/// is the deepest shape recognized.
const MAX_CALL_DEPTH: usize = 4;

/// Finds every use of the closure's require parameter that names another module or chunk.
pub fn scan_dependencies(
  tree: &AnnotatedTree<'_>,
  closure: NodeIdx,
  slots: ParamSlots,
  module_id: &ModuleId,
) -> BuildResult<Vec<Dependency>> {
  let Some(scope) = ModuleScope::new(tree, closure) else {
    return Ok(vec![]);
  };
  let Some(require) = slots.require.and_then(|slot| scope.param(slot)) else {
    return Ok(vec![]);
  };

  let mut dependencies = vec![];
  for &reference in &require.references {
    let span = tree.node(reference).span;
    let calls = tree
      .ancestors(reference)
      .take(MAX_CALL_DEPTH)
      .filter_map(|idx| tree.kind(idx).as_call().map(|call| (idx, call)));
    for (call_idx, call) in calls {
      if let Some(dependency) = classify_call(tree, call_idx, call, span, module_id)? {
        dependencies.push(dependency);
        break;
      }
    }
  }

  tracing::debug!(
    module = %module_id,
    require = %require.name,
    count = dependencies.len(),
    "Scanned dependencies"
  );
  Ok(dependencies)
}

/// Reads `call` as one of the require shapes, where `require` is the span of the reference the
/// walk started from.
fn classify_call(
  tree: &AnnotatedTree<'_>,
  call_idx: NodeIdx,
  call: &CallExpression<'_>,
  require: Span,
  module_id: &ModuleId,
) -> BuildResult<Option<Dependency>> {
  let callee = call.callee.skip_parens();

  // require(5)
  if callee.as_identifier().is_some_and(|ident| ident.span == require) {
    let argument = match call.arguments.as_slice() {
      [] => return Ok(None),
      [argument] => argument,
      arguments => {
        return Err(
          DebundleError::RequireArity {
            start: call.span.start,
            end: call.span.end,
            count: arguments.len(),
            source_text: tree.slice(call.span).to_string(),
          }
          .into(),
        );
      }
    };
    let Some(id) = argument.as_expression().and_then(literal_module_id) else {
      tracing::debug!(
        module = %module_id,
        call = tree.slice(call.span),
        "Skipping require with a non-literal argument"
      );
      return Ok(None);
    };
    return Ok(Some(Dependency {
      kind: DependencyKind::Direct,
      target: DependencyTarget::Module(id),
      literal: argument.span(),
      binding: binding_of(tree, call_idx),
    }));
  }

  let Some(member) = callee.as_static_member() else {
    return Ok(None);
  };

  // require.e(5)
  if member.property.name == "e" && is_reference(&member.object, require) {
    let literal = call.arguments.first();
    let chunk = literal.and_then(Argument::as_expression).and_then(literal_chunk_id);
    return Ok(literal.zip(chunk).map(|(literal, id)| Dependency {
      kind: DependencyKind::ChunkLoad,
      target: DependencyTarget::Chunk(id),
      literal: literal.span(),
      binding: None,
    }));
  }

  // require.t.bind(null, 5) and require.t(x).bind(null, 5)
  if member.property.name == "bind" && is_interop_helper(&member.object, require) {
    let literal = call.arguments.get(1);
    let id = literal.and_then(Argument::as_expression).and_then(literal_module_id);
    return Ok(literal.zip(id).map(|(literal, id)| Dependency {
      kind: DependencyKind::Interop,
      target: DependencyTarget::Module(id),
      literal: literal.span(),
      binding: binding_of(tree, call_idx),
    }));
  }

  Ok(None)
}

fn is_reference(expr: &Expression<'_>, require: Span) -> bool {
  expr.skip_parens().as_identifier().is_some_and(|ident| ident.span == require)
}

/// `require.t` or a call of it.
fn is_interop_helper(expr: &Expression<'_>, require: Span) -> bool {
  let expr = match expr.skip_parens() {
    Expression::CallExpression(call) => &call.callee,
    expr => expr,
  };
  expr
    .skip_parens()
    .as_static_member()
    .is_some_and(|member| member.property.name == "t" && is_reference(&member.object, require))
}

/// The variable the result of the call at `call_idx` is stored in: `var a = require(5)` binds
/// directly, `var a = interop(require(5))` through one wrapping call.
fn binding_of(tree: &AnnotatedTree<'_>, call_idx: NodeIdx) -> Option<DependencyBinding> {
  let mut current = call_idx;
  let mut direct = true;
  loop {
    let span = tree.node(current).span;
    let parent = tree.ancestors(current).find(|idx| {
      let node = tree.node(*idx);
      match node.kind {
        NodeKind::Parenthesized(_) => false,
        NodeKind::Other => node.span != span,
        _ => true,
      }
    })?;
    match tree.kind(parent) {
      NodeKind::Declarator(declarator) => {
        let init = declarator.init.as_ref()?;
        if init.skip_parens().span() != span {
          return None;
        }
        let ident = declarator.id.get_binding_identifier()?;
        return Some(DependencyBinding {
          name: ArcStr::from(ident.name.as_str()),
          identifier: ident.span,
          direct,
        });
      }
      NodeKind::Call(call)
        if direct && call.arguments.iter().any(|argument| argument.span() == span) =>
      {
        direct = false;
        current = parent;
      }
      _ => return None,
    }
  }
}

#[cfg(test)]
mod tests {
  use debundle_common::{ChunkId, DependencyKind, DependencyTarget, ModuleId};
  use debundle_ecmascript::{AnnotatedTree, EcmaCompiler, NodeIdx};
  use debundle_error::DebundleError;
  use oxc::allocator::Allocator;

  use super::scan_dependencies;
  use crate::types::bootstrap::ParamSlots;

  fn first_closure(tree: &AnnotatedTree<'_>) -> NodeIdx {
    tree.nodes().find(|(_, node)| node.kind.as_closure().is_some()).unwrap().0
  }

  #[test]
  fn classifies_require_shapes() {
    let allocator = Allocator::default();
    let tree = EcmaCompiler::parse_and_annotate(
      &allocator,
      r#"[function (e, t, n) {
        var r = n(3), o = n.n(r);
        var i = Object(n("./b.js"));
        n.e(4).then(n.t.bind(null, 7));
        n.e("lazy").then(n.t(9, 7).bind(null, 9));
        n(someName);
        n.d(t, "a", function () { return r; });
      }]"#,
    )
    .unwrap();
    let deps =
      scan_dependencies(&tree, first_closure(&tree), ParamSlots::default(), &ModuleId::Number(0))
        .unwrap();

    let targets = deps.iter().map(|dep| (dep.kind, dep.target.clone())).collect::<Vec<_>>();
    assert_eq!(
      targets,
      vec![
        (DependencyKind::Direct, DependencyTarget::Module(ModuleId::Number(3))),
        (DependencyKind::Direct, DependencyTarget::Module(ModuleId::from("./b.js"))),
        (DependencyKind::ChunkLoad, DependencyTarget::Chunk(ChunkId::from("4"))),
        (DependencyKind::Interop, DependencyTarget::Module(ModuleId::Number(7))),
        (DependencyKind::ChunkLoad, DependencyTarget::Chunk(ChunkId::from("lazy"))),
        (DependencyKind::Interop, DependencyTarget::Module(ModuleId::Number(9))),
      ]
    );

    let direct = deps[0].binding.as_ref().unwrap();
    assert_eq!((direct.name.as_str(), direct.direct), ("r", true));
    let wrapped = deps[1].binding.as_ref().unwrap();
    assert_eq!((wrapped.name.as_str(), wrapped.direct), ("i", false));
    assert!(deps[2].binding.is_none());
    assert_eq!(tree.slice(deps[1].literal), "\"./b.js\"");
  }

  #[test]
  fn shadowed_require_is_not_a_dependency() {
    let allocator = Allocator::default();
    let tree = EcmaCompiler::parse_and_annotate(
      &allocator,
      "[function (e, t, n) { function inner(n) { return n(1); } n(2); }]",
    )
    .unwrap();
    let deps =
      scan_dependencies(&tree, first_closure(&tree), ParamSlots::default(), &ModuleId::Number(0))
        .unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].module_id(), Some(&ModuleId::Number(2)));
  }

  #[test]
  fn closures_without_require_have_no_dependencies() {
    let allocator = Allocator::default();
    let tree =
      EcmaCompiler::parse_and_annotate(&allocator, "[function (e, t) { t.a = 1; }]").unwrap();
    let deps =
      scan_dependencies(&tree, first_closure(&tree), ParamSlots::default(), &ModuleId::Number(0))
        .unwrap();
    assert!(deps.is_empty());
  }

  #[test]
  fn rejects_require_with_two_arguments() {
    let allocator = Allocator::default();
    let tree =
      EcmaCompiler::parse_and_annotate(&allocator, "[function (e, t, n) { n(1, 2); }]").unwrap();
    let err =
      scan_dependencies(&tree, first_closure(&tree), ParamSlots::default(), &ModuleId::Number(0))
        .unwrap_err();
    let Some(DebundleError::RequireArity { count, source_text, .. }) = err.find_kind() else {
      panic!("unexpected error: {err}");
    };
    assert_eq!(*count, 2);
    assert_eq!(source_text, "n(1, 2)");
  }
}
