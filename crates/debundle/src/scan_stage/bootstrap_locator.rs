use std::path::Path;

use debundle_common::ModuleId;
use debundle_ecmascript::{AnnotatedTree, ExpressionExt, NodeIdx, NodeKind};
use debundle_error::{BuildResult, DebundleError};
use oxc::{
  ast::ast::{AssignmentTarget, CallExpression, Expression, FunctionType},
  span::GetSpan,
};

use crate::{
  types::bootstrap::{Bootstrap, ParamSlots},
  utils::literal::literal_module_id,
};

const DEFAULT_EXPORTS_KEY: &str = "exports";

/// Finds the bundle runtime in the entry tree.
///
/// The runtime is the first function expression, in pre-order, that takes a single parameter and
/// contains a `modules[id].call(thisArg, module, exports, require)` call. The last three arguments
/// of that call give the parameter order of every module closure.
pub fn locate_bootstrap<'a>(
  tree: &AnnotatedTree<'a>,
  bundle: &Path,
  config: &Path,
) -> BuildResult<Bootstrap<'a>> {
  let not_found = || DebundleError::BootstrapNotFound {
    bundle: bundle.to_path_buf(),
    config: config.to_path_buf(),
  };

  let (harness, module_call, call) = tree
    .nodes()
    .filter(|(_, node)| is_harness_candidate(node.kind))
    .find_map(|(idx, _)| find_module_call(tree, idx).map(|(call_idx, call)| (idx, call_idx, call)))
    .ok_or_else(not_found)?;

  let (slots, exports_key) = param_slots(call);
  let container = module_container(tree, harness, config)?;

  let require_name = slots
    .require
    .and_then(|slot| call.arguments.get(slot + 1))
    .and_then(|arg| arg.as_expression())
    .and_then(|expr| expr.skip_parens().as_identifier())
    .map(|ident| ident.name.as_str());
  let (public_path, entry_module) =
    require_name.map(|name| runtime_properties(tree, harness, name)).unwrap_or_default();

  tracing::info!(
    ?slots,
    %exports_key,
    ?public_path,
    entry = ?entry_module,
    "Found the bundle runtime"
  );

  Ok(Bootstrap {
    harness,
    module_call,
    container,
    slots,
    exports_key,
    public_path: public_path.unwrap_or_default(),
    entry_module,
  })
}

fn is_harness_candidate(kind: NodeKind<'_>) -> bool {
  matches!(
    kind,
    NodeKind::Function(func)
      if func.r#type == FunctionType::FunctionExpression
        && func.params.items.len() == 1
        && func.body.is_some()
  )
}

/// `X[*].call(A, B, C, D)` inside `harness`.
fn find_module_call<'a>(
  tree: &AnnotatedTree<'a>,
  harness: NodeIdx,
) -> Option<(NodeIdx, &'a CallExpression<'a>)> {
  tree.descendants(harness).find_map(|idx| {
    let call = tree.kind(idx).as_call()?;
    let member = call.callee.skip_parens().as_static_member()?;
    let is_module_call = member.property.name == "call"
      && matches!(member.object.skip_parens(), Expression::ComputedMemberExpression(_))
      && call.arguments.len() == 4;
    is_module_call.then_some((idx, call))
  })
}

/// Roles of the last three arguments of the module call. The argument that reads a property off
/// another argument is the exports object, that other argument is the module, and the remaining
/// identifier is require.
fn param_slots(call: &CallExpression<'_>) -> (ParamSlots, String) {
  let args = call
    .arguments
    .iter()
    .skip(1)
    .map(|arg| arg.as_expression().map(ExpressionExt::skip_parens))
    .collect::<Vec<_>>();

  let exports = args.iter().enumerate().find_map(|(slot, arg)| {
    let member = arg.and_then(ExpressionExt::as_static_member)?;
    let object = member.object.skip_parens().as_identifier()?;
    Some((slot, object.name.as_str(), member.property.name.as_str()))
  });
  let Some((exports_slot, module_name, exports_key)) = exports else {
    return (ParamSlots::default(), DEFAULT_EXPORTS_KEY.to_string());
  };

  let mut slots = ParamSlots { module: None, exports: Some(exports_slot), require: None };
  for (slot, arg) in args.iter().enumerate() {
    let Some(ident) = arg.and_then(ExpressionExt::as_identifier) else {
      continue;
    };
    if ident.name == module_name {
      slots.module.get_or_insert(slot);
    } else {
      slots.require.get_or_insert(slot);
    }
  }
  (slots, exports_key.to_string())
}

/// The first argument of the call that invokes the runtime.
fn module_container<'a>(
  tree: &AnnotatedTree<'a>,
  harness: NodeIdx,
  config: &Path,
) -> BuildResult<&'a Expression<'a>> {
  let harness_span = tree.node(harness).span;
  let invocation = tree
    .parent_skipping_parens(harness)
    .and_then(|parent| tree.kind(parent).as_call())
    .filter(|call| call.callee.skip_parens().span() == harness_span);

  let container =
    invocation.and_then(|call| call.arguments.first()).and_then(|arg| arg.as_expression());
  container.ok_or_else(|| {
    let found = invocation.map_or("runtime that is never called", |_| "call without arguments");
    DebundleError::ModuleContainerParse { found: found.to_string(), config: config.to_path_buf() }
      .into()
  })
}

/// `require.p = "..."` and `require.s = <id>` assignments inside the runtime.
fn runtime_properties(
  tree: &AnnotatedTree<'_>,
  harness: NodeIdx,
  require_name: &str,
) -> (Option<String>, Option<ModuleId>) {
  let mut public_path = None;
  let mut entry_module = None;
  for idx in tree.descendants(harness) {
    let NodeKind::Assignment(assign) = tree.kind(idx) else {
      continue;
    };
    let AssignmentTarget::StaticMemberExpression(member) = &assign.left else {
      continue;
    };
    let on_require = member.object.as_identifier().is_some_and(|ident| ident.name == require_name);
    if !on_require {
      continue;
    }
    match member.property.name.as_str() {
      "p" if public_path.is_none() => {
        public_path =
          assign.right.skip_parens().as_string_literal().map(|lit| lit.value.to_string());
      }
      "s" if entry_module.is_none() => {
        entry_module = literal_module_id(&assign.right);
      }
      _ => {}
    }
  }
  (public_path, entry_module)
}
