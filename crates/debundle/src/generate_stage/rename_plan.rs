use std::path::Path;

use debundle_ecmascript::{AnnotatedTree, ExpressionExt, ModuleScope, StatementExt, Variable};
use debundle_utils::path_ext::{PathExt, bare_package_specifier};
use oxc::{
  ast::ast::{Expression, LogicalOperator},
  span::Span,
};
use rustc_hash::{FxHashMap, FxHashSet};

use super::GenerateStage;
use crate::{
  types::module::Module,
  utils::ast_path::{estree_statement, resolve_declarator},
};

/// Marker left in place of the module interop helpers the runtime injected.
pub const INTEROP_MARKER: &str = "Import Utils";

const CANONICAL_EXPORTS_KEY: &str = "exports";

/// Every edit the finalizer makes to a module's private clone, keyed by the span of the node it
/// applies to. Built against the analysed tree, whose spans the clone shares.
#[derive(Debug, Default)]
pub struct RenamePlan {
  /// New names for binding identifiers and identifier references.
  pub identifiers: FxHashMap<Span, String>,
  /// Import specifiers replacing require arguments.
  pub specifiers: FxHashMap<Span, String>,
  /// References to the module parameter whose `.<exports_key>` accesses become `.exports`.
  pub exports_objects: FxHashSet<Span>,
  pub exports_key: String,
  /// The interop helper declaration replaced by [`INTEROP_MARKER`].
  pub neutralized: Option<Span>,
  pub reconstruct_jsx: bool,
  pub warnings: Vec<String>,
}

impl RenamePlan {
  pub fn build(stage: &GenerateStage<'_, '_>, module: &Module<'_>) -> Self {
    let mut plan = Self { exports_key: stage.bootstrap.exports_key.clone(), ..Self::default() };
    let tree = stage.graph.tree_of(module);
    let Some(scope) = ModuleScope::new(tree, module.node) else {
      return plan;
    };

    for rename in &module.renames {
      let variable = module
        .closure
        .body()
        .and_then(|body| resolve_declarator(body, &rename.path))
        .and_then(|ident| tree.node_at(ident.span))
        .and_then(|binding| scope.declared_by(binding));
      match variable {
        Some(variable) => plan.rename(tree, &variable, &rename.name),
        None => plan.warn(format!(
          "Could not resolve the rename target {} in module {} ({}), keeping the original name",
          rename.path, module.id, module.path
        )),
      }
    }

    let slots = stage.bootstrap.slots;
    if let Some(require) = slots.require.and_then(|slot| scope.param(slot)) {
      plan.neutralize_interop_helper(&scope, module);
      plan.rewrite_dependencies(stage, &scope, module);
      plan.rename(tree, &require, "require");
    }

    if let Some(module_param) = slots.module.and_then(|slot| scope.param(slot)) {
      if plan.exports_key != CANONICAL_EXPORTS_KEY {
        let references = module_param.references.iter().map(|idx| tree.node(*idx).span);
        plan.exports_objects.extend(references);
      }
      plan.rename(tree, &module_param, "module");
    }
    if let Some(exports) = slots.exports.and_then(|slot| scope.param(slot)) {
      plan.rename(tree, &exports, "exports");
    }

    plan
  }

  fn rename(&mut self, tree: &AnnotatedTree<'_>, variable: &Variable, name: &str) {
    for span in variable.sites(tree) {
      self.identifiers.insert(span, name.to_string());
    }
  }

  fn warn(&mut self, message: String) {
    tracing::warn!("{message}");
    self.warnings.push(message);
  }

  /// The declaration right after the first statement, when it has the shape
  /// `var __importDefault = (this && this.__importDefault) || ...`. Its variables take the helper's
  /// name and the statement itself is replaced by a marker.
  fn neutralize_interop_helper(&mut self, scope: &ModuleScope<'_, '_>, module: &Module<'_>) {
    let Some(declaration) = module
      .closure
      .body()
      .and_then(|body| estree_statement(body, 1))
      .and_then(StatementExt::as_variable_declaration)
    else {
      return;
    };

    let tree = scope.tree();
    let mut is_helper = false;
    for declarator in &declaration.declarations {
      let Some(helper) = declarator.init.as_ref().and_then(interop_helper_name) else {
        continue;
      };
      is_helper = true;
      let variable = declarator
        .id
        .get_binding_identifier()
        .and_then(|ident| tree.node_at(ident.span))
        .and_then(|binding| scope.declared_by(binding));
      match variable {
        Some(variable) => self.rename(tree, &variable, helper),
        None => self.warn(format!(
          "Could not resolve the interop helper {helper} in module {} ({})",
          module.id, module.path
        )),
      }
    }
    if is_helper {
      self.neutralized = Some(declaration.span);
    }
  }

  fn rewrite_dependencies(
    &mut self,
    stage: &GenerateStage<'_, '_>,
    scope: &ModuleScope<'_, '_>,
    module: &Module<'_>,
  ) {
    let tree = scope.tree();
    let jsx_runtime = stage
      .options
      .jsx_runtime_module
      .as_ref()
      .and_then(|id| stage.graph.module_idx(id));

    for dependency in &module.dependencies {
      let Some(target_idx) = dependency.module_id().and_then(|id| stage.graph.module_idx(id))
      else {
        continue;
      };
      let target = &stage.graph.modules[target_idx];
      let specifier = import_specifier(stage.out_dir, module, target);
      tracing::debug!(module = %module.id, target = %target.id, %specifier, "Rewriting require");
      self.specifiers.insert(dependency.literal, specifier);

      let Some(binding) = &dependency.binding else {
        continue;
      };
      if let Some(import_name) = &target.import_name {
        let variable = tree.node_at(binding.identifier).and_then(|idx| scope.declared_by(idx));
        match variable {
          Some(variable) => self.rename(tree, &variable, import_name),
          None => self.warn(format!(
            "Could not resolve {} in module {} ({}) to rename it to {import_name}",
            binding.name, module.id, module.path
          )),
        }
      }
      if binding.direct && jsx_runtime == Some(target_idx) {
        self.reconstruct_jsx = true;
      }
    }
  }
}

/// `X` in `(this && this.X) || ...`.
fn interop_helper_name<'a>(init: &'a Expression<'a>) -> Option<&'a str> {
  let Expression::LogicalExpression(outer) = init.skip_parens() else {
    return None;
  };
  let Expression::LogicalExpression(inner) = outer.left.skip_parens() else {
    return None;
  };
  if outer.operator != LogicalOperator::Or || inner.operator != LogicalOperator::And {
    return None;
  }
  if !matches!(inner.left.skip_parens(), Expression::ThisExpression(_)) {
    return None;
  }
  let member = inner.right.skip_parens().as_static_member()?;
  Some(member.property.name.as_str())
}

/// The specifier `importer` uses for `target`: a relative path between their output files, or a
/// bare package specifier once the path walks into a package directory.
fn import_specifier(out_dir: &Path, importer: &Module<'_>, target: &Module<'_>) -> String {
  let importer_path = out_dir.join(&importer.path);
  let importer_dir = importer_path.parent().unwrap_or(out_dir);
  let specifier = out_dir.join(&target.path).specifier_from(importer_dir);
  match bare_package_specifier(&specifier) {
    Some(bare) => target.import_path.clone().unwrap_or(bare),
    None => specifier,
  }
}

