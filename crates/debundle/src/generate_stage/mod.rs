mod jsx_reconstructor;
mod module_finalizer;
mod rename_plan;

use std::path::Path;

use debundle_common::{DebundleOptions, RenderMode};
use debundle_ecmascript::{AstSnippet, ClosureKind, EcmaCompiler};
use debundle_error::BuildResult;
use debundle_utils::concat_string;
use oxc::{
  allocator::{Allocator, CloneIn},
  ast::ast::Expression,
  ast_visit::VisitMut,
  span::SPAN,
};

use self::{
  jsx_reconstructor::{JsxContext, JsxReconstructor},
  module_finalizer::ModuleFinalizer,
  rename_plan::RenamePlan,
};
use crate::{
  ModuleGraph,
  types::{bootstrap::Bootstrap, module::Module},
};

pub struct RenderedModule {
  pub code: String,
  pub warnings: Vec<String>,
}

/// A module's output file before it is written.
pub struct RenderedAsset {
  pub filename: String,
  pub code: String,
}

pub struct GenerateOutput {
  pub assets: Vec<RenderedAsset>,
  pub warnings: Vec<String>,
}

pub struct GenerateStage<'me, 'a> {
  graph: &'me ModuleGraph<'a>,
  bootstrap: &'me Bootstrap<'a>,
  options: &'me DebundleOptions,
  out_dir: &'me Path,
}

impl<'me, 'a> GenerateStage<'me, 'a> {
  pub fn new(
    graph: &'me ModuleGraph<'a>,
    bootstrap: &'me Bootstrap<'a>,
    options: &'me DebundleOptions,
    out_dir: &'me Path,
  ) -> Self {
    Self { graph, bootstrap, options, out_dir }
  }

  /// Renders every module. Nothing is returned unless all of them render.
  pub fn generate(&self) -> BuildResult<GenerateOutput> {
    let mut assets = Vec::with_capacity(self.graph.modules.len());
    let mut warnings = vec![];
    let mut errors = vec![];
    for module in &self.graph.modules {
      match self.render_module(module, RenderMode::Statements) {
        Ok(rendered) => {
          warnings.extend(rendered.warnings);
          assets.push(RenderedAsset { filename: module.path.clone(), code: rendered.code });
        }
        Err(err) => errors.extend(err.0),
      }
    }
    if !errors.is_empty() {
      return Err(errors.into());
    }
    Ok(GenerateOutput { assets, warnings })
  }

  /// Renders `module` from a private clone of its closure, so rendering twice gives the same text.
  pub fn render_module(
    &self,
    module: &Module<'a>,
    mode: RenderMode,
  ) -> BuildResult<RenderedModule> {
    let plan = RenamePlan::build(self, module);

    let allocator = Allocator::default();
    let snippet = AstSnippet::new(&allocator);
    let mut closure = match module.closure {
      ClosureKind::Function(func) => {
        Expression::FunctionExpression(snippet.builder.alloc(func.clone_in(&allocator)))
      }
      ClosureKind::Arrow(arrow) => {
        Expression::ArrowFunctionExpression(snippet.builder.alloc(arrow.clone_in(&allocator)))
      }
    };

    ModuleFinalizer::new(&snippet, &plan).visit_expression(&mut closure);

    if plan.reconstruct_jsx {
      let ctx = JsxContext { module_id: &module.id, module_path: &module.path };
      let mut reconstructor = JsxReconstructor::new(&snippet, ctx);
      reconstructor.visit_expression(&mut closure);
      let errors = reconstructor.into_errors();
      if !errors.is_empty() {
        return Err(errors.into());
      }
    }

    let program = match (mode, closure) {
      (RenderMode::Statements, Expression::FunctionExpression(func)) => {
        match func.unbox().body {
          Some(body) => {
            let body = body.unbox();
            snippet.program(body.directives, body.statements)
          }
          None => snippet.program(snippet.builder.vec(), snippet.builder.vec()),
        }
      }
      (RenderMode::Statements, Expression::ArrowFunctionExpression(arrow)) => {
        let body = arrow.unbox().body.unbox();
        snippet.program(body.directives, body.statements)
      }
      (_, closure) => {
        let statement = snippet.builder.statement_expression(SPAN, closure);
        snippet.program(snippet.builder.vec(), snippet.builder.vec1(statement))
      }
    };

    let code = EcmaCompiler::print(&program);
    let code = match &module.comment {
      Some(comment) => concat_string!("/*\n", comment, "\n*/\n", code),
      None => code,
    };
    Ok(RenderedModule { code, warnings: plan.warnings })
  }
}
