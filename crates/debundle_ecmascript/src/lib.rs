mod annotated_tree;
mod ast_ext;
mod ast_snippet;
mod ecma_compiler;
mod module_scope;

pub use crate::{
  annotated_tree::{
    AnnotatedTree, Node, NodeIdx,
    node_kind::{ClosureKind, NodeKind},
  },
  ast_ext::{expression_ext::ExpressionExt, statement_ext::StatementExt},
  ast_snippet::AstSnippet,
  ecma_compiler::EcmaCompiler,
  module_scope::{ModuleScope, Variable},
};
