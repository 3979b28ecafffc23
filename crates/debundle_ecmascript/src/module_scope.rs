use oxc::{
  span::Span,
  syntax::{scope::ScopeId, symbol::SymbolId},
};

use crate::{AnnotatedTree, ClosureKind, NodeIdx, NodeKind};

/// A variable as seen from inside one module closure.
#[derive(Debug, Clone)]
pub struct Variable {
  pub symbol: SymbolId,
  pub name: String,
  /// Binding identifier nodes, usually exactly one.
  pub declarations: Vec<NodeIdx>,
  /// Identifier reference nodes in source order.
  pub references: Vec<NodeIdx>,
}

impl Variable {
  /// Spans of the declaration and every reference, the sites a rename has to rewrite.
  pub fn sites<'t>(&'t self, tree: &'t AnnotatedTree<'_>) -> impl Iterator<Item = Span> + 't {
    self.declarations.iter().chain(&self.references).map(|idx| tree.node(*idx).span)
  }
}

/// Lexical lookup bounded by a module closure. Modules never see each other's variables, and
/// names declared outside the closure are not found either.
pub struct ModuleScope<'t, 'a> {
  tree: &'t AnnotatedTree<'a>,
  closure: NodeIdx,
  closure_kind: ClosureKind<'a>,
  scope: ScopeId,
}

impl<'t, 'a> ModuleScope<'t, 'a> {
  /// `closure` must be a function or arrow function node.
  pub fn new(tree: &'t AnnotatedTree<'a>, closure: NodeIdx) -> Option<Self> {
    let closure_kind = tree.kind(closure).as_closure()?;
    let scope = closure_kind.scope_id()?;
    Some(Self { tree, closure, closure_kind, scope })
  }

  pub fn tree(&self) -> &'t AnnotatedTree<'a> {
    self.tree
  }

  pub fn closure(&self) -> NodeIdx {
    self.closure
  }

  pub fn closure_kind(&self) -> ClosureKind<'a> {
    self.closure_kind
  }

  /// Resolves `name` from the innermost scope around `position` outwards, stopping at the closure.
  pub fn lookup(&self, position: NodeIdx, name: &str) -> Option<Variable> {
    if !self.tree.contains(self.closure, position) {
      return None;
    }
    let start = if position == self.closure { self.scope } else { self.tree.node(position).scope };
    let scoping = &self.tree.scoping;
    for scope in scoping.scope_ancestors(start) {
      if let Some(symbol) = scoping.get_binding(scope, name) {
        return Some(self.variable(symbol));
      }
      if scope == self.scope {
        break;
      }
    }
    None
  }

  /// The variable bound by the closure parameter at `slot`.
  pub fn param(&self, slot: usize) -> Option<Variable> {
    let name = self.closure_kind.param_name(slot)?;
    self.lookup(self.closure, name)
  }

  /// The variable declared by the binding identifier node `binding`.
  pub fn declared_by(&self, binding: NodeIdx) -> Option<Variable> {
    let NodeKind::Binding(ident) = self.tree.kind(binding) else {
      return None;
    };
    self.lookup(binding, &ident.name)
  }

  fn variable(&self, symbol: SymbolId) -> Variable {
    let sites = self.tree.symbol_sites(symbol);
    Variable {
      symbol,
      name: self.tree.scoping.symbol_name(symbol).to_string(),
      declarations: sites.map(|sites| sites.declarations.clone()).unwrap_or_default(),
      references: sites.map(|sites| sites.references.clone()).unwrap_or_default(),
    }
  }
}
