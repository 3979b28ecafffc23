use std::cell::Cell;

use oxc::{
  ast::{AstKind, ast::Program},
  ast_visit::Visit,
  semantic::Scoping,
  span::GetSpan,
  syntax::{
    scope::{ScopeFlags, ScopeId},
    symbol::SymbolId,
  },
};
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

use super::{Node, NodeIdx, SymbolSites, node_kind::NodeKind};

pub struct TreeAnnotator<'me, 'a> {
  scoping: &'me Scoping,
  nodes: IndexVec<NodeIdx, Node<'a>>,
  symbols: FxHashMap<SymbolId, SymbolSites>,
  ancestors: Vec<NodeIdx>,
  scopes: Vec<ScopeId>,
}

impl<'me, 'a> TreeAnnotator<'me, 'a> {
  pub fn new(scoping: &'me Scoping) -> Self {
    Self {
      scoping,
      nodes: IndexVec::new(),
      symbols: FxHashMap::default(),
      ancestors: vec![],
      scopes: vec![scoping.root_scope_id()],
    }
  }

  pub fn annotate(
    mut self,
    program: &'a Program<'a>,
  ) -> (IndexVec<NodeIdx, Node<'a>>, FxHashMap<SymbolId, SymbolSites>) {
    self.visit_program(program);
    (self.nodes, self.symbols)
  }

  fn current_scope(&self) -> ScopeId {
    self.scopes.last().copied().unwrap_or_else(|| self.scoping.root_scope_id())
  }
}

impl<'a> Visit<'a> for TreeAnnotator<'_, 'a> {
  fn enter_node(&mut self, kind: AstKind<'a>) {
    let node = Node {
      kind: NodeKind::from_ast(kind),
      span: kind.span(),
      parent: self.ancestors.last().copied(),
      end: self.nodes.next_idx(),
      scope: self.current_scope(),
    };
    let idx = self.nodes.push(node);

    match kind {
      AstKind::BindingIdentifier(ident) => {
        if let Some(symbol) = ident.symbol_id.get() {
          self.symbols.entry(symbol).or_default().declarations.push(idx);
        }
      }
      AstKind::IdentifierReference(ident) => {
        let symbol = ident
          .reference_id
          .get()
          .and_then(|reference| self.scoping.get_reference(reference).symbol_id());
        if let Some(symbol) = symbol {
          self.symbols.entry(symbol).or_default().references.push(idx);
        }
      }
      _ => {}
    }

    self.ancestors.push(idx);
  }

  fn leave_node(&mut self, _kind: AstKind<'a>) {
    if let Some(idx) = self.ancestors.pop() {
      self.nodes[idx].end = self.nodes.next_idx();
    }
  }

  fn enter_scope(&mut self, _flags: ScopeFlags, scope_id: &Cell<Option<ScopeId>>) {
    let scope = scope_id.get().unwrap_or_else(|| self.current_scope());
    self.scopes.push(scope);
  }

  fn leave_scope(&mut self) {
    self.scopes.pop();
  }
}
