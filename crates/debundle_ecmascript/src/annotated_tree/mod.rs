mod annotator;
pub mod node_kind;

use oxc::{
  ast::ast::Program,
  semantic::Scoping,
  span::{GetSpan, Span},
  syntax::{scope::ScopeId, symbol::SymbolId},
};
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

use self::{annotator::TreeAnnotator, node_kind::NodeKind};

oxc_index::define_index_type! {
  pub struct NodeIdx = u32;
}

#[derive(Debug)]
pub struct Node<'a> {
  pub kind: NodeKind<'a>,
  pub span: Span,
  pub parent: Option<NodeIdx>,
  /// One past the last descendant. Descendants of `n` are exactly the nodes in `n + 1..end`.
  pub end: NodeIdx,
  /// Innermost scope the node sits in. A function node sits in its enclosing scope, its parameters
  /// and body in its own.
  pub scope: ScopeId,
}

#[derive(Debug, Default)]
pub struct SymbolSites {
  pub declarations: Vec<NodeIdx>,
  pub references: Vec<NodeIdx>,
}

/// A parsed program plus the lookup tables oxc nodes don't carry: parent links, subtree ranges,
/// enclosing scopes and per-symbol declaration/reference sites. Nodes are stored in pre-order.
pub struct AnnotatedTree<'a> {
  pub program: &'a Program<'a>,
  pub scoping: Scoping,
  nodes: IndexVec<NodeIdx, Node<'a>>,
  symbols: FxHashMap<SymbolId, SymbolSites>,
  by_span: FxHashMap<Span, NodeIdx>,
}

impl<'a> AnnotatedTree<'a> {
  pub fn new(program: &'a Program<'a>, scoping: Scoping) -> Self {
    let (nodes, symbols) = TreeAnnotator::new(&scoping).annotate(program);
    let mut by_span = FxHashMap::default();
    for (idx, node) in nodes.iter_enumerated() {
      if matches!(node.kind, NodeKind::Function(_) | NodeKind::Arrow(_) | NodeKind::Binding(_)) {
        by_span.entry(node.span).or_insert(idx);
      }
    }
    Self { program, scoping, nodes, symbols, by_span }
  }

  pub fn source(&self) -> &'a str {
    self.program.source_text
  }

  pub fn root(&self) -> NodeIdx {
    NodeIdx::from_usize(0)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn node(&self, idx: NodeIdx) -> &Node<'a> {
    &self.nodes[idx]
  }

  pub fn kind(&self, idx: NodeIdx) -> NodeKind<'a> {
    self.nodes[idx].kind
  }

  pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Node<'a>)> {
    self.nodes.iter_enumerated()
  }

  pub fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
    self.nodes[idx].parent
  }

  /// The closest ancestor that is not a parenthesized expression.
  pub fn parent_skipping_parens(&self, idx: NodeIdx) -> Option<NodeIdx> {
    self.ancestors(idx).find(|parent| !matches!(self.kind(*parent), NodeKind::Parenthesized(_)))
  }

  /// Strict ancestors, innermost first.
  pub fn ancestors(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
    std::iter::successors(self.parent(idx), |parent| self.parent(*parent))
  }

  /// Strict descendants in pre-order.
  pub fn descendants(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> {
    (idx.index() + 1..self.nodes[idx].end.index()).map(NodeIdx::from_usize)
  }

  pub fn contains(&self, ancestor: NodeIdx, idx: NodeIdx) -> bool {
    ancestor <= idx && idx < self.nodes[ancestor].end
  }

  /// The function, arrow function or binding identifier node covering exactly `span`.
  pub fn node_at(&self, span: Span) -> Option<NodeIdx> {
    self.by_span.get(&span).copied()
  }

  pub fn symbol_sites(&self, symbol: SymbolId) -> Option<&SymbolSites> {
    self.symbols.get(&symbol)
  }

  pub fn slice(&self, span: Span) -> &'a str {
    self.source().get(span.start as usize..span.end as usize).unwrap_or_default()
  }

  pub fn source_of(&self, node: &impl GetSpan) -> &'a str {
    self.slice(node.span())
  }
}

#[cfg(test)]
mod tests {
  use oxc::allocator::Allocator;

  use super::*;
  use crate::EcmaCompiler;

  #[test]
  fn parents_and_ranges() {
    let allocator = Allocator::default();
    let tree = EcmaCompiler::parse_and_annotate(&allocator, "f((a), [b]);").unwrap();

    let call = tree.nodes().find(|(_, node)| matches!(node.kind, NodeKind::Call(_))).unwrap().0;
    let identifiers = tree
      .descendants(call)
      .filter(|idx| matches!(tree.kind(*idx), NodeKind::Identifier(_)))
      .collect::<Vec<_>>();
    assert_eq!(identifiers.len(), 3);

    let a = identifiers[1];
    assert_eq!(tree.slice(tree.node(a).span), "a");
    assert!(matches!(tree.kind(tree.parent(a).unwrap()), NodeKind::Parenthesized(_)));
    assert_eq!(tree.parent_skipping_parens(a), Some(call));
    assert!(tree.contains(call, a));
    assert!(tree.ancestors(a).any(|idx| idx == tree.root()));
  }

  #[test]
  fn symbol_sites_follow_scoping() {
    let allocator = Allocator::default();
    let tree = EcmaCompiler::parse_and_annotate(
      &allocator,
      "function outer(n) { n(1); function inner(n) { n(2); } n(3); }",
    )
    .unwrap();

    let (outer_param, _) = tree
      .nodes()
      .filter(|(_, node)| matches!(node.kind, NodeKind::Binding(ident) if ident.name == "n"))
      .map(|(idx, node)| (idx, node.span))
      .next()
      .unwrap();
    let NodeKind::Binding(binding) = tree.kind(outer_param) else { unreachable!() };
    let sites = tree.symbol_sites(binding.symbol_id.get().unwrap()).unwrap();
    assert_eq!(sites.declarations, vec![outer_param]);
    assert_eq!(sites.references.len(), 2);
  }
}
