use arcstr::ArcStr;
use oxc::span::Span;

use crate::{ChunkId, ModuleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
  /// `require(5)`
  Direct,
  /// `require.e(5)`
  ChunkLoad,
  /// `require.t.bind(null, 5)`
  Interop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyTarget {
  Module(ModuleId),
  Chunk(ChunkId),
}

/// The variable a required module is assigned to, as in `var r = require(5)`.
#[derive(Debug, Clone)]
pub struct DependencyBinding {
  pub name: ArcStr,
  /// Span of the declarator's binding identifier.
  pub identifier: Span,
  /// `false` when the require call is wrapped once, as in `var r = interop(require(5))`.
  pub direct: bool,
}

/// An edge found while scanning a module closure.
#[derive(Debug, Clone)]
pub struct Dependency {
  pub kind: DependencyKind,
  pub target: DependencyTarget,
  /// The literal whose value is replaced by the import specifier when the module is rendered.
  pub literal: Span,
  pub binding: Option<DependencyBinding>,
}

impl Dependency {
  pub fn module_id(&self) -> Option<&ModuleId> {
    match &self.target {
      DependencyTarget::Module(id) => Some(id),
      DependencyTarget::Chunk(_) => None,
    }
  }

  pub fn chunk_id(&self) -> Option<&ChunkId> {
    match &self.target {
      DependencyTarget::Chunk(id) => Some(id),
      DependencyTarget::Module(_) => None,
    }
  }
}
