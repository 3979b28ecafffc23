use std::{collections::VecDeque, path::Path};

use debundle_common::{ChunkId, ChunkIdx, ModuleId, ModuleIdx, TreeIdx};
use debundle_ecmascript::AnnotatedTree;
use debundle_error::BuildResult;
use oxc::{allocator::Allocator, ast::ast::Expression};
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

use crate::{
  scan_stage::{
    chunk_loader::{ChunkLoader, LoadedChunk},
    dependency_scanner::scan_dependencies,
    module_container::parse_module_container,
  },
  types::{bootstrap::ParamSlots, chunk::Chunk, module::Module},
};

/// Every chunk and module discovered so far.
///
/// Chunk loads found while scanning a module are queued instead of followed right away;
/// [`ModuleGraph::expand`] drains the queue until no unknown chunk is referenced anymore. A chunk
/// id is registered before the modules of its chunk are scanned, so no chunk is loaded twice.
pub struct ModuleGraph<'a> {
  pub trees: IndexVec<TreeIdx, AnnotatedTree<'a>>,
  pub chunks: IndexVec<ChunkIdx, Chunk>,
  pub modules: IndexVec<ModuleIdx, Module<'a>>,
  chunk_index: FxHashMap<ChunkId, ChunkIdx>,
  module_index: FxHashMap<ModuleId, ModuleIdx>,
  worklist: VecDeque<ChunkId>,
  slots: ParamSlots,
  pub(crate) warnings: Vec<String>,
}

impl<'a> ModuleGraph<'a> {
  pub fn new(slots: ParamSlots) -> Self {
    Self {
      trees: IndexVec::new(),
      chunks: IndexVec::new(),
      modules: IndexVec::new(),
      chunk_index: FxHashMap::default(),
      module_index: FxHashMap::default(),
      worklist: VecDeque::new(),
      slots,
      warnings: vec![],
    }
  }

  pub fn add_tree(&mut self, tree: AnnotatedTree<'a>) -> TreeIdx {
    self.trees.push(tree)
  }

  /// Registers a chunk under all of `ids` and builds its modules from `container`, a node of the
  /// tree at `tree`. Chunk loads the modules trigger are queued.
  pub fn add_chunk(
    &mut self,
    ids: Vec<ChunkId>,
    file_name: Option<String>,
    tree: TreeIdx,
    container: &'a Expression<'a>,
    config: &Path,
  ) -> BuildResult<ChunkIdx> {
    let chunk_idx = ChunkIdx::from_usize(self.chunks.len());
    for id in &ids {
      self.chunk_index.entry(id.clone()).or_insert(chunk_idx);
    }
    let chunk = Chunk { ids, file_name, tree, modules: Default::default() };
    let chunk_name = chunk.name();
    self.chunks.push(chunk);

    let entries = parse_module_container(&self.trees[tree], container, config)?;
    for (id, entry) in entries {
      if let Some(existing) = self.module_index.get(&id) {
        let first = &self.chunks[self.modules[*existing].chunk];
        let message = format!(
          "Module {id} is defined in chunk {} and again in {chunk_name}, keeping the first",
          first.name()
        );
        tracing::warn!("{message}");
        self.warnings.push(message);
        continue;
      }

      let dependencies = scan_dependencies(&self.trees[tree], entry.node, self.slots, &id)?;
      for chunk_id in dependencies.iter().filter_map(|dep| dep.chunk_id()) {
        let is_known = chunk_id.is_default()
          || self.chunks[chunk_idx].ids.contains(chunk_id)
          || self.chunk_index.contains_key(chunk_id)
          || self.worklist.contains(chunk_id);
        if !is_known {
          tracing::debug!(module = %id, chunk = %chunk_id, "Queued chunk");
          self.worklist.push_back(chunk_id.clone());
        }
      }

      let module = Module {
        path: Module::default_path(&chunk_name, &id),
        id: id.clone(),
        chunk: chunk_idx,
        tree,
        node: entry.node,
        closure: entry.closure,
        comment: None,
        package_name: None,
        import_name: None,
        import_path: None,
        dependencies,
        renames: vec![],
      };
      let module_idx = self.modules.push(module);
      self.module_index.insert(id.clone(), module_idx);
      self.chunks[chunk_idx].modules.insert(id, module_idx);
    }

    Ok(chunk_idx)
  }

  /// Loads queued chunks until the graph stops growing.
  pub fn expand(
    &mut self,
    allocator: &'a Allocator,
    loader: &ChunkLoader<'_>,
    config: &Path,
  ) -> BuildResult<()> {
    while let Some(id) = self.worklist.pop_front() {
      if self.chunk_index.contains_key(&id) {
        continue;
      }
      let span = tracing::info_span!("chunk", %id);
      let _guard = span.enter();

      let LoadedChunk { file_name, tree, mut ids, container } = loader.load(allocator, &id)?;
      if !ids.contains(&id) {
        ids.push(id);
      }
      let tree = self.add_tree(tree);
      let chunk = self.add_chunk(ids, Some(file_name), tree, container, config)?;
      tracing::info!(modules = self.chunks[chunk].modules.len(), "Registered chunk");
    }
    Ok(())
  }

  /// Whether every chunk referenced by a known module has been loaded.
  pub fn is_converged(&self) -> bool {
    self.worklist.iter().all(|id| self.chunk_index.contains_key(id))
  }

  pub fn chunk_idx(&self, id: &ChunkId) -> Option<ChunkIdx> {
    self.chunk_index.get(id).copied()
  }

  pub fn chunk(&self, id: &ChunkId) -> Option<&Chunk> {
    self.chunk_idx(id).map(|idx| &self.chunks[idx])
  }

  /// Looks `id` up as written, then as the other literal kind, so `require("5")` still finds a
  /// module registered under `5`.
  pub fn module_idx(&self, id: &ModuleId) -> Option<ModuleIdx> {
    self
      .module_index
      .get(id)
      .or_else(|| id.coerced().and_then(|coerced| self.module_index.get(&coerced)))
      .copied()
  }

  pub fn module(&self, id: &ModuleId) -> Option<&Module<'a>> {
    self.module_idx(id).map(|idx| &self.modules[idx])
  }

  pub fn module_mut(&mut self, id: &ModuleId) -> Option<&mut Module<'a>> {
    self.module_idx(id).map(|idx| &mut self.modules[idx])
  }

  pub fn tree_of(&self, module: &Module<'a>) -> &AnnotatedTree<'a> {
    &self.trees[module.tree]
  }
}
