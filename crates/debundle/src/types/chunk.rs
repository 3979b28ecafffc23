use debundle_common::{ChunkId, ModuleId, ModuleIdx, TreeIdx};
use debundle_utils::indexmap::FxIndexMap;

/// A loaded unit of the bundle, addressable by every id in `ids`.
#[derive(Debug)]
pub struct Chunk {
  pub ids: Vec<ChunkId>,
  /// File the chunk was read from. `None` for the default chunk, whose modules live in the entry
  /// bundle.
  pub file_name: Option<String>,
  pub tree: TreeIdx,
  pub modules: FxIndexMap<ModuleId, ModuleIdx>,
}

impl Chunk {
  pub fn is_default(&self) -> bool {
    self.file_name.is_none()
  }

  /// All aliases joined with `-`, the prefix of the default module file names.
  pub fn name(&self) -> String {
    self.ids.iter().map(|id| &**id).collect::<Vec<_>>().join("-")
  }
}
