use debundle_common::{ChunkIdx, Dependency, ModuleId, RenameInstruction, TreeIdx};
use debundle_ecmascript::{ClosureKind, NodeIdx};

/// One module closure of the bundle.
#[derive(Debug)]
pub struct Module<'a> {
  pub id: ModuleId,
  /// The chunk the module was first found in.
  pub chunk: ChunkIdx,
  pub tree: TreeIdx,
  /// The closure node inside `tree`.
  pub node: NodeIdx,
  pub closure: ClosureKind<'a>,
  /// Output path, relative to the output directory.
  pub path: String,
  pub comment: Option<String>,
  pub package_name: Option<String>,
  /// Name given to variables that hold this module's exports in its importers.
  pub import_name: Option<String>,
  /// Specifier importers use instead of the collapsed package path.
  pub import_path: Option<String>,
  pub dependencies: Vec<Dependency>,
  pub renames: Vec<RenameInstruction>,
}

impl Module<'_> {
  pub fn default_path(chunk_name: &str, id: &ModuleId) -> String {
    format!("{chunk_name}-{}.js", id.file_stem())
  }

  /// Ids of the modules this module requires, in discovery order and without duplicates.
  pub fn required_modules(&self) -> impl Iterator<Item = &ModuleId> {
    let mut seen = Vec::new();
    self.dependencies.iter().filter_map(Dependency::module_id).filter(move |id| {
      if seen.contains(id) {
        false
      } else {
        seen.push(*id);
        true
      }
    })
  }
}
