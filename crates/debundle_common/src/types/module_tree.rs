use crate::ModuleId;

/// A node of the module dependency tree. `bare` nodes are referenced by some module but were never
/// found in any loaded chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTreeNode {
  pub id: ModuleId,
  pub parents: Vec<ModuleId>,
  pub children: Vec<ModuleId>,
  pub bare: bool,
}
