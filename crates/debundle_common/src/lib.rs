mod bundler_options;
mod types;

pub use crate::{
  bundler_options::{
    debundle_options::{ChunkRequestOptions, DebundleOptions},
    module_override::{ModuleOverride, RenameInstruction},
  },
  types::{
    chunk_id::{ChunkId, DEFAULT_CHUNK},
    dependency::{Dependency, DependencyBinding, DependencyKind, DependencyTarget},
    module_id::ModuleId,
    module_tree::ModuleTreeNode,
    output::{RenderMode, WriteOutput, WrittenFile},
    raw_idx::{ChunkIdx, ModuleIdx, TreeIdx},
  },
};
