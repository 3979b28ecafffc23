mod bundle;
mod generate_stage;
mod hooks;
mod module_graph;
mod scan_stage;
mod types;
mod utils;

pub use crate::{
  bundle::Bundle,
  hooks::DebundleHooks,
  module_graph::ModuleGraph,
  types::{
    bootstrap::{Bootstrap, ParamSlots},
    chunk::Chunk,
    module::Module,
  },
  utils::config_file::ConfigFile,
};
pub use debundle_common::*;
pub use debundle_error::{BuildError, BuildResult, DebundleError};
pub use debundle_fs::{ChunkFetcher, FileSystem, HttpFetcher, OsFileSystem};
pub use oxc::allocator::Allocator;
