use std::{
  collections::VecDeque,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context;
use debundle_common::{
  ChunkId, DebundleOptions, ModuleId, ModuleTreeNode, RenderMode, WriteOutput, WrittenFile,
};
use debundle_ecmascript::EcmaCompiler;
use debundle_error::{BuildError, BuildResult};
use debundle_fs::{ChunkFetcher, FileSystem, HttpFetcher, OsFileSystem};
use debundle_utils::{
  concat_string,
  indexmap::FxIndexMap,
  rayon::{IntoParallelRefIterator, ParallelIterator},
};
use itertools::Itertools;
use oxc::allocator::Allocator;
use rustc_hash::FxHashSet;
use sugar_path::SugarPath;

use crate::{
  generate_stage::{GenerateOutput, GenerateStage},
  hooks::DebundleHooks,
  module_graph::ModuleGraph,
  scan_stage::{bootstrap_locator::locate_bootstrap, chunk_loader::ChunkLoader},
  types::{bootstrap::Bootstrap, chunk::Chunk, module::Module},
  utils::config_file::ConfigFile,
};

/// One debundle run over a single bundle file. Every parsed tree lives in `allocator`.
pub struct Bundle<'a> {
  allocator: &'a Allocator,
  fs: Arc<dyn FileSystem>,
  fetcher: Arc<dyn ChunkFetcher>,
  path: PathBuf,
  config: ConfigFile,
  hooks: Option<Box<dyn DebundleHooks>>,
  graph: Option<ModuleGraph<'a>>,
  bootstrap: Option<Bootstrap<'a>>,
  warnings: Vec<String>,
}

impl<'a> Bundle<'a> {
  /// A bundle read from disk whose missing chunks are fetched over HTTP.
  pub fn new(allocator: &'a Allocator, path: impl AsRef<Path>) -> BuildResult<Self> {
    Self::with_io(allocator, path, Arc::new(OsFileSystem), Arc::new(HttpFetcher))
  }

  /// Loads the metadata file next to `path`, creating it with defaults when it is missing.
  pub fn with_io(
    allocator: &'a Allocator,
    path: impl AsRef<Path>,
    fs: Arc<dyn FileSystem>,
    fetcher: Arc<dyn ChunkFetcher>,
  ) -> BuildResult<Self> {
    let path = path.as_ref().absolutize();
    let mut warnings = vec![];
    let config = ConfigFile::load(&*fs, &path, &mut warnings)?;
    if !config.existed() {
      config.write(&*fs)?;
    }
    Ok(Self {
      allocator,
      fs,
      fetcher,
      path,
      config,
      hooks: None,
      graph: None,
      bootstrap: None,
      warnings,
    })
  }

  pub fn set_hooks(&mut self, hooks: impl DebundleHooks + 'static) {
    self.hooks = Some(Box::new(hooks));
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn config_path(&self) -> &Path {
    self.config.path()
  }

  pub fn options(&self) -> &DebundleOptions {
    &self.config.options
  }

  /// Changes options and persists them to the metadata file.
  pub fn update_options(&mut self, update: impl FnOnce(&mut DebundleOptions)) -> BuildResult<()> {
    update(&mut self.config.options);
    self.config.write(&*self.fs)
  }

  /// Non-fatal problems found so far.
  pub fn warnings(&self) -> &[String] {
    &self.warnings
  }

  /// Finds the runtime, then loads every module and chunk reachable from it.
  pub fn parse(&mut self) -> BuildResult<()> {
    let hooks = self.hooks.take();
    let result = self.parse_with_hooks(hooks.as_deref());
    self.hooks = hooks;
    result
  }

  fn parse_with_hooks(&mut self, hooks: Option<&dyn DebundleHooks>) -> BuildResult<()> {
    if let Some(hooks) = hooks {
      hooks.pre_parse(self)?;
    }

    let source = self
      .fs
      .read_to_string(&self.path)
      .with_context(|| format!("Failed to read {}", self.path.display()))?;
    tracing::info!(path = %self.path.display(), size = source.len(), "Read bundle");

    let tree = EcmaCompiler::parse_and_annotate(self.allocator, &source)?;
    let bootstrap = locate_bootstrap(&tree, &self.path, self.config.path())?;

    let mut graph = ModuleGraph::new(bootstrap.slots);
    let entry = graph.add_tree(tree);
    let config_path = self.config.path();
    graph.add_chunk(vec![ChunkId::default_chunk()], None, entry, bootstrap.container, config_path)?;

    let bundle_dir = self.path.parent().unwrap_or(&self.path);
    let loader = ChunkLoader::new(
      &*self.fs,
      &*self.fetcher,
      &self.config.options,
      bundle_dir,
      &bootstrap.public_path,
    );
    graph.expand(self.allocator, &loader, config_path)?;
    tracing::info!(chunks = graph.chunks.len(), modules = graph.modules.len(), "Parsed bundle");

    self.warnings.append(&mut graph.warnings);
    self.graph = Some(graph);
    self.bootstrap = Some(bootstrap);
    self.apply_module_overrides();

    if let Some(hooks) = hooks {
      hooks.post_parse(self)?;
    }
    Ok(())
  }

  fn apply_module_overrides(&mut self) {
    let overrides = self.config.modules.clone();
    for entry in &overrides {
      let Some(module) = self.module_mut(&entry.id) else {
        self.warn(format!(
          "The metadata file configures module {}, which is not part of the bundle",
          entry.id
        ));
        continue;
      };
      if let Some(path) = &entry.path {
        module.path.clone_from(path);
      }
      if entry.comment.is_some() {
        module.comment.clone_from(&entry.comment);
      }
      if entry.import_name.is_some() {
        module.import_name.clone_from(&entry.import_name);
      }
      if entry.import_path.is_some() {
        module.import_path.clone_from(&entry.import_path);
      }
      module.renames.extend(entry.renames.iter().cloned());
    }
    for entry in &overrides {
      if let Some(package_name) = &entry.package_name {
        self.set_package_name(&entry.id, package_name);
      }
    }
  }

  fn warn(&mut self, message: String) {
    tracing::warn!("{message}");
    self.warnings.push(message);
  }

  pub fn graph(&self) -> Option<&ModuleGraph<'a>> {
    self.graph.as_ref()
  }

  pub fn bootstrap(&self) -> Option<&Bootstrap<'a>> {
    self.bootstrap.as_ref()
  }

  /// The module the runtime starts with, when it names one.
  pub fn entry_module(&self) -> Option<&ModuleId> {
    self.bootstrap.as_ref()?.entry_module.as_ref()
  }

  pub fn chunk(&self, id: &ChunkId) -> Option<&Chunk> {
    self.graph.as_ref()?.chunk(id)
  }

  pub fn module(&self, id: &ModuleId) -> Option<&Module<'a>> {
    self.graph.as_ref()?.module(id)
  }

  pub fn module_mut(&mut self, id: &ModuleId) -> Option<&mut Module<'a>> {
    self.graph.as_mut()?.module_mut(id)
  }

  pub fn modules(&self) -> impl Iterator<Item = &Module<'a>> {
    self.graph.iter().flat_map(|graph| graph.modules.iter())
  }

  /// Moves the module and everything it requires under `node_modules/<package_name>/`, with the
  /// module itself becoming the package's `index.js`. Returns `false` for unknown ids.
  pub fn set_package_name(&mut self, id: &ModuleId, package_name: &str) -> bool {
    let Some(graph) = self.graph.as_mut() else {
      return false;
    };
    let Some(root) = graph.module_idx(id) else {
      return false;
    };

    let prefix = concat_string!("node_modules/", package_name, "/");
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::from([root]);
    while let Some(idx) = queue.pop_front() {
      if !visited.insert(idx) {
        continue;
      }
      let required = graph.modules[idx]
        .required_modules()
        .filter_map(|id| graph.module_idx(id))
        .collect::<Vec<_>>();
      queue.extend(required);
      let module = &mut graph.modules[idx];
      module.path = concat_string!(prefix, module.path);
    }

    let module = &mut graph.modules[root];
    module.path = concat_string!(prefix, "index.js");
    module.package_name = Some(package_name.to_string());
    true
  }

  /// Parent and child ids of every module. Required ids that no loaded chunk defines show up as
  /// `bare` nodes.
  pub fn module_tree(&self) -> Vec<ModuleTreeNode> {
    let Some(graph) = &self.graph else {
      return vec![];
    };
    let node = |id: &ModuleId, bare| ModuleTreeNode {
      id: id.clone(),
      parents: vec![],
      children: vec![],
      bare,
    };
    let mut nodes = graph
      .modules
      .iter()
      .map(|module| (module.id.clone(), node(&module.id, false)))
      .collect::<FxIndexMap<_, _>>();

    for module in &graph.modules {
      for required in module.required_modules() {
        let child = graph.module(required).map_or(required, |child| &child.id).clone();
        nodes
          .entry(child.clone())
          .or_insert_with(|| node(&child, true))
          .parents
          .push(module.id.clone());
        if let Some(parent) = nodes.get_mut(&module.id) {
          parent.children.push(child);
        }
      }
    }
    nodes.into_values().collect()
  }

  fn parsed(&self) -> BuildResult<(&ModuleGraph<'a>, &Bootstrap<'a>)> {
    self
      .graph
      .as_ref()
      .zip(self.bootstrap.as_ref())
      .ok_or_else(|| anyhow::anyhow!("{} has not been parsed yet", self.path.display()).into())
  }

  /// Output directory, `outPath` resolved against the working directory.
  pub fn out_dir(&self) -> PathBuf {
    Path::new(&self.config.options.out_path).absolutize()
  }

  pub fn render_module(&self, id: &ModuleId, mode: RenderMode) -> BuildResult<String> {
    let (graph, bootstrap) = self.parsed()?;
    let module =
      graph.module(id).ok_or_else(|| anyhow::anyhow!("Module {id} is not part of the bundle"))?;
    let out_dir = self.out_dir();
    let stage = GenerateStage::new(graph, bootstrap, &self.config.options, &out_dir);
    Ok(stage.render_module(module, mode)?.code)
  }

  /// Renders every module, then writes them all under the output directory. No file is written
  /// unless every module renders.
  pub fn write_all(&self) -> BuildResult<WriteOutput> {
    let (graph, bootstrap) = self.parsed()?;
    let out_dir = self.out_dir();
    let GenerateOutput { assets, warnings: render_warnings } =
      GenerateStage::new(graph, bootstrap, &self.config.options, &out_dir).generate()?;

    let fs = &*self.fs;
    let (files, errors): (Vec<_>, Vec<_>) = assets
      .par_iter()
      .map(|asset| -> anyhow::Result<WrittenFile> {
        let path = out_dir.join(&asset.filename);
        if let Some(parent) = path.parent() {
          fs.create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs.write(&path, asset.code.as_bytes())
          .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(WrittenFile { filename: asset.filename.clone(), path, size: asset.code.len() })
      })
      .collect::<Vec<_>>()
      .into_iter()
      .partition_result();
    if !errors.is_empty() {
      return Err(BuildError::from(errors));
    }

    tracing::info!(files = files.len(), out_dir = %out_dir.display(), "Wrote modules");
    let mut warnings = self.warnings.clone();
    warnings.extend(render_warnings);
    Ok(WriteOutput { files, warnings })
  }
}
