use std::path::Path;

use anyhow::Context;
use debundle_common::{ChunkId, DebundleOptions};
use debundle_ecmascript::{AnnotatedTree, EcmaCompiler};
use debundle_error::{BuildResult, DebundleError};
use debundle_fs::{ChunkFetcher, FileSystem};
use itertools::Itertools;
use oxc::{allocator::Allocator, ast::ast::Expression};

use super::module_container::find_module_list;

/// A parsed chunk file and the module list found in it.
pub struct LoadedChunk<'a> {
  pub file_name: String,
  pub tree: AnnotatedTree<'a>,
  /// Chunk ids the file registers itself under.
  pub ids: Vec<ChunkId>,
  pub container: &'a Expression<'a>,
}

/// Reads chunk files next to the bundle, falling back to fetching them from where the runtime
/// would.
pub struct ChunkLoader<'me> {
  fs: &'me dyn FileSystem,
  fetcher: &'me dyn ChunkFetcher,
  options: &'me DebundleOptions,
  bundle_dir: &'me Path,
  public_path: &'me str,
}

impl<'me> ChunkLoader<'me> {
  pub fn new(
    fs: &'me dyn FileSystem,
    fetcher: &'me dyn ChunkFetcher,
    options: &'me DebundleOptions,
    bundle_dir: &'me Path,
    public_path: &'me str,
  ) -> Self {
    Self { fs, fetcher, options, bundle_dir, public_path }
  }

  pub fn load<'a>(&self, allocator: &'a Allocator, id: &ChunkId) -> BuildResult<LoadedChunk<'a>> {
    let file_name = self.options.chunk_file_name(id);
    let source = self.read_source(&file_name)?;
    let tree = EcmaCompiler::parse_and_annotate(allocator, &source).map_err(|errors| {
      errors.0.into_iter().map(|err| err.context(file_name.clone())).collect::<Vec<_>>()
    })?;

    let (ids, container) = find_module_list(&tree)
      .ok_or_else(|| DebundleError::ModuleListNotFound { file: file_name.clone() })?;

    tracing::info!(file = %file_name, ids = %ids.iter().join(","), "Loaded chunk");
    Ok(LoadedChunk { file_name, tree, ids, container })
  }

  fn read_source(&self, file_name: &str) -> BuildResult<String> {
    let local = self.bundle_dir.join(file_name);
    let local_error = match self.fs.read_to_string(&local) {
      Ok(source) => {
        tracing::debug!(path = %local.display(), "Read chunk from disk");
        return Ok(source);
      }
      Err(err) => err,
    };

    let url = self.options.chunk_url(self.public_path, file_name);
    let headers = self
      .options
      .chunk_http_request_options
      .headers
      .iter()
      .map(|(name, value)| (name.as_str(), value.as_str()))
      .collect::<Vec<_>>();
    tracing::debug!(%url, "Chunk is not on disk, fetching it");
    let source = self
      .fetcher
      .fetch(&url, &headers)
      .with_context(|| format!("{} could not be read: {local_error}", local.display()))
      .map_err(|err| DebundleError::ChunkUnavailable {
        file: file_name.to_string(),
        local: local.clone(),
        url: url.clone(),
        reason: format!("{err:#}"),
      })?;
    Ok(source)
  }
}

#[cfg(test)]
mod tests {
  use std::{path::Path, sync::Mutex};

  use debundle_common::{ChunkId, DebundleOptions};
  use debundle_error::DebundleError;
  use debundle_fs::{ChunkFetcher, MemoryFileSystem};
  use oxc::allocator::Allocator;

  use super::ChunkLoader;

  #[derive(Default)]
  struct RecordingFetcher {
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
    body: Option<&'static str>,
  }

  impl ChunkFetcher for RecordingFetcher {
    fn fetch(&self, url: &str, headers: &[(&str, &str)]) -> anyhow::Result<String> {
      let headers = headers.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
      self.requests.lock().unwrap().push((url.to_string(), headers));
      self.body.map(ToString::to_string).ok_or_else(|| anyhow::anyhow!("{url} responded with 404"))
    }
  }

  const CHUNK: &str =
    "(window.webpackJsonp = window.webpackJsonp || []).push([[5], {9: function (e, t) {}}]);";

  #[test]
  fn reads_local_chunks_first() {
    let fs = MemoryFileSystem::with_files(&[("/app/5.bundle.js", CHUNK)]).unwrap();
    let fetcher = RecordingFetcher::default();
    let options = DebundleOptions::default();
    let loader = ChunkLoader::new(&fs, &fetcher, &options, Path::new("/app"), "/static/");

    let allocator = Allocator::default();
    let chunk = loader.load(&allocator, &ChunkId::from("5")).unwrap();
    assert_eq!(chunk.file_name, "5.bundle.js");
    assert_eq!(chunk.ids, vec![ChunkId::from("5")]);
    assert!(fetcher.requests.lock().unwrap().is_empty());
  }

  #[test]
  fn fetches_missing_chunks_with_headers() {
    let fs = MemoryFileSystem::default();
    let fetcher = RecordingFetcher { body: Some(CHUNK), ..Default::default() };
    let mut options = DebundleOptions::default();
    options.public_path_prefix = "https://cdn.example.com".to_string();
    options.chunk_name_mapping.insert("5".to_string(), "five.js".to_string());
    options.chunk_http_request_options.headers.insert("Cookie".to_string(), "a=1".to_string());
    let loader = ChunkLoader::new(&fs, &fetcher, &options, Path::new("/app"), "static/");

    let allocator = Allocator::default();
    let chunk = loader.load(&allocator, &ChunkId::from("5")).unwrap();
    assert_eq!(chunk.file_name, "five.js");
    let requests = fetcher.requests.lock().unwrap();
    assert_eq!(requests[0].0, "https://cdn.example.com/static/five.js");
    assert_eq!(requests[0].1, vec![("Cookie".to_string(), "a=1".to_string())]);
  }

  #[test]
  fn reports_both_locations() {
    let fs = MemoryFileSystem::default();
    let fetcher = RecordingFetcher::default();
    let options = DebundleOptions::default();
    let loader = ChunkLoader::new(&fs, &fetcher, &options, Path::new("/app"), "/");

    let allocator = Allocator::default();
    let err = loader.load(&allocator, &ChunkId::from("7")).err().unwrap();
    let Some(DebundleError::ChunkUnavailable { local, url, .. }) = err.find_kind() else {
      panic!("unexpected error: {err}");
    };
    assert_eq!(local, Path::new("/app/7.bundle.js"));
    assert_eq!(url, "/7.bundle.js");
    assert!(err.to_string().contains("responded with 404"));
  }

  #[test]
  fn rejects_chunks_without_module_list() {
    let fs = MemoryFileSystem::with_files(&[("/app/8.bundle.js", "console.log(1)")]).unwrap();
    let fetcher = RecordingFetcher::default();
    let options = DebundleOptions::default();
    let loader = ChunkLoader::new(&fs, &fetcher, &options, Path::new("/app"), "");

    let allocator = Allocator::default();
    let err = loader.load(&allocator, &ChunkId::from("8")).err().unwrap();
    assert!(matches!(
      err.find_kind(),
      Some(DebundleError::ModuleListNotFound { file }) if file == "8.bundle.js"
    ));
  }
}
