use std::{io, path::Path};

/// File access used for reading bundles, chunks and metadata files, and for writing the
/// debundled modules. Writes may happen from several threads at once.
pub trait FileSystem: Send + Sync {
  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  fn exists(&self, path: &Path) -> bool;
}
