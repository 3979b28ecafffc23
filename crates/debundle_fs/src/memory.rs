use std::{
  io::{self, Read, Write},
  path::Path,
};

use vfs::{MemoryFS, VfsPath};

use crate::FileSystem;

/// An in-memory file system rooted at `/`. Paths are interpreted as absolute.
#[derive(Clone)]
pub struct MemoryFileSystem {
  root: VfsPath,
}

impl Default for MemoryFileSystem {
  fn default() -> Self {
    Self { root: VfsPath::new(MemoryFS::new()) }
  }
}

impl MemoryFileSystem {
  pub fn with_files(files: &[(&str, &str)]) -> io::Result<Self> {
    let fs = Self::default();
    for (path, content) in files {
      let path = Path::new(path);
      if let Some(parent) = path.parent() {
        fs.create_dir_all(parent)?;
      }
      fs.write(path, content.as_bytes())?;
    }
    Ok(fs)
  }

  /// Every file currently stored, sorted by path.
  pub fn files(&self) -> Vec<String> {
    let mut files = self
      .root
      .walk_dir()
      .map(|walk| {
        walk
          .filter_map(Result::ok)
          .filter(|path| path.is_file().unwrap_or(false))
          .map(|path| path.as_str().to_string())
          .collect::<Vec<_>>()
      })
      .unwrap_or_default();
    files.sort();
    files
  }

  fn resolve(&self, path: &Path) -> io::Result<VfsPath> {
    let path = path.to_string_lossy();
    let path = path.trim_start_matches('/').trim_end_matches('/');
    if path.is_empty() {
      return Ok(self.root.clone());
    }
    self.root.join(path).map_err(io::Error::other)
  }
}

impl FileSystem for MemoryFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let file = self.resolve(path)?;
    if !file.is_file().unwrap_or(false) {
      return Err(io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display())));
    }
    let mut content = String::new();
    file.open_file().map_err(io::Error::other)?.read_to_string(&mut content)?;
    Ok(content)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = self.resolve(path)?.create_file().map_err(io::Error::other)?;
    file.write_all(content)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    self.resolve(path)?.create_dir_all().map_err(io::Error::other)
  }

  fn exists(&self, path: &Path) -> bool {
    self.resolve(path).and_then(|path| path.exists().map_err(io::Error::other)).unwrap_or(false)
  }
}

#[test]
fn read_write_round() {
  let fs = MemoryFileSystem::with_files(&[("/project/bundle.js", "var a;")]).unwrap();
  assert_eq!(fs.read_to_string(Path::new("/project/bundle.js")).unwrap(), "var a;");
  assert!(fs.read_to_string(Path::new("/project/missing.js")).is_err());

  fs.create_dir_all(Path::new("/project/dist/nested")).unwrap();
  fs.write(Path::new("/project/dist/nested/a.js"), b"ok").unwrap();
  assert!(fs.exists(Path::new("/project/dist/nested/a.js")));
  assert_eq!(fs.files(), vec!["/project/bundle.js", "/project/dist/nested/a.js"]);
}
