use std::fmt;

use arcstr::ArcStr;

/// The alias of the synthetic chunk that holds the bootstrap's own modules.
pub const DEFAULT_CHUNK: &str = "default";

/// One of the ids a chunk is addressable by. Numeric ids are stored in their decimal form, so
/// `1` and `"1"` name the same chunk, matching how the runtime builds chunk file names.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ChunkId(ArcStr);

impl ChunkId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  pub fn default_chunk() -> Self {
    Self(arcstr::literal!("default"))
  }

  pub fn from_number(value: f64) -> Self {
    if value >= 0.0 && value.fract() == 0.0 {
      Self(itoa::Buffer::new().format(value as u64).into())
    } else {
      Self(value.to_string().into())
    }
  }

  pub fn is_default(&self) -> bool {
    self.0 == DEFAULT_CHUNK
  }
}

impl std::ops::Deref for ChunkId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ChunkId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl fmt::Display for ChunkId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ChunkId {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}
