mod error_kind;

use std::{
  fmt,
  ops::{Deref, DerefMut},
};

pub use crate::error_kind::DebundleError;

/// Every fatal condition collected while debundling. Most stages stop at the first error, but
/// bulk rendering and writing report all of them at once.
#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Finds the first error of a known kind, looking through `anyhow` context layers.
  pub fn find_kind(&self) -> Option<&DebundleError> {
    self.0.iter().find_map(|error| error.downcast_ref::<DebundleError>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (index, error) in self.0.iter().enumerate() {
      if index > 0 {
        writeln!(f)?;
      }
      write!(f, "{error:#}")?;
    }
    Ok(())
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<DebundleError> for BuildError {
  fn from(error: DebundleError) -> Self {
    Self(vec![error.into()])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn finds_kind_through_aggregation() {
  let error: BuildError = vec![
    anyhow::anyhow!("disk full"),
    DebundleError::ModuleListNotFound { file: "3.bundle.js".into() }.into(),
  ]
  .into();

  assert!(matches!(error.find_kind(), Some(DebundleError::ModuleListNotFound { .. })));
  assert_eq!(error.to_string().lines().count(), 2);
}
