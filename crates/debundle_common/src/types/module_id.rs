use std::fmt;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

/// The key a module is registered under in a module container.
///
/// Numeric and string keys are kept apart: a container key `"0"` is `Name("0")`, while a bare `0`
/// key or an array position is `Number(0)`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleId {
  Number(u64),
  Name(ArcStr),
}

impl ModuleId {
  /// Numeric literals that are not non-negative integers keep their source text.
  pub fn from_number(value: f64, raw: Option<&str>) -> Self {
    if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
      Self::Number(value as u64)
    } else {
      Self::Name(raw.map_or_else(|| value.to_string(), ToString::to_string).into())
    }
  }

  /// The same key seen through the other literal kind, used when a require call and the container
  /// disagree on `5` vs `"5"`.
  pub fn coerced(&self) -> Option<Self> {
    match self {
      Self::Number(value) => Some(Self::Name(itoa::Buffer::new().format(*value).into())),
      Self::Name(name) => name.parse::<u64>().ok().map(Self::Number),
    }
  }

  /// The id as it appears in file names, with path separators flattened.
  pub fn file_stem(&self) -> String {
    self.to_string().replace(['/', '\\'], "-")
  }
}

impl fmt::Display for ModuleId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Number(value) => f.write_str(itoa::Buffer::new().format(*value)),
      Self::Name(name) => f.write_str(name),
    }
  }
}

impl From<u64> for ModuleId {
  fn from(value: u64) -> Self {
    Self::Number(value)
  }
}

impl From<&str> for ModuleId {
  fn from(value: &str) -> Self {
    Self::Name(value.into())
  }
}

#[test]
fn numeric_and_string_keys_stay_distinct() {
  assert_ne!(ModuleId::Number(0), ModuleId::from("0"));
  assert_eq!(ModuleId::Number(0).coerced(), Some(ModuleId::from("0")));
  assert_eq!(ModuleId::from("foo").coerced(), None);
  assert_eq!(ModuleId::from_number(12.0, Some("12")), ModuleId::Number(12));
  assert_eq!(ModuleId::from_number(1.5, Some("1.5")), ModuleId::from("1.5"));
  assert_eq!(ModuleId::from("./src/a.js").file_stem(), ".-src-a.js");
}

#[test]
fn deserializes_untagged() {
  let ids: Vec<ModuleId> = serde_json::from_str(r#"[3, "3", "./a.js"]"#).unwrap();
  assert_eq!(ids, vec![ModuleId::Number(3), ModuleId::from("3"), ModuleId::from("./a.js")]);
}
