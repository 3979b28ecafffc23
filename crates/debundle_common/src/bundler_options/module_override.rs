use serde::{Deserialize, Serialize};

use crate::ModuleId;

/// Renames the variable declared at `path`, an AST path relative to the module closure body such
/// as `body.2.declarations.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameInstruction {
  pub path: String,
  pub name: String,
}

/// Per-module settings from the metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOverride {
  pub id: ModuleId,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub package_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub import_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub import_path: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub renames: Vec<RenameInstruction>,
}
