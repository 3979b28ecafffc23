use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ChunkId, ModuleId};

/// Extra request data sent with every remote chunk fetch.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkRequestOptions {
  pub headers: BTreeMap<String, String>,
}

/// Options read from, and persisted to, the metadata file next to the bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebundleOptions {
  /// Output directory, relative to the working directory.
  pub out_path: String,
  pub chunk_file_name_suffix: String,
  pub public_path_prefix: String,
  pub chunk_http_request_options: ChunkRequestOptions,
  /// Chunk id to file name overrides.
  pub chunk_name_mapping: BTreeMap<String, String>,
  /// Module whose `jsx`/`jsxs` calls are turned back into JSX in its importers.
  pub jsx_runtime_module: Option<ModuleId>,
}

impl Default for DebundleOptions {
  fn default() -> Self {
    Self {
      out_path: "./dist".to_string(),
      chunk_file_name_suffix: ".bundle.js".to_string(),
      public_path_prefix: String::new(),
      chunk_http_request_options: ChunkRequestOptions::default(),
      chunk_name_mapping: BTreeMap::new(),
      jsx_runtime_module: None,
    }
  }
}

impl DebundleOptions {
  pub fn chunk_file_name(&self, id: &ChunkId) -> String {
    self
      .chunk_name_mapping
      .get(&**id)
      .cloned()
      .unwrap_or_else(|| format!("{id}{}", self.chunk_file_name_suffix))
  }

  /// `publicPathPrefix` joined with the runtime's public path and the chunk file name.
  pub fn chunk_url(&self, public_path: &str, file_name: &str) -> String {
    let mut url = self.public_path_prefix.clone();
    if !url.is_empty() && !url.ends_with('/') {
      url.push('/');
    }
    url.push_str(public_path);
    url.push_str(file_name);
    url
  }

  /// The options that differ from their defaults, keyed the way they are written to disk.
  pub fn non_default_values(&self) -> Map<String, Value> {
    let (Ok(Value::Object(current)), Ok(Value::Object(defaults))) =
      (serde_json::to_value(self), serde_json::to_value(Self::default()))
    else {
      return Map::new();
    };
    current.into_iter().filter(|(key, value)| defaults.get(key) != Some(value)).collect()
  }
}

#[test]
fn only_changed_options_are_serialized() {
  let mut options = DebundleOptions::default();
  assert!(options.non_default_values().is_empty());

  options.public_path_prefix = "https://cdn.example.com".to_string();
  options.chunk_name_mapping.insert("3".to_string(), "vendor.js".to_string());
  let values = options.non_default_values();
  assert_eq!(values.keys().collect::<Vec<_>>(), vec!["chunkNameMapping", "publicPathPrefix"]);
}

#[test]
fn chunk_locations() {
  let mut options = DebundleOptions::default();
  options.chunk_name_mapping.insert("3".to_string(), "vendor.js".to_string());
  assert_eq!(options.chunk_file_name(&ChunkId::from("3")), "vendor.js");
  assert_eq!(options.chunk_file_name(&ChunkId::from("4")), "4.bundle.js");

  assert_eq!(options.chunk_url("/static/", "4.bundle.js"), "/static/4.bundle.js");
  options.public_path_prefix = "https://cdn.example.com".to_string();
  assert_eq!(
    options.chunk_url("static/", "4.bundle.js"),
    "https://cdn.example.com/static/4.bundle.js"
  );
}
