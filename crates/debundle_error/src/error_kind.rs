use std::path::PathBuf;

/// The fatal conditions of a debundle run. Any of these aborts the run before output is written.
#[derive(Debug, thiserror::Error)]
pub enum DebundleError {
  #[error(
    "Could not find the webpack bootstrap in {bundle}. If the bundle is not a webpack bundle, or \
     uses an unrecognized runtime, describe the bootstrap by hand in the metadata file ({config})."
  )]
  BootstrapNotFound { bundle: PathBuf, config: PathBuf },

  #[error(
    "The module container of the bootstrap is a {found}, expected an array or object expression. \
     Describe the module list by hand in the metadata file ({config})."
  )]
  ModuleContainerParse { found: String, config: PathBuf },

  #[error("Could not find a chunk id list followed by a module container in {file}")]
  ModuleListNotFound { file: String },

  #[error("Cannot locate chunk {file} - tried both locally ({local}) and on the web ({url}): {reason}")]
  ChunkUnavailable { file: String, local: PathBuf, url: String, reason: String },

  #[error(
    "The require function found at {start}-{end} had more than one argument - it had {count} ({source_text})"
  )]
  RequireArity { start: u32, end: u32, count: usize, source_text: String },

  #[error("Expected {expected} in module {module_id} ({module_path}), found `{source_text}`")]
  TypeAssertion { expected: String, source_text: String, module_id: String, module_path: String },

  #[error("Malformed metadata file {config}: {reason}")]
  MalformedConfig { config: PathBuf, reason: String },
}
