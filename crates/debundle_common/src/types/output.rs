use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
  /// Only the statements of the module closure.
  #[default]
  Statements,
  /// The whole module closure as a function expression.
  Closure,
}

#[derive(Debug, Clone)]
pub struct WrittenFile {
  /// Path relative to the output directory.
  pub filename: String,
  pub path: PathBuf,
  pub size: usize,
}

#[derive(Debug, Default)]
pub struct WriteOutput {
  pub files: Vec<WrittenFile>,
  /// Non-fatal problems found while rendering, such as rename targets that could not be resolved.
  pub warnings: Vec<String>,
}
