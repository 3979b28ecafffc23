use crate::Bundle;

/// Callbacks around [`Bundle::parse`]. `pre_parse` runs before the bundle is read, so it can still
/// change options; `post_parse` runs once the module graph is complete, the place to set module
/// paths, comments, package names and renames.
pub trait DebundleHooks {
  fn pre_parse(&self, _bundle: &mut Bundle<'_>) -> anyhow::Result<()> {
    Ok(())
  }

  fn post_parse(&self, _bundle: &mut Bundle<'_>) -> anyhow::Result<()> {
    Ok(())
  }
}
