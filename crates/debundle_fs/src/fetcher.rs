/// Fetches the text of a chunk that is not available next to the bundle.
pub trait ChunkFetcher: Send + Sync {
  fn fetch(&self, url: &str, headers: &[(&str, &str)]) -> anyhow::Result<String>;
}
