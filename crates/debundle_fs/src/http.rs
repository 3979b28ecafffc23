use anyhow::Context;

use crate::ChunkFetcher;

/// Blocking HTTP transport. Non-success statuses are reported as errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl ChunkFetcher for HttpFetcher {
  fn fetch(&self, url: &str, headers: &[(&str, &str)]) -> anyhow::Result<String> {
    let mut request = ureq::get(url);
    for (name, value) in headers {
      request = request.set(name, value);
    }
    let response = request.call().map_err(|err| match err {
      ureq::Error::Status(code, response) => {
        anyhow::anyhow!("{url} responded with {code} {}", response.status_text())
      }
      ureq::Error::Transport(transport) => anyhow::anyhow!("{url}: {transport}"),
    })?;
    response.into_string().with_context(|| format!("{url} did not return valid text"))
  }
}
