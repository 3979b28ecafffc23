use std::path::PathBuf;

use clap::Parser;

/// Turns a webpack bundle back into the modules it was built from.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Commands {
  /// The bundle to debundle. Its chunks are looked up next to it, then fetched from the web.
  pub bundle: Option<PathBuf>,

  /// Log what the scan and generate stages are doing.
  #[clap(long, short)]
  pub verbose: bool,
}
