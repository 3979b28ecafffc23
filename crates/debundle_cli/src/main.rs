mod args;

use std::{path::Path, process::ExitCode, time::Instant};

use ansi_term::Colour;
use args::Commands;
use clap::Parser;
use debundle::{Allocator, Bundle, BuildError, WrittenFile};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter =
    EnvFilter::try_from_env("DEBUNDLE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
  let subscriber = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false);
  if let Err(err) = subscriber.try_init() {
    eprintln!("failed to install tracing subscriber: {err}");
  }
}

fn print_written_files(out_dir: &Path, mut files: Vec<WrittenFile>) {
  files.sort_by(|a, b| a.filename.cmp(&b.filename));

  let mut left = 0;
  let mut right = 0;
  let mut rows = Vec::with_capacity(files.len());
  for file in files {
    let size = format!("{:.2}", file.size as f64 / 1024.0);
    right = right.max(size.len());
    left = left.max(file.filename.len());
    rows.push((file.filename, size));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;
  let prefix = format!("{}/", out_dir.display());

  for (filename, size) in rows {
    let filename_len = filename.len();
    println!(
      "{}{}{:left$} {}{:right$}{} kB",
      dim.paint(prefix.as_str()),
      color.paint(filename),
      "",
      dim.paint("│ size: "),
      "",
      size,
      left = left - filename_len,
      right = right - size.len()
    );
  }
}

fn print_errors(errors: &BuildError) {
  for error in errors.iter() {
    eprintln!("{} {error:#}", Colour::Red.paint("Error:"));
  }
}

fn run(path: &Path) -> Result<(), BuildError> {
  let allocator = Allocator::default();
  let mut bundle = Bundle::new(&allocator, path)?;
  bundle.parse()?;
  let output = bundle.write_all()?;

  for warning in &output.warnings {
    println!("{} {}", Colour::Yellow.paint("Warning:"), warning);
  }
  if !output.files.is_empty() {
    print_written_files(&bundle.out_dir(), output.files);
  }
  Ok(())
}

fn main() -> ExitCode {
  let args = Commands::parse();
  init_tracing(args.verbose);

  let Some(path) = args.bundle else {
    eprintln!("Error: the path to a javascript bundle is required.");
    eprintln!("ie: debundle ./path/to/javascript/bundle.js");
    return ExitCode::FAILURE;
  };

  let start = Instant::now();
  match run(&path) {
    Ok(()) => {
      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      let elapsed = Colour::White.bold().paint(elapsed);
      println!("\n{} Finished in {}", Colour::Green.paint("✔"), elapsed);
      ExitCode::SUCCESS
    }
    Err(errors) => {
      print_errors(&errors);
      ExitCode::FAILURE
    }
  }
}
