//! Print the CRC32C of one or more files.
//!
//! ```text
//! crc32c [-M] [-b BLOCK_SIZE] [-s] [-N] FILE...
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crc32c::file::{FileChecksum, ReadMode, checksum_file};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "crc32c", about = "Calculates and prints crc32c on input file(s)")]
struct Cli {
  /// Input file(s)
  #[arg(required = true)]
  files: Vec<PathBuf>,

  /// Avoid reading files with mmap
  #[arg(short = 'M', long, help_heading = "I/O options")]
  disable_mmap: bool,

  /// Block size for iterative reading
  #[arg(short, long, help_heading = "I/O options")]
  block_size: Option<usize>,

  /// Report checksumming speed on each file
  #[arg(short, long, help_heading = "Formatting options")]
  show_speed: bool,

  /// Do not print filename in result
  #[arg(short = 'N', long, help_heading = "Formatting options")]
  hide_filename: bool,
}

impl Cli {
  fn format(&self, file: &Path, result: &FileChecksum) -> String {
    let mut line = format!("{:08x}", result.crc);
    if !self.hide_filename {
      line.push(' ');
      line.push_str(&file.display().to_string());
    }
    if self.show_speed {
      let speed = result.mib_per_sec().unwrap_or(f64::INFINITY);
      line.push_str(&format!(" ({speed:.2} MB/s)"));
    }
    line
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let engine = crc32c::engine()?;
  let mode = if cli.disable_mmap { ReadMode::Buffered } else { ReadMode::Mmap };
  let block_size = cli.block_size.unwrap_or(mode.default_block_size());
  tracing::debug!(backend = %engine.backend(), ?mode, block_size, "checksumming files");

  for file in &cli.files {
    let result = checksum_file(engine, file, mode, block_size).with_context(|| format!("{}", file.display()))?;
    println!("{}", cli.format(file, &result));
  }
  Ok(())
}
