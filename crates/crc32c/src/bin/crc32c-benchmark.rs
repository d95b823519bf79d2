//! Measure CRC32C throughput of the process-wide engine.

use std::time::{Duration, Instant};

use anyhow::{Result, ensure};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEFAULT_SIZE: usize = 100 * 1024 * 1024;
const DEFAULT_ITERATIONS: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "crc32c-benchmark", about = "Measure crc32c throughput")]
struct Cli {
  /// Amount of bytes to checksum
  #[arg(short, long, default_value_t = DEFAULT_SIZE)]
  size: usize,

  /// Number of times the checksum runs over the data
  #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
  iterations: u64,
}

/// Run batches of `iterations` checksums until a measurable time has passed.
fn run(engine: &crc32c::Crc32cEngine, data: &[u8], iterations: u64) -> (Duration, u64) {
  let start = Instant::now();
  let mut evaluations = 0;
  loop {
    for _ in 0..iterations {
      std::hint::black_box(engine.checksum(std::hint::black_box(data), 0));
    }
    evaluations += iterations;
    let elapsed = start.elapsed();
    if !elapsed.is_zero() {
      return (elapsed, evaluations);
    }
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  ensure!(cli.iterations > 0, "iterations must be at least 1");

  let engine = crc32c::engine()?;
  let data = vec![b' '; cli.size];
  let (elapsed, evaluations) = run(engine, &data, cli.iterations);

  let size_mb = cli.size as f64 / 1024.0 / 1024.0;
  let gbs = size_mb / 1024.0 * evaluations as f64 / elapsed.as_secs_f64();
  println!(
    "crc32c ran at {gbs:.3} [GB/s] when checksuming {size_mb:.3} [MB] {evaluations} times ({})",
    engine.backend()
  );
  Ok(())
}
