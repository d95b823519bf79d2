//! CRC32-C benchmarks.
//!
//! Run: `cargo bench -p checksum -- crc32c`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p checksum -- crc32c`
//!
//! This benchmarks:
//! - The engine path (backend chosen by the default configuration)
//! - The software kernel alone
//! - The hardware kernel alone (when the CPU has it)
//! - The hasher with a small update size

use checksum::{
  Config, Crc32cEngine, Crc32cHash,
  crc32c::{hardware_kernel, sw_crc32c},
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Standard benchmark sizes.
const SIZES: [usize; 7] = [64, 256, 1024, 4096, 16384, 65536, 1048576];

/// Update size for the hasher benchmark.
const HASHER_CHUNK: usize = 31;

fn bench_engine(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/engine");
  let engine = match Crc32cEngine::new(&Config::from_env()) {
    Ok(engine) => engine,
    Err(err) => {
      eprintln!("Skipping engine benchmark: {err}");
      return;
    }
  };
  eprintln!("crc32c backend: {}", engine.backend());

  for size in SIZES {
    let data = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| core::hint::black_box(engine.checksum(data, 0)));
    });
  }

  group.finish();
}

fn bench_portable(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/portable");

  for size in SIZES {
    let data = vec![0xABu8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| core::hint::black_box(sw_crc32c(0xFFFF_FFFF, data) ^ 0xFFFF_FFFF));
    });
  }

  group.finish();
}

/// Benchmark the hardware kernel directly (bypasses selection).
///
/// Skipped when the CPU lacks the instruction.
fn bench_hardware(c: &mut Criterion) {
  let Some(kernel) = hardware_kernel() else {
    eprintln!("Skipping hardware benchmark: CRC32C instruction not available");
    return;
  };
  let mut group = c.benchmark_group("crc32c/hardware");

  for size in SIZES {
    let data = vec![0xABu8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| core::hint::black_box(kernel(0xFFFF_FFFF, data) ^ 0xFFFF_FFFF));
    });
  }

  group.finish();
}

fn bench_hasher(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/hasher");
  let engine = Crc32cEngine::software();

  for size in [1024usize, 65536] {
    let data = vec![0x5Au8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::new("chunk31", size), &data, |b, data| {
      b.iter(|| {
        let mut h = Crc32cHash::new(engine);
        for chunk in data.chunks(HASHER_CHUNK) {
          h.update(chunk);
        }
        core::hint::black_box(h.checksum())
      });
    });
  }

  group.finish();
}

criterion_group!(benches, bench_engine, bench_portable, bench_hardware, bench_hasher);
criterion_main!(benches);
