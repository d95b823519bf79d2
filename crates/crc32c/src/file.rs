//! Whole-file checksumming for the command-line tool.
//!
//! Files are read either through a series of read-only memory maps
//! (`memmap2`) or through plain buffered reads, one block at a time.

#![allow(unsafe_code)]

use std::{
  fs::File,
  io::{self, Read},
  path::Path,
  time::{Duration, Instant},
};

use memmap2::MmapOptions;

use crate::Crc32cEngine;

/// Default window for memory-mapped reads (10 MiB).
pub const DEFAULT_BLOCK_SIZE_MMAP: usize = 10 * 1024 * 1024;

/// Default block for buffered reads (64 KiB).
pub const DEFAULT_BLOCK_SIZE_READ: usize = 64 * 1024;

/// How the file contents reach the checksum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadMode {
  /// Map `block_size`-byte windows of the file.
  Mmap,
  /// `read(2)` into a `block_size`-byte buffer.
  Buffered,
}

impl ReadMode {
  /// Block size used when none is given.
  #[must_use]
  pub const fn default_block_size(self) -> usize {
    match self {
      Self::Mmap => DEFAULT_BLOCK_SIZE_MMAP,
      Self::Buffered => DEFAULT_BLOCK_SIZE_READ,
    }
  }
}

/// Checksum of one file plus the time spent computing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileChecksum {
  pub crc: u32,
  pub size: u64,
  pub elapsed: Duration,
}

impl FileChecksum {
  /// Throughput in MiB/s, or `None` when no measurable time elapsed.
  #[must_use]
  pub fn mib_per_sec(&self) -> Option<f64> {
    let secs = self.elapsed.as_secs_f64();
    (secs > 0.0).then(|| self.size as f64 / secs / (1024.0 * 1024.0))
  }
}

/// Checksum the file at `path`.
///
/// # Errors
///
/// Opening, mapping, or reading the file failed; or `block_size` is zero.
pub fn checksum_file(engine: &Crc32cEngine, path: &Path, mode: ReadMode, block_size: usize) -> io::Result<FileChecksum> {
  if block_size == 0 {
    return Err(io::Error::new(io::ErrorKind::InvalidInput, "block size must be non-zero"));
  }

  let mut file = File::open(path)?;
  let size = file.metadata()?.len();

  let start = Instant::now();
  let crc = match mode {
    ReadMode::Mmap => checksum_mapped(engine, &file, size, block_size)?,
    ReadMode::Buffered => checksum_read(engine, &mut file, block_size)?,
  };

  Ok(FileChecksum {
    crc,
    size,
    elapsed: start.elapsed(),
  })
}

fn checksum_mapped(engine: &Crc32cEngine, file: &File, size: u64, block_size: usize) -> io::Result<u32> {
  let mut crc = 0;
  let mut offset = 0u64;
  while offset < size {
    let len = usize::try_from(size - offset).map_or(block_size, |rest| rest.min(block_size));
    // SAFETY: the mapping is read-only and dropped before the next window;
    // the file must not be truncated concurrently.
    let window = unsafe { MmapOptions::new().offset(offset).len(len).map(file)? };
    crc = engine.checksum(&window, crc);
    offset += len as u64;
  }
  Ok(crc)
}

fn checksum_read(engine: &Crc32cEngine, file: &mut File, block_size: usize) -> io::Result<u32> {
  let mut buf = vec![0u8; block_size];
  let mut crc = 0;
  loop {
    let n = match file.read(&mut buf) {
      Ok(0) => return Ok(crc),
      Ok(n) => n,
      Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
      Err(err) => return Err(err),
    };
    crc = engine.checksum(&buf[..n], crc);
  }
}
