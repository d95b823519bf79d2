//! Streaming read-checksum-write pipeline over raw descriptors.
//!
//! [`stream_checksum`] copies a fixed number of bytes from an input
//! descriptor to an output descriptor, folding every forwarded byte into a
//! CRC32-C accumulator and timing the write and checksum work separately.
//!
//! The input descriptor is switched to blocking mode with a receive timeout
//! for the duration of the call; its original attributes are restored on
//! every exit path.
//!
//! ```no_run
//! use std::{os::fd::AsFd, os::unix::net::UnixStream, time::Duration};
//!
//! use checksum::{Crc32cEngine, stream::{StreamOptions, stream_checksum}};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (input, _) = UnixStream::pair()?;
//! let (output, _) = UnixStream::pair()?;
//! let opts = StreamOptions::new(1024).with_timeout(Duration::from_secs(5));
//!
//! let report = stream_checksum(&Crc32cEngine::from_env()?, input.as_fd(), b"", output.as_fd(), &opts)?;
//! println!("crc={:08x} in {:?}", report.crc, report.compute_time());
//! # Ok(())
//! # }
//! ```

mod error;
mod fd;

use std::{
  os::fd::{AsRawFd, BorrowedFd},
  time::{Duration, Instant},
};

use tracing::{debug, warn};

pub use self::error::{ReadFailure, StreamError, StreamPhase, WriteFailure};
use self::fd::InputGuard;
use crate::engine::Crc32cEngine;

/// Default transfer buffer size (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Parameters of one pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamOptions {
  /// Receive timeout on the input. Zero blocks indefinitely.
  pub timeout: Duration,
  /// Largest chunk read per iteration.
  pub buffer_size: usize,
  /// Total bytes to forward, leading bytes included.
  pub total_bytes: u64,
  /// Checksum to continue from (0 to start).
  pub initial: u32,
}

impl StreamOptions {
  /// Forward `total_bytes` with the default buffer and no timeout.
  #[must_use]
  pub const fn new(total_bytes: u64) -> Self {
    Self {
      timeout: Duration::ZERO,
      buffer_size: DEFAULT_BUFFER_SIZE,
      total_bytes,
      initial: 0,
    }
  }

  #[must_use]
  pub const fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  #[must_use]
  pub const fn with_buffer_size(mut self, buffer_size: usize) -> Self {
    self.buffer_size = buffer_size;
    self
  }

  #[must_use]
  pub const fn with_initial(mut self, initial: u32) -> Self {
    self.initial = initial;
    self
  }
}

/// Result of a successful pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamReport {
  /// Checksum over the leading bytes and everything forwarded.
  pub crc: u32,
  /// Microseconds spent in the checksum kernel (saturating).
  pub compute_micros: u64,
  /// Microseconds spent writing chunks to the output (saturating).
  pub write_micros: u64,
}

impl StreamReport {
  #[must_use]
  pub const fn compute_time(&self) -> Duration {
    Duration::from_micros(self.compute_micros)
  }

  #[must_use]
  pub const fn write_time(&self) -> Duration {
    Duration::from_micros(self.write_micros)
  }
}

/// Elapsed time accumulated across the loop.
#[derive(Default)]
struct Timers {
  compute: Duration,
  write: Duration,
}

fn micros(elapsed: Duration) -> u64 {
  u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Forward `opts.total_bytes` from `input` to `output`, checksumming as it goes.
///
/// `leading` is written to `output` first and counts toward the total. Each
/// chunk read is written exactly once and then folded into the checksum, so
/// the returned value covers exactly the bytes the output accepted.
///
/// # Errors
///
/// Any [`StreamError`]; see [`StreamError::phase`] for where it happened.
/// On error no partial checksum is returned.
pub fn stream_checksum(
  engine: &Crc32cEngine,
  input: BorrowedFd<'_>,
  leading: &[u8],
  output: BorrowedFd<'_>,
  opts: &StreamOptions,
) -> Result<StreamReport, StreamError> {
  let remaining = opts.total_bytes.saturating_sub(leading.len() as u64);
  if remaining > 0 && opts.buffer_size == 0 {
    return Err(StreamError::InvalidBufferSize { remaining });
  }

  let size = usize::try_from(remaining).map_or(opts.buffer_size, |r| r.min(opts.buffer_size));
  let mut buf = Vec::new();
  buf
    .try_reserve_exact(size)
    .map_err(|source| StreamError::Alloc { size, source })?;
  buf.resize(size, 0);

  debug!(
    input = input.as_raw_fd(),
    output = output.as_raw_fd(),
    total_bytes = opts.total_bytes,
    leading = leading.len(),
    buffer_size = size,
    timeout_ms = opts.timeout.as_millis() as u64,
    "stream checksum start"
  );

  let mut timers = Timers::default();
  let mut crc = opts.initial;

  if !leading.is_empty() {
    let start = Instant::now();
    write_chunk(output, leading).map_err(StreamError::LeadingWrite)?;
    timers.write += start.elapsed();

    let start = Instant::now();
    crc = engine.checksum(leading, crc);
    timers.compute += start.elapsed();
  }

  let guard = InputGuard::prepare(input, opts.timeout).map_err(StreamError::Prepare)?;
  if !guard.has_timeout() {
    debug!(input = input.as_raw_fd(), "input is not a socket, no receive timeout applied");
  }

  let pumped = pump(engine, input, output, &mut buf, remaining, crc, &mut timers);

  let crc = match (pumped, guard.restore()) {
    (Ok(crc), Ok(())) => crc,
    (Ok(_), Err(err)) => return Err(StreamError::Restore(err)),
    (Err(err), Ok(())) => return Err(err),
    (Err(err), Err(restore)) => {
      warn!(phase = %err.phase(), %err, %restore, "failed to restore input descriptor after stream error");
      return Err(err);
    }
  };

  let report = StreamReport {
    crc,
    compute_micros: micros(timers.compute),
    write_micros: micros(timers.write),
  };
  debug!(
    crc = format_args!("{:08x}", report.crc),
    compute_us = report.compute_micros,
    write_us = report.write_micros,
    "stream checksum done"
  );
  Ok(report)
}

/// The read, write, checksum loop.
fn pump(
  engine: &Crc32cEngine,
  input: BorrowedFd<'_>,
  output: BorrowedFd<'_>,
  buf: &mut [u8],
  mut remaining: u64,
  mut crc: u32,
  timers: &mut Timers,
) -> Result<u32, StreamError> {
  while remaining > 0 {
    let want = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
    let chunk = match fd::read(input, &mut buf[..want]) {
      Ok(0) => return Err(ReadFailure::Closed.into()),
      Ok(n) => &buf[..n],
      Err(err) => return Err(ReadFailure::from_os(err).into()),
    };

    let start = Instant::now();
    write_chunk(output, chunk)?;
    timers.write += start.elapsed();

    let start = Instant::now();
    crc = engine.checksum(chunk, crc);
    timers.compute += start.elapsed();

    remaining -= chunk.len() as u64;
  }
  Ok(crc)
}

/// Write `chunk` with a single call; anything short of the full length fails.
fn write_chunk(output: BorrowedFd<'_>, chunk: &[u8]) -> Result<(), WriteFailure> {
  match fd::write(output, chunk) {
    Ok(n) if n == chunk.len() => Ok(()),
    Ok(written) => Err(WriteFailure::Partial {
      written,
      expected: chunk.len(),
    }),
    Err(err) => Err(WriteFailure::Io(err)),
  }
}
