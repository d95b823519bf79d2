//! Pipeline error types.

use std::{collections::TryReserveError, fmt, io};

use thiserror::Error;

/// Stage of the pipeline an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamPhase {
  /// Buffer allocation, leading write, input descriptor setup.
  Preparing,
  /// Reading from the input descriptor.
  Reading,
  /// Writing a chunk to the output descriptor.
  Writing,
  /// Restoring the input descriptor after a successful loop.
  Finishing,
}

impl StreamPhase {
  /// Lowercase name for diagnostics.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Preparing => "preparing",
      Self::Reading => "reading",
      Self::Writing => "writing",
      Self::Finishing => "finishing",
    }
  }
}

impl fmt::Display for StreamPhase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Why a read from the input descriptor ended the pipeline.
#[derive(Debug, Error)]
pub enum ReadFailure {
  /// The peer closed before the byte budget was reached.
  #[error("input closed before all expected bytes arrived")]
  Closed,

  /// The receive timeout elapsed with no data.
  #[error("receive timed out: {0}")]
  TimedOut(#[source] io::Error),

  /// Any other OS error.
  #[error("I/O error: {0}")]
  Io(#[source] io::Error),
}

impl ReadFailure {
  /// Classify an OS error returned by `read(2)`.
  #[must_use]
  pub fn from_os(err: io::Error) -> Self {
    match err.kind() {
      // EAGAIN / EWOULDBLOCK / ETIMEDOUT
      io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Self::TimedOut(err),
      _ => Self::Io(err),
    }
  }
}

/// Why a write to the output descriptor ended the pipeline.
#[derive(Debug, Error)]
pub enum WriteFailure {
  /// The descriptor accepted fewer bytes than offered.
  #[error("partial write: {written} of {expected} bytes")]
  Partial {
    /// Bytes accepted.
    written: usize,
    /// Bytes offered.
    expected: usize,
  },

  /// The write itself failed.
  #[error("I/O error: {0}")]
  Io(#[source] io::Error),
}

/// Errors returned by [`stream_checksum`](super::stream_checksum).
#[derive(Debug, Error)]
pub enum StreamError {
  /// Capturing or changing the input descriptor's attributes failed.
  #[error("failed to prepare input descriptor: {0}")]
  Prepare(#[source] io::Error),

  /// The leading bytes could not be written in full.
  #[error("failed to write leading bytes: {0}")]
  LeadingWrite(#[source] WriteFailure),

  /// The transfer buffer could not be allocated.
  #[error("failed to allocate a {size}-byte transfer buffer")]
  Alloc {
    /// Requested buffer size.
    size: usize,
    /// Allocator error.
    #[source]
    source: TryReserveError,
  },

  /// A zero buffer size with bytes still to transfer.
  #[error("buffer size must be non-zero with {remaining} bytes remaining")]
  InvalidBufferSize {
    /// Bytes left in the budget.
    remaining: u64,
  },

  /// Reading a chunk failed.
  #[error("read failed: {0}")]
  Read(#[from] ReadFailure),

  /// Writing a chunk failed.
  #[error("write failed: {0}")]
  Write(#[from] WriteFailure),

  /// The loop finished but the input descriptor could not be restored.
  #[error("failed to restore input descriptor: {0}")]
  Restore(#[source] io::Error),
}

impl StreamError {
  /// The stage this error belongs to.
  #[must_use]
  pub const fn phase(&self) -> StreamPhase {
    match self {
      Self::Prepare(_) | Self::LeadingWrite(_) | Self::Alloc { .. } | Self::InvalidBufferSize { .. } => {
        StreamPhase::Preparing
      }
      Self::Read(_) => StreamPhase::Reading,
      Self::Write(_) => StreamPhase::Writing,
      Self::Restore(_) => StreamPhase::Finishing,
    }
  }

  /// The underlying OS error, where one exists.
  #[must_use]
  pub fn os_error(&self) -> Option<&io::Error> {
    match self {
      Self::Prepare(err)
      | Self::Restore(err)
      | Self::Read(ReadFailure::TimedOut(err) | ReadFailure::Io(err))
      | Self::Write(WriteFailure::Io(err))
      | Self::LeadingWrite(WriteFailure::Io(err)) => Some(err),
      _ => None,
    }
  }
}
