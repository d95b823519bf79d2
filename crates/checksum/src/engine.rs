//! The resolved CRC32-C engine.
//!
//! A [`Crc32cEngine`] is the immutable product of backend selection: the
//! chosen kernel plus the diagnostics callers may inspect. Build it once and
//! pass it by reference; construction is the only place the selection
//! policy is evaluated.

use core::fmt;

use backend::{Backend, Config, ConfigError, Selection};

use crate::{
  crc32c::{Crc32Fn, kernel_for},
  release::{self, ExecutionLock, NoLock, ReleaseMode},
};

/// Ones-complement applied to the register on entry and exit.
const INVERT: u32 = 0xFFFF_FFFF;

/// An immutable CRC32-C configuration bound to one kernel.
///
/// `Crc32cEngine` is `Copy`, `Send`, and `Sync`; share it freely.
///
/// # Example
///
/// ```
/// use checksum::Crc32cEngine;
///
/// let engine = Crc32cEngine::software();
/// assert_eq!(engine.checksum(b"123456789", 0), 0xE306_9283);
///
/// // Incremental: feed the previous result back in.
/// let crc = engine.checksum(b"1234", 0);
/// assert_eq!(engine.checksum(b"56789", crc), 0xE306_9283);
/// ```
#[derive(Clone, Copy)]
pub struct Crc32cEngine {
  kernel: Crc32Fn,
  selection: Selection,
}

impl Crc32cEngine {
  /// Probe the CPU and select a backend according to `config`.
  ///
  /// # Errors
  ///
  /// [`ConfigError::HardwareUnavailable`] when the configuration forbids the
  /// software fallback and no hardware instruction is available.
  pub fn new(config: &Config) -> Result<Self, ConfigError> {
    config.resolve().map(Self::from_selection)
  }

  /// Build from the process environment (`CRC32C_SW_MODE`, `CRC32C_SKIP_HW_PROBE`).
  ///
  /// # Errors
  ///
  /// See [`new`](Self::new).
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::new(&Config::from_env())
  }

  /// An engine that always uses the software kernel.
  #[must_use]
  pub fn software() -> Self {
    Self::from_selection(Selection::software())
  }

  fn from_selection(selection: Selection) -> Self {
    Self {
      kernel: kernel_for(selection.backend),
      selection,
    }
  }

  /// The selected backend.
  #[inline]
  #[must_use]
  pub const fn backend(&self) -> Backend {
    self.selection.backend
  }

  /// Whether the hardware branch was taken during selection.
  #[inline]
  #[must_use]
  pub const fn hardware_based(&self) -> bool {
    self.selection.hardware_based
  }

  /// Host byte order (informational).
  #[inline]
  #[must_use]
  pub const fn big_endian(&self) -> bool {
    platform::big_endian()
  }

  /// Checksum `data`, continuing from a previous checksum `initial` (0 to start).
  ///
  /// Runs with [`ReleaseMode::Auto`] and no host lock.
  #[inline]
  #[must_use]
  pub fn checksum(&self, data: &[u8], initial: u32) -> u32 {
    self.checksum_with(data, initial, ReleaseMode::Auto, &NoLock)
  }

  /// Checksum `data`, releasing `lock` around the kernel when `mode` asks for it.
  #[inline]
  pub fn checksum_with<L: ExecutionLock + ?Sized>(&self, data: &[u8], initial: u32, mode: ReleaseMode, lock: &L) -> u32 {
    release::run(lock, mode, data.len(), || self.update(initial ^ INVERT, data)) ^ INVERT
  }

  /// Fold `data` into a raw register value (no complement on either side).
  #[inline]
  #[must_use]
  pub fn update(&self, state: u32, data: &[u8]) -> u32 {
    (self.kernel)(state, data)
  }
}

impl fmt::Debug for Crc32cEngine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Crc32cEngine")
      .field("backend", &self.selection.backend)
      .field("hardware_based", &self.selection.hardware_based)
      .finish()
  }
}

impl PartialEq for Crc32cEngine {
  fn eq(&self, other: &Self) -> bool {
    self.selection == other.selection
  }
}

impl Eq for Crc32cEngine {}
