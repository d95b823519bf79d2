//! CRC32C (Castagnoli) checksums with hardware acceleration.
//!
//! The free functions in this crate share one process-wide
//! [`Crc32cEngine`], built on first use from the environment:
//!
//! | Variable | Values | Effect |
//! |----------|--------|--------|
//! | `CRC32C_SW_MODE` | unset, `auto` | hardware if available, else software |
//! | | `force` | always software |
//! | | `none` | hardware only; every call fails without it |
//! | `CRC32C_SKIP_HW_PROBE` | `1` | treat the CPU as lacking the instruction |
//!
//! The environment is read once. Callers that need a different policy build
//! their own engine with [`Crc32cEngine::new`].
//!
//! # Quick Start
//!
//! ```
//! // One-shot computation
//! let crc = crc32c::crc32c(b"123456789", 0)?;
//! assert_eq!(crc, 0xE306_9283);
//!
//! // Chained computation
//! let crc = crc32c::crc32c(b"1234", 0)?;
//! assert_eq!(crc32c::crc32c(b"56789", crc)?, 0xE306_9283);
//! # Ok::<(), crc32c::ConfigError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use std::sync::OnceLock;

pub mod file;

pub use backend::{Backend, Config, ConfigError, SwMode};
#[cfg(unix)]
pub use checksum::stream;
pub use checksum::{Crc32cEngine, Crc32cHash, ExecutionLock, NoLock, RELEASE_THRESHOLD, ReleaseMode};
use tracing::warn;

static ENGINE: OnceLock<Result<Crc32cEngine, ConfigError>> = OnceLock::new();

/// The process-wide engine, built from the environment on first call.
///
/// # Errors
///
/// [`ConfigError::HardwareUnavailable`] when `CRC32C_SW_MODE=none` and the
/// CPU lacks the instruction. The outcome is cached: every later call
/// returns the same error.
pub fn engine() -> Result<&'static Crc32cEngine, ConfigError> {
  ENGINE.get_or_init(Crc32cEngine::from_env).as_ref().map_err(|err| *err)
}

/// CRC32C of `data`, continuing from `initial` (0 to start).
///
/// # Errors
///
/// See [`engine`].
#[inline]
pub fn crc32c(data: &[u8], initial: u32) -> Result<u32, ConfigError> {
  Ok(engine()?.checksum(data, initial))
}

/// CRC32C of `data` with an explicit lock-release policy.
///
/// # Errors
///
/// See [`engine`].
#[inline]
pub fn crc32c_with<L: ExecutionLock + ?Sized>(
  data: &[u8],
  initial: u32,
  mode: ReleaseMode,
  lock: &L,
) -> Result<u32, ConfigError> {
  Ok(engine()?.checksum_with(data, initial, mode, lock))
}

/// Former name of [`crc32c`].
///
/// # Errors
///
/// See [`engine`].
#[deprecated(since = "0.1.0", note = "use `crc32c` instead")]
pub fn crc32(data: &[u8], initial: u32) -> Result<u32, ConfigError> {
  warn!("crc32c::crc32 is deprecated; use crc32c::crc32c instead");
  crc32c(data, initial)
}

/// Whether the process-wide engine uses the hardware instruction.
///
/// # Errors
///
/// See [`engine`].
pub fn hardware_based() -> Result<bool, ConfigError> {
  engine().map(Crc32cEngine::hardware_based)
}

/// Whether the host is big-endian.
#[must_use]
pub const fn big_endian() -> bool {
  platform::big_endian()
}

/// A hasher bound to the process-wide engine.
///
/// # Errors
///
/// See [`engine`].
pub fn hasher() -> Result<Crc32cHash, ConfigError> {
  engine().map(|engine| Crc32cHash::new(*engine))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn check_value() {
    assert_eq!(crc32c(b"123456789", 0).unwrap(), 0xE306_9283);
    assert_eq!(crc32c(b"", 0).unwrap(), 0);
    assert_eq!(crc32c(b"", 10).unwrap(), 10);
  }

  #[test]
  fn engine_is_built_once() {
    let a = engine().unwrap();
    let b = engine().unwrap();
    assert!(core::ptr::eq(a, b));
  }

  #[test]
  #[allow(deprecated)]
  fn deprecated_alias_delegates() {
    assert_eq!(crc32(b"123456789", 0).unwrap(), crc32c(b"123456789", 0).unwrap());
  }

  #[test]
  fn with_release_mode() {
    let data = vec![7u8; RELEASE_THRESHOLD + 1];
    let expected = crc32c(&data, 0).unwrap();
    for raw in [-1, 0, 1] {
      assert_eq!(crc32c_with(&data, 0, ReleaseMode::from_raw(raw), &NoLock).unwrap(), expected);
    }
  }

  #[test]
  fn hardware_flag_matches_engine() {
    assert_eq!(hardware_based().unwrap(), engine().unwrap().hardware_based());
    assert_eq!(big_endian(), cfg!(target_endian = "big"));
  }

  #[test]
  fn hasher_uses_global_engine() {
    let mut h = hasher().unwrap();
    h.update(b"123456789");
    assert_eq!(h.checksum(), 0xE306_9283);
  }
}
