//! CPU capability probing for the CRC32C workspace.
//!
//! This crate answers a single question: can the running CPU execute a
//! hardware CRC32C (Castagnoli) instruction?
//!
//! # Core Types
//!
//! - [`CpuCaps`]: snapshot of what was detected (architecture + CRC32C support)
//! - [`Arch`]: the architecture this binary was compiled for
//!
//! # Main Entry Point
//!
//! ```
//! let caps = platform::caps();
//!
//! if caps.hw_crc32c {
//!   // The SSE4.2 `crc32` or ARMv8 `crc32c*` instructions may be executed.
//! }
//! assert_eq!(caps.hw_crc32c, platform::probe_crc32c());
//! ```
//!
//! # Detection Sources
//!
//! | Target | Compile-time | Runtime |
//! |--------|--------------|---------|
//! | x86 / x86_64 | `target_feature = "sse4.2"` | CPUID leaf 1, ECX bit 20 |
//! | aarch64 (Linux/Android) | `target_feature = "crc"` | `AT_HWCAP` bit 7 from `/proc/self/auxv` |
//! | aarch64 (other OS) | `target_feature = "crc"` | unavailable |
//! | everything else | - | unavailable |
//!
//! Probing never fails: a query that cannot run reports "no hardware".
//!
//! Under Miri the probe always reports "no hardware".

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, CpuCaps};

/// Get the detected CPU capabilities.
///
/// # Caching
///
/// - With `std`: detection runs once and is cached in a `OnceLock`.
/// - Without `std`: detection runs each call (a single CPUID on x86).
#[inline]
#[must_use]
pub fn caps() -> CpuCaps {
  detect::caps()
}

/// Whether the hardware CRC32C instruction is available.
///
/// Convenience wrapper around [`caps()`].
#[inline]
#[must_use]
pub fn probe_crc32c() -> bool {
  detect::caps().hw_crc32c
}

/// Whether the host stores multi-byte integers most-significant byte first.
///
/// Informational only; the checksum algorithms do not depend on it.
#[inline]
#[must_use]
pub const fn big_endian() -> bool {
  cfg!(target_endian = "big")
}
