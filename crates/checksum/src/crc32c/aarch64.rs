//! aarch64 hardware CRC32-C (Castagnoli).
//!
//! Uses the ARMv8 CRC32 extension: `crc32cx` over whole 8-byte words, then
//! `crc32cb` over the remainder.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::aarch64::{__crc32cb, __crc32cd};

pub(crate) const WORD: usize = 8;

/// Compute CRC32-C using the ARMv8 CRC32 extension.
///
/// # Safety
/// Caller must ensure the CPU supports the `crc` target feature.
#[target_feature(enable = "crc")]
unsafe fn compute_crc_unchecked(crc: u32, data: &[u8]) -> u32 {
  let mut current = crc;
  let mut words = data.chunks_exact(WORD);

  for word in words.by_ref() {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(word);
    current = __crc32cd(current, u64::from_le_bytes(bytes));
  }

  for &byte in words.remainder() {
    current = __crc32cb(current, byte);
  }

  current
}

/// Compute CRC32-C with the CRC extension, after the probe has confirmed support.
///
/// Only reachable through a backend selected from a positive probe.
#[inline]
pub(crate) fn compute_crc_runtime(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: selected only when AT_HWCAP reported CRC32 (or it is enabled at compile time).
  unsafe { compute_crc_unchecked(crc, data) }
}
