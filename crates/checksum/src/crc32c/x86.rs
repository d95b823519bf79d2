//! x86 / x86_64 hardware CRC32-C (Castagnoli).
//!
//! Uses the SSE4.2 `crc32` instruction: the word-sized form over whole
//! machine words (8 bytes on x86_64, 4 on x86), then the byte form over the
//! remainder. Words are loaded in native (little-endian) order, which is the
//! order the instruction is defined over.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{_mm_crc32_u8, _mm_crc32_u32};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u64};

/// Bytes folded per word-sized instruction.
#[cfg(target_arch = "x86_64")]
pub(crate) const WORD: usize = 8;
#[cfg(target_arch = "x86")]
pub(crate) const WORD: usize = 4;

/// Compute CRC32-C using SSE4.2 `crc32` instructions.
///
/// # Safety
/// Caller must ensure the CPU supports the `sse4.2` target feature.
#[target_feature(enable = "sse4.2")]
unsafe fn compute_sse42_unchecked(crc: u32, data: &[u8]) -> u32 {
  let mut words = data.chunks_exact(WORD);

  #[cfg(target_arch = "x86_64")]
  let mut current = {
    let mut wide = u64::from(crc);
    for word in words.by_ref() {
      let mut bytes = [0u8; 8];
      bytes.copy_from_slice(word);
      wide = _mm_crc32_u64(wide, u64::from_ne_bytes(bytes));
    }
    // The instruction zero-extends its 32-bit result.
    wide as u32
  };

  #[cfg(target_arch = "x86")]
  let mut current = {
    let mut narrow = crc;
    for word in words.by_ref() {
      let mut bytes = [0u8; 4];
      bytes.copy_from_slice(word);
      narrow = _mm_crc32_u32(narrow, u32::from_ne_bytes(bytes));
    }
    narrow
  };

  for &byte in words.remainder() {
    current = _mm_crc32_u8(current, byte);
  }

  current
}

/// Compute CRC32-C with SSE4.2, after the probe has confirmed support.
///
/// Only reachable through a backend selected from a positive probe.
#[inline]
pub(crate) fn compute_sse42_runtime(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: selected only when the CPUID probe reported SSE4.2.
  unsafe { compute_sse42_unchecked(crc, data) }
}
