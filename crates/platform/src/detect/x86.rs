//! x86 / x86_64 detection via CPUID.

#![allow(unsafe_code)]

#[cfg(target_arch = "x86")]
use core::arch::x86::__cpuid;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::__cpuid;

/// SSE4.2 feature flag in CPUID leaf 1, ECX. Implies the `crc32` instruction.
const CPUID1_ECX_SSE42: u32 = 1 << 20;

/// Query CPUID leaf 1 and test the SSE4.2 bit.
pub(super) fn has_sse42() -> bool {
  // SAFETY: CPUID is present on every CPU Rust's x86 and x86_64 targets run on.
  #[allow(unused_unsafe)]
  let leaf1 = unsafe { __cpuid(1) };
  sse42_from_ecx(leaf1.ecx)
}

#[inline]
pub(super) const fn sse42_from_ecx(ecx: u32) -> bool {
  ecx & CPUID1_ECX_SSE42 != 0
}
