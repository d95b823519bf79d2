//! CRC32-C (Castagnoli) kernels.
//!
//! CRC32-C uses polynomial 0x1EDC6F41, chosen for its error detection
//! properties on storage and networking payloads.
//!
//! Two kernels exist, with identical output for every `(crc, data)`:
//!
//! | Kernel | Implementation |
//! |--------|----------------|
//! | hardware | SSE4.2 `crc32` (x86/x86_64) or ARMv8 CRC extension (aarch64) |
//! | software | slicing-by-8 over compile-time tables |
//!
//! Kernels work on the raw register: no ones-complement is applied on entry
//! or exit. [`Crc32cEngine`](crate::Crc32cEngine) applies the complement.

pub(crate) mod portable;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod x86;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;

use backend::Backend;

/// Signature shared by every CRC32-C kernel: `fn(crc, data) -> crc`.
pub type Crc32Fn = fn(u32, &[u8]) -> u32;

/// Software (slicing-by-8) CRC32-C over the raw register.
///
/// Total and available on every target.
///
/// ```
/// use checksum::crc32c::sw_crc32c;
///
/// assert_eq!(sw_crc32c(!0, b"123456789") ^ !0, 0xE306_9283);
/// ```
#[inline]
#[must_use]
pub fn sw_crc32c(crc: u32, data: &[u8]) -> u32 {
  portable::compute(crc, data)
}

/// Hardware CRC32-C over the raw register.
///
/// Returns `None` when the running CPU lacks the instruction. This asks the
/// CPU directly: `CRC32C_SKIP_HW_PROBE` and `CRC32C_SW_MODE` only affect
/// engines built from a [`Config`](backend::Config), so differential checks
/// against [`sw_crc32c`] still reach the hardware under those settings.
#[inline]
#[must_use]
pub fn hw_crc32c(crc: u32, data: &[u8]) -> Option<u32> {
  hardware_kernel().map(|kernel| kernel(crc, data))
}

/// The native hardware kernel, if the probe confirms it can run here.
///
/// Like [`hw_crc32c`], ignores the environment switches.
#[inline]
#[must_use]
pub fn hardware_kernel() -> Option<Crc32Fn> {
  if !platform::probe_crc32c() {
    return None;
  }
  Backend::native_hardware().map(kernel_unchecked)
}

/// Resolve a backend into its kernel.
///
/// Hardware backends are honoured only when the probe confirms the running
/// CPU supports them; otherwise the software kernel is returned, so the
/// result is always safe to call.
#[inline]
#[must_use]
pub fn kernel_for(backend: Backend) -> Crc32Fn {
  if backend.is_hardware() && (!platform::probe_crc32c() || Backend::native_hardware() != Some(backend)) {
    return portable::compute;
  }
  kernel_unchecked(backend)
}

/// Map a backend to its kernel without consulting the probe.
///
/// Hardware kernels for a foreign architecture resolve to software.
fn kernel_unchecked(backend: Backend) -> Crc32Fn {
  match backend {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    Backend::HardwareX86 => x86::compute_sse42_runtime,
    #[cfg(target_arch = "aarch64")]
    Backend::HardwareArm => aarch64::compute_crc_runtime,
    _ => portable::compute,
  }
}

/// Bytes folded per word-sized hardware instruction on this target.
#[must_use]
pub const fn hardware_word_size() -> Option<usize> {
  #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
  {
    Some(x86::WORD)
  }
  #[cfg(target_arch = "aarch64")]
  {
    Some(aarch64::WORD)
  }
  #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
  {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gen_bytes(len: usize, seed: u64) -> std::vec::Vec<u8> {
    let mut out = std::vec::Vec::with_capacity(len);
    let mut x = seed;
    for _ in 0..len {
      // xorshift64*
      x ^= x << 13;
      x ^= x >> 7;
      x ^= x << 17;
      out.push((x as u8).wrapping_add((x >> 8) as u8));
    }
    out
  }

  #[test]
  fn software_kernel_for_software_backend() {
    let kernel = kernel_for(Backend::Software);
    assert_eq!(kernel(!0, b"123456789") ^ !0, 0xE306_9283);
  }

  #[test]
  fn foreign_hardware_backend_resolves_to_software() {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    let foreign = Backend::HardwareArm;
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    let foreign = Backend::HardwareX86;

    let data = gen_bytes(123, 7);
    assert_eq!(kernel_for(foreign)(0, &data), sw_crc32c(0, &data));
  }

  #[test]
  fn hw_availability_follows_probe() {
    let expected = platform::probe_crc32c() && Backend::native_hardware().is_some();
    assert_eq!(hw_crc32c(0, b"").is_some(), expected);
  }

  #[test]
  fn hw_kernel_ignores_skipped_config_probe() {
    let skipped = backend::Config::from_values(None, Some("1"));
    assert_eq!(skipped.probed_hardware(), None);
    assert_eq!(
      hardware_kernel().is_some(),
      platform::probe_crc32c() && Backend::native_hardware().is_some()
    );
  }

  #[test]
  fn hw_matches_sw_on_word_boundaries() {
    let Some(word) = hardware_word_size() else {
      return;
    };
    let inits = [0u32, 0xFFFF_FFFF, 0x0123_4567];

    for len in [0, 1, word - 1, word, word + 1, 2 * word - 1, 2 * word, 255, 256, 1024] {
      let data = gen_bytes(len, len as u64 ^ 0x9E37_79B9_7F4A_7C15);
      for &init in &inits {
        if let Some(hw) = hw_crc32c(init, &data) {
          assert_eq!(hw, sw_crc32c(init, &data), "len={len} init={init:#010x}");
        }
      }
    }
  }

  #[test]
  fn hw_check_value() {
    if let Some(crc) = hw_crc32c(!0, b"123456789") {
      assert_eq!(crc ^ !0, 0xE306_9283);
    }
  }
}
