//! Runtime CPU detection.
//!
//! Compile-time target features short-circuit the runtime query; otherwise
//! the per-architecture probe runs once (std) or per call (no_std).

use crate::caps::{Arch, CpuCaps};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

#[cfg(target_arch = "aarch64")]
mod aarch64;

/// Get the detected capabilities.
#[inline]
pub fn caps() -> CpuCaps {
  #[cfg(miri)]
  {
    CpuCaps::portable()
  }

  #[cfg(all(not(miri), feature = "std"))]
  {
    use std::sync::OnceLock;
    static CACHED: OnceLock<CpuCaps> = OnceLock::new();
    *CACHED.get_or_init(detect_uncached)
  }

  #[cfg(all(not(miri), not(feature = "std")))]
  {
    detect_uncached()
  }
}

/// Run detection without touching the cache.
#[cold]
#[cfg_attr(miri, allow(dead_code))]
pub(crate) fn detect_uncached() -> CpuCaps {
  CpuCaps {
    arch: Arch::current(),
    hw_crc32c: hw_crc32c_static() || hw_crc32c_runtime(),
  }
}

/// Hardware CRC32C guaranteed by the compilation target.
#[inline]
const fn hw_crc32c_static() -> bool {
  cfg!(any(
    all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse4.2"),
    all(target_arch = "aarch64", target_feature = "crc"),
  ))
}

#[inline]
fn hw_crc32c_runtime() -> bool {
  #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
  {
    x86::has_sse42()
  }

  #[cfg(target_arch = "aarch64")]
  {
    aarch64::has_crc32()
  }

  #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
  {
    false
  }
}
