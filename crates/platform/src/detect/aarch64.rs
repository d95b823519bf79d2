//! aarch64 detection via the ELF auxiliary vector.

/// ELF auxiliary vector entry carrying the hardware capability bitmask.
#[cfg_attr(not(all(feature = "std", any(target_os = "linux", target_os = "android"))), allow(dead_code))]
const AT_HWCAP: u64 = 16;

/// HWCAP bit for the CRC32 extension (linux/arch/arm64/include/uapi/asm/hwcap.h).
const HWCAP_CRC32: u64 = 1 << 7;

/// Read `AT_HWCAP` and test the CRC32 bit.
///
/// Works on Linux and Android (both expose procfs with ELF auxv format).
/// Anything that cannot be read reports "no CRC32".
#[cfg(all(feature = "std", any(target_os = "linux", target_os = "android")))]
pub(super) fn has_crc32() -> bool {
  use std::{fs::File, io::Read};

  let hwcap = (|| -> Option<u64> {
    let mut file = File::open("/proc/self/auxv").ok()?;
    let mut buf = [0u8; 4096]; // Auxiliary vector is small
    let n = file.read(&mut buf).ok()?;
    hwcap_from_auxv(buf.get(..n)?)
  })()
  .unwrap_or(0);

  crc32_from_hwcap(hwcap)
}

/// No kernel interface for HWCAP: assume no hardware.
#[cfg(not(all(feature = "std", any(target_os = "linux", target_os = "android"))))]
pub(super) fn has_crc32() -> bool {
  false
}

/// Find `AT_HWCAP` in a raw auxv dump (pairs of native-endian `u64`).
#[cfg_attr(not(all(feature = "std", any(target_os = "linux", target_os = "android"))), allow(dead_code))]
pub(super) fn hwcap_from_auxv(entries: &[u8]) -> Option<u64> {
  for chunk in entries.chunks_exact(16) {
    let a_type = u64::from_ne_bytes(chunk.get(0..8)?.try_into().ok()?);
    let a_val = u64::from_ne_bytes(chunk.get(8..16)?.try_into().ok()?);

    if a_type == AT_HWCAP {
      return Some(a_val);
    }
    if a_type == 0 {
      // AT_NULL terminates the vector
      break;
    }
  }
  None
}

#[inline]
#[cfg_attr(not(all(feature = "std", any(target_os = "linux", target_os = "android"))), allow(dead_code))]
pub(super) const fn crc32_from_hwcap(hwcap: u64) -> bool {
  hwcap & HWCAP_CRC32 != 0
}
