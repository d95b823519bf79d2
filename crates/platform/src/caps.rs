//! Detected capability snapshot.

use core::fmt;

/// CPU architecture this binary targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arch {
  /// 64-bit x86.
  X86_64,
  /// 32-bit x86.
  X86,
  /// 64-bit ARM.
  Aarch64,
  /// Anything without a hardware CRC32C path in this workspace.
  Other,
}

impl Arch {
  /// The architecture of the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "x86") {
      Self::X86
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else {
      Self::Other
    }
  }

  /// Short lowercase name (`"x86_64"`, `"x86"`, `"aarch64"`, `"other"`).
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// What the running CPU can do, as far as CRC32C is concerned.
///
/// `CpuCaps` is `Copy`, `Send`, and `Sync`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CpuCaps {
  /// Architecture the probe ran on.
  pub arch: Arch,
  /// A hardware CRC32C instruction is available.
  pub hw_crc32c: bool,
}

impl CpuCaps {
  /// Capabilities with no hardware acceleration.
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self {
      arch: Arch::current(),
      hw_crc32c: false,
    }
  }
}

impl fmt::Display for CpuCaps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.hw_crc32c {
      write!(f, "{} (hardware crc32c)", self.arch)
    } else {
      write!(f, "{} (no hardware crc32c)", self.arch)
    }
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  fn portable_has_no_hardware() {
    let caps = CpuCaps::portable();
    assert!(!caps.hw_crc32c);
    assert_eq!(caps.arch, Arch::current());
  }

  #[test]
  fn display_mentions_arch() {
    let caps = CpuCaps {
      arch: Arch::Aarch64,
      hw_crc32c: true,
    };
    assert_eq!(caps.to_string(), "aarch64 (hardware crc32c)");
    assert_eq!(CpuCaps { hw_crc32c: false, ..caps }.to_string(), "aarch64 (no hardware crc32c)");
  }

  #[test]
  #[cfg(target_arch = "x86_64")]
  fn current_arch_x86_64() {
    assert_eq!(Arch::current(), Arch::X86_64);
  }

  #[test]
  #[cfg(target_arch = "aarch64")]
  fn current_arch_aarch64() {
    assert_eq!(Arch::current(), Arch::Aarch64);
  }
}
