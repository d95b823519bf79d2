//! Backend resolution.
//!
//! [`select`] is a pure function of the policy and the probe result. It runs
//! once per engine; callers keep the resulting [`Selection`] and never
//! re-probe per call.

use core::fmt;

use crate::{ConfigError, SwMode};

/// A concrete CRC32C implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
  /// SSE4.2 `crc32` instruction (x86 / x86_64).
  HardwareX86,
  /// ARMv8 CRC32 extension `crc32c*` instructions (aarch64).
  HardwareArm,
  /// Table-driven slicing-by-8.
  Software,
}

impl Backend {
  /// The hardware backend native to the compilation target, if there is one.
  ///
  /// This says nothing about the running CPU; combine with a probe.
  /// Big-endian aarch64 has no hardware path.
  #[inline]
  #[must_use]
  pub const fn native_hardware() -> Option<Self> {
    if cfg!(any(target_arch = "x86", target_arch = "x86_64")) {
      Some(Self::HardwareX86)
    } else if cfg!(all(target_arch = "aarch64", target_endian = "little")) {
      Some(Self::HardwareArm)
    } else {
      None
    }
  }

  /// Whether this backend executes a hardware instruction.
  #[inline]
  #[must_use]
  pub const fn is_hardware(self) -> bool {
    !matches!(self, Self::Software)
  }

  /// Human-readable name for diagnostics.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::HardwareX86 => "x86/sse4.2",
      Self::HardwareArm => "aarch64/crc",
      Self::Software => "portable/slicing-by-8",
    }
  }
}

impl fmt::Display for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// The outcome of backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
  /// Chosen backend.
  pub backend: Backend,
  /// Whether the hardware branch was taken.
  pub hardware_based: bool,
}

impl Selection {
  #[inline]
  const fn new(backend: Backend) -> Self {
    Self {
      backend,
      hardware_based: backend.is_hardware(),
    }
  }

  /// Software selection, used when hardware is not wanted.
  #[inline]
  #[must_use]
  pub const fn software() -> Self {
    Self::new(Backend::Software)
  }
}

/// Resolve a policy and a probe result into a backend.
///
/// `hardware` is the backend the probe vouched for: `Some` only when the
/// running CPU supports the native instruction.
///
/// # Errors
///
/// [`ConfigError::HardwareUnavailable`] when `mode` is [`SwMode::None`] and
/// `hardware` is `None`.
#[inline]
pub fn select(mode: SwMode, hardware: Option<Backend>) -> Result<Selection, ConfigError> {
  match (mode, hardware) {
    (SwMode::Force, _) => Ok(Selection::software()),
    (_, Some(backend)) => Ok(Selection::new(backend)),
    (SwMode::Unspecified | SwMode::Auto, None) => Ok(Selection::software()),
    (SwMode::None, None) => Err(ConfigError::HardwareUnavailable { mode }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const HW: Option<Backend> = Some(Backend::HardwareX86);

  #[test]
  fn force_always_selects_software() {
    for hw in [HW, None] {
      let sel = select(SwMode::Force, hw).unwrap();
      assert_eq!(sel.backend, Backend::Software);
      assert!(!sel.hardware_based);
    }
  }

  #[test]
  fn auto_prefers_hardware() {
    for mode in [SwMode::Unspecified, SwMode::Auto] {
      let sel = select(mode, HW).unwrap();
      assert_eq!(sel.backend, Backend::HardwareX86);
      assert!(sel.hardware_based);
    }
  }

  #[test]
  fn auto_falls_back_silently() {
    for mode in [SwMode::Unspecified, SwMode::Auto] {
      let sel = select(mode, None).unwrap();
      assert_eq!(sel, Selection::software());
    }
  }

  #[test]
  fn none_with_hardware_selects_hardware() {
    let sel = select(SwMode::None, Some(Backend::HardwareArm)).unwrap();
    assert_eq!(sel.backend, Backend::HardwareArm);
    assert!(sel.hardware_based);
  }

  #[test]
  fn none_without_hardware_fails() {
    let err = select(SwMode::None, None).unwrap_err();
    assert_eq!(err, ConfigError::HardwareUnavailable { mode: SwMode::None });
  }

  #[test]
  fn native_hardware_matches_target() {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    assert_eq!(Backend::native_hardware(), Some(Backend::HardwareX86));
    #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
    assert_eq!(Backend::native_hardware(), Some(Backend::HardwareArm));
    #[cfg(not(any(
      target_arch = "x86",
      target_arch = "x86_64",
      all(target_arch = "aarch64", target_endian = "little")
    )))]
    assert_eq!(Backend::native_hardware(), None);
  }

  #[test]
  fn hardware_flag_follows_backend() {
    assert!(Backend::HardwareX86.is_hardware());
    assert!(Backend::HardwareArm.is_hardware());
    assert!(!Backend::Software.is_hardware());
  }
}
