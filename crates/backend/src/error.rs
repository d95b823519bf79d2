//! Selection errors.

use thiserror::Error;

use crate::SwMode;

/// The configured policy cannot be satisfied on this machine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
  /// `CRC32C_SW_MODE=none` was requested but no hardware CRC32C instruction exists.
  #[error(
    "hardware CRC32C instruction not available and software fallback disabled (CRC32C_SW_MODE={mode}); \
     unset CRC32C_SW_MODE or set it to \"auto\" or \"force\" to allow the software implementation"
  )]
  HardwareUnavailable {
    /// Policy that forbade the fallback.
    mode: SwMode,
  },
}
