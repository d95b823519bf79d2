//! CRC32C runtime configuration (environment overrides).
//!
//! This module centralizes the selection knobs:
//! - `CRC32C_SW_MODE`: software-fallback policy, see [`SwMode`]
//! - `CRC32C_SKIP_HW_PROBE=1`: report "no hardware" regardless of the CPU
//!
//! The environment is read by [`Config::from_env`]; nothing re-reads it
//! afterwards.

use tracing::debug;

use crate::{Backend, ConfigError, Selection, SwMode, select};

/// Environment variable holding the software-fallback policy.
pub const SW_MODE_ENV: &str = "CRC32C_SW_MODE";

/// Environment variable that disables the hardware probe when set to `1`.
pub const SKIP_HW_PROBE_ENV: &str = "CRC32C_SKIP_HW_PROBE";

/// Selection configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Config {
  /// Software-fallback policy.
  pub sw_mode: SwMode,
  /// Treat the hardware probe as negative.
  pub skip_hw_probe: bool,
}

impl Config {
  /// Default configuration: unspecified policy, probe enabled.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      sw_mode: SwMode::Unspecified,
      skip_hw_probe: false,
    }
  }

  /// Read `CRC32C_SW_MODE` and `CRC32C_SKIP_HW_PROBE` from the environment.
  #[must_use]
  pub fn from_env() -> Self {
    let sw_mode = std::env::var(SW_MODE_ENV).ok();
    let skip = std::env::var(SKIP_HW_PROBE_ENV).ok();
    Self::from_values(sw_mode.as_deref(), skip.as_deref())
  }

  /// Build a configuration from raw variable values (`None` = unset).
  #[must_use]
  pub fn from_values(sw_mode: Option<&str>, skip_hw_probe: Option<&str>) -> Self {
    Self {
      sw_mode: SwMode::parse(sw_mode),
      skip_hw_probe: skip_hw_probe == Some("1"),
    }
  }

  /// Set the software-fallback policy.
  #[must_use]
  pub const fn with_sw_mode(mut self, sw_mode: SwMode) -> Self {
    self.sw_mode = sw_mode;
    self
  }

  /// Enable or disable the probe-skip switch.
  #[must_use]
  pub const fn with_skip_hw_probe(mut self, skip: bool) -> Self {
    self.skip_hw_probe = skip;
    self
  }

  /// The hardware backend this configuration may use on this machine.
  ///
  /// `None` when the probe is skipped, the CPU lacks the instruction, or the
  /// target has no hardware path.
  #[must_use]
  pub fn probed_hardware(&self) -> Option<Backend> {
    if self.skip_hw_probe || !platform::probe_crc32c() {
      return None;
    }
    Backend::native_hardware()
  }

  /// Probe the CPU and select a backend.
  ///
  /// # Errors
  ///
  /// See [`select`].
  pub fn resolve(&self) -> Result<Selection, ConfigError> {
    let hardware = self.probed_hardware();
    let selection = select(self.sw_mode, hardware);
    match &selection {
      Ok(sel) => debug!(
        sw_mode = %self.sw_mode,
        skip_hw_probe = self.skip_hw_probe,
        backend = %sel.backend,
        "crc32c backend selected"
      ),
      Err(err) => debug!(sw_mode = %self.sw_mode, %err, "crc32c backend selection failed"),
    }
    selection
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_values_parses_both_knobs() {
    let cfg = Config::from_values(Some("force"), Some("1"));
    assert_eq!(cfg.sw_mode, SwMode::Force);
    assert!(cfg.skip_hw_probe);

    let cfg = Config::from_values(None, None);
    assert_eq!(cfg, Config::new());
  }

  #[test]
  fn skip_probe_requires_exactly_one() {
    for value in ["0", "true", "yes", " 1", ""] {
      assert!(!Config::from_values(None, Some(value)).skip_hw_probe, "{value:?}");
    }
  }

  #[test]
  fn skipped_probe_reports_no_hardware() {
    let cfg = Config::new().with_skip_hw_probe(true);
    assert_eq!(cfg.probed_hardware(), None);
  }

  #[test]
  fn skipped_probe_with_none_mode_fails() {
    let cfg = Config::new().with_sw_mode(SwMode::None).with_skip_hw_probe(true);
    assert!(matches!(cfg.resolve(), Err(ConfigError::HardwareUnavailable { .. })));
  }

  #[test]
  fn skipped_probe_with_auto_mode_uses_software() {
    let cfg = Config::new().with_sw_mode(SwMode::Auto).with_skip_hw_probe(true);
    assert_eq!(cfg.resolve().unwrap(), Selection::software());
  }

  #[test]
  fn probe_result_drives_auto_selection() {
    let sel = Config::new().resolve().unwrap();
    assert_eq!(sel.hardware_based, platform::probe_crc32c() && Backend::native_hardware().is_some());
  }
}
