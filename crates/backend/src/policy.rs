//! Software-fallback policy.
//!
//! The policy is a closed enum parsed once from an external string (normally
//! the `CRC32C_SW_MODE` environment variable). Parsing is exact and
//! case-sensitive; anything unrecognised means [`SwMode::Unspecified`].

use core::fmt;

/// How the software implementation may be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SwMode {
  /// No preference given. Behaves like [`SwMode::Auto`].
  #[default]
  Unspecified,
  /// Use hardware when available, software otherwise.
  Auto,
  /// Always use software, even when hardware is available.
  Force,
  /// Require hardware; selection fails instead of falling back to software.
  None,
}

impl SwMode {
  /// Parse a policy value. `None` (unset) and unknown strings map to `Unspecified`.
  #[must_use]
  pub fn parse(value: Option<&str>) -> Self {
    match value {
      Some("auto") => Self::Auto,
      Some("force") => Self::Force,
      Some("none") => Self::None,
      _ => Self::Unspecified,
    }
  }

  /// The string accepted by [`parse`](Self::parse) for this mode.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Unspecified => "unspecified",
      Self::Auto => "auto",
      Self::Force => "force",
      Self::None => "none",
    }
  }

  /// Whether this mode permits falling back to software when hardware is missing.
  #[must_use]
  pub const fn allows_fallback(self) -> bool {
    !matches!(self, Self::None)
  }
}

impl fmt::Display for SwMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_known_values() {
    assert_eq!(SwMode::parse(Some("auto")), SwMode::Auto);
    assert_eq!(SwMode::parse(Some("force")), SwMode::Force);
    assert_eq!(SwMode::parse(Some("none")), SwMode::None);
  }

  #[test]
  fn parse_unset_and_unknown() {
    assert_eq!(SwMode::parse(None), SwMode::Unspecified);
    assert_eq!(SwMode::parse(Some("")), SwMode::Unspecified);
    assert_eq!(SwMode::parse(Some("FORCE")), SwMode::Unspecified);
    assert_eq!(SwMode::parse(Some(" auto")), SwMode::Unspecified);
    assert_eq!(SwMode::parse(Some("portable")), SwMode::Unspecified);
  }

  #[test]
  fn as_str_round_trips_for_explicit_modes() {
    for mode in [SwMode::Auto, SwMode::Force, SwMode::None] {
      assert_eq!(SwMode::parse(Some(mode.as_str())), mode);
    }
  }

  #[test]
  fn only_none_forbids_fallback() {
    assert!(SwMode::Unspecified.allows_fallback());
    assert!(SwMode::Auto.allows_fallback());
    assert!(SwMode::Force.allows_fallback());
    assert!(!SwMode::None.allows_fallback());
  }
}
