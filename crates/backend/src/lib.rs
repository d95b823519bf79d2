//! Backend selection for CRC32C.
//!
//! This crate decides, once, which CRC32C implementation a process uses:
//!
//! - **Policy**: [`SwMode`], parsed from `CRC32C_SW_MODE`
//! - **Configuration**: [`Config`], the policy plus the probe-skip switch
//! - **Selection**: [`select`] maps `(policy, probe)` to a [`Backend`]
//!
//! # Selection Table
//!
//! | policy | hardware probe | result |
//! |--------|----------------|--------|
//! | `Force` | any | software |
//! | `Unspecified` / `Auto` | yes | hardware |
//! | `Unspecified` / `Auto` | no | software |
//! | `None` | yes | hardware |
//! | `None` | no | [`ConfigError::HardwareUnavailable`] |
//!
//! # Usage
//!
//! ```
//! use backend::{Config, SwMode};
//!
//! let config = Config::new().with_sw_mode(SwMode::Force);
//! let selection = config.resolve().unwrap();
//! assert!(!selection.hardware_based);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod policy;

pub use config::Config;
pub use dispatch::{Backend, Selection, select};
pub use error::ConfigError;
// Re-export platform types for convenience.
pub use platform;
pub use policy::SwMode;
