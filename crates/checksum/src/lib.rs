//! CRC32-C (Castagnoli) with runtime hardware/software dispatch.
//!
//! The checksum is computed by one of two kernels with identical output:
//!
//! | Kernel | Platform | Implementation |
//! |--------|----------|----------------|
//! | hardware | x86 / x86_64 | SSE4.2 `crc32` |
//! | hardware | aarch64 | ARMv8 CRC extension |
//! | software | everywhere | slicing-by-8 |
//!
//! Which kernel runs is decided once, when a [`Crc32cEngine`] is built from a
//! [`Config`] (CPU probe plus the `CRC32C_SW_MODE` policy). The engine is an
//! immutable `Copy` value; pass it wherever checksums are needed.
//!
//! # Example
//!
//! ```rust
//! use checksum::{Config, Crc32cEngine, Crc32cHash};
//!
//! let engine = Crc32cEngine::new(&Config::new()).unwrap();
//!
//! // One-shot
//! assert_eq!(engine.checksum(b"123456789", 0), 0xE306_9283);
//!
//! // Chained: feed the previous value back in
//! let crc = engine.checksum(b"1234", 0);
//! assert_eq!(engine.checksum(b"56789", crc), 0xE306_9283);
//!
//! // Hasher
//! let mut h = Crc32cHash::new(engine);
//! h.update(b"123456789");
//! assert_eq!(h.hexdigest(), "e3069283");
//! ```
//!
//! On Unix, [`stream`] forwards bytes between descriptors while checksumming
//! them.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod constants;
pub mod crc32c;
mod engine;
mod hasher;
pub mod release;
#[cfg(unix)]
pub mod stream;

pub use backend::{Backend, Config, ConfigError, Selection, SwMode};
pub use engine::Crc32cEngine;
pub use hasher::Crc32cHash;
pub use release::{ExecutionLock, NoLock, RELEASE_THRESHOLD, ReleaseMode};
