//! Incremental CRC32-C hasher with a digest-style interface.

use std::io;

use crate::{
  engine::Crc32cEngine,
  release::{NoLock, ReleaseMode},
};

/// Incremental CRC32-C hasher.
///
/// Owns a copy of the engine it was built from, so hashers are independent
/// of each other and `Clone` forks the running state.
///
/// ```
/// use checksum::{Crc32cEngine, Crc32cHash};
///
/// let mut h = Crc32cHash::new(Crc32cEngine::software());
/// h.update(b"1234");
/// h.update(b"56789");
/// assert_eq!(h.checksum(), 0xE306_9283);
/// assert_eq!(h.digest(), [0xE3, 0x06, 0x92, 0x83]);
/// assert_eq!(h.hexdigest(), "e3069283");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32cHash {
  engine: Crc32cEngine,
  crc: u32,
  release: ReleaseMode,
}

impl Crc32cHash {
  /// Algorithm name.
  pub const NAME: &'static str = "crc32c";
  /// Digest length in bytes.
  pub const DIGEST_SIZE: usize = 4;
  /// Internal block size in bytes.
  pub const BLOCK_SIZE: usize = 1;

  /// Empty hasher bound to `engine`.
  #[must_use]
  pub const fn new(engine: Crc32cEngine) -> Self {
    Self {
      engine,
      crc: 0,
      release: ReleaseMode::Auto,
    }
  }

  /// Hasher seeded with `data`.
  #[must_use]
  pub fn with_data(engine: Crc32cEngine, data: &[u8]) -> Self {
    let mut hasher = Self::new(engine);
    hasher.update(data);
    hasher
  }

  /// Override the release policy used by [`update`](Self::update).
  #[must_use]
  pub const fn with_release_mode(mut self, release: ReleaseMode) -> Self {
    self.release = release;
    self
  }

  /// The release policy used by [`update`](Self::update).
  #[inline]
  #[must_use]
  pub const fn release_mode(&self) -> ReleaseMode {
    self.release
  }

  /// Fold `data` into the running checksum.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.crc = self.engine.checksum_with(data, self.crc, self.release, &NoLock);
  }

  /// Current checksum value.
  #[inline]
  #[must_use]
  pub const fn checksum(&self) -> u32 {
    self.crc
  }

  /// Current checksum as 4 big-endian bytes.
  #[inline]
  #[must_use]
  pub const fn digest(&self) -> [u8; 4] {
    self.crc.to_be_bytes()
  }

  /// Current checksum as 8 lowercase hex digits.
  #[must_use]
  pub fn hexdigest(&self) -> String {
    format!("{:08x}", self.crc)
  }

  /// Forget everything hashed so far.
  #[inline]
  pub fn reset(&mut self) {
    self.crc = 0;
  }
}

impl io::Write for Crc32cHash {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  fn hasher() -> Crc32cHash {
    Crc32cHash::new(Crc32cEngine::software())
  }

  #[test]
  fn constants() {
    assert_eq!(Crc32cHash::NAME, "crc32c");
    assert_eq!(Crc32cHash::DIGEST_SIZE, 4);
    assert_eq!(Crc32cHash::BLOCK_SIZE, 1);
  }

  #[test]
  fn empty_hasher() {
    let h = hasher();
    assert_eq!(h.checksum(), 0);
    assert_eq!(h.digest(), [0; 4]);
    assert_eq!(h.hexdigest(), "00000000");
  }

  #[test]
  fn piecewise_matches_seeded() {
    let engine = Crc32cEngine::software();
    let seeded = Crc32cHash::with_data(engine, b"The quick brown fox jumps over the lazy dog");
    assert_eq!(seeded.checksum(), 0x2262_0404);

    let mut h = Crc32cHash::new(engine);
    for word in b"The quick brown fox jumps over the lazy dog".split_inclusive(|&b| b == b' ') {
      h.update(word);
    }
    assert_eq!(h, seeded);
  }

  #[test]
  fn digest_is_big_endian() {
    let h = Crc32cHash::with_data(Crc32cEngine::software(), b"23456789");
    assert_eq!(h.digest(), 0xBFE9_2A83u32.to_be_bytes());
    assert_eq!(h.hexdigest(), "bfe92a83");
  }

  #[test]
  fn clone_forks_state() {
    let mut a = hasher();
    a.update(b"1234");
    let mut b = a;
    a.update(b"56789");
    assert_eq!(a.checksum(), 0xE306_9283);
    assert_ne!(b.checksum(), a.checksum());
    b.update(b"56789");
    assert_eq!(b.checksum(), a.checksum());
  }

  #[test]
  fn release_mode_does_not_change_result() {
    let data = vec![0xA5u8; 40 * 1024];
    let engine = Crc32cEngine::software();
    let auto = Crc32cHash::with_data(engine, &data);
    let mut never = Crc32cHash::new(engine).with_release_mode(ReleaseMode::Never);
    never.update(&data);
    assert_eq!(never.release_mode(), ReleaseMode::Never);
    assert_eq!(auto.checksum(), never.checksum());
  }

  #[test]
  fn io_write_feeds_hasher() {
    let mut h = hasher();
    write!(h, "12345").unwrap();
    h.write_all(b"6789").unwrap();
    h.flush().unwrap();
    assert_eq!(h.checksum(), 0xE306_9283);
  }

  #[test]
  fn reset_clears_state() {
    let mut h = Crc32cHash::with_data(Crc32cEngine::software(), b"abc");
    h.reset();
    assert_eq!(h.checksum(), 0);
  }
}
