//! Execution-lock release window.
//!
//! An embedding host may serialize its own code behind a single global lock.
//! Hashing a large buffer is compute-bound, so the engine can run the kernel
//! outside that lock. [`ReleaseMode`] decides *whether* to release;
//! [`ExecutionLock`] is how the host releases and re-acquires it.
//!
//! Hosts without such a lock use [`NoLock`], which just runs the closure.

/// Input size at and above which [`ReleaseMode::Auto`] releases the lock (32 KiB).
pub const RELEASE_THRESHOLD: usize = 32 * 1024;

/// Whether a checksum call may run without exclusive access to host state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ReleaseMode {
  /// Release when the input is at least [`RELEASE_THRESHOLD`] bytes.
  #[default]
  Auto,
  /// Keep the lock held.
  Never,
  /// Release regardless of size.
  Always,
}

impl ReleaseMode {
  /// Map the integer knob used by hosts: negative = auto, `0` = never, positive = always.
  #[inline]
  #[must_use]
  pub const fn from_raw(raw: i32) -> Self {
    match raw {
      i32::MIN..=-1 => Self::Auto,
      0 => Self::Never,
      _ => Self::Always,
    }
  }

  /// Whether a call over `len` bytes should release the lock.
  #[inline]
  #[must_use]
  pub const fn should_release(self, len: usize) -> bool {
    match self {
      Self::Auto => len >= RELEASE_THRESHOLD,
      Self::Never => false,
      Self::Always => true,
    }
  }
}

/// A host-provided global execution lock.
pub trait ExecutionLock {
  /// Run `f` with the lock released, re-acquiring it before returning.
  fn unlocked<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// No host lock: the release window is a plain call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoLock;

impl ExecutionLock for NoLock {
  #[inline]
  fn unlocked<R>(&self, f: impl FnOnce() -> R) -> R {
    f()
  }
}

impl<L: ExecutionLock + ?Sized> ExecutionLock for &L {
  #[inline]
  fn unlocked<R>(&self, f: impl FnOnce() -> R) -> R {
    (**self).unlocked(f)
  }
}

/// Run `f` inside the release window when `mode` asks for it.
#[inline]
pub fn run<L: ExecutionLock + ?Sized, R>(lock: &L, mode: ReleaseMode, len: usize, f: impl FnOnce() -> R) -> R {
  if mode.should_release(len) { lock.unlocked(f) } else { f() }
}
