//! Raw descriptor operations for the pipeline.
//!
//! Thin `libc` wrappers that turn `-1` returns into `io::Error`, plus
//! [`InputGuard`], which owns the saved attributes of the input descriptor
//! and puts them back exactly once.

#![allow(unsafe_code)]

use std::{
  io, mem,
  os::fd::{AsRawFd, BorrowedFd},
  time::Duration,
};

use tracing::warn;

fn cvt(ret: libc::c_int) -> io::Result<libc::c_int> {
  if ret == -1 { Err(io::Error::last_os_error()) } else { Ok(ret) }
}

fn cvt_size(ret: libc::ssize_t) -> io::Result<usize> {
  usize::try_from(ret).map_err(|_| io::Error::last_os_error())
}

/// One `read(2)` into `buf`, retried on `EINTR`.
pub(super) fn read(fd: BorrowedFd<'_>, buf: &mut [u8]) -> io::Result<usize> {
  loop {
    // SAFETY: `buf` is a valid writable region of `buf.len()` bytes and `fd`
    // is borrowed for the duration of the call.
    let ret = unsafe { libc::read(fd.as_raw_fd(), buf.as_mut_ptr().cast(), buf.len()) };
    match cvt_size(ret) {
      Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
      other => return other,
    }
  }
}

/// One `write(2)` of `buf`, retried on `EINTR`. May accept fewer bytes.
pub(super) fn write(fd: BorrowedFd<'_>, buf: &[u8]) -> io::Result<usize> {
  loop {
    // SAFETY: `buf` is a valid readable region of `buf.len()` bytes and `fd`
    // is borrowed for the duration of the call.
    let ret = unsafe { libc::write(fd.as_raw_fd(), buf.as_ptr().cast(), buf.len()) };
    match cvt_size(ret) {
      Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
      other => return other,
    }
  }
}

fn get_flags(fd: BorrowedFd<'_>) -> io::Result<libc::c_int> {
  // SAFETY: F_GETFL takes no argument and only reads descriptor state.
  cvt(unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_GETFL) })
}

fn set_flags(fd: BorrowedFd<'_>, flags: libc::c_int) -> io::Result<()> {
  // SAFETY: F_SETFL takes an int argument.
  cvt(unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFL, flags) }).map(drop)
}

/// Current `SO_RCVTIMEO`, or `None` when `fd` is not a socket.
fn get_rcv_timeout(fd: BorrowedFd<'_>) -> io::Result<Option<libc::timeval>> {
  // SAFETY: timeval is plain data; all-zero is a valid value.
  let mut tv: libc::timeval = unsafe { mem::zeroed() };
  let mut len = mem::size_of::<libc::timeval>() as libc::socklen_t;
  // SAFETY: `tv` and `len` are valid for writes and `len` holds the size of `tv`.
  let ret = unsafe {
    libc::getsockopt(
      fd.as_raw_fd(),
      libc::SOL_SOCKET,
      libc::SO_RCVTIMEO,
      (&raw mut tv).cast(),
      &raw mut len,
    )
  };
  match cvt(ret) {
    Ok(_) => Ok(Some(tv)),
    Err(err) if err.raw_os_error() == Some(libc::ENOTSOCK) => Ok(None),
    Err(err) => Err(err),
  }
}

fn set_rcv_timeout(fd: BorrowedFd<'_>, tv: &libc::timeval) -> io::Result<()> {
  // SAFETY: `tv` points to a valid timeval of the advertised size.
  let ret = unsafe {
    libc::setsockopt(
      fd.as_raw_fd(),
      libc::SOL_SOCKET,
      libc::SO_RCVTIMEO,
      (tv as *const libc::timeval).cast(),
      mem::size_of::<libc::timeval>() as libc::socklen_t,
    )
  };
  cvt(ret).map(drop)
}

/// Convert a timeout to a `timeval`. Zero means "block indefinitely".
///
/// Non-zero durations shorter than a microsecond round up so they do not
/// turn into an infinite wait.
pub(super) fn timeval_from(timeout: Duration) -> libc::timeval {
  let mut micros = timeout.subsec_micros();
  if timeout.as_secs() == 0 && micros == 0 && !timeout.is_zero() {
    micros = 1;
  }
  libc::timeval {
    tv_sec: libc::time_t::try_from(timeout.as_secs()).unwrap_or(libc::time_t::MAX),
    tv_usec: micros as libc::suseconds_t,
  }
}

/// Saved attributes of the input descriptor.
///
/// [`prepare`](Self::prepare) switches the descriptor to blocking mode with
/// the pipeline's receive timeout. [`restore`](Self::restore) puts the saved
/// values back; if the guard is dropped without it, `Drop` does the same and
/// logs any failure.
pub(super) struct InputGuard<'fd> {
  fd: BorrowedFd<'fd>,
  flags: libc::c_int,
  rcv_timeout: Option<libc::timeval>,
  restored: bool,
}

impl<'fd> InputGuard<'fd> {
  /// Save the current attributes, then clear `O_NONBLOCK` and apply `timeout`.
  pub(super) fn prepare(fd: BorrowedFd<'fd>, timeout: Duration) -> io::Result<Self> {
    let flags = get_flags(fd)?;
    let rcv_timeout = get_rcv_timeout(fd)?;
    let guard = Self {
      fd,
      flags,
      rcv_timeout,
      restored: false,
    };

    if flags & libc::O_NONBLOCK != 0 {
      set_flags(fd, flags & !libc::O_NONBLOCK)?;
    }
    if guard.rcv_timeout.is_some() {
      set_rcv_timeout(fd, &timeval_from(timeout))?;
    }
    Ok(guard)
  }

  /// Whether the input has a receive timeout (it is a socket).
  pub(super) const fn has_timeout(&self) -> bool {
    self.rcv_timeout.is_some()
  }

  /// Put the saved attributes back.
  pub(super) fn restore(mut self) -> io::Result<()> {
    self.restored = true;
    self.apply_saved()
  }

  fn apply_saved(&self) -> io::Result<()> {
    let flags = set_flags(self.fd, self.flags);
    let timeout = match &self.rcv_timeout {
      Some(tv) => set_rcv_timeout(self.fd, tv),
      None => Ok(()),
    };
    flags.and(timeout)
  }
}

impl Drop for InputGuard<'_> {
  fn drop(&mut self) {
    if self.restored {
      return;
    }
    if let Err(err) = self.apply_saved() {
      warn!(fd = self.fd.as_raw_fd(), %err, "failed to restore input descriptor");
    }
  }
}

#[cfg(test)]
mod tests {
  use std::os::{fd::AsFd, unix::net::UnixStream};

  use super::*;

  fn nonblocking(fd: BorrowedFd<'_>) -> bool {
    get_flags(fd).unwrap() & libc::O_NONBLOCK != 0
  }

  #[test]
  fn timeval_conversion() {
    let tv = timeval_from(Duration::ZERO);
    assert_eq!((tv.tv_sec, tv.tv_usec), (0, 0));

    let tv = timeval_from(Duration::from_millis(2500));
    assert_eq!((tv.tv_sec, tv.tv_usec), (2, 500_000));

    let tv = timeval_from(Duration::from_nanos(10));
    assert_eq!((tv.tv_sec, tv.tv_usec), (0, 1));
  }

  #[test]
  fn guard_round_trips_socket_attributes() {
    let (sock, _peer) = UnixStream::pair().unwrap();
    sock.set_nonblocking(true).unwrap();
    sock.set_read_timeout(Some(Duration::from_secs(7))).unwrap();

    let guard = InputGuard::prepare(sock.as_fd(), Duration::from_secs(2)).unwrap();
    assert!(guard.has_timeout());
    assert!(!nonblocking(sock.as_fd()));
    assert_eq!(sock.read_timeout().unwrap(), Some(Duration::from_secs(2)));

    guard.restore().unwrap();
    assert!(nonblocking(sock.as_fd()));
    assert_eq!(sock.read_timeout().unwrap(), Some(Duration::from_secs(7)));
  }

  #[test]
  fn guard_restores_on_drop() {
    let (sock, _peer) = UnixStream::pair().unwrap();
    sock.set_nonblocking(true).unwrap();
    {
      let _guard = InputGuard::prepare(sock.as_fd(), Duration::ZERO).unwrap();
      assert!(!nonblocking(sock.as_fd()));
      assert_eq!(sock.read_timeout().unwrap(), None);
    }
    assert!(nonblocking(sock.as_fd()));
  }

  #[test]
  fn non_socket_has_no_timeout() {
    let mut fds = [0; 2];
    // SAFETY: `fds` has room for the two descriptors pipe(2) writes.
    cvt(unsafe { libc::pipe(fds.as_mut_ptr()) }).unwrap();
    // SAFETY: both descriptors were just created and are owned here.
    let (rx, tx) = unsafe {
      use std::os::fd::{FromRawFd, OwnedFd};
      (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1]))
    };

    let guard = InputGuard::prepare(rx.as_fd(), Duration::from_secs(1)).unwrap();
    assert!(!guard.has_timeout());
    guard.restore().unwrap();

    assert_eq!(write(tx.as_fd(), b"abc").unwrap(), 3);
    let mut buf = [0u8; 8];
    assert_eq!(read(rx.as_fd(), &mut buf).unwrap(), 3);
    assert_eq!(&buf[..3], b"abc");
  }
}
