use std::os::unix::io::IntoRawFd;
use std::sync::atomic::{AtomicBool, Ordering};

use nix::fcntl::{fcntl, FcntlArg, FdFlag, OFlag};
use nix::unistd::{pipe2, write};

use crate::prelude::*;

pub const SIG_EXIT_OFFSET: i32 = 128;

static IN_CHILD: AtomicBool = AtomicBool::new(false);

/// Record that this process is a fork of the shell
pub fn mark_child() {
	IN_CHILD.store(true, Ordering::Relaxed);
}

pub fn in_child() -> bool {
	IN_CHILD.load(Ordering::Relaxed)
}

/// Flush the buffered standard streams.
///
/// Must happen before a fork, or the child inherits a copy of whatever is
/// still sitting in the buffer and it gets written twice. Also before
/// stdout is pointed somewhere else, so pending bytes land in the old target.
///
/// A no-op in forked children: the parent flushed before forking, and the
/// stream locks may have been held by another thread at the time of the fork.
pub fn flush_std() {
	if in_child() {
		return;
	}
	io::stdout().flush().ok();
	io::stderr().flush().ok();
}

/// Return is `(readpipe, writepipe)`.
///
/// Both ends are close-on-exec. `dup2()` onto a standard stream clears the
/// flag on the copy, so only the stream itself survives into an exec'd program.
pub fn cloexec_pipe() -> ShResult<(OwnedFd, OwnedFd)> {
	pipe2(OFlag::O_CLOEXEC).map_err(|e| ShErr::from(e).rekind(ShErrKind::Pipe))
}

/// Make `tgt_fd` refer to whatever `src` refers to, and have it survive exec.
///
/// `src` is consumed. If it already sits on `tgt_fd` (the target stream was
/// closed when `src` was opened), it is kept open with close-on-exec cleared,
/// since `dup2()` onto itself leaves the flag alone.
pub fn install_fd(src: impl AsRawFd + IntoRawFd, tgt_fd: RawFd) -> ShResult<()> {
	if src.as_raw_fd() == tgt_fd {
		let fd = src.into_raw_fd();
		fcntl(fd, FcntlArg::F_SETFD(FdFlag::empty()))
			.map_err(|e| ShErr::from(e).rekind(ShErrKind::Dup))?;
		return Ok(());
	}
	dup2(src.as_raw_fd(), tgt_fd).map_err(|e| ShErr::from(e).rekind(ShErrKind::Dup))?;
	Ok(())
}

/// Write `msg` to stderr.
///
/// Forked children go straight to fd 2 with `write()`, skipping the lock
/// behind `io::stderr()`.
pub fn print_stderr(msg: &str) {
	if !in_child() {
		eprint!("{msg}");
		return;
	}
	let mut buf = msg.as_bytes();
	while !buf.is_empty() {
		match write(io::stderr(), buf) {
			Ok(0) => break,
			Ok(n) => buf = &buf[n..],
			Err(Errno::EINTR) => continue,
			Err(_) => break,
		}
	}
}

/// Translate a wait status into the shell's exit code convention.
///
/// Normal exit gives the low status byte, death by signal gives
/// `128 + signo`.
pub fn wait_code(stat: WtStat) -> i32 {
	match stat {
		WtStat::Exited(_, code) => code & 0xff,
		WtStat::Signaled(_, sig, _) => SIG_EXIT_OFFSET + sig as i32,
		_ => 1,
	}
}

/// Block until `pid` terminates. Retries on `EINTR`.
pub fn wait_child(pid: Pid) -> ShResult<WtStat> {
	loop {
		match waitpid(pid, None) {
			Ok(stat @ (WtStat::Exited(..) | WtStat::Signaled(..))) => return Ok(stat),
			Ok(_) | Err(Errno::EINTR) => continue,
			Err(e) => return Err(ShErr::from(e).rekind(ShErrKind::Wait)),
		}
	}
}
