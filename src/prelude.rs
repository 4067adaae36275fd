// Standard Library Common IO and FS Abstractions
pub use std::env;
pub use std::ffi::{CStr, CString, OsStr, OsString};
pub use std::fmt;
pub use std::fs::{File, OpenOptions};
pub use std::io::{self, Write};
pub use std::path::{Path, PathBuf};
pub use std::process::exit;

// Unix-specific IO abstractions
pub use std::os::unix::ffi::{OsStrExt, OsStringExt};
pub use std::os::unix::io::{AsRawFd, BorrowedFd, OwnedFd, RawFd};

// Nix crate for POSIX APIs
pub use bitflags::bitflags;
pub use nix::{
  errno::Errno,
  libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO},
  sys::wait::{waitpid, WaitStatus as WtStat},
  unistd::{dup2, execvpe, fork, ForkResult, Pid},
};

pub use crate::flog;
pub use crate::libsh::error::{ShErr, ShErrKind, ShResult};
pub use crate::libsh::flog::LogLevel::*;
