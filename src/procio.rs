use std::ops::{Deref, DerefMut};
use std::os::unix::fs::OpenOptionsExt;

use crate::{
	expand::WordResolver,
	libsh::sys::{flush_std, install_fd},
	prelude::*,
	shopt::DualRedir,
	state::ShellCtx,
	tree::{RedirFlags, SimpleCmd},
};

// Credit to fish-shell for many of the implementation ideas present in this module
// https://fishshell.com/

pub const REDIR_FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
	Read,
	Truncate,
	Append,
}

impl OpenMode {
	pub fn write(append: bool) -> Self {
		if append {
			Self::Append
		} else {
			Self::Truncate
		}
	}
	fn options(self) -> OpenOptions {
		let mut opts = OpenOptions::new();
		match self {
			OpenMode::Read => {
				opts.read(true);
			}
			OpenMode::Truncate => {
				opts
					.write(true)
					.create(true)
					.truncate(true)
					.mode(REDIR_FILE_MODE);
			}
			OpenMode::Append => {
				opts.append(true).create(true).mode(REDIR_FILE_MODE);
			}
		}
		opts
	}
}

/// An opened redirection target waiting to replace `tgt_fd`
#[derive(Debug)]
pub struct IoRedir {
	tgt_fd: RawFd,
	file: File,
}

impl IoRedir {
	pub fn open(tgt_fd: RawFd, path: &Path, mode: OpenMode) -> ShResult<Self> {
		let file = mode.options().open(path).map_err(|e| {
			ShErr::simple(ShErrKind::RedirOpen, format!("{}: {e}", path.display()))
		})?;
		Ok(Self { tgt_fd, file })
	}
}

/// Open modes for stdout and stderr.
///
/// With both streams redirected and `DualRedir::Legacy`, stdout appends and
/// stderr truncates no matter what the flags say.
pub fn stream_modes(flags: RedirFlags, both: bool, dual: DualRedir) -> (OpenMode, OpenMode) {
	if both && dual == DualRedir::Legacy {
		return (OpenMode::Append, OpenMode::Truncate);
	}
	(
		OpenMode::write(flags.contains(RedirFlags::OUT_APPEND)),
		OpenMode::write(flags.contains(RedirFlags::ERR_APPEND)),
	)
}

/// The redirections of one simple command.
///
/// Every target is opened up front, so a bad target fails the command before
/// any standard stream has been touched.
#[derive(Default, Debug)]
pub struct IoFrame {
	redirs: Vec<IoRedir>,
}

impl IoFrame {
	pub fn new() -> Self {
		Default::default()
	}
	pub fn from_cmd(
		cmd: &SimpleCmd,
		resolver: &dyn WordResolver,
		ctx: &dyn ShellCtx,
		dual: DualRedir,
	) -> ShResult<Self> {
		let mut frame = Self::new();
		let (out_mode, err_mode) = stream_modes(
			cmd.io_flags,
			cmd.output.is_some() && cmd.error.is_some(),
			dual,
		);
		let targets = [
			(STDIN_FILENO, &cmd.input, OpenMode::Read),
			(STDOUT_FILENO, &cmd.output, out_mode),
			(STDERR_FILENO, &cmd.error, err_mode),
		];

		for (tgt_fd, word, mode) in targets {
			let Some(word) = word else { continue };
			let raw = resolver.resolve(word, ctx)?;
			let path = ctx.resolve_path(&raw);
			flog!(DEBUG, "redirecting fd {} to {} ({:?})", tgt_fd, path.display(), mode);
			frame.push(IoRedir::open(tgt_fd, &path, mode)?);
		}
		Ok(frame)
	}
	/// Install the redirections into the current process for good
	pub fn redirect(self) -> ShResult<()> {
		flush_std();
		for redir in self.redirs {
			install_fd(redir.file, redir.tgt_fd)?;
		}
		Ok(())
	}
}

impl Deref for IoFrame {
	type Target = Vec<IoRedir>;
	fn deref(&self) -> &Self::Target {
		&self.redirs
	}
}

impl DerefMut for IoFrame {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.redirs
	}
}
