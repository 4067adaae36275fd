//! Operators that split into two child processes.

use crate::{
	libsh::sys::{cloexec_pipe, install_fd},
	prelude::*,
	shopt::ParallelStatus,
	tree::{Node, Status},
};

use super::{fork_proc, reap, status_of, Dispatcher};

impl Dispatcher<'_> {
	/// `left | right`. Returns the status of `right` as is.
	pub(super) fn exec_pipe(&mut self, left: &Node, right: &Node) -> Status {
		let (rpipe, wpipe) = match cloexec_pipe() {
			Ok(pipes) => pipes,
			Err(e) => return status_of(Err(e)),
		};

		let writer = match fork_proc() {
			Ok(ForkResult::Child) => {
				// The other end goes first; it may sit on the fd being replaced
				drop(rpipe);
				let setup = install_fd(wpipe, STDOUT_FILENO);
				self.finish_branch(setup, left)
			}
			Ok(ForkResult::Parent { child }) => child,
			Err(e) => return status_of(Err(e)),
		};

		let reader = match fork_proc() {
			Ok(ForkResult::Child) => {
				drop(wpipe);
				let setup = install_fd(rpipe, STDIN_FILENO);
				self.finish_branch(setup, right)
			}
			Ok(ForkResult::Parent { child }) => Some(child),
			Err(e) => {
				e.print_error();
				None
			}
		};

		// Our copies go before waiting, or the reader never sees EOF
		drop(rpipe);
		drop(wpipe);

		flog!(TRACE, "pipe: writer {}, reader {:?}", writer, reader);
		reap(writer);
		match reader {
			Some(reader) => reap(reader),
			None => Status::FAILURE,
		}
	}

	/// `left & right`. Both sides run to completion before this returns.
	pub(super) fn exec_parallel(&mut self, left: &Node, right: &Node) -> Status {
		let first = match fork_proc() {
			Ok(ForkResult::Child) => self.finish_branch(Ok(()), left),
			Ok(ForkResult::Parent { child }) => child,
			Err(e) => return status_of(Err(e)),
		};

		let second = match fork_proc() {
			Ok(ForkResult::Child) => self.finish_branch(Ok(()), right),
			Ok(ForkResult::Parent { child }) => child,
			Err(e) => {
				e.print_error();
				reap(first);
				return Status::FAILURE;
			}
		};

		flog!(TRACE, "parallel: {} and {}", first, second);
		let left_status = reap(first);
		let right_status = reap(second);
		combine_parallel(self.opts.exec.parallel_status, left_status, right_status)
	}
}

pub fn combine_parallel(mode: ParallelStatus, left: Status, right: Status) -> Status {
	match mode {
		ParallelStatus::Collapse => Status::from_bool(left.is_success() && right.is_success()),
		ParallelStatus::FirstFailure => [left, right]
			.into_iter()
			.find(|status| !status.is_success())
			.unwrap_or(Status::SUCCESS),
	}
}
