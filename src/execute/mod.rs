use crate::{
	builtin::{assign::assign, cd::cd, classify, BuiltinKind},
	expand::WordResolver,
	libsh::sys::{flush_std, mark_child, wait_child, wait_code},
	prelude::*,
	shopt::ShOpts,
	state::ShellCtx,
	tree::{NdOp, Node, SimpleCmd, Status},
};

pub mod external;
pub mod fork;

/// Walks a command tree and runs it.
///
/// Builtins run against `ctx` in this process. Everything else happens in
/// forked children which are always waited on before `eval` returns.
pub struct Dispatcher<'a> {
	ctx: &'a mut dyn ShellCtx,
	resolver: &'a dyn WordResolver,
	opts: ShOpts,
}

impl<'a> Dispatcher<'a> {
	pub fn new(ctx: &'a mut dyn ShellCtx, resolver: &'a dyn WordResolver, opts: ShOpts) -> Self {
		Self {
			ctx,
			resolver,
			opts,
		}
	}
	pub fn eval(&mut self, node: &Node) -> Status {
		match node {
			Node::Leaf(cmd) => self.dispatch_cmd(cmd),
			Node::Op { op, left, right } => {
				flog!(TRACE, "evaluating {:?}", op);
				match op {
					NdOp::Sequential => self.exec_sequential(left, right),
					NdOp::IfNonZero => self.exec_conditional(left, right, |code| code != 0),
					NdOp::IfZero => self.exec_conditional(left, right, |code| code == 0),
					NdOp::Parallel => self.exec_parallel(left, right),
					NdOp::Pipe => self.exec_pipe(left, right),
				}
			}
		}
	}
	fn exec_sequential(&mut self, left: &Node, right: &Node) -> Status {
		if self.eval(left).is_exit() {
			return Status::Exit;
		}
		self.eval(right)
	}
	fn exec_conditional<F>(&mut self, left: &Node, right: &Node, run_right: F) -> Status
	where
		F: Fn(i32) -> bool,
	{
		let status = self.eval(left);
		match status.code() {
			Some(code) if run_right(code) => self.eval(right),
			_ => status,
		}
	}
	pub fn dispatch_cmd(&mut self, cmd: &SimpleCmd) -> Status {
		match classify(cmd) {
			Some(kind) => self.exec_builtin(kind, cmd),
			None => self.exec_cmd(cmd),
		}
	}
	fn exec_builtin(&mut self, kind: BuiltinKind, cmd: &SimpleCmd) -> Status {
		flog!(TRACE, "doing builtin {:?}", kind);
		let result = match kind {
			BuiltinKind::Exit => return Status::Exit,
			BuiltinKind::Cd => cd(cmd, &mut *self.ctx, self.resolver, &self.opts),
			BuiltinKind::Assign => assign(cmd, &mut *self.ctx, self.resolver),
		};
		status_of(result)
	}
	fn exec_cmd(&mut self, cmd: &SimpleCmd) -> Status {
		external::run_external(&*self.ctx, self.resolver, &self.opts, cmd)
	}
	/// The tail of every forked branch: report a failed setup or evaluate
	/// `node`, then leave.
	fn finish_branch(&mut self, setup: ShResult<()>, node: &Node) -> ! {
		if let Err(e) = setup {
			e.print_error();
			exit(1);
		}
		let status = self.eval(node);
		exit(status.child_code())
	}
}

/// Report an error and turn it into the status of the failed command
pub fn status_of(result: ShResult<()>) -> Status {
	match result {
		Ok(()) => Status::SUCCESS,
		Err(e) => {
			e.print_error();
			Status::Code(e.status())
		}
	}
}

pub fn fork_proc() -> ShResult<ForkResult> {
	flush_std();
	let result = unsafe { fork() }.map_err(|e| ShErr::from(e).rekind(ShErrKind::Fork))?;
	if let ForkResult::Child = result {
		mark_child();
	}
	Ok(result)
}

/// Wait for one child and return its exit status
pub fn reap(pid: Pid) -> Status {
	match wait_child(pid) {
		Ok(stat) => {
			flog!(TRACE, "child {} finished: {:?}", pid, stat);
			Status::Code(wait_code(stat))
		}
		Err(e) => {
			e.print_error();
			Status::FAILURE
		}
	}
}
