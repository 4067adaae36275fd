use crate::{
	expand::WordResolver,
	prelude::*,
	procio::IoFrame,
	shopt::ShOpts,
	state::ShellCtx,
	tree::{SimpleCmd, Status},
};

use super::{fork_proc, reap, status_of};

/// Arguments to the execvpe function
#[derive(Debug)]
pub struct ExecArgs {
	pub cmd: CString,
	pub argv: Vec<CString>,
	pub envp: Vec<CString>,
}

impl ExecArgs {
	pub fn new(argv: Vec<String>, envp: Vec<CString>) -> ShResult<Self> {
		let argv = argv
			.into_iter()
			.map(|arg| {
				CString::new(arg).map_err(|_| ShErr::simple(ShErrKind::ExecFail, "argument contains a NUL byte"))
			})
			.collect::<ShResult<Vec<_>>>()?;
		let Some(cmd) = argv.first().cloned() else {
			return Err(ShErr::simple(ShErrKind::InternalErr, "empty argument vector"));
		};
		Ok(Self { cmd, argv, envp })
	}
	pub fn cmd_name(&self) -> String {
		self.cmd.to_string_lossy().into_owned()
	}
}

/// Run a non-builtin command in a child process and wait for it
pub fn run_external(
	ctx: &dyn ShellCtx,
	resolver: &dyn WordResolver,
	opts: &ShOpts,
	cmd: &SimpleCmd,
) -> Status {
	// Built before forking so that a bad word fails here, in the parent
	let exec_args = match resolver
		.argv(cmd, ctx)
		.and_then(|argv| ExecArgs::new(argv, ctx.envp()))
	{
		Ok(args) => args,
		Err(e) => return status_of(Err(e)),
	};
	flog!(DEBUG, exec_args.argv);

	match fork_proc() {
		Ok(ForkResult::Child) => child_exec(ctx, resolver, opts, cmd, exec_args),
		Ok(ForkResult::Parent { child }) => {
			flog!(TRACE, "forked {} for {}", child, exec_args.cmd_name());
			reap(child)
		}
		Err(e) => status_of(Err(e)),
	}
}

/// The child side of `run_external()`. Never returns to shell logic.
fn child_exec(
	ctx: &dyn ShellCtx,
	resolver: &dyn WordResolver,
	opts: &ShOpts,
	cmd: &SimpleCmd,
	exec_args: ExecArgs,
) -> ! {
	let setup = ctx
		.enter_child()
		.and_then(|_| IoFrame::from_cmd(cmd, resolver, ctx, opts.exec.dual_redir))
		.and_then(IoFrame::redirect);
	if let Err(e) = setup {
		e.print_error();
		exit(1);
	}

	let errno = match execvpe(&exec_args.cmd, &exec_args.argv, &exec_args.envp) {
		Ok(never) => match never {},
		Err(errno) => errno,
	};

	let err = match errno {
		Errno::ENOENT => ShErr::simple(ShErrKind::CmdNotFound, exec_args.cmd_name()),
		_ => ShErr::simple(
			ShErrKind::ExecFail,
			format!("{}: {}", exec_args.cmd_name(), errno.desc()),
		),
	};
	err.print_error();
	exit(err.status())
}
