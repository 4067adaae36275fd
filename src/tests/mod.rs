use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{
	execute::{fork_proc, reap, Dispatcher},
	expand::VarResolver,
	shopt::ShOpts,
	state::VirtCtx,
	tree::{Node, SimpleCmd, Status, Word, WordPart},
};

pub mod pipe;
pub mod state;
pub mod term;

// Nothing in here runs against `OsCtx`. Tests share one process, so its cwd
// and environment stay untouched, and any standard stream redirection is
// done inside a forked child.

pub fn test_ctx() -> VirtCtx {
	VirtCtx::snapshot().expect("failed to snapshot the test process")
}

pub fn run_with(ctx: &mut VirtCtx, opts: ShOpts, node: &Node) -> Status {
	Dispatcher::new(ctx, &VarResolver, opts).eval(node)
}

pub fn run_in(ctx: &mut VirtCtx, node: &Node) -> Status {
	run_with(ctx, ShOpts::default(), node)
}

pub fn run(node: &Node) -> Status {
	let mut ctx = test_ctx();
	run_in(&mut ctx, node)
}

/// `sh -c <script>`
pub fn sh(script: &str) -> SimpleCmd {
	SimpleCmd::new("sh").args(["-c", script])
}

pub fn exits(code: i32) -> Node {
	sh(&format!("exit {code}")).into()
}

/// `name = value` as the parser hands it over
pub fn assignment(name: &str, value: WordPart) -> SimpleCmd {
	SimpleCmd::new(Word::from_parts(vec![
		WordPart::lit(name),
		WordPart::lit("="),
		value,
	]))
}

pub fn scratch() -> TempDir {
	tempfile::tempdir().expect("failed to create scratch dir")
}

pub fn scratch_file(dir: &TempDir, name: &str) -> PathBuf {
	dir.path().join(name)
}

pub fn path_word(path: &Path) -> Word {
	Word::new(path.to_string_lossy().into_owned())
}

pub fn read(path: &Path) -> String {
	fs::read_to_string(path).unwrap_or_default()
}

/// Run `f` in a forked child and return the status it exits with.
///
/// Lets a test change process-wide state (closed fds, cwd, environment)
/// without touching the test runner.
pub fn in_fork(f: impl FnOnce() -> i32) -> Status {
	match fork_proc().expect("fork failed") {
		nix::unistd::ForkResult::Child => {
			let code = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).unwrap_or(101);
			std::process::exit(code)
		}
		nix::unistd::ForkResult::Parent { child } => reap(child),
	}
}
