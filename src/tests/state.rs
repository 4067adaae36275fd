use std::env;
use std::ffi::CString;

use pretty_assertions::assert_eq;

use super::*;
use crate::exec_tree;
use crate::state::{OsCtx, ShellCtx};

// Everything that runs against `OsCtx` happens inside `in_fork`, and reports
// back through its exit code or a file.

#[test]
fn exit_sentinel_from_exec_tree() {
	assert_eq!(exec_tree(&SimpleCmd::new("quit").into()), Status::Exit);
}

#[test]
fn failed_cd_leaves_process_cwd() {
	let dir = scratch();
	let missing = dir.path().join("nope");
	let status = in_fork(|| {
		let before = env::current_dir().ok();
		let status = exec_tree(&SimpleCmd::new("cd").arg(path_word(&missing)).into());
		match (status, env::current_dir().ok() == before) {
			(Status::Code(1), true) => 0,
			(Status::Code(1), false) => 2,
			_ => 3,
		}
	});
	assert_eq!(status, Status::Code(0));
}

#[test]
fn cd_moves_the_process() {
	let dir = scratch();
	let cwd = dir.path().canonicalize().unwrap();
	let node = Node::seq(
		SimpleCmd::new("cd").arg(path_word(&cwd)).into(),
		// relative to the new cwd
		SimpleCmd::new("printf").arg("here").stdout("relative", false).into(),
	);

	let status = in_fork(|| {
		let status = exec_tree(&node);
		match env::current_dir() {
			Ok(now) if now == cwd => status.child_code(),
			_ => 2,
		}
	});
	assert_eq!(status, Status::Code(0));
	assert_eq!(read(&cwd.join("relative")), "here");
}

#[test]
fn assignment_reaches_children() {
	let dir = scratch();
	let out = scratch_file(&dir, "out");
	let node = Node::seq(
		assignment("SHEXEC_OS_VAR", WordPart::lit("from the shell")).into(),
		sh("printf %s \"$SHEXEC_OS_VAR\"").stdout(path_word(&out), false).into(),
	);

	let status = in_fork(|| exec_tree(&node).child_code());
	assert_eq!(status, Status::Code(0));
	assert_eq!(read(&out), "from the shell");
}

#[test]
fn os_ctx_accessors() {
	let status = in_fork(|| {
		let mut ctx = OsCtx;
		if ctx.set_var("SHEXEC_ACCESSOR", "a b").is_err() {
			return 2;
		}
		if env::var("SHEXEC_ACCESSOR").as_deref() != Ok("a b") {
			return 3;
		}
		let entry = CString::new("SHEXEC_ACCESSOR=a b").unwrap();
		if !ctx.envp().contains(&entry) {
			return 4;
		}
		if ctx.set_var("", "x").is_ok() {
			return 5;
		}
		// Raw paths are left to the kernel
		if ctx.resolve_path("rel/path") != Path::new("rel/path") {
			return 6;
		}
		0
	});
	assert_eq!(status, Status::Code(0));
}
