//! Process-wide state that builtins mutate: the working directory and the
//! environment.
//!
//! The executor only touches this state through [`ShellCtx`]. [`OsCtx`] is
//! the real thing. [`VirtCtx`] keeps its own record, which lets builtins run
//! without changing the host process, and hands that record to any child it
//! spawns.

use std::collections::BTreeMap;

use nix::unistd::{access, chdir, AccessFlags};

use crate::prelude::*;

pub trait ShellCtx {
	fn change_dir(&mut self, path: &Path) -> ShResult<()>;
	fn current_dir(&self) -> ShResult<PathBuf>;
	fn var(&self, name: &str) -> Option<String>;
	fn set_var(&mut self, name: &str, val: &str) -> ShResult<()>;
	/// The environment handed to `execvpe()`, as `NAME=value` strings
	fn envp(&self) -> Vec<CString>;

	/// Runs in a freshly forked child, before redirections and exec
	fn enter_child(&self) -> ShResult<()> {
		Ok(())
	}

	/// Relative paths are taken from this context's working directory
	fn resolve_path(&self, raw: &str) -> PathBuf {
		match self.current_dir() {
			Ok(cwd) => cwd.join(raw),
			Err(_) => PathBuf::from(raw),
		}
	}
}

/// Reject what `setenv()` would reject
pub fn check_assignment(name: &str, val: &str) -> ShResult<()> {
	if name.is_empty() {
		return Err(ShErr::simple(ShErrKind::BadAssign, "empty variable name"));
	}
	if name.contains(['=', '\0']) {
		return Err(ShErr::simple(
			ShErrKind::BadAssign,
			format!("'{}' is not a valid variable name", name.escape_debug()),
		));
	}
	if val.contains('\0') {
		return Err(ShErr::simple(
			ShErrKind::BadAssign,
			format!("value of '{name}' contains a NUL byte"),
		));
	}
	Ok(())
}

fn env_entry(key: &OsStr, val: &OsStr) -> Option<CString> {
	let mut entry = key.as_bytes().to_vec();
	entry.push(b'=');
	entry.extend_from_slice(val.as_bytes());
	CString::new(entry).ok()
}

fn chdir_err(path: &Path, e: Errno) -> ShErr {
	ShErr::simple(ShErrKind::ChDir, format!("{}: {}", path.display(), e.desc()))
}

/// The host process's own working directory and environment
#[derive(Debug, Default, Clone, Copy)]
pub struct OsCtx;

impl ShellCtx for OsCtx {
	fn change_dir(&mut self, path: &Path) -> ShResult<()> {
		chdir(path).map_err(|e| chdir_err(path, e))
	}
	fn current_dir(&self) -> ShResult<PathBuf> {
		Ok(env::current_dir()?)
	}
	fn var(&self, name: &str) -> Option<String> {
		env::var(name).ok()
	}
	fn set_var(&mut self, name: &str, val: &str) -> ShResult<()> {
		check_assignment(name, val)?;
		env::set_var(name, val);
		Ok(())
	}
	fn envp(&self) -> Vec<CString> {
		env::vars_os()
			.filter_map(|(key, val)| env_entry(&key, &val))
			.collect()
	}
	fn resolve_path(&self, raw: &str) -> PathBuf {
		PathBuf::from(raw)
	}
}

/// A detached working directory and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtCtx {
	cwd: PathBuf,
	vars: BTreeMap<String, String>,
}

impl VirtCtx {
	pub fn new(cwd: impl Into<PathBuf>) -> Self {
		Self {
			cwd: cwd.into(),
			vars: BTreeMap::new(),
		}
	}
	/// Copy of the host process's state at this moment
	pub fn snapshot() -> ShResult<Self> {
		let cwd = env::current_dir()?;
		let vars = env::vars_os()
			.filter_map(|(key, val)| Some((key.into_string().ok()?, val.into_string().ok()?)))
			.collect();
		Ok(Self { cwd, vars })
	}
	pub fn with_var(mut self, name: &str, val: &str) -> Self {
		self.vars.insert(name.to_string(), val.to_string());
		self
	}
	pub fn cwd(&self) -> &Path {
		&self.cwd
	}
}

impl ShellCtx for VirtCtx {
	/// Fails wherever `chdir()` would: empty path, missing entry, not a
	/// directory, or no search permission.
	fn change_dir(&mut self, path: &Path) -> ShResult<()> {
		if path.as_os_str().is_empty() {
			return Err(chdir_err(path, Errno::ENOENT));
		}
		let target = self.cwd.join(path);
		let target = target
			.canonicalize()
			.map_err(|e| chdir_err(path, Errno::from_raw(e.raw_os_error().unwrap_or(0))))?;
		if !target.is_dir() {
			return Err(chdir_err(path, Errno::ENOTDIR));
		}
		access(&target, AccessFlags::X_OK).map_err(|e| chdir_err(path, e))?;
		self.cwd = target;
		Ok(())
	}
	fn current_dir(&self) -> ShResult<PathBuf> {
		Ok(self.cwd.clone())
	}
	fn var(&self, name: &str) -> Option<String> {
		self.vars.get(name).cloned()
	}
	fn set_var(&mut self, name: &str, val: &str) -> ShResult<()> {
		check_assignment(name, val)?;
		self.vars.insert(name.to_string(), val.to_string());
		Ok(())
	}
	fn envp(&self) -> Vec<CString> {
		self
			.vars
			.iter()
			.filter_map(|(key, val)| env_entry(OsStr::new(key), OsStr::new(val)))
			.collect()
	}
	fn enter_child(&self) -> ShResult<()> {
		chdir(&self.cwd).map_err(|e| chdir_err(&self.cwd, e))
	}
}
