//! The execution engine of a shell.
//!
//! A parser hands over a [`Node`] tree for one line of input; [`Dispatcher`]
//! runs it with fork/exec/pipe and reports a single [`Status`].
//! `Status::Exit` means `exit` or `quit` ran and the caller should stop.

pub mod prelude;
pub mod libsh;
pub mod tree;
pub mod expand;
pub mod state;
pub mod shopt;
pub mod procio;
pub mod builtin;
pub mod execute;
#[cfg(test)]
pub mod tests;

pub use execute::Dispatcher;
pub use expand::{VarResolver, WordResolver};
pub use shopt::ShOpts;
pub use state::{OsCtx, ShellCtx, VirtCtx};
pub use tree::{NdOp, Node, RedirFlags, SimpleCmd, Status, Word, WordPart};

/// Run `node` against the host process, resolving words with [`VarResolver`]
/// and taking options from `SHEXEC_OPTS`.
pub fn exec_tree(node: &Node) -> Status {
  let mut ctx = OsCtx;
  let opts = ShOpts::from_env();
  Dispatcher::new(&mut ctx, &VarResolver, opts).eval(node)
}
