use crate::{
	prelude::*,
	state::ShellCtx,
	tree::{SimpleCmd, Word},
};

/// Turns parser words into plain strings.
///
/// The executor never looks inside a word itself; anything quoting or
/// expansion related belongs to the implementor.
pub trait WordResolver {
	fn resolve(&self, word: &Word, ctx: &dyn ShellCtx) -> ShResult<String>;

	fn argv(&self, cmd: &SimpleCmd, ctx: &dyn ShellCtx) -> ShResult<Vec<String>> {
		let mut argv = Vec::with_capacity(cmd.params.len() + 1);
		argv.push(self.resolve(&cmd.verb, ctx)?);
		for param in &cmd.params {
			argv.push(self.resolve(param, ctx)?);
		}
		Ok(argv)
	}
}

/// Concatenates the parts of a word, replacing expanded parts with the value
/// of the variable they name. Unset variables expand to nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct VarResolver;

impl WordResolver for VarResolver {
	fn resolve(&self, word: &Word, ctx: &dyn ShellCtx) -> ShResult<String> {
		let mut resolved = String::new();
		for part in word.parts() {
			if part.expand {
				resolved.push_str(&ctx.var(&part.text).unwrap_or_default());
			} else {
				resolved.push_str(&part.text);
			}
		}
		Ok(resolved)
	}
}
