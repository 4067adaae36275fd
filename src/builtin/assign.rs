use crate::{
  expand::WordResolver,
  prelude::*,
  state::ShellCtx,
  tree::{SimpleCmd, Word},
};

/// Split `NAME = value...` out of a verb.
///
/// The parser hands the assignment over as one word: the name, a literal `=`
/// part, and at least one part for the value.
pub fn split_assignment(verb: &Word) -> Option<(&str, Word)> {
  match verb.parts() {
    [name, eq, value @ ..] if !name.expand && !eq.expand && eq.text == "=" && !value.is_empty() => {
      Some((name.text.as_str(), Word::from_parts(value.to_vec())))
    }
    _ => None,
  }
}

pub fn assign(cmd: &SimpleCmd, ctx: &mut dyn ShellCtx, resolver: &dyn WordResolver) -> ShResult<()> {
  let Some((name, value)) = split_assignment(&cmd.verb) else {
    return Err(ShErr::simple(ShErrKind::BadAssign, "not an assignment"));
  };
  let value = resolver.resolve(&value, &*ctx)?;
  flog!(DEBUG, "assigning {}={}", name, value);
  ctx.set_var(name, &value)
}
