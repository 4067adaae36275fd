use crate::{
  expand::WordResolver,
  prelude::*,
  procio::IoFrame,
  shopt::ShOpts,
  state::ShellCtx,
  tree::SimpleCmd,
};

/// Change the working directory of `ctx`.
///
/// Redirections on a `cd` are installed into the calling process itself and
/// stay there after `cd` returns. If a target can't be opened, nothing is
/// redirected and the directory is left alone.
pub fn cd(
  cmd: &SimpleCmd,
  ctx: &mut dyn ShellCtx,
  resolver: &dyn WordResolver,
  opts: &ShOpts,
) -> ShResult<()> {
  if cmd.has_redirs() {
    IoFrame::from_cmd(cmd, resolver, &*ctx, opts.exec.dual_redir)?.redirect()?;
  }

  // Only the first word counts
  let new_dir = match cmd.params.first() {
    Some(word) => PathBuf::from(resolver.resolve(word, &*ctx)?),
    None => {
      let Some(home) = ctx.var("HOME") else {
        return Err(ShErr::simple(ShErrKind::ChDir, "HOME not set"));
      };
      PathBuf::from(home)
    }
  };

  flog!(DEBUG, "cd {}", new_dir.display());
  ctx.change_dir(&new_dir)
}
