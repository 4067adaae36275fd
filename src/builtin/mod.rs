use crate::tree::SimpleCmd;

pub mod assign;
pub mod cd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
  Exit,
  Cd,
  Assign,
}

/// Decide whether `cmd` runs inside the shell process. First match wins.
pub fn classify(cmd: &SimpleCmd) -> Option<BuiltinKind> {
  match cmd.verb.literal() {
    Some("exit" | "quit") => return Some(BuiltinKind::Exit),
    Some("cd") => return Some(BuiltinKind::Cd),
    _ => {}
  }
  assign::split_assignment(&cmd.verb).map(|_| BuiltinKind::Assign)
}
