use std::fmt::Display;

use crate::libsh::sys::print_stderr;
use crate::libsh::term::{Color, Style, Styled};
use crate::prelude::*;

pub type ShResult<T> = Result<T, ShErr>;

#[derive(Debug)]
pub struct ShErr {
  kind: ShErrKind,
  notes: Vec<String>,
}

impl ShErr {
  pub fn new(kind: ShErrKind) -> Self {
    Self { kind, notes: vec![] }
  }
  pub fn simple(kind: ShErrKind, msg: impl Into<String>) -> Self {
    Self { kind, notes: vec![msg.into()] }
  }
  pub fn kind(&self) -> &ShErrKind {
    &self.kind
  }
  pub fn notes(&self) -> &[String] {
    &self.notes
  }
  pub fn with_note(self, note: impl Into<String>) -> Self {
    let ShErr { kind, mut notes } = self;
    notes.push(note.into());
    Self { kind, notes }
  }
  /// Re-tag an error while keeping whatever notes it already collected
  pub fn rekind(self, kind: ShErrKind) -> Self {
    let ShErr { kind: _, notes } = self;
    Self { kind, notes }
  }
  /// The status a failed command of this kind reports to its caller
  pub fn status(&self) -> i32 {
    match self.kind {
      ShErrKind::CmdNotFound => 127,
      ShErrKind::ExecFail => 126,
      _ => 1,
    }
  }
  pub fn print_error(&self) {
    let mut msg = format!("{} {self}\n", "error:".styled(Color::Red | Style::BOLD));
    for note in self.notes.iter().skip(1) {
      msg.push_str(&format!("{} {note}\n", "note:".styled(Color::Cyan)));
    }
    print_stderr(&msg);
  }
}

impl Display for ShErr {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.notes.first() {
      None => write!(f, "{}", self.kind),
      Some(note) => write!(f, "{} - {}", self.kind, note),
    }
  }
}

impl std::error::Error for ShErr {}

impl From<std::io::Error> for ShErr {
  fn from(e: std::io::Error) -> Self {
    ShErr::simple(ShErrKind::IoErr(e.kind()), e.to_string())
  }
}

impl From<Errno> for ShErr {
  fn from(value: Errno) -> Self {
    ShErr::simple(ShErrKind::Errno(value), value.desc())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShErrKind {
  IoErr(io::ErrorKind),
  Errno(Errno),
  RedirOpen,
  Dup,
  Fork,
  Pipe,
  Wait,
  ExecFail,
  CmdNotFound,
  ChDir,
  BadAssign,
  InvalidOpt,
  InternalErr,
}

impl Display for ShErrKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let output = match self {
      Self::IoErr(e) => return write!(f, "I/O Error: {e}"),
      Self::Errno(e) => return write!(f, "Errno: {}", e.desc()),
      Self::RedirOpen => "Failed to open redirection target",
      Self::Dup => "Failed to duplicate file descriptor",
      Self::Fork => "Failed to create process",
      Self::Pipe => "Failed to create pipe",
      Self::Wait => "Failed to wait for child",
      Self::ExecFail => "Execution Failed",
      Self::CmdNotFound => "Command not found",
      Self::ChDir => "cd",
      Self::BadAssign => "Invalid assignment",
      Self::InvalidOpt => "Invalid option",
      Self::InternalErr => "Internal Error",
    };
    write!(f, "{output}")
  }
}
