//! The command tree handed to the executor by the parser.
//!
//! A tree is built once per input line and only ever read by the executor.

use crate::prelude::*;

bitflags! {
  #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
  pub struct RedirFlags: u8 {
    const OUT_APPEND = 0b0000_0001; // >>
    const ERR_APPEND = 0b0000_0010; // 2>>
  }
}

/// How the two children of an operator node are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NdOp {
  /// `a ; b`
  Sequential,
  /// `a & b`
  Parallel,
  /// `a | b`
  Pipe,
  /// Runs the right side only if the left side failed
  IfNonZero,
  /// Runs the right side only if the left side succeeded
  IfZero,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Leaf(SimpleCmd),
  Op {
    op: NdOp,
    left: Box<Node>,
    right: Box<Node>,
  },
}

impl Node {
  pub fn op(op: NdOp, left: Node, right: Node) -> Self {
    Self::Op {
      op,
      left: Box::new(left),
      right: Box::new(right),
    }
  }
  pub fn seq(left: Node, right: Node) -> Self {
    Self::op(NdOp::Sequential, left, right)
  }
  pub fn parallel(left: Node, right: Node) -> Self {
    Self::op(NdOp::Parallel, left, right)
  }
  pub fn pipe(left: Node, right: Node) -> Self {
    Self::op(NdOp::Pipe, left, right)
  }
  pub fn if_nonzero(left: Node, right: Node) -> Self {
    Self::op(NdOp::IfNonZero, left, right)
  }
  pub fn if_zero(left: Node, right: Node) -> Self {
    Self::op(NdOp::IfZero, left, right)
  }
  pub fn depth(&self) -> usize {
    match self {
      Node::Leaf(_) => 1,
      Node::Op { left, right, .. } => 1 + left.depth().max(right.depth()),
    }
  }
}

impl From<SimpleCmd> for Node {
  fn from(cmd: SimpleCmd) -> Self {
    Node::Leaf(cmd)
  }
}

/// One piece of a word. Parts are concatenated when the word is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPart {
  pub text: String,
  /// `text` names a variable whose value replaces it
  pub expand: bool,
}

impl WordPart {
  pub fn lit(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      expand: false,
    }
  }
  pub fn var(name: impl Into<String>) -> Self {
    Self {
      text: name.into(),
      expand: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
  parts: Vec<WordPart>,
}

impl Word {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      parts: vec![WordPart::lit(text)],
    }
  }
  pub fn var(name: impl Into<String>) -> Self {
    Self {
      parts: vec![WordPart::var(name)],
    }
  }
  pub fn from_parts(parts: Vec<WordPart>) -> Self {
    Self { parts }
  }
  pub fn with_part(mut self, part: WordPart) -> Self {
    self.parts.push(part);
    self
  }
  pub fn parts(&self) -> &[WordPart] {
    &self.parts
  }
  /// The text of a word made of a single unexpanded part.
  ///
  /// Builtins are only recognized through this; `$X` never names a builtin.
  pub fn literal(&self) -> Option<&str> {
    match self.parts.as_slice() {
      [part] if !part.expand => Some(&part.text),
      _ => None,
    }
  }
}

impl From<&str> for Word {
  fn from(text: &str) -> Self {
    Word::new(text)
  }
}

impl From<String> for Word {
  fn from(text: String) -> Self {
    Word::new(text)
  }
}

/// A command word with its parameters and up to one redirection per stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleCmd {
  pub verb: Word,
  pub params: Vec<Word>,
  pub input: Option<Word>,
  pub output: Option<Word>,
  pub error: Option<Word>,
  pub io_flags: RedirFlags,
}

impl SimpleCmd {
  pub fn new(verb: impl Into<Word>) -> Self {
    Self {
      verb: verb.into(),
      params: vec![],
      input: None,
      output: None,
      error: None,
      io_flags: RedirFlags::empty(),
    }
  }
  pub fn arg(mut self, arg: impl Into<Word>) -> Self {
    self.params.push(arg.into());
    self
  }
  pub fn args<I, W>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = W>,
    W: Into<Word>,
  {
    self.params.extend(args.into_iter().map(Into::into));
    self
  }
  /// `< target`
  pub fn stdin(mut self, target: impl Into<Word>) -> Self {
    self.input = Some(target.into());
    self
  }
  /// `> target`, or `>> target` if `append`
  pub fn stdout(mut self, target: impl Into<Word>, append: bool) -> Self {
    self.output = Some(target.into());
    self.io_flags.set(RedirFlags::OUT_APPEND, append);
    self
  }
  /// `2> target`, or `2>> target` if `append`
  pub fn stderr(mut self, target: impl Into<Word>, append: bool) -> Self {
    self.error = Some(target.into());
    self.io_flags.set(RedirFlags::ERR_APPEND, append);
    self
  }
  pub fn has_redirs(&self) -> bool {
    self.input.is_some() || self.output.is_some() || self.error.is_some()
  }
}

/// The result of evaluating a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  /// An exit code, 0 being success
  Code(i32),
  /// `exit` or `quit` was run; the caller should stop reading input
  Exit,
}

impl Status {
  pub const SUCCESS: Status = Status::Code(0);
  pub const FAILURE: Status = Status::Code(1);

  pub fn from_bool(ok: bool) -> Self {
    if ok {
      Self::SUCCESS
    } else {
      Self::FAILURE
    }
  }
  pub fn code(&self) -> Option<i32> {
    match self {
      Status::Code(code) => Some(*code),
      Status::Exit => None,
    }
  }
  pub fn is_success(&self) -> bool {
    *self == Self::SUCCESS
  }
  pub fn is_exit(&self) -> bool {
    *self == Self::Exit
  }
  /// The exit code a forked branch terminates with after producing this status
  pub fn child_code(&self) -> i32 {
    match self {
      Status::Code(code) => *code,
      Status::Exit => 0,
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Status::Code(code) => write!(f, "{code}"),
      Status::Exit => write!(f, "exit"),
    }
  }
}

impl From<i32> for Status {
  fn from(code: i32) -> Self {
    Status::Code(code)
  }
}
