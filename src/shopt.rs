use std::{fmt::Display, str::FromStr};

use crate::libsh::error::{ShErr, ShErrKind, ShResult};
use crate::prelude::*;

pub const OPTS_VAR: &str = "SHEXEC_OPTS";

/// How `a & b` reports its result
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParallelStatus {
  /// 0 if both sides exited 0, 1 otherwise
  #[default]
  Collapse,
  /// The first non-zero code, checking the left side first
  FirstFailure,
}

impl FromStr for ParallelStatus {
  type Err = ShErr;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "collapse" => Ok(Self::Collapse),
      "first_failure" => Ok(Self::FirstFailure),
      _ => Err(ShErr::simple(
        ShErrKind::InvalidOpt,
        format!("Invalid parallel status mode '{s}'"),
      )),
    }
  }
}

impl Display for ParallelStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ParallelStatus::Collapse => write!(f, "collapse"),
      ParallelStatus::FirstFailure => write!(f, "first_failure"),
    }
  }
}

/// Open modes used when a command redirects both stdout and stderr
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DualRedir {
  /// stdout is always appended to and stderr always truncated
  #[default]
  Legacy,
  /// Each stream honors its own append flag
  PerStream,
}

impl FromStr for DualRedir {
  type Err = ShErr;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "legacy" => Ok(Self::Legacy),
      "per_stream" => Ok(Self::PerStream),
      _ => Err(ShErr::simple(
        ShErrKind::InvalidOpt,
        format!("Invalid dual redirection mode '{s}'"),
      )),
    }
  }
}

impl Display for DualRedir {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      DualRedir::Legacy => write!(f, "legacy"),
      DualRedir::PerStream => write!(f, "per_stream"),
    }
  }
}

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct ShOpts {
  pub exec: ShOptExec,
}

impl ShOpts {
  /// Options from `SHEXEC_OPTS`, e.g. `exec.parallel_status=first_failure;exec.dual_redir=per_stream`.
  ///
  /// Bad entries are logged and skipped.
  pub fn from_env() -> Self {
    match env::var(OPTS_VAR) {
      Ok(raw) => Self::from_queries(&raw),
      Err(_) => Self::default(),
    }
  }

  pub fn from_queries(raw: &str) -> Self {
    let mut opts = Self::default();
    for query in raw.split(';').map(str::trim).filter(|q| !q.is_empty()) {
      if let Err(e) = opts.query(query) {
        flog!(WARN, "ignoring '{}' in {}: {}", query, OPTS_VAR, e);
      }
    }
    opts
  }

  pub fn query(&mut self, query: &str) -> ShResult<Option<String>> {
    if let Some((opt, new_val)) = query.split_once('=') {
      self.set(opt.trim(), new_val.trim())?;
      Ok(None)
    } else {
      self.get(query)
    }
  }

  pub fn display_opts(&self) -> ShResult<String> {
    Ok(format!("exec:\n{}", self.get("exec")?.unwrap_or_default()))
  }

  pub fn set(&mut self, opt: &str, val: &str) -> ShResult<()> {
    let (key, remainder) = split_key(opt)?;

    match key {
      "exec" => self.exec.set(remainder, val),
      _ => Err(
        ShErr::simple(ShErrKind::InvalidOpt, "expected 'exec' in option key")
          .with_note("Example: 'exec.parallel_status=collapse'"),
      ),
    }
  }

  pub fn get(&self, query: &str) -> ShResult<Option<String>> {
    let (key, remainder) = split_key(query)?;

    match key {
      "exec" => self.exec.get(remainder),
      _ => Err(
        ShErr::simple(ShErrKind::InvalidOpt, "expected 'exec' in option key")
          .with_note("Example: 'exec.dual_redir'"),
      ),
    }
  }
}

fn split_key(query: &str) -> ShResult<(&str, &str)> {
  if query.is_empty() {
    return Err(ShErr::simple(ShErrKind::InvalidOpt, "No option given"));
  }
  Ok(query.split_once('.').unwrap_or((query, "")))
}

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct ShOptExec {
  pub parallel_status: ParallelStatus,
  pub dual_redir: DualRedir,
}

impl ShOptExec {
  pub fn set(&mut self, opt: &str, val: &str) -> ShResult<()> {
    match opt {
      "parallel_status" => self.parallel_status = val.parse()?,
      "dual_redir" => self.dual_redir = val.parse()?,
      _ => {
        return Err(
          ShErr::simple(
            ShErrKind::InvalidOpt,
            format!("Unexpected 'exec' option '{opt}'"),
          )
          .with_note("'exec' contains: parallel_status, dual_redir"),
        );
      }
    }
    Ok(())
  }

  pub fn get(&self, query: &str) -> ShResult<Option<String>> {
    if query.is_empty() {
      return Ok(Some(format!("{self}")));
    }

    match query {
      "parallel_status" => Ok(Some(format!("{}", self.parallel_status))),
      "dual_redir" => Ok(Some(format!("{}", self.dual_redir))),
      _ => Err(
        ShErr::simple(
          ShErrKind::InvalidOpt,
          format!("Unexpected 'exec' option '{query}'"),
        )
        .with_note("'exec' contains: parallel_status, dual_redir"),
      ),
    }
  }
}

impl Display for ShOptExec {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let output = [
      format!("parallel_status = {}", self.parallel_status),
      format!("dual_redir = {}", self.dual_redir),
    ];

    writeln!(f, "{}", output.join("\n"))
  }
}
