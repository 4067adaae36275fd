use std::fmt::{self, Display};

use super::sys::print_stderr;
use super::term::{Color, Style, Styled};

pub const LOG_LEVEL_VAR: &str = "SHEXEC_LOG_LEVEL";

#[derive(Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Debug)]
#[repr(u8)]
pub enum LogLevel {
  NONE = 0,
  ERROR = 1,
  WARN = 2,
  INFO = 3,
  DEBUG = 4,
  TRACE = 5,
}

impl LogLevel {
  pub fn parse(raw: &str) -> Self {
    use LogLevel::*;
    match raw.trim().to_ascii_lowercase().as_str() {
      "error" => ERROR,
      "warn" => WARN,
      "info" => INFO,
      "debug" => DEBUG,
      "trace" => TRACE,
      _ => NONE,
    }
  }
  fn style(self) -> Style {
    use LogLevel::*;
    let color = match self {
      ERROR => Color::Red,
      WARN => Color::Yellow,
      INFO => Color::Green,
      DEBUG => Color::Magenta,
      TRACE => Color::Blue,
      NONE => return Style::PLAIN,
    };
    color | Style::BOLD
  }
  fn name(self) -> &'static str {
    use LogLevel::*;
    match self {
      NONE => "",
      ERROR => "ERROR",
      WARN => "WARN",
      INFO => "INFO",
      DEBUG => "DEBUG",
      TRACE => "TRACE",
    }
  }
}

impl Display for LogLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name().styled(self.style()))
  }
}

/// The level set in `SHEXEC_LOG_LEVEL`. Unset or unknown means `NONE`.
pub fn log_level() -> LogLevel {
  let level = std::env::var(LOG_LEVEL_VAR).unwrap_or_default();
  LogLevel::parse(&level)
}

pub fn enabled(level: LogLevel) -> bool {
  level != LogLevel::NONE && level <= log_level()
}

#[doc(hidden)]
pub fn emit(level: LogLevel, file: &str, line: u32, msg: fmt::Arguments<'_>) {
  print_stderr(&format!(
    "[{}][{}:{}] {}\n",
    level,
    file.styled(Color::Cyan),
    line.styled(Color::Cyan),
    msg
  ));
}

/// Structured logging for the executor.
///
/// Messages go to stderr as `[LEVEL][file.rs:line] message`, and only when
/// `SHEXEC_LOG_LEVEL` is at least `LEVEL`.
///
/// ```ignore
/// flog!(DEBUG, "forked child {}", pid);   // formatted
/// flog!(TRACE, "entering pipe");           // literal
/// flog!(TRACE, argv);                      // `argv = [...]` via Debug
/// ```
///
/// Forked children log through the same stream, so a line may come from
/// either side of a fork.
#[macro_export]
macro_rules! flog {
	($level:path, $fmt:literal, $($args:expr),+ $(,)?) => {
		if $crate::libsh::flog::enabled($level) {
			$crate::libsh::flog::emit($level, file!(), line!(), format_args!($fmt, $($args),+));
		}
	};

	($level:path, $($lit:literal),+ $(,)?) => {
		if $crate::libsh::flog::enabled($level) {
			$(
				$crate::libsh::flog::emit($level, file!(), line!(), format_args!("{}", $lit));
			)+
		}
	};

	($level:path, $($val:expr),+ $(,)?) => {
		if $crate::libsh::flog::enabled($level) {
			$(
				$crate::libsh::flog::emit(
					$level,
					file!(),
					line!(),
					format_args!("{} = {:?}", stringify!($val), &$val),
				);
			)+
		}
	};
}
