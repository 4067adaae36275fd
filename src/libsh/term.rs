//! ANSI styling for log output.
//!
//! Escapes are left out entirely when `NO_COLOR` is set to anything
//! non-empty, which keeps redirected logs readable.

use std::{
  env,
  fmt::{self, Display},
  ops::BitOr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
  Red = 31,
  Green = 32,
  Yellow = 33,
  Blue = 34,
  Magenta = 35,
  Cyan = 36,
}

/// A foreground color and/or bold. Combine with `|`; the right-hand color wins.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Style {
  fg: Option<Color>,
  bold: bool,
}

impl Style {
  pub const PLAIN: Style = Style {
    fg: None,
    bold: false,
  };
  pub const BOLD: Style = Style {
    fg: None,
    bold: true,
  };

  pub fn is_plain(&self) -> bool {
    *self == Self::PLAIN
  }

  /// The SGR sequence that turns this style on
  pub fn sgr(&self) -> String {
    let mut params = vec![];
    if self.bold {
      params.push("1".to_string());
    }
    if let Some(color) = self.fg {
      params.push((color as u8).to_string());
    }
    format!("\x1b[{}m", params.join(";"))
  }
}

impl From<Color> for Style {
  fn from(color: Color) -> Self {
    Style {
      fg: Some(color),
      bold: false,
    }
  }
}

impl BitOr for Style {
  type Output = Style;
  fn bitor(self, rhs: Style) -> Style {
    Style {
      fg: rhs.fg.or(self.fg),
      bold: self.bold || rhs.bold,
    }
  }
}

impl BitOr<Style> for Color {
  type Output = Style;
  fn bitor(self, rhs: Style) -> Style {
    Style::from(self) | rhs
  }
}

pub fn color_enabled() -> bool {
  env::var_os("NO_COLOR").map_or(true, |val| val.is_empty())
}

/// Some text with a style attached. Styling is decided when it is displayed.
#[derive(Debug, Clone)]
pub struct Painted<T> {
  text: T,
  style: Style,
}

impl<T: Display> Painted<T> {
  pub fn render(&self, color: bool) -> String {
    if !color || self.style.is_plain() {
      return self.text.to_string();
    }
    format!("{}{}\x1b[0m", self.style.sgr(), self.text)
  }
}

impl<T: Display> Display for Painted<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.render(color_enabled()))
  }
}

pub trait Styled: Sized + Display {
  fn styled(self, style: impl Into<Style>) -> Painted<Self> {
    Painted {
      text: self,
      style: style.into(),
    }
  }
}

impl<T: Display> Styled for T {}
