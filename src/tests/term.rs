use pretty_assertions::assert_eq;

use crate::libsh::flog::LogLevel;
use crate::libsh::term::{Color, Style, Styled};

#[test]
fn styles_combine() {
	assert_eq!((Color::Red | Style::BOLD).sgr(), "\x1b[1;31m");
	assert_eq!(Style::from(Color::Cyan).sgr(), "\x1b[36m");
	// the right-hand color wins
	assert_eq!((Style::from(Color::Red) | Style::from(Color::Blue)).sgr(), "\x1b[34m");
	assert!(Style::PLAIN.is_plain());
}

#[test]
fn painted_text() {
	let painted = "WARN".styled(Color::Yellow | Style::BOLD);
	assert_eq!(painted.render(true), "\x1b[1;33mWARN\x1b[0m");
	assert_eq!(painted.render(false), "WARN");
	assert_eq!("plain".styled(Style::PLAIN).render(true), "plain");
}

#[test]
fn log_levels() {
	assert_eq!(LogLevel::parse("TRACE"), LogLevel::TRACE);
	assert_eq!(LogLevel::parse(" warn "), LogLevel::WARN);
	assert_eq!(LogLevel::parse("loud"), LogLevel::NONE);
	assert!(LogLevel::ERROR < LogLevel::DEBUG);
	assert_eq!(LogLevel::NONE.to_string(), "");
}
