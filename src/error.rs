//! Module containing error details.

/// An error that can occur while building an [`Engine`][crate::Engine] from a configuration.
///
/// Substitution itself never fails: the only hard failure is an invalid configuration.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum ConfigError {
	/// The opening or closing tag is an empty string.
	EmptyTag(EmptyTag),

	/// The maximum name length is zero.
	InvalidNameLength(InvalidNameLength),

	/// The set of valid name characters could not be parsed.
	InvalidCharset(InvalidCharset),

	/// The assembled pattern was rejected by the regex engine.
	Pattern(PatternError),
}

impl From<EmptyTag> for ConfigError {
	#[inline]
	fn from(other: EmptyTag) -> Self {
		Self::EmptyTag(other)
	}
}

impl From<InvalidNameLength> for ConfigError {
	#[inline]
	fn from(other: InvalidNameLength) -> Self {
		Self::InvalidNameLength(other)
	}
}

impl From<InvalidCharset> for ConfigError {
	#[inline]
	fn from(other: InvalidCharset) -> Self {
		Self::InvalidCharset(other)
	}
}

impl From<PatternError> for ConfigError {
	#[inline]
	fn from(other: PatternError) -> Self {
		Self::Pattern(other)
	}
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::EmptyTag(e) => e.fmt(f),
			Self::InvalidNameLength(e) => e.fmt(f),
			Self::InvalidCharset(e) => e.fmt(f),
			Self::Pattern(e) => e.fmt(f),
		}
	}
}

/// Which of the two tags an error refers to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TagKind {
	/// The opening tag, `{{` by default.
	Open,

	/// The closing tag, `}}` by default.
	Close,
}

impl std::fmt::Display for TagKind {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Open => f.write_str("opening"),
			Self::Close => f.write_str("closing"),
		}
	}
}

/// The opening or closing tag is an empty string.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct EmptyTag {
	/// The tag that is empty.
	pub tag: TagKind,
}

impl std::error::Error for EmptyTag {}

impl std::fmt::Display for EmptyTag {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "The {} tag can not be empty", self.tag)
	}
}

/// The maximum name length is zero, so no placeholder could ever match.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct InvalidNameLength;

impl std::error::Error for InvalidNameLength {}

impl std::fmt::Display for InvalidNameLength {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "The maximum name length must be at least 1")
	}
}

/// The set of valid name characters could not be parsed.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct InvalidCharset {
	/// The byte offset within the charset text where the error occurs.
	pub position: usize,

	/// The length in bytes of the offending part of the charset text.
	pub len: usize,

	/// What is wrong with the charset.
	pub reason: CharsetErrorKind,
}

/// The reason a charset was rejected.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum CharsetErrorKind {
	/// The charset does not describe a single character.
	Empty,

	/// The charset ends with a backslash that escapes nothing.
	DanglingEscape,

	/// A range ends with a character that sorts before its start.
	ReversedRange {
		/// The first character of the range.
		start: char,

		/// The last character of the range.
		end: char,
	},

	/// A backslash escape that has no meaning in a charset, like `\b` or `\p`.
	UnknownEscape {
		/// The character after the backslash.
		escape: char,
	},

	/// The regex engine could not build a class from the charset.
	Unsupported,
}

impl std::error::Error for InvalidCharset {}

impl std::fmt::Display for InvalidCharset {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self.reason {
			CharsetErrorKind::Empty => write!(f, "Invalid name charset: no characters given"),
			CharsetErrorKind::DanglingEscape => write!(f, "Invalid name charset: missing escaped character"),
			CharsetErrorKind::ReversedRange { start, end } => {
				write!(f, "Invalid name charset: range {:?} to {:?} is out of order", start, end)
			},
			CharsetErrorKind::UnknownEscape { escape } => {
				write!(f, "Invalid name charset: unsupported escape sequence \\{}", escape)
			},
			CharsetErrorKind::Unsupported => write!(f, "Invalid name charset: not supported by the regex engine"),
		}
	}
}

impl InvalidCharset {
	/// Get the range in the charset text that contains the error.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		self.position..self.position + self.len
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the charset exceeds 60 characters in width,
	/// or if it contains a line break.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, charset: &str) -> std::fmt::Result {
		use unicode_width::UnicodeWidthStr;

		let range = self.source_range();
		if range.end > charset.len() || !charset.is_char_boundary(range.start) || !charset.is_char_boundary(range.end) {
			return Err(std::fmt::Error);
		}
		if charset.width() > 60 || charset.contains(['\n', '\r']) {
			return Ok(());
		}
		write!(f, "  {}\n  ", charset)?;
		write_underline(f, charset, range)?;
		writeln!(f)
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	///
	/// # Panics
	/// May panic if `charset` is not the text that produced the error.
	pub fn source_highlighting(&self, charset: &str) -> String {
		let mut output = String::new();
		self.write_source_highlighting(&mut output, charset).unwrap();
		output
	}
}

/// The assembled pattern was rejected by the regex engine.
///
/// In practice this happens when the length limits are so large
/// that the compiled pattern exceeds the size limit of the regex engine.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct PatternError {
	/// The pattern text that failed to compile.
	pub pattern: String,

	/// The message reported by the regex engine.
	pub message: String,
}

impl std::error::Error for PatternError {}

impl std::fmt::Display for PatternError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Failed to build placeholder pattern: {}", self.message)
	}
}

fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	let carets = line[range].width().max(1);
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}
