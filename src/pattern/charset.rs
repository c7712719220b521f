use std::ops::RangeInclusive;

use regex::Regex;

use crate::error::{CharsetErrorKind, InvalidCharset};

/// A set of characters that are allowed in placeholder names.
#[derive(Debug, Clone)]
pub struct Charset {
	negated: bool,
	ranges: Vec<RangeInclusive<char>>,
	classes: Vec<ClassEscape>,
	member: Regex,
}

/// A character class written as a backslash escape in a charset.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ClassEscape {
	/// `\w`: word characters.
	Word,

	/// `\W`: everything except word characters.
	NotWord,

	/// `\d`: decimal digits.
	Digit,

	/// `\D`: everything except decimal digits.
	NotDigit,

	/// `\s`: whitespace.
	Space,

	/// `\S`: everything except whitespace.
	NotSpace,
}

impl ClassEscape {
	/// The escape as it is written in a regex character class.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Word => r"\w",
			Self::NotWord => r"\W",
			Self::Digit => r"\d",
			Self::NotDigit => r"\D",
			Self::Space => r"\s",
			Self::NotSpace => r"\S",
		}
	}
}

enum Item {
	Char(char),
	Class(ClassEscape),
}

impl Charset {
	/// Parse a charset description.
	///
	/// The description is the body of a regex character class:
	/// a sequence of single characters and ranges in the form `a-z`.
	/// A `-` at the start or end of the description is a literal dash.
	/// A `^` at the start negates the set.
	///
	/// A backslash escapes the next character, so `\-`, `\^` and `\\` are a literal dash, caret and backslash.
	/// The class escapes `\w`, `\d`, `\s` and their negations `\W`, `\D`, `\S` are supported,
	/// as are the control escapes `\t`, `\n`, `\r`, `\f` and `\v`.
	/// Any other backslash followed by a letter or digit is rejected.
	///
	/// # Example
	/// ```rust
	/// # use tagsubst::Charset;
	/// let charset = Charset::parse("a-z_-").unwrap();
	/// assert!(charset.contains('q'));
	/// assert!(charset.contains('-'));
	/// assert!(!charset.contains('Q'));
	///
	/// let charset = Charset::parse(r"^\s}").unwrap();
	/// assert!(charset.contains('.'));
	/// assert!(!charset.contains(' '));
	/// assert!(!charset.contains('}'));
	/// ```
	pub fn parse(text: &str) -> Result<Self, InvalidCharset> {
		let mut ranges = Vec::new();
		let mut classes = Vec::new();
		let mut chars = text.char_indices().peekable();

		let negated = text.starts_with('^');
		if negated {
			chars.next();
		}

		while let Some((start_pos, c)) = chars.next() {
			let first = match read_item(&mut chars, start_pos, c)? {
				Item::Char(c) => c,
				Item::Class(class) => {
					classes.push(class);
					continue;
				},
			};

			// Only treat the dash as a range operator if there is something after it.
			let mut lookahead = chars.clone();
			if let (Some((_, '-')), Some((end_pos, d))) = (lookahead.next(), lookahead.next()) {
				chars.next();
				chars.next();
				match read_item(&mut chars, end_pos, d)? {
					Item::Char(last) => {
						if last < first {
							let end_byte = chars.peek().map_or(text.len(), |&(i, _)| i);
							return Err(InvalidCharset {
								position: start_pos,
								len: end_byte - start_pos,
								reason: CharsetErrorKind::ReversedRange { start: first, end: last },
							});
						}
						ranges.push(first..=last);
					},
					// A class can not end a range, so the dash is literal.
					Item::Class(class) => {
						ranges.push(first..=first);
						ranges.push('-'..='-');
						classes.push(class);
					},
				}
			} else {
				ranges.push(first..=first);
			}
		}

		if ranges.is_empty() && classes.is_empty() {
			return Err(InvalidCharset {
				position: 0,
				len: 0,
				reason: CharsetErrorKind::Empty,
			});
		}

		let class = render_class(negated, &ranges, &classes);
		let member = Regex::new(&format!("^{}$", class)).map_err(|_| InvalidCharset {
			position: 0,
			len: text.len(),
			reason: CharsetErrorKind::Unsupported,
		})?;

		Ok(Self {
			negated,
			ranges,
			classes,
			member,
		})
	}

	/// Check if a character is part of the set.
	pub fn contains(&self, c: char) -> bool {
		let mut buffer = [0; 4];
		self.member.is_match(c.encode_utf8(&mut buffer))
	}

	/// Check if the set was negated with a leading `^`.
	pub fn is_negated(&self) -> bool {
		self.negated
	}

	/// Get the inclusive ranges that make up the set, in the order they were given.
	///
	/// Single characters are ranges with the same start and end.
	pub fn ranges(&self) -> &[RangeInclusive<char>] {
		&self.ranges
	}

	/// Get the class escapes in the set, in the order they were given.
	pub fn classes(&self) -> &[ClassEscape] {
		&self.classes
	}

	/// Render the set as a regex character class.
	pub(crate) fn to_class(&self) -> String {
		render_class(self.negated, &self.ranges, &self.classes)
	}
}

impl PartialEq for Charset {
	fn eq(&self, other: &Self) -> bool {
		self.negated == other.negated && self.ranges == other.ranges && self.classes == other.classes
	}
}

impl Eq for Charset {}

fn render_class(negated: bool, ranges: &[RangeInclusive<char>], classes: &[ClassEscape]) -> String {
	let mut class = String::from("[");
	if negated {
		class.push('^');
	}
	for range in ranges {
		push_escaped(&mut class, *range.start());
		if range.start() != range.end() {
			class.push('-');
			push_escaped(&mut class, *range.end());
		}
	}
	for escape in classes {
		class.push_str(escape.as_str());
	}
	class.push(']');
	class
}

/// Read one class member that starts with `c` at `position`, consuming the rest of an escape sequence.
fn read_item<I>(chars: &mut I, position: usize, c: char) -> Result<Item, InvalidCharset>
where
	I: Iterator<Item = (usize, char)>,
{
	if c != '\\' {
		return Ok(Item::Char(c));
	}
	let escaped = match chars.next() {
		Some((_, escaped)) => escaped,
		None => {
			return Err(InvalidCharset {
				position,
				len: 1,
				reason: CharsetErrorKind::DanglingEscape,
			})
		},
	};
	let item = match escaped {
		'w' => Item::Class(ClassEscape::Word),
		'W' => Item::Class(ClassEscape::NotWord),
		'd' => Item::Class(ClassEscape::Digit),
		'D' => Item::Class(ClassEscape::NotDigit),
		's' => Item::Class(ClassEscape::Space),
		'S' => Item::Class(ClassEscape::NotSpace),
		't' => Item::Char('\t'),
		'n' => Item::Char('\n'),
		'r' => Item::Char('\r'),
		'f' => Item::Char('\x0C'),
		'v' => Item::Char('\x0B'),
		other if other.is_ascii_alphanumeric() => {
			return Err(InvalidCharset {
				position,
				len: 2,
				reason: CharsetErrorKind::UnknownEscape { escape: other },
			})
		},
		other => Item::Char(other),
	};
	Ok(item)
}

fn push_escaped(output: &mut String, c: char) {
	let mut buffer = [0; 4];
	output.push_str(&regex::escape(c.encode_utf8(&mut buffer)));
}
