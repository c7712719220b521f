//! Construction of the placeholder matcher.
//!
//! The matcher is derived once from a [`Config`] and then used for every scan,
//! both for direct compilation and for precompiling templates.

use std::fmt::Write;

use regex::{CaptureMatches, Regex, RegexBuilder};

use crate::config::Config;
use crate::error::{ConfigError, EmptyTag, InvalidNameLength, PatternError, TagKind};

mod charset;
pub use charset::{Charset, ClassEscape};

/// Recognizes placeholders in a template.
///
/// A placeholder is the opening tag, optional whitespace, a name, optional whitespace and the closing tag.
/// If escaping is enabled, the matcher also recognizes placeholders preceded by a `!`,
/// and reports them as escaped.
#[derive(Debug, Clone)]
pub struct Matcher {
	regex: Regex,
	allow_escape: bool,
	name_group: usize,
}

impl Matcher {
	/// Build a matcher for the given configuration.
	///
	/// Fails if either tag is empty, if the maximum name length is zero,
	/// or if the name charset is invalid.
	pub fn new(config: &Config) -> Result<Self, ConfigError> {
		if config.open_tag.is_empty() {
			return Err(EmptyTag { tag: TagKind::Open }.into());
		}
		if config.close_tag.is_empty() {
			return Err(EmptyTag { tag: TagKind::Close }.into());
		}
		if config.max_name_length == 0 {
			return Err(InvalidNameLength.into());
		}
		let charset = Charset::parse(&config.valid_name_charset)?;

		let whitespace = if config.allow_inner_whitespace {
			format!(r"\s{{0,{}}}", config.max_whitespace)
		} else {
			String::new()
		};

		let mut pattern = String::new();
		if config.allow_escape {
			pattern.push_str("(!)?");
		}
		pattern.push_str(&regex::escape(&config.open_tag));
		pattern.push_str(&whitespace);
		// Writing to a String can not fail.
		let _ = write!(pattern, "({}{{1,{}}})", charset.to_class(), config.max_name_length);
		pattern.push_str(&whitespace);
		pattern.push_str(&regex::escape(&config.close_tag));

		let regex = RegexBuilder::new(&pattern).build().map_err(|e| PatternError {
			message: e.to_string(),
			pattern: pattern.clone(),
		})?;
		log::debug!("built placeholder pattern {:?}", regex.as_str());

		Ok(Self {
			regex,
			allow_escape: config.allow_escape,
			name_group: if config.allow_escape { 2 } else { 1 },
		})
	}

	/// Get the text of the underlying regular expression.
	#[inline]
	pub fn pattern(&self) -> &str {
		self.regex.as_str()
	}

	/// Check if this matcher recognizes escaped placeholders.
	#[inline]
	pub fn allows_escape(&self) -> bool {
		self.allow_escape
	}

	/// Iterate over all placeholders in a template, from left to right.
	///
	/// Matches never overlap.
	/// Each call starts a new scan, so the same matcher can be used for many templates at once.
	#[inline]
	pub fn find_iter<'m, 't>(&'m self, template: &'t str) -> Matches<'m, 't> {
		Matches {
			inner: self.regex.captures_iter(template),
			allow_escape: self.allow_escape,
			name_group: self.name_group,
		}
	}
}

/// A single placeholder found by a [`Matcher`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Match<'t> {
	text: &'t str,
	start: usize,
	name: &'t str,
	escaped: bool,
}

impl<'t> Match<'t> {
	/// The byte offset of the start of the match in the template.
	///
	/// For escaped placeholders, this is the position of the `!`.
	#[inline]
	pub fn start(&self) -> usize {
		self.start
	}

	/// The byte offset just past the end of the match in the template.
	#[inline]
	pub fn end(&self) -> usize {
		self.start + self.text.len()
	}

	/// The length of the match in bytes.
	#[inline]
	pub fn len(&self) -> usize {
		self.text.len()
	}

	/// Matches are never empty, since both tags must be present.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	/// The full matched text, including the tags and the `!` of an escaped placeholder.
	#[inline]
	pub fn as_str(&self) -> &'t str {
		self.text
	}

	/// The placeholder name, without surrounding whitespace.
	#[inline]
	pub fn name(&self) -> &'t str {
		self.name
	}

	/// Check if the placeholder was escaped with a `!`.
	#[inline]
	pub fn is_escaped(&self) -> bool {
		self.escaped
	}

	/// The matched text without the leading `!`.
	///
	/// For unescaped placeholders this is the full match.
	#[inline]
	pub fn unescaped(&self) -> &'t str {
		if self.escaped {
			&self.text[1..]
		} else {
			self.text
		}
	}
}

/// Iterator over the placeholders in a template.
///
/// Created by [`Matcher::find_iter()`].
#[derive(Debug)]
pub struct Matches<'m, 't> {
	inner: CaptureMatches<'m, 't>,
	allow_escape: bool,
	name_group: usize,
}

impl<'t> Iterator for Matches<'_, 't> {
	type Item = Match<'t>;

	fn next(&mut self) -> Option<Self::Item> {
		let captures = self.inner.next()?;
		let whole = captures.get(0)?;
		let name = captures.get(self.name_group)?;
		Some(Match {
			text: whole.as_str(),
			start: whole.start(),
			name: name.as_str(),
			escaped: self.allow_escape && captures.get(1).is_some(),
		})
	}
}
