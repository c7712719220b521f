//! Engine configuration.
//!
//! A [`Config`] is the fully resolved set of rules used to recognize placeholders.
//! [`Options`] holds optional overrides that are layered on top of the defaults,
//! which is convenient when the configuration comes from a file or a command line.

/// The resolved configuration of an [`Engine`][crate::Engine].
///
/// Once an engine is constructed, its configuration can no longer change.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
	/// The replacement for placeholders whose name is not in the mapping.
	pub default_value: String,

	/// Allow a `!` directly before the opening tag to escape a placeholder.
	///
	/// Escaped placeholders are emitted literally, without the `!`.
	pub allow_escape: bool,

	/// Allow whitespace between the tags and the placeholder name.
	pub allow_inner_whitespace: bool,

	/// The maximum number of whitespace characters on each side of the name.
	///
	/// Only used if [`Self::allow_inner_whitespace`] is true.
	pub max_whitespace: usize,

	/// The maximum length of a placeholder name in characters.
	pub max_name_length: usize,

	/// The opening tag of a placeholder.
	pub open_tag: String,

	/// The closing tag of a placeholder.
	pub close_tag: String,

	/// The characters and character ranges allowed in a placeholder name.
	///
	/// See [`Charset::parse()`][crate::Charset::parse] for the syntax.
	pub valid_name_charset: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			default_value: String::new(),
			allow_escape: false,
			allow_inner_whitespace: false,
			max_whitespace: 64,
			max_name_length: 64,
			open_tag: String::from("{{"),
			close_tag: String::from("}}"),
			valid_name_charset: String::from("a-zA-Z0-9_-"),
		}
	}
}

impl Config {
	/// Apply a set of overrides to this configuration.
	#[inline]
	pub fn merge(self, options: Options) -> Self {
		options.apply(self)
	}
}

/// Optional overrides for a [`Config`].
///
/// Every field that is `None` keeps the value of the configuration it is applied to.
/// The tags can be given either through the nested [`Self::tags`] object
/// or through the top-level [`Self::open_tag`] and [`Self::close_tag`] fields.
/// When both are present, the top-level fields win.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Options {
	/// Override for [`Config::default_value`].
	pub default_value: Option<String>,

	/// Override for [`Config::allow_escape`].
	pub allow_escape: Option<bool>,

	/// Override for [`Config::allow_inner_whitespace`].
	pub allow_inner_whitespace: Option<bool>,

	/// Override for [`Config::max_whitespace`].
	pub max_whitespace: Option<usize>,

	/// Override for [`Config::max_name_length`].
	pub max_name_length: Option<usize>,

	/// Overrides for the tags.
	pub tags: Option<TagOptions>,

	/// Override for [`Config::open_tag`].
	pub open_tag: Option<String>,

	/// Override for [`Config::close_tag`].
	pub close_tag: Option<String>,

	/// Override for [`Config::valid_name_charset`].
	pub valid_name_charset: Option<String>,
}

/// Optional overrides for the placeholder tags.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TagOptions {
	/// Override for [`Config::open_tag`].
	pub open: Option<String>,

	/// Override for [`Config::close_tag`].
	pub close: Option<String>,
}

impl Options {
	/// Resolve the options against the default configuration.
	#[inline]
	pub fn resolve(self) -> Config {
		self.apply(Config::default())
	}

	/// Apply the options on top of a base configuration.
	///
	/// The layers are applied in order: `base`, then [`Self::tags`], then the top-level fields.
	pub fn apply(self, base: Config) -> Config {
		let mut config = base;

		if let Some(tags) = self.tags {
			if let Some(open) = tags.open {
				config.open_tag = open;
			}
			if let Some(close) = tags.close {
				config.close_tag = close;
			}
		}

		if let Some(open) = self.open_tag {
			config.open_tag = open;
		}
		if let Some(close) = self.close_tag {
			config.close_tag = close;
		}
		if let Some(default_value) = self.default_value {
			config.default_value = default_value;
		}
		if let Some(allow_escape) = self.allow_escape {
			config.allow_escape = allow_escape;
		}
		if let Some(allow_inner_whitespace) = self.allow_inner_whitespace {
			config.allow_inner_whitespace = allow_inner_whitespace;
		}
		if let Some(max_whitespace) = self.max_whitespace {
			config.max_whitespace = max_whitespace;
		}
		if let Some(max_name_length) = self.max_name_length {
			config.max_name_length = max_name_length;
		}
		if let Some(charset) = self.valid_name_charset {
			config.valid_name_charset = charset;
		}

		config
	}
}
