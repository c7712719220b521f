use crate::config::{Config, Options};
use crate::error::ConfigError;
use crate::pattern::Matcher;
use crate::template::Template;
use crate::{Dictionary, VariableMap};

/// A configured templating engine.
///
/// The engine owns its configuration, the placeholder matcher built from it,
/// a [`Dictionary`] of values, the current default value and one precompiled [`Template`].
///
/// There are two ways to substitute placeholders:
/// * [`Self::compile()`] and [`Self::compile_with()`] scan a template and substitute in one go.
/// * [`Self::set_template()`] precompiles a template once,
///   after which [`Self::render()`] and [`Self::render_with()`] only fill in values.
///
/// The compile functions only need a shared reference, so one engine can be used from many threads at once.
/// Everything that modifies the engine needs a mutable reference.
#[derive(Debug, Clone)]
pub struct Engine {
	config: Config,
	matcher: Matcher,
	strategy: Strategy,
	mapping: Dictionary,
	default_value: String,
	template: Template,
}

/// How the direct compilation treats matches.
///
/// Picked once when the engine is constructed, so the plain variant never checks for escapes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Strategy {
	Plain,
	Escaping,
}

impl Engine {
	/// Create an engine with an empty mapping.
	///
	/// # Example
	/// ```rust
	/// # use tagsubst::{Config, Engine};
	/// let engine = Engine::new(Config {
	///     default_value: "__NOT_FOUND__".into(),
	///     ..Config::default()
	/// }).unwrap();
	///
	/// let values = [("adjective", "mysterious"), ("animal", "Cats")];
	/// assert_eq!(
	///     engine.compile_with("{{animal}} are a {{adjective}} kind of folk - {{author}}", &values),
	///     "Cats are a mysterious kind of folk - __NOT_FOUND__",
	/// );
	/// ```
	#[inline]
	pub fn new(config: Config) -> Result<Self, ConfigError> {
		Self::with_mapping(config, Dictionary::new())
	}

	/// Create an engine with an initial mapping.
	pub fn with_mapping(config: Config, mapping: Dictionary) -> Result<Self, ConfigError> {
		let matcher = Matcher::new(&config)?;
		let strategy = if config.allow_escape {
			Strategy::Escaping
		} else {
			Strategy::Plain
		};
		Ok(Self {
			default_value: config.default_value.clone(),
			config,
			matcher,
			strategy,
			mapping,
			template: Template::default(),
		})
	}

	/// Create an engine from configuration overrides on top of the defaults.
	#[inline]
	pub fn from_options(options: Options) -> Result<Self, ConfigError> {
		Self::new(options.resolve())
	}

	/// Get the configuration the engine was built with.
	#[inline]
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Get the placeholder matcher.
	#[inline]
	pub fn matcher(&self) -> &Matcher {
		&self.matcher
	}

	/// Get the mapping used when no other mapping is given.
	#[inline]
	pub fn mapping(&self) -> &Dictionary {
		&self.mapping
	}

	/// Replace the mapping used when no other mapping is given.
	pub fn set_mapping(&mut self, mapping: Dictionary) {
		log::trace!("replacing mapping with {} values", mapping.len());
		self.mapping = mapping;
	}

	/// Get the value used for placeholders that have no mapped value.
	#[inline]
	pub fn default_value(&self) -> &str {
		&self.default_value
	}

	/// Set the value used for placeholders that have no mapped value.
	///
	/// This affects later calls to [`Self::compile()`] and later precompiled templates.
	/// A template that is already precompiled keeps the default value it was precompiled with.
	#[inline]
	pub fn set_default_value(&mut self, default_value: impl Into<String>) {
		self.default_value = default_value.into();
	}

	/// Get the source of the current precompiled template.
	///
	/// This is an empty string if no template was precompiled yet.
	#[inline]
	pub fn raw_template(&self) -> &str {
		self.template.source()
	}

	/// Get the current precompiled template.
	#[inline]
	pub fn template(&self) -> &Template {
		&self.template
	}

	/// Precompile a template without storing it in the engine.
	///
	/// The returned template uses the current default value for unmapped placeholders.
	pub fn precompile(&self, source: impl Into<String>) -> Template {
		Template::new(&self.matcher, source, self.default_value.as_str())
	}

	/// Precompile a template and make it the current template of the engine.
	///
	/// This replaces the previous template, including its fragments and slot map.
	///
	/// # Example
	/// ```rust
	/// # use tagsubst::{Config, Engine};
	/// let mut engine = Engine::new(Config::default()).unwrap();
	/// engine.set_template("{{animal}} says hi");
	/// assert_eq!(engine.render_with(&[("animal", "Cats")]), "Cats says hi");
	/// assert_eq!(engine.render_with(&[("animal", "Dogs")]), "Dogs says hi");
	/// assert_eq!(engine.raw_template(), "{{animal}} says hi");
	/// ```
	pub fn set_template(&mut self, source: impl Into<String>) {
		self.template = self.precompile(source);
	}

	/// Render the current template with the mapping of the engine.
	#[inline]
	pub fn render(&self) -> String {
		self.template.render_with(&self.mapping)
	}

	/// Render the current template with the given mapping.
	///
	/// Returns an empty string if no template was precompiled yet.
	#[inline]
	pub fn render_with<'b, M>(&self, variables: &'b M) -> String
	where
		M: VariableMap<'b> + ?Sized,
		M::Value: AsRef<str>,
	{
		self.template.render_with(variables)
	}

	/// Substitute the placeholders in a template with the mapping of the engine.
	#[inline]
	pub fn compile(&self, source: &str) -> String {
		self.compile_with(source, &self.mapping)
	}

	/// Substitute the placeholders in a template with values from the given map.
	///
	/// Placeholders whose name is not in the map are replaced by the default value.
	/// If escaping is enabled, escaped placeholders are copied without the escape character.
	///
	/// You can pass either a [`HashMap`][std::collections::HashMap], [`BTreeMap`][std::collections::BTreeMap] or any other [`VariableMap`].
	/// The values must implement [`AsRef<str>`].
	pub fn compile_with<'b, M>(&self, source: &str, variables: &'b M) -> String
	where
		M: VariableMap<'b> + ?Sized,
		M::Value: AsRef<str>,
	{
		match self.strategy {
			Strategy::Plain => self.compile_impl::<M, false>(source, variables),
			Strategy::Escaping => self.compile_impl::<M, true>(source, variables),
		}
	}

	fn compile_impl<'b, M, const ESCAPE: bool>(&self, source: &str, variables: &'b M) -> String
	where
		M: VariableMap<'b> + ?Sized,
		M::Value: AsRef<str>,
	{
		let mut output = String::with_capacity(source.len() + source.len() / 8);
		let mut finger = 0;
		for found in self.matcher.find_iter(source) {
			output.push_str(&source[finger..found.start()]);
			if ESCAPE && found.is_escaped() {
				output.push_str(found.unescaped());
			} else {
				match variables.get(found.name()) {
					Some(value) => output.push_str(value.as_ref()),
					None => output.push_str(&self.default_value),
				}
			}
			finger = found.end();
		}
		output.push_str(&source[finger..]);
		output
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::{BTreeMap, HashMap};

	use super::*;
	use crate::error::{CharsetErrorKind, EmptyTag, TagKind};
	use assert2::{assert, check, let_assert};

	const FOLK: &str = "{{animal}} are a {{adjective}} kind of folk - {{author}}";

	fn build(config: Config) -> Engine {
		let_assert!(Ok(engine) = Engine::new(config));
		engine
	}

	fn cats() -> Dictionary {
		let mut mapping = Dictionary::new();
		mapping.insert("adjective".into(), "mysterious".into());
		mapping.insert("animal".into(), "Cats".into());
		mapping
	}

	#[test]
	fn test_unmapped_uses_empty_default() {
		let engine = build(Config::default());
		check!(engine.compile_with(FOLK, &cats()) == "Cats are a mysterious kind of folk - ");
	}

	#[test]
	fn test_unmapped_uses_configured_default() {
		let engine = build(Config { default_value: "__NOT_FOUND__".into(), ..Config::default() });
		check!(engine.compile_with(FOLK, &cats()) == "Cats are a mysterious kind of folk - __NOT_FOUND__");
	}

	#[test]
	fn test_inner_whitespace() {
		let engine = build(Config { allow_inner_whitespace: true, ..Config::default() });
		let mut mapping = cats();
		mapping.insert("author".into(), "Sir Walter Scott".into());
		check!(
			engine.compile_with("{{ animal }} are a {{ adjective }} kind of folk - {{ author }}", &mapping)
			== "Cats are a mysterious kind of folk - Sir Walter Scott"
		);
	}

	#[test]
	fn test_max_whitespace() {
		let engine = build(Config {
			allow_inner_whitespace: true,
			max_whitespace: 1,
			..Config::default()
		});
		let values = [("animal", "Cats"), ("author", "Sir Walter Scott")];
		check!(engine.compile_with("{{ animal }} - {{  author  }}", &values) == "Cats - {{  author  }}");
	}

	#[test]
	fn test_whitespace_not_allowed() {
		let engine = build(Config::default());
		check!(engine.compile_with("{{ animal }} {{animal}}", &cats()) == "{{ animal }} Cats");
	}

	#[test]
	fn test_max_name_length() {
		let engine = build(Config { max_name_length: 6, ..Config::default() });
		check!(
			engine.compile_with("{{animal}} are a {{adjective}} kind of folk", &cats())
			== "Cats are a {{adjective}} kind of folk"
		);
	}

	#[test]
	fn test_name_length_boundary() {
		let engine = build(Config { max_name_length: 4, ..Config::default() });
		let values = [("abcd", "four"), ("abcde", "five")];
		check!(engine.compile_with("{{abcd}} {{abcde}}", &values) == "four {{abcde}}");
	}

	#[test]
	fn test_charset() {
		let engine = build(Config { valid_name_charset: "a-z".into(), ..Config::default() });
		let values = [("animal", "Cats"), ("ADJECTIVE", "mysterious")];
		check!(engine.compile_with("{{animal}} are {{ADJECTIVE}}", &values) == "Cats are {{ADJECTIVE}}");
	}

	#[test]
	fn test_charset_class_escapes() {
		let engine = build(Config { valid_name_charset: r"\w".into(), default_value: "?".into(), ..Config::default() });
		let values = [("name", "N"), ("w", "W")];
		check!(engine.compile_with("{{name}} {{w}} {{a.b}}", &values) == "N W {{a.b}}");

		let engine = build(Config { valid_name_charset: r"\d".into(), default_value: "?".into(), ..Config::default() });
		let values = [("42", "answer"), ("d", "D")];
		check!(engine.compile_with("{{42}} {{d}}", &values) == "answer {{d}}");
	}

	#[test]
	fn test_charset_negated() {
		let engine = build(Config { valid_name_charset: "^}".into(), default_value: "C".into(), ..Config::default() });
		let values = [("a.b", "dotted")];
		check!(engine.compile_with("{{a.b}} {{^}}", &values) == "dotted C");
	}

	#[test]
	fn test_charset_unknown_escape_fails() {
		let_assert!(Err(ConfigError::InvalidCharset(e)) = Engine::new(Config { valid_name_charset: r"\p{L}".into(), ..Config::default() }));
		check!(e.reason == CharsetErrorKind::UnknownEscape { escape: 'p' });
	}

	#[test]
	fn test_escape() {
		let engine = build(Config { allow_escape: true, ..Config::default() });
		check!(engine.compile_with("!{{x}}", &[("x", "v")]) == "{{x}}");
		check!(engine.compile_with("!{{x}}", &[("y", "v")]) == "{{x}}");
		check!(engine.compile_with("!{{x}} -> {{x}}.", &[("x", "v")]) == "{{x}} -> v.");
		check!(engine.compile_with("!!{{x}}", &[("x", "v")]) == "!{{x}}");
	}

	#[test]
	fn test_escape_disabled_keeps_marker() {
		let engine = build(Config::default());
		check!(engine.compile_with("!{{x}}", &[("x", "v")]) == "!v");
	}

	#[test]
	fn test_no_placeholders() {
		let engine = build(Config::default());
		check!(engine.compile_with("", &cats()) == "");
		check!(engine.compile_with("plain {text} here }}{{", &cats()) == "plain {text} here }}{{");
	}

	#[test]
	fn test_empty_mapped_value_wins() {
		let engine = build(Config { default_value: "fallback".into(), ..Config::default() });
		check!(engine.compile_with("[{{x}}]", &[("x", "")]) == "[]");

		let mut engine = engine;
		engine.set_template("[{{x}}]");
		check!(engine.render_with(&[("x", "")]) == "[]");
	}

	#[test]
	fn test_global_mapping() {
		let_assert!(Ok(mut engine) = Engine::with_mapping(Config::default(), cats()));
		check!(engine.compile("{{animal}}!") == "Cats!");

		let mut mapping = HashMap::new();
		mapping.insert("animal".to_string(), "Kevins".to_string());
		engine.set_mapping(mapping.clone());
		mapping.insert("animal".to_string(), "changed later".to_string());
		check!(engine.compile("{{animal}}!") == "Kevins!");
		check!(engine.mapping().get("animal").map(String::as_str) == Some("Kevins"));
	}

	#[test]
	fn test_default_value_accessors() {
		let mut engine = build(Config { default_value: "__NOT_FOUND__".into(), ..Config::default() });
		check!(engine.default_value() == "__NOT_FOUND__");
		engine.set_default_value("!FOUND");
		check!(engine.default_value() == "!FOUND");
		check!(engine.compile("{{x}}") == "!FOUND");
		check!(engine.config().default_value == "__NOT_FOUND__");
	}

	#[test]
	fn test_precompiled_default_is_fixed() {
		let mut engine = build(Config { default_value: "old".into(), ..Config::default() });
		engine.set_template("{{x}}");
		engine.set_default_value("new");
		check!(engine.render() == "old");
		engine.set_template("{{x}}");
		check!(engine.render() == "new");
	}

	#[test]
	fn test_render_before_set_template() {
		let engine = build(Config::default());
		check!(engine.raw_template() == "");
		check!(engine.render() == "");
		check!(engine.render_with(&cats()) == "");
	}

	#[test]
	fn test_set_template_replaces_previous() {
		let mut engine = build(Config::default());
		engine.set_template("{{a}}");
		engine.set_template("{{b}}!");
		check!(engine.raw_template() == "{{b}}!");
		check!(engine.template().slots("a") == None);
		check!(engine.render_with(&[("a", "A"), ("b", "B")]) == "B!");
	}

	#[test]
	fn test_render_matches_compile() {
		let templates = [
			FOLK,
			"",
			"no placeholders",
			"{{animal}}{{animal}}{{animal}}",
			"{{animal}} {{ animal }} {{ani mal}} {{}}",
			"}}{{animal{{adjective}}}}",
		];
		let mappings = [cats(), Dictionary::new()];
		for default_value in ["", "?"] {
			let mut engine = build(Config { default_value: default_value.into(), ..Config::default() });
			for template in templates {
				engine.set_template(template);
				for mapping in &mappings {
					assert!(engine.render_with(mapping) == engine.compile_with(template, mapping));
				}
			}
		}
	}

	#[test]
	fn test_render_matches_compile_with_whitespace() {
		let mut engine = build(Config {
			allow_inner_whitespace: true,
			max_whitespace: 1,
			default_value: "?".into(),
			..Config::default()
		});
		let templates = [
			"{{animal}}|{{ animal }}|{{  animal  }}|{{ animal  }}|{{animal }}",
			"{{\tadjective\t}} {{\nadjective}} {{ ani mal }} {{ }}",
			"{{ {{animal}} }}",
		];
		let mappings = [cats(), Dictionary::new()];
		for template in templates {
			engine.set_template(template);
			for mapping in &mappings {
				assert!(engine.render_with(mapping) == engine.compile_with(template, mapping));
			}
		}
		engine.set_template(templates[0]);
		check!(engine.render_with(&cats()) == "Cats|Cats|{{  animal  }}|{{ animal  }}|Cats");
	}

	#[test]
	fn test_render_matches_compile_with_name_length() {
		let mut engine = build(Config { max_name_length: 6, default_value: "?".into(), ..Config::default() });
		let templates = [
			"{{animal}} {{animals}} {{a}} {{}}",
			"{{{{animal}}}} {{adjective}} {{author}}",
			"{{abcdef}}{{abcdefg}}{{abcdef}}",
		];
		let mappings = [cats(), Dictionary::new()];
		for template in templates {
			engine.set_template(template);
			for mapping in &mappings {
				assert!(engine.render_with(mapping) == engine.compile_with(template, mapping));
			}
		}
		engine.set_template(templates[0]);
		check!(engine.render_with(&cats()) == "Cats {{animals}} ? {{}}");
	}

	#[test]
	fn test_precompile_does_not_replace_current() {
		let mut engine = build(Config::default());
		engine.set_template("{{a}}");
		let other = engine.precompile("<{{b}}>");
		check!(other.render_with(&[("b", "B")]) == "<B>");
		check!(engine.raw_template() == "{{a}}");
	}

	#[test]
	fn test_btree_map_values() {
		let engine = build(Config::default());
		let mut map: BTreeMap<&str, String> = BTreeMap::new();
		map.insert("animal", "Cats".into());
		check!(engine.compile_with("{{animal}}", &map) == "Cats");
	}

	#[test]
	fn test_dyn_variable_map() {
		let engine = build(Config::default());
		let mapping = cats();
		let mapping: &dyn VariableMap<Value = &String> = &mapping;
		check!(engine.compile_with("{{animal}}", mapping) == "Cats");
	}

	#[test]
	fn test_from_options() {
		let_assert!(Ok(engine) = Engine::from_options(Options {
			tags: Some(crate::TagOptions {
				open: Some("<%".into()),
				close: Some("%>".into()),
			}),
			..Options::default()
		}));
		check!(engine.compile_with("<%animal%> {{animal}}", &cats()) == "Cats {{animal}}");

		let_assert!(Err(e) = Engine::from_options(Options {
			open_tag: Some(String::new()),
			..Options::default()
		}));
		assert!(e == ConfigError::EmptyTag(EmptyTag { tag: TagKind::Open }));
	}

	#[test]
	fn test_send_sync() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<Engine>();
		assert_send_sync::<Template>();
	}
}
