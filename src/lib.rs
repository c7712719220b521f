//! Configurable placeholder substitution for strings.
//!
//! # Features
//!
//! * Substitute placeholders of the form `{{name}}` with values from a map.
//! * Replace unknown placeholders with a configurable default value.
//! * Configure the tags, the characters allowed in names and the maximum name length.
//! * Optionally allow whitespace inside the tags: `{{ name }}`.
//! * Optionally allow escaping placeholders with an exclamation mark: `!{{name}}` renders as `{{name}}`.
//! * Precompile a template once and render it with many different maps.
//! * Compile all string values in JSON or TOML data (optional, requires the `json` or `toml` feature).
//!
//! Text that looks like a placeholder but breaks the rules (a name that is too long,
//! a character outside the allowed set, or unexpected whitespace) is left untouched.
//! Substitution never fails: only an invalid configuration is reported as an error.
//!
//! # Examples
//!
//! The [`Engine::compile_with()`] function substitutes placeholders in a single pass.
//! The map can be a [`HashMap`][std::collections::HashMap], a [`BTreeMap`][std::collections::BTreeMap],
//! a slice of key-value pairs or anything else that implements [`VariableMap`].
//!
//! ```
//! # fn main() -> Result<(), tagsubst::ConfigError> {
//! use tagsubst::{Config, Engine};
//!
//! let engine = Engine::new(Config::default())?;
//! let values = [("adjective", "mysterious"), ("animal", "Cats")];
//! assert_eq!(
//!   engine.compile_with("{{animal}} are a {{adjective}} kind of folk - {{author}}", &values),
//!   "Cats are a mysterious kind of folk - ",
//! );
//! # Ok(())
//! # }
//! ```
//!
//! When the same template is used many times, precompile it with [`Engine::set_template()`]
//! and render it with [`Engine::render_with()`].
//! Rendering only fills in values, without scanning the template again.
//!
//! ```
//! # fn main() -> Result<(), tagsubst::ConfigError> {
//! use tagsubst::{Config, Engine};
//!
//! let mut engine = Engine::new(Config {
//!   allow_inner_whitespace: true,
//!   default_value: "somebody".into(),
//!   ..Config::default()
//! })?;
//! engine.set_template("Dear {{ name }}, your order has shipped.");
//! assert_eq!(engine.render_with(&[("name", "Alice")]), "Dear Alice, your order has shipped.");
//! assert_eq!(engine.render_with(&[("name", "Bob")]), "Dear Bob, your order has shipped.");
//! assert_eq!(engine.render_with(&[("id", "42")]), "Dear somebody, your order has shipped.");
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]

pub mod config;
pub use config::{Config, Options, TagOptions};

mod engine;
pub use engine::Engine;

pub mod error;
pub use error::ConfigError;

mod features;
#[allow(unused_imports)] // Might not re-export anything if all features are disabled.
pub use features::*;

pub mod map;
pub use map::*;

pub mod pattern;
pub use pattern::{Charset, Matcher};

mod template;
pub use template::Template;
