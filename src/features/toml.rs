//! Support for placeholder substitution in TOML data.

use serde::de::DeserializeOwned;

use crate::{Engine, VariableMap};

/// Parse a struct from TOML data, after compiling all string values with an engine.
///
/// This function first parses the data into a [`toml::Value`],
/// then substitutes placeholders in all string values,
/// and then parses it further into the desired type.
pub fn from_slice<'a, T: DeserializeOwned, M>(data: &[u8], engine: &Engine, variables: &'a M) -> Result<T, Error>
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	from_str(std::str::from_utf8(data)?, engine, variables)
}

/// Parse a struct from TOML data, after compiling all string values with an engine.
///
/// This function first parses the data into a [`toml::Value`],
/// then substitutes placeholders in all string values,
/// and then parses it further into the desired type.
pub fn from_str<'a, T: DeserializeOwned, M>(data: &str, engine: &Engine, variables: &'a M) -> Result<T, Error>
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	let mut value: toml::Value = toml::from_str(data)?;
	compile_string_values(&mut value, engine, variables);
	Ok(T::deserialize(value)?)
}

/// Substitute placeholders in all string values of a TOML value.
pub fn compile_string_values<'a, M>(value: &mut toml::Value, engine: &Engine, variables: &'a M)
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	visit_string_values(value, &mut |value| {
		*value = engine.compile_with(value, variables);
	})
}

/// Error for parsing TOML with placeholder substitution.
#[derive(Debug)]
pub enum Error {
	/// The input contains invalid UTF-8.
	InvalidUtf8(std::str::Utf8Error),

	/// An error occurred while parsing TOML.
	Toml(toml::de::Error),
}

impl From<std::str::Utf8Error> for Error {
	#[inline]
	fn from(other: std::str::Utf8Error) -> Self {
		Self::InvalidUtf8(other)
	}
}

impl From<toml::de::Error> for Error {
	#[inline]
	fn from(other: toml::de::Error) -> Self {
		Self::Toml(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidUtf8(e) => std::fmt::Display::fmt(e, f),
			Self::Toml(e) => std::fmt::Display::fmt(e, f),
		}
	}
}

/// Recursively apply a function to all string values in a TOML value.
fn visit_string_values<F>(value: &mut toml::Value, fun: &mut F)
where
	F: FnMut(&mut String),
{
	match value {
		toml::Value::Boolean(_) => (),
		toml::Value::Integer(_) => (),
		toml::Value::Float(_) => (),
		toml::Value::Datetime(_) => (),
		toml::Value::String(val) => fun(val),
		toml::Value::Array(seq) => {
			for value in seq {
				visit_string_values(value, fun);
			}
		},
		toml::Value::Table(map) => {
			for (_key, value) in map.iter_mut() {
				visit_string_values(value, fun);
			}
		},
	}
}
