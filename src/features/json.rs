//! Support for placeholder substitution in JSON data.

use serde::de::DeserializeOwned;

use crate::{Engine, VariableMap};

/// Parse a struct from JSON data, after compiling all string values with an engine.
///
/// This function first parses the data into a [`serde_json::Value`],
/// then substitutes placeholders in all string values,
/// and then parses it further into the desired type.
///
/// Placeholders are only substituted in values, never in object keys.
pub fn from_slice<'a, T: DeserializeOwned, M>(data: &[u8], engine: &Engine, variables: &'a M) -> Result<T, serde_json::Error>
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	let mut value: serde_json::Value = serde_json::from_slice(data)?;
	compile_string_values(&mut value, engine, variables);
	T::deserialize(value)
}

/// Parse a struct from JSON data, after compiling all string values with an engine.
///
/// This function first parses the data into a [`serde_json::Value`],
/// then substitutes placeholders in all string values,
/// and then parses it further into the desired type.
///
/// Placeholders are only substituted in values, never in object keys.
pub fn from_str<'a, T: DeserializeOwned, M>(data: &str, engine: &Engine, variables: &'a M) -> Result<T, serde_json::Error>
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	let mut value: serde_json::Value = serde_json::from_str(data)?;
	compile_string_values(&mut value, engine, variables);
	T::deserialize(value)
}

/// Substitute placeholders in all string values of a JSON value.
pub fn compile_string_values<'a, M>(value: &mut serde_json::Value, engine: &Engine, variables: &'a M)
where
	M: VariableMap<'a> + ?Sized,
	M::Value: AsRef<str>,
{
	visit_string_values(value, &mut |value| {
		*value = engine.compile_with(value, variables);
	})
}

/// Recursively apply a function to all string values in a JSON value.
fn visit_string_values<F>(value: &mut serde_json::Value, fun: &mut F)
where
	F: FnMut(&mut String),
{
	match value {
		serde_json::Value::Null => (),
		serde_json::Value::Bool(_) => (),
		serde_json::Value::Number(_) => (),
		serde_json::Value::String(val) => fun(val),
		serde_json::Value::Array(seq) => {
			for value in seq {
				visit_string_values(value, fun);
			}
		},
		serde_json::Value::Object(map) => {
			for value in map.values_mut() {
				visit_string_values(value, fun);
			}
		},
	}
}
