use super::VariableMap;

/// A local mapping layered over a global one, produced by [`fallback()`].
///
/// Placeholder names are looked up in the local mapping first.
/// Names it does not contain are looked up in the global mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayeredMap<Local, Global> {
	local: Local,
	global: Global,
}

impl<Local, Global> LayeredMap<Local, Global> {
	/// Get the mapping that is consulted first.
	pub fn local(&self) -> &Local {
		&self.local
	}

	/// Get the mapping that is consulted for names missing from the local one.
	pub fn global(&self) -> &Global {
		&self.global
	}
}

impl<'a, Value, Local, Global> VariableMap<'a> for LayeredMap<Local, Global>
where
	Local: VariableMap<'a, Value = Value>,
	Global: VariableMap<'a, Value = Value>,
{
	type Value = Value;

	fn get(&'a self, name: &str) -> Option<Self::Value> {
		self.local.get(name).or_else(|| self.global.get(name))
	}
}

/// Layer a `local` mapping over a `global` one.
///
/// A name mapped in `local` shadows the same name in `global`, even if the local value is empty.
/// Neither mapping is copied, so this is the way to combine per-call values with the mapping of an engine.
///
/// # Example
/// ```rust
/// # use tagsubst::{fallback, Config, Dictionary, Engine};
/// let mut global = Dictionary::new();
/// global.insert("animal".into(), "Cats".into());
/// global.insert("author".into(), "Sir Walter Scott".into());
/// let engine = Engine::with_mapping(Config::default(), global).unwrap();
///
/// let mut local = Dictionary::new();
/// local.insert("author".into(), "Michael Scott".into());
///
/// let merged = fallback(&local, engine.mapping());
/// assert_eq!(
///     engine.compile_with("{{animal}} by {{author}}", &merged),
///     "Cats by Michael Scott",
/// );
/// ```
pub const fn fallback<Local, Global>(local: Local, global: Global) -> LayeredMap<Local, Global> {
	LayeredMap { local, global }
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::{check, let_assert};

	use crate::{Config, Engine};

	#[test]
	fn test_local_wins() {
		let local = [("first_name", "John")];
		let layered = fallback(local, [("first_name", "Jane"), ("middle_name", "<unknown>")]);
		check!(layered.get("first_name") == Some(&"John"));
		check!(layered.get("middle_name") == Some(&"<unknown>"));
		check!(layered.get("last_name") == None);
	}

	#[test]
	fn test_empty_local_value_shadows_global() {
		let_assert!(Ok(engine) = Engine::new(Config { default_value: "?".into(), ..Config::default() }));
		let layered = fallback([("title", "")], [("title", "Dr."), ("name", "Who")]);
		check!(engine.compile_with("{{title}}|{{name}}|{{other}}", &layered) == "|Who|?");
	}
}
