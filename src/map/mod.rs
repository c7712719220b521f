//! Mappings from placeholder names to replacement values.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

mod fallback;
pub use fallback::*;

/// The mapping owned by an [`Engine`][crate::Engine].
pub type Dictionary = HashMap<String, String>;

/// Trait for types that can supply the value of a placeholder by name.
///
/// A name that is not in the map is replaced by the default value of the engine or template.
/// A name that maps to an empty value is replaced by the empty value.
pub trait VariableMap<'a> {
	/// The replacement value returned by [`get()`][Self::get].
	///
	/// It is written to the output through [`AsRef<str>`].
	type Value;

	/// Look up the replacement value for a placeholder name.
	fn get(&'a self, name: &str) -> Option<Self::Value>;
}

/// Name-value pairs as a mapping, for a few placeholders given inline.
///
/// The pairs are searched in order and the first pair with a matching name wins.
///
/// # Example
/// ```rust
/// # use tagsubst::VariableMap;
///
/// let animals = &[("animal", "Cats"), ("adjective", "mysterious")];
///
/// assert_eq!(animals.get("animal"), Some(&"Cats"));
/// assert_eq!(animals.get("author"), None);
/// ```
impl<'a, K, V> VariableMap<'a> for [(K, V)]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, name: &str) -> Option<Self::Value> {
		self.iter().find_map(|(k, v)| (k.borrow() == name).then_some(v))
	}
}

/// Name-value arrays, so `&[("name", "value")]` can be passed directly.
impl<'a, K, V, const N: usize> VariableMap<'a> for [(K, V); N]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	#[inline(always)]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		VariableMap::get(self.as_slice(), name)
	}
}

/// Name-value pairs collected at runtime, searched like a slice.
impl<'a, K, V> VariableMap<'a> for Vec<(K, V)>
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	#[inline(always)]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		VariableMap::get(self.as_slice(), name)
	}
}

impl<'a, T> VariableMap<'a> for &'_ T
where
	T: ?Sized + VariableMap<'a>,
{
	type Value = <T as VariableMap<'a>>::Value;

	#[inline(always)]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		T::get(self, name)
	}
}

/// A mapping shared between threads, for example one [`Dictionary`] used by many engines.
impl<'a, T> VariableMap<'a> for std::sync::Arc<T>
where
	T: ?Sized + VariableMap<'a>,
{
	type Value = <T as VariableMap<'a>>::Value;

	#[inline(always)]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		T::get(self, name)
	}
}

impl<'a, V: 'a> VariableMap<'a> for BTreeMap<&str, V> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		self.get(name)
	}
}

impl<'a, V: 'a> VariableMap<'a> for BTreeMap<String, V> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		self.get(name)
	}
}

impl<'a, V: 'a, S: BuildHasher> VariableMap<'a> for HashMap<&str, V, S> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		self.get(name)
	}
}

impl<'a, V: 'a, S: BuildHasher> VariableMap<'a> for HashMap<String, V, S> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		self.get(name)
	}
}
