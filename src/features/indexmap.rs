use indexmap::IndexMap;

use crate::VariableMap;

impl<'a, V: 'a> VariableMap<'a> for IndexMap<&str, V> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		self.get(name)
	}
}

impl<'a, V: 'a> VariableMap<'a> for IndexMap<String, V> {
	type Value = &'a V;

	#[inline]
	fn get(&'a self, name: &str) -> Option<Self::Value> {
		self.get(name)
	}
}
