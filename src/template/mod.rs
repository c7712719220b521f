use std::collections::HashMap;

use crate::pattern::Matcher;
use crate::VariableMap;

mod expand;
mod parse;

/// A precompiled template.
///
/// Precompiling scans the source once and splits it into a flat list of fragments:
/// literal text, and slots for placeholders.
/// Each slot initially holds the default value that was configured when the template was precompiled.
/// Alongside the fragments, the template keeps a map from every placeholder name to the slots that refer to it.
///
/// Rendering only fills the slots from a mapping and concatenates the fragments,
/// so the source text is never scanned again.
/// This makes it cheap to render the same template with many different mappings.
///
/// Create a template with [`Engine::precompile()`][crate::Engine::precompile],
/// or let an engine keep one for you with [`Engine::set_template()`][crate::Engine::set_template].
#[derive(Clone, Default)]
pub struct Template {
	/// The original source text.
	source: String,

	/// The fragments of the template, in order.
	fragments: Vec<Fragment>,

	/// The value that fills slots without a mapped value.
	default_value: String,

	/// For each placeholder name, the indices of its slots in `fragments`.
	slots: HashMap<String, Vec<usize>>,
}

/// One piece of a precompiled template.
#[derive(Debug, Clone, Eq, PartialEq)]
enum Fragment {
	/// Text copied verbatim from the source.
	Literal(std::ops::Range<usize>),

	/// A slot for a placeholder value.
	Slot,
}

impl std::fmt::Debug for Template {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Template").field(&self.source).finish()
	}
}

impl Template {
	/// Precompile a template with the given matcher.
	///
	/// Unmapped placeholders will render as `default_value`.
	pub fn new(matcher: &Matcher, source: impl Into<String>, default_value: impl Into<String>) -> Self {
		Self::parse(matcher, source.into(), default_value.into())
	}

	/// Get the original source text.
	#[inline]
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Consume the template to get the original source text.
	#[inline]
	pub fn into_source(self) -> String {
		self.source
	}

	/// Get the default value that was baked into the slots.
	#[inline]
	pub fn default_value(&self) -> &str {
		&self.default_value
	}

	/// Check if nothing was ever precompiled into this template.
	///
	/// Note that precompiling an empty string still yields one (empty) fragment.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.fragments.is_empty()
	}

	/// Get the number of fragments, literal text and slots combined.
	#[inline]
	pub fn len(&self) -> usize {
		self.fragments.len()
	}

	/// Iterate over the fragments, with every slot holding the default value.
	pub fn fragments(&self) -> impl Iterator<Item = &str> + '_ {
		self.fragments.iter().map(|fragment| self.fragment_str(fragment))
	}

	/// Get the fragment indices of all slots for a placeholder name, in order of appearance.
	///
	/// Returns `None` if the name does not appear in the template.
	#[inline]
	pub fn slots(&self, name: &str) -> Option<&[usize]> {
		self.slots.get(name).map(Vec::as_slice)
	}

	/// Iterate over the distinct placeholder names in the template, in no particular order.
	#[inline]
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.slots.keys().map(String::as_str)
	}

	/// Render the template with values from the given map.
	///
	/// Placeholders whose name is not in the map keep the default value.
	/// Names in the map that do not appear in the template are ignored.
	///
	/// You can pass either a [`HashMap`], [`BTreeMap`][std::collections::BTreeMap] or any other [`VariableMap`].
	/// The values must implement [`AsRef<str>`].
	pub fn render_with<'b, M>(&self, variables: &'b M) -> String
	where
		M: VariableMap<'b> + ?Sized,
		M::Value: AsRef<str>,
	{
		self.expand(variables)
	}

	fn fragment_str<'s>(&'s self, fragment: &Fragment) -> &'s str {
		match fragment {
			Fragment::Literal(range) => &self.source[range.clone()],
			Fragment::Slot => &self.default_value,
		}
	}
}
