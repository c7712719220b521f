use std::collections::HashMap;

use super::{Fragment, Template};
use crate::pattern::Matcher;

impl Template {
	/// Precompile the template in a single scan of the source.
	pub(super) fn parse(matcher: &Matcher, source: String, default_value: String) -> Self {
		let mut fragments = Vec::new();
		let mut slots: HashMap<String, Vec<usize>> = HashMap::new();
		let mut finger = 0;

		for found in matcher.find_iter(&source) {
			fragments.push(Fragment::Literal(finger..found.start()));

			if found.is_escaped() {
				// Escaped placeholders are resolved now, by dropping the escape character.
				fragments.push(Fragment::Literal(found.start() + 1..found.end()));
			} else {
				fragments.push(Fragment::Slot);
				slots.entry(found.name().to_owned()).or_default().push(fragments.len() - 1);
			}

			finger = found.end();
		}

		fragments.push(Fragment::Literal(finger..source.len()));

		log::trace!(
			"precompiled template of {} bytes into {} fragments with {} distinct names",
			source.len(),
			fragments.len(),
			slots.len(),
		);

		Self {
			source,
			fragments,
			default_value,
			slots,
		}
	}
}
