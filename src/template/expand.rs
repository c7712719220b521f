use super::Template;
use crate::VariableMap;

impl Template {
	/// Fill the slots from the variable map and concatenate all fragments.
	pub(super) fn expand<'b, M>(&self, variables: &'b M) -> String
	where
		M: VariableMap<'b> + ?Sized,
		M::Value: AsRef<str>,
	{
		// Look up every name once, and keep the values alive while the fragments borrow them.
		let values: Vec<(&[usize], M::Value)> = self
			.slots
			.iter()
			.filter_map(|(name, slots)| Some((slots.as_slice(), variables.get(name)?)))
			.collect();

		// Working copy of the model, with every slot still pointing at the default value.
		let mut parts: Vec<&str> = self.fragments().collect();
		for (slots, value) in &values {
			for &index in *slots {
				parts[index] = value.as_ref();
			}
		}

		parts.concat()
	}
}
