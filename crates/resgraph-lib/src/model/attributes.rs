use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

/// A set of named attributes, kept sorted so equal sets hash equally.
///
/// Values are opaque strings. Nothing in this crate interprets them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeContainer(BTreeMap<String, String>);

impl AttributeContainer {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl std::fmt::Display for AttributeContainer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{{")?;
		for (i, (k, v)) in self.0.iter().enumerate() {
			if i > 0 { write!(f, ", ")?; }
			write!(f, "{}={}", k, v)?;
		}
		write!(f, "}}")
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeContainer {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
