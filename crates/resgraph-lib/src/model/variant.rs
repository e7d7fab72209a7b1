use serde::{Serialize, Deserialize};

use super::AttributeContainer;
use crate::capability::Capability;

/// A named, attribute tagged subset of a component, e.g. its compile or runtime view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedVariant {
	pub display_name: String,
	#[serde(default)]
	pub attributes: AttributeContainer,
	#[serde(default)]
	pub capabilities: Vec<Capability>,
}

impl ResolvedVariant {
	pub fn new(display_name: impl Into<String>) -> Self {
		Self {
			display_name: display_name.into(),
			attributes: Default::default(),
			capabilities: Default::default(),
		}
	}

	pub fn with_attributes(mut self, attributes: AttributeContainer) -> Self {
		self.attributes = attributes;
		self
	}

	pub fn with_capability(mut self, capability: impl Into<Capability>) -> Self {
		self.capabilities.push(capability.into());
		self
	}
}

impl std::fmt::Display for ResolvedVariant {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.display_name)
	}
}
