use serde::{Serialize, Deserialize};

use super::ComponentSelector;

/// Why a requested dependency could not be resolved.
///
/// This is data, not a fatal error. It travels inside the graph as part of an unresolved edge
/// and can be chained to an underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ResolveFailure {
	#[serde(default)]
	pub selector: Option<ComponentSelector>,
	pub message: String,
	#[serde(default)]
	#[source]
	pub cause: Option<Box<ResolveFailure>>,
}

impl ResolveFailure {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			selector: None,
			message: message.into(),
			cause: None,
		}
	}

	/// The default "could not resolve" failure for a selector.
	pub fn for_selector(selector: ComponentSelector) -> Self {
		let message = format!("Could not resolve {}.", selector);
		Self { selector: Some(selector), message, cause: None }
	}

	pub fn with_selector(mut self, selector: ComponentSelector) -> Self {
		self.selector = Some(selector);
		self
	}

	pub fn with_cause(mut self, cause: ResolveFailure) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}

	/// Iterates this failure followed by each of its causes.
	pub fn chain(&self) -> impl Iterator<Item = &ResolveFailure> {
		std::iter::successors(Some(self), |f| f.cause.as_deref())
	}
}
