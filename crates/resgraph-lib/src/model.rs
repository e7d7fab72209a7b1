//! Identity and value types shared by the resolution result graph.
//!
//! These are the shapes the external solver speaks in. None of them carry any graph state.

use serde::{Serialize, Deserialize};

pub mod identifier;
pub use identifier::*;
pub mod selector;
pub use selector::*;
pub mod attributes;
pub use attributes::*;
pub mod selection_reason;
pub use selection_reason::*;
pub mod variant;
pub use variant::*;
pub mod failure;
pub use failure::*;

/// Opaque id assigned to a component by the solver.
///
/// Unique within one resolution run and meaningless outside of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(pub u64);

impl std::fmt::Display for ResultId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<u64> for ResultId {
	fn from(value: u64) -> Self {
		Self(value)
	}
}
