//! Library error type.
//!
//! Only fatal conditions live here. A dependency that failed to resolve is not an error,
//! it is an [`crate::resolution_result::UnresolvedDependencyResult`] inside the graph.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::model::ResultId;

#[derive(Debug, Error)]
pub enum Error {
	/// An edge selected a component that was never visited.
	#[error("corrupt serialized resolution result. cannot find selected module ({selected}) for {}{from}{} -> {requested}", constraint_prefix(.constraint), variant_suffix(.from_variant))]
	CorruptResult {
		selected: ResultId,
		from: ResultId,
		/// Display name of the variant the edge was reported for, if any.
		from_variant: Option<String>,
		requested: String,
		constraint: bool,
	},
	/// An id used as an edge source or as the root was never visited.
	#[error("component ({0}) has not been visited")]
	UnknownComponent(ResultId),
	/// An edge record must carry exactly one of a selected id or a failure.
	#[error("dependency {from} -> {requested} must have exactly one of a selected component or a failure")]
	InvalidDependency {
		from: ResultId,
		requested: String,
	},
	/// A previous call failed fatally, the run has to be abandoned.
	#[error("resolution result builder is unusable after an earlier fatal error")]
	Poisoned,
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
}

fn constraint_prefix(constraint: &bool) -> &'static str {
	if *constraint { "constraint " } else { "" }
}

fn variant_suffix(variant: &Option<String>) -> String {
	variant.as_ref().map(|v| format!(" ({v})")).unwrap_or_default()
}

impl Error {
	/// Fatal errors poison the builder they were raised from.
	pub fn is_fatal(&self) -> bool {
		matches!(self, Error::CorruptResult { .. } | Error::UnknownComponent(_) | Error::InvalidDependency { .. } | Error::Poisoned)
	}
}
