//! Records the solver emits, and a serialized stream of them.
//!
//! A [`ResolutionEvents`] is simply those records collected in the order they need to be replayed.
//! It is what the terminal reads; persisting results is otherwise left to callers.

use serde::{Serialize, Deserialize};

use crate::model::*;
use crate::resolution_result::{ResolutionResult, ResolutionResultBuilder};

/// A component the solver selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGraphComponent {
	pub id: ResultId,
	pub module_version: ModuleVersionIdentifier,
	#[serde(default = "ComponentSelectionReason::requested")]
	pub selection_reason: ComponentSelectionReason,
	pub component_id: ComponentIdentifier,
	#[serde(default)]
	pub variants: Vec<ResolvedVariant>,
	#[serde(default)]
	pub repository_name: Option<String>,
}

impl ResolvedGraphComponent {
	/// A requested component with no variants and no repository.
	pub fn new(id: ResultId, module_version: ModuleVersionIdentifier, component_id: ComponentIdentifier) -> Self {
		Self {
			id,
			module_version,
			selection_reason: ComponentSelectionReason::requested(),
			component_id,
			variants: Default::default(),
			repository_name: None,
		}
	}

	pub fn with_selection_reason(mut self, reason: ComponentSelectionReason) -> Self {
		self.selection_reason = reason;
		self
	}

	pub fn with_variant(mut self, variant: ResolvedVariant) -> Self {
		self.variants.push(variant);
		self
	}

	pub fn with_repository(mut self, repository_name: impl Into<String>) -> Self {
		self.repository_name = Some(repository_name.into());
		self
	}
}

/// One outgoing edge of a component.
///
/// Exactly one of `selected` and `failure` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGraphDependency {
	pub requested: ComponentSelector,
	#[serde(default)]
	pub selected: Option<ResultId>,
	#[serde(default)]
	pub selected_variant: Option<ResolvedVariant>,
	/// The variant of the source component this edge belongs to.
	#[serde(default)]
	pub from_variant: Option<ResolvedVariant>,
	#[serde(default)]
	pub constraint: bool,
	#[serde(default = "ComponentSelectionReason::requested")]
	pub reason: ComponentSelectionReason,
	#[serde(default)]
	pub failure: Option<ResolveFailure>,
}

impl ResolvedGraphDependency {
	pub fn resolved(requested: ComponentSelector, selected: ResultId) -> Self {
		Self {
			requested,
			selected: Some(selected),
			selected_variant: None,
			from_variant: None,
			constraint: false,
			reason: ComponentSelectionReason::requested(),
			failure: None,
		}
	}

	pub fn failed(requested: ComponentSelector, failure: ResolveFailure) -> Self {
		Self {
			requested,
			selected: None,
			selected_variant: None,
			from_variant: None,
			constraint: false,
			reason: ComponentSelectionReason::requested(),
			failure: Some(failure),
		}
	}

	pub fn as_constraint(mut self) -> Self {
		self.constraint = true;
		self
	}

	pub fn with_selected_variant(mut self, variant: ResolvedVariant) -> Self {
		self.selected_variant = Some(variant);
		self
	}

	pub fn with_from_variant(mut self, variant: ResolvedVariant) -> Self {
		self.from_variant = Some(variant);
		self
	}

	pub fn with_reason(mut self, reason: ComponentSelectionReason) -> Self {
		self.reason = reason;
		self
	}
}

/// A late discovered failure, such as a lock file entry that no longer matches the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedDependency {
	pub selector: ModuleVersionSelector,
	pub problem: ResolveFailure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingEdges {
	pub from: ResultId,
	pub dependencies: Vec<ResolvedGraphDependency>,
}

/// Everything needed to rebuild one [`ResolutionResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionEvents {
	pub root: ResultId,
	#[serde(default)]
	pub requested_attributes: AttributeContainer,
	pub components: Vec<ResolvedGraphComponent>,
	#[serde(default)]
	pub edges: Vec<OutgoingEdges>,
	#[serde(default)]
	pub extra_failures: Vec<UnresolvedDependency>,
}

impl ResolutionEvents {
	pub fn from_json_reader(reader: impl std::io::Read) -> crate::Result<Self> {
		Ok(serde_json::from_reader(reader)?)
	}

	pub fn to_json_writer(&self, writer: impl std::io::Write) -> crate::Result<()> {
		Ok(serde_json::to_writer_pretty(writer, self)?)
	}

	/// Feeds every record to a new builder: components, then edges, then extra failures.
	pub fn replay(self, options: &crate::ResgraphOptions) -> crate::Result<ResolutionResult> {
		let mut builder = ResolutionResultBuilder::with_options(options);
		builder.set_requested_attributes(self.requested_attributes);
		for c in self.components {
			builder.visit_component(c)?;
		}
		for e in self.edges {
			builder.visit_outgoing_edges(e.from, e.dependencies)?;
		}
		if !self.extra_failures.is_empty() {
			builder.add_extra_failures(self.root, self.extra_failures)?;
		}
		builder.complete(self.root)
	}
}
