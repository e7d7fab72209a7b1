//! The finished, read-only resolution graph.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use petgraph::visit::Dfs;

use super::*;
use crate::model::*;

#[derive(Debug)]
struct ResolvedGraph {
	registry: ComponentRegistry,
	dependencies: Vec<DependencyResult>,
	root: ComponentIndex,
	requested_attributes: AttributeContainer,
	/* Filled on first access */
	all_components: OnceLock<Vec<ComponentIndex>>,
	all_dependencies: OnceLock<Vec<DependencyIndex>>,
}

/// A completed resolution.
///
/// Cloning is cheap and clones share the graph. Nothing reachable from here can mutate it,
/// so a result can be read from several threads at once.
#[derive(Debug, Clone)]
pub struct ResolutionResult {
	inner: Arc<ResolvedGraph>,
}

impl ResolutionResult {
	pub(super) fn new(registry: ComponentRegistry, dependencies: Vec<DependencyResult>, root: ComponentIndex, requested_attributes: AttributeContainer) -> Self {
		Self {
			inner: Arc::new(ResolvedGraph {
				registry,
				dependencies,
				root,
				requested_attributes,
				all_components: OnceLock::new(),
				all_dependencies: OnceLock::new(),
			}),
		}
	}

	pub fn root(&self) -> ResolvedComponentResult<'_> {
		ResolvedComponentResult { graph: &self.inner, index: self.inner.root }
	}

	/// Looks up any component of the run by its solver id, reachable from the root or not.
	pub fn component(&self, id: ResultId) -> Option<ResolvedComponentResult<'_>> {
		let index = self.inner.registry.lookup(id)?;
		Some(ResolvedComponentResult { graph: &self.inner, index })
	}

	pub fn requested_attributes(&self) -> &AttributeContainer {
		&self.inner.requested_attributes
	}

	/// Number of components visited during the run.
	pub fn component_count(&self) -> usize {
		self.inner.registry.len()
	}

	/// Every component reachable from the root, root first, depth first.
	///
	/// Computed on first call.
	pub fn all_components(&self) -> Vec<ResolvedComponentResult<'_>> {
		let indices = self.inner.all_components.get_or_init(|| {
			log::debug!("Collecting components reachable from the root");
			let graph = self.inner.registry.graph();
			let mut dfs = Dfs::new(graph, self.inner.root.0);
			let mut found = Vec::new();
			while let Some(n) = dfs.next(graph) {
				found.push(ComponentIndex(n));
			}
			found
		});
		indices.iter().map(|i| ResolvedComponentResult { graph: &self.inner, index: *i }).collect()
	}

	/// Every dependency result of every component reachable from the root.
	///
	/// Computed on first call.
	pub fn all_dependencies(&self) -> Vec<DependencyResultRef<'_>> {
		let indices = self.inner.all_dependencies.get_or_init(|| {
			let mut seen = HashSet::new();
			let mut found = Vec::new();
			for c in self.all_components() {
				for d in &self.inner.registry.component(c.index).dependencies {
					if seen.insert(*d) {
						found.push(*d);
					}
				}
			}
			found
		});
		indices.iter().map(|i| DependencyResultRef { graph: &self.inner, index: *i }).collect()
	}

	/// Reachable dependencies that failed to resolve, including lock state failures.
	pub fn unresolved_dependencies(&self) -> Vec<DependencyResultRef<'_>> {
		self.all_dependencies().into_iter().filter(|d| !d.is_resolved()).collect()
	}

	/// Only the failures injected because the dependency lock state is out of date.
	pub fn lock_state_failures(&self) -> Vec<DependencyResultRef<'_>> {
		self.unresolved_dependencies().into_iter()
			.filter(|d| d.selection_reason().is_some_and(|r| r.is_dependency_locking()))
			.collect()
	}
}

/// A component of a [`ResolutionResult`].
#[derive(Clone, Copy)]
pub struct ResolvedComponentResult<'a> {
	graph: &'a ResolvedGraph,
	index: ComponentIndex,
}

impl<'a> ResolvedComponentResult<'a> {
	fn data(&self) -> &'a ResolvedComponent {
		self.graph.registry.component(self.index)
	}

	fn refs(&self, indices: impl IntoIterator<Item = DependencyIndex>) -> Vec<DependencyResultRef<'a>> {
		indices.into_iter().map(|index| DependencyResultRef { graph: self.graph, index }).collect()
	}

	pub fn index(&self) -> ComponentIndex {
		self.index
	}

	pub fn id(&self) -> ResultId {
		self.data().id
	}

	pub fn module_version(&self) -> &'a ModuleVersionIdentifier {
		&self.data().module_version
	}

	pub fn selection_reason(&self) -> &'a ComponentSelectionReason {
		&self.data().selection_reason
	}

	pub fn component_id(&self) -> &'a ComponentIdentifier {
		&self.data().component_id
	}

	pub fn variants(&self) -> &'a [ResolvedVariant] {
		&self.data().variants
	}

	pub fn repository_name(&self) -> Option<&'a str> {
		self.data().repository_name.as_deref()
	}

	/// Outgoing edges in the order they were visited.
	pub fn dependencies(&self) -> Vec<DependencyResultRef<'a>> {
		self.refs(self.data().dependencies.iter().copied())
	}

	/// Outgoing edges that were reported for `variant` of this component.
	pub fn dependencies_for_variant(&self, variant: &ResolvedVariant) -> Vec<DependencyResultRef<'a>> {
		match self.data().variant_dependencies.get(variant) {
			Some(d) => self.refs(d.iter().copied()),
			None => Vec::new(),
		}
	}

	/// Resolved edges selecting this component.
	pub fn dependents(&self) -> Vec<DependencyResultRef<'a>> {
		self.refs(self.graph.registry.dependents(self.index))
	}
}

impl PartialEq for ResolvedComponentResult<'_> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.graph, other.graph) && self.index == other.index
	}
}

impl Eq for ResolvedComponentResult<'_> {}

impl std::fmt::Debug for ResolvedComponentResult<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResolvedComponentResult")
			.field("id", &self.id())
			.field("module_version", self.module_version())
			.finish()
	}
}

impl std::fmt::Display for ResolvedComponentResult<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.component_id())
	}
}

/// An edge of a [`ResolutionResult`].
#[derive(Clone, Copy)]
pub struct DependencyResultRef<'a> {
	graph: &'a ResolvedGraph,
	index: DependencyIndex,
}

impl<'a> DependencyResultRef<'a> {
	fn component(&self, index: ComponentIndex) -> ResolvedComponentResult<'a> {
		ResolvedComponentResult { graph: self.graph, index }
	}

	pub fn index(&self) -> DependencyIndex {
		self.index
	}

	pub fn value(&self) -> &'a DependencyResult {
		&self.graph.dependencies[self.index.0]
	}

	pub fn is_resolved(&self) -> bool {
		self.value().is_resolved()
	}

	pub fn requested(&self) -> &'a ComponentSelector {
		self.value().requested()
	}

	pub fn is_constraint(&self) -> bool {
		self.value().is_constraint()
	}

	pub fn from(&self) -> ResolvedComponentResult<'a> {
		self.component(self.value().from())
	}

	/// `None` for unresolved edges.
	pub fn selected(&self) -> Option<ResolvedComponentResult<'a>> {
		self.value().as_resolved().map(|r| self.component(r.selected()))
	}

	pub fn selected_variant(&self) -> Option<&'a ResolvedVariant> {
		self.value().as_resolved().and_then(|r| r.selected_variant())
	}

	/// `None` for resolved edges.
	pub fn selection_reason(&self) -> Option<&'a ComponentSelectionReason> {
		self.value().as_unresolved().map(|u| u.reason())
	}

	/// `None` for resolved edges.
	pub fn failure(&self) -> Option<&'a ResolveFailure> {
		self.value().as_unresolved().map(|u| u.failure())
	}
}

impl PartialEq for DependencyResultRef<'_> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.graph, other.graph) && self.index == other.index
	}
}

impl Eq for DependencyResultRef<'_> {}

impl std::fmt::Debug for DependencyResultRef<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DependencyResultRef")
			.field("index", &self.index)
			.field("value", self.value())
			.finish()
	}
}

impl std::fmt::Display for DependencyResultRef<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.selected() {
			Some(selected) => write!(f, "{} -> {}", self.requested(), selected.module_version()),
			None => write!(f, "{} FAILED", self.requested()),
		}
	}
}
