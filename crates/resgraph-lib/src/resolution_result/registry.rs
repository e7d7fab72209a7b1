//! Deduplicated store of the components of one resolution run.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use petgraph::prelude::*;

use super::{ComponentIndex, DependencyIndex};
use crate::events::ResolvedGraphComponent;
use crate::model::*;

/// A selected component and the edges leaving it.
///
/// Resolved edges are additionally stored as graph edges `from -> selected` weighted by their [`DependencyIndex`],
/// that is where dependents are read from.
#[derive(Debug, Clone)]
pub struct ResolvedComponent {
	pub(super) id: ResultId,
	pub(super) module_version: ModuleVersionIdentifier,
	pub(super) selection_reason: ComponentSelectionReason,
	pub(super) component_id: ComponentIdentifier,
	pub(super) variants: Vec<ResolvedVariant>,
	pub(super) repository_name: Option<String>,
	/// Outgoing edges in the order they were added.
	pub(super) dependencies: IndexSet<DependencyIndex>,
	pub(super) variant_dependencies: HashMap<ResolvedVariant, IndexSet<DependencyIndex>>,
}

impl From<ResolvedGraphComponent> for ResolvedComponent {
	fn from(c: ResolvedGraphComponent) -> Self {
		Self {
			id: c.id,
			module_version: c.module_version,
			selection_reason: c.selection_reason,
			component_id: c.component_id,
			variants: c.variants,
			repository_name: c.repository_name,
			dependencies: Default::default(),
			variant_dependencies: Default::default(),
		}
	}
}

/// Maps solver ids to components.
///
/// Entries are never removed, the registry lives exactly as long as the graph it belongs to.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
	graph: DiGraph<ResolvedComponent, DependencyIndex>,
	ids: HashMap<ResultId, ComponentIndex>,
	/* Resolved results already stored as graph edges */
	linked: HashSet<DependencyIndex>,
}

impl ComponentRegistry {
	/// Returns the component for `component.id`, creating it if this is the first visit.
	///
	/// The first visit wins, the payload of any later visit is discarded.
	pub fn get_or_create(&mut self, component: ResolvedGraphComponent) -> ComponentIndex {
		if let Some(existing) = self.ids.get(&component.id) {
			log::trace!("Component {} already visited, discarding {}", component.id, component.module_version);
			return *existing;
		}

		let id = component.id;
		log::trace!("Adding component {} ({})", id, component.module_version);
		let index = ComponentIndex(self.graph.add_node(component.into()));
		self.ids.insert(id, index);
		index
	}

	pub fn lookup(&self, id: ResultId) -> Option<ComponentIndex> {
		self.ids.get(&id).copied()
	}

	pub fn component(&self, index: ComponentIndex) -> &ResolvedComponent {
		&self.graph[index.0]
	}

	pub fn len(&self) -> usize {
		self.graph.node_count()
	}

	pub fn is_empty(&self) -> bool {
		self.graph.node_count() == 0
	}

	/// Incoming resolved edges of `index`, oldest first.
	pub fn dependents(&self, index: ComponentIndex) -> Vec<DependencyIndex> {
		let mut dependents: Vec<_> = self.graph.edges_directed(index.0, Incoming).map(|e| *e.weight()).collect();
		/* petgraph iterates newest first */
		dependents.sort();
		dependents
	}

	pub(super) fn graph(&self) -> &DiGraph<ResolvedComponent, DependencyIndex> {
		&self.graph
	}

	/// Appends to the outgoing list of `from` unless it's already there.
	pub(super) fn add_dependency(&mut self, from: ComponentIndex, dependency: DependencyIndex) {
		self.graph[from.0].dependencies.insert(dependency);
	}

	/// Returns false if `from` does not declare `variant`. The association is made regardless.
	pub(super) fn associate_dependency_to_variant(&mut self, from: ComponentIndex, variant: ResolvedVariant, dependency: DependencyIndex) -> bool {
		let component = &mut self.graph[from.0];
		let known = component.variants.contains(&variant);
		component.variant_dependencies.entry(variant).or_default().insert(dependency);
		known
	}

	/// Records `dependency` as an incoming reference on `to`.
	///
	/// A dependency result always connects the same pair of components, so recording it again is a no-op.
	pub(super) fn add_dependent(&mut self, from: ComponentIndex, to: ComponentIndex, dependency: DependencyIndex) {
		if self.linked.insert(dependency) {
			self.graph.add_edge(from.0, to.0, dependency);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(id: u64, name: &str) -> ResolvedGraphComponent {
		ResolvedGraphComponent::new(ResultId(id), ModuleVersionIdentifier::new("org", name, "1.0"), ComponentIdentifier::Module(ModuleComponentIdentifier::new("org", name, "1.0")))
	}

	#[test]
	fn first_visit_wins() {
		let mut registry = ComponentRegistry::default();
		let a = registry.get_or_create(record(1, "a"));
		let again = registry.get_or_create(record(1, "b"));

		assert_eq!(a, again);
		assert_eq!(registry.len(), 1);
		assert_eq!(registry.component(a).module_version.name, "a");
	}

	#[test]
	fn lookup_does_not_create() {
		let mut registry = ComponentRegistry::default();
		assert!(registry.lookup(ResultId(7)).is_none());
		assert!(registry.is_empty());

		let i = registry.get_or_create(record(7, "a"));
		assert_eq!(registry.lookup(ResultId(7)), Some(i));
		assert_eq!(registry.lookup(ResultId(7)), registry.lookup(ResultId(7)));
	}

	#[test]
	fn dependents_are_idempotent_and_ordered() {
		let mut registry = ComponentRegistry::default();
		let a = registry.get_or_create(record(1, "a"));
		let b = registry.get_or_create(record(2, "b"));
		let c = registry.get_or_create(record(3, "c"));

		registry.add_dependent(a, c, DependencyIndex(0));
		registry.add_dependent(b, c, DependencyIndex(1));
		registry.add_dependent(a, c, DependencyIndex(0));

		assert_eq!(registry.dependents(c), vec![DependencyIndex(0), DependencyIndex(1)]);
		assert!(registry.dependents(a).is_empty());
	}

	#[test]
	fn outgoing_list_has_no_duplicates() {
		let mut registry = ComponentRegistry::default();
		let a = registry.get_or_create(record(1, "a"));
		registry.add_dependency(a, DependencyIndex(3));
		registry.add_dependency(a, DependencyIndex(1));
		registry.add_dependency(a, DependencyIndex(3));
		assert_eq!(registry.component(a).dependencies.iter().copied().collect::<Vec<_>>(), vec![DependencyIndex(3), DependencyIndex(1)]);
	}

	#[test]
	fn wide_fanout_keeps_order() {
		let mut registry = ComponentRegistry::default();
		let root = registry.get_or_create(record(0, "root"));
		let target = registry.get_or_create(record(1, "a"));
		let variant = ResolvedVariant::new("runtime");

		let count = 50_000;
		for i in (0..count).rev() {
			registry.add_dependency(root, DependencyIndex(i));
			registry.associate_dependency_to_variant(root, variant.clone(), DependencyIndex(i));
			registry.add_dependent(root, target, DependencyIndex(i));
		}
		/* Repeats change nothing */
		registry.add_dependency(root, DependencyIndex(0));
		registry.add_dependent(root, target, DependencyIndex(0));

		let outgoing = &registry.component(root).dependencies;
		assert_eq!(outgoing.len(), count);
		assert_eq!(outgoing.first(), Some(&DependencyIndex(count - 1)));
		assert_eq!(outgoing.last(), Some(&DependencyIndex(0)));
		assert_eq!(registry.component(root).variant_dependencies[&variant].len(), count);
		assert_eq!(registry.dependents(target).len(), count);
	}
}
