//! Dependency edges and the factory that allocates them.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use super::{ComponentIndex, DependencyIndex, ComponentRegistry};
use crate::model::*;

/// An edge of the resolution graph, either resolved to a component or failed.
///
/// Values are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyResult {
	Resolved(ResolvedDependencyResult),
	Unresolved(UnresolvedDependencyResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedDependencyResult {
	requested: ComponentSelector,
	from: ComponentIndex,
	selected: ComponentIndex,
	selected_variant: Option<ResolvedVariant>,
	constraint: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnresolvedDependencyResult {
	requested: ComponentSelector,
	from: ComponentIndex,
	constraint: bool,
	reason: ComponentSelectionReason,
	failure: ResolveFailure,
}

impl ResolvedDependencyResult {
	pub fn requested(&self) -> &ComponentSelector { &self.requested }
	pub fn from(&self) -> ComponentIndex { self.from }
	pub fn selected(&self) -> ComponentIndex { self.selected }
	pub fn selected_variant(&self) -> Option<&ResolvedVariant> { self.selected_variant.as_ref() }
	pub fn is_constraint(&self) -> bool { self.constraint }
}

impl UnresolvedDependencyResult {
	pub fn requested(&self) -> &ComponentSelector { &self.requested }
	pub fn from(&self) -> ComponentIndex { self.from }
	pub fn is_constraint(&self) -> bool { self.constraint }
	/// Why the failed selection was attempted.
	pub fn reason(&self) -> &ComponentSelectionReason { &self.reason }
	pub fn failure(&self) -> &ResolveFailure { &self.failure }
	/// The selector the failure was raised for, falling back to the requested one.
	pub fn attempted(&self) -> &ComponentSelector {
		self.failure.selector.as_ref().unwrap_or(&self.requested)
	}
}

impl DependencyResult {
	pub fn requested(&self) -> &ComponentSelector {
		match self {
			DependencyResult::Resolved(r) => &r.requested,
			DependencyResult::Unresolved(u) => &u.requested,
		}
	}

	pub fn from(&self) -> ComponentIndex {
		match self {
			DependencyResult::Resolved(r) => r.from,
			DependencyResult::Unresolved(u) => u.from,
		}
	}

	pub fn is_constraint(&self) -> bool {
		match self {
			DependencyResult::Resolved(r) => r.constraint,
			DependencyResult::Unresolved(u) => u.constraint,
		}
	}

	pub fn is_resolved(&self) -> bool {
		matches!(self, DependencyResult::Resolved(_))
	}

	pub fn as_resolved(&self) -> Option<&ResolvedDependencyResult> {
		if let DependencyResult::Resolved(r) = self { Some(r) } else { None }
	}

	pub fn as_unresolved(&self) -> Option<&UnresolvedDependencyResult> {
		if let DependencyResult::Unresolved(u) = self { Some(u) } else { None }
	}
}

/// Allocates dependency results into an arena.
///
/// # Interning
/// A factory created with [`DependencyResultFactory::caching()`] stores structurally identical results once,
/// so visiting the same edge again returns the index of the first allocation. Results are content addressed:
/// bucketed by hash and compared by value. Only value equality is meaningful to callers, two different indices
/// may hold equal values when interning is off.
#[derive(Debug, Default)]
pub struct DependencyResultFactory {
	results: Vec<DependencyResult>,
	pool: Option<HashMap<u64, Vec<DependencyIndex>>>,
}

impl DependencyResultFactory {
	/// A factory that allocates every result.
	pub fn new() -> Self {
		Self::default()
	}

	/// A factory that interns results.
	pub fn caching() -> Self {
		Self {
			results: Default::default(),
			pool: Some(Default::default()),
		}
	}

	pub fn is_caching(&self) -> bool {
		self.pool.is_some()
	}

	/// Creates a resolved edge and records it as a dependent of `to`.
	///
	/// `to` must already be in `registry`.
	pub fn create_resolved(&mut self, registry: &mut ComponentRegistry, requested: ComponentSelector, from: ComponentIndex, to: ComponentIndex, selected_variant: Option<ResolvedVariant>, constraint: bool) -> DependencyIndex {
		let index = self.allocate(DependencyResult::Resolved(ResolvedDependencyResult {
			requested,
			from,
			selected: to,
			selected_variant,
			constraint,
		}));
		registry.add_dependent(from, to, index);
		index
	}

	pub fn create_unresolved(&mut self, requested: ComponentSelector, from: ComponentIndex, constraint: bool, reason: ComponentSelectionReason, failure: ResolveFailure) -> DependencyIndex {
		self.allocate(DependencyResult::Unresolved(UnresolvedDependencyResult {
			requested,
			from,
			constraint,
			reason,
			failure,
		}))
	}

	pub fn get(&self, index: DependencyIndex) -> &DependencyResult {
		&self.results[index.0]
	}

	pub fn len(&self) -> usize {
		self.results.len()
	}

	pub fn is_empty(&self) -> bool {
		self.results.is_empty()
	}

	pub fn into_results(self) -> Vec<DependencyResult> {
		self.results
	}

	fn allocate(&mut self, result: DependencyResult) -> DependencyIndex {
		let Some(pool) = &mut self.pool else {
			self.results.push(result);
			return DependencyIndex(self.results.len() - 1);
		};

		let hash = {
			let mut hasher = std::collections::hash_map::DefaultHasher::new();
			result.hash(&mut hasher);
			hasher.finish()
		};

		let bucket = pool.entry(hash).or_default();
		if let Some(existing) = bucket.iter().find(|i| self.results[i.0] == result) {
			log::debug!("Reusing dependency result {} for {}", existing.0, result.requested());
			return *existing;
		}

		let index = DependencyIndex(self.results.len());
		bucket.push(index);
		self.results.push(result);
		index
	}
}
