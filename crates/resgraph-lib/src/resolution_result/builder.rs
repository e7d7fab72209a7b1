use super::*;
use crate::events::{ResolvedGraphComponent, ResolvedGraphDependency, UnresolvedDependency};
use crate::model::*;
use crate::{Error, Result, ResgraphOptions};

/// Failure message of edges added by [`ResolutionResultBuilder::add_extra_failures()`].
pub const LOCK_STATE_OUT_OF_DATE: &str = "Dependency lock state out of date";

/// Builds a [`ResolutionResult`] from solver events.
///
/// Calls for one run must not be interleaved from several threads; use one builder per run.
/// See the [module documentation](super) for the required call order.
#[derive(Debug)]
pub struct ResolutionResultBuilder {
	registry: ComponentRegistry,
	dependency_results: DependencyResultFactory,
	requested_attributes: AttributeContainer,
	options: ResgraphOptions,
	/// Set once a fatal error occurred.
	poisoned: bool,
}

impl Default for ResolutionResultBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ResolutionResultBuilder {
	pub fn new() -> Self {
		Self::with_options(&ResgraphOptions::default())
	}

	pub fn with_options(options: &ResgraphOptions) -> Self {
		Self {
			registry: Default::default(),
			dependency_results: if options.cache_dependency_results() { DependencyResultFactory::caching() } else { DependencyResultFactory::new() },
			requested_attributes: Default::default(),
			options: options.clone(),
			poisoned: false,
		}
	}

	/// A result for a root with no dependencies, e.g. a module that declares none.
	///
	/// The root is selected for the "root" reason and has no variants or repository.
	pub fn empty(root: ResultId, module_version: ModuleVersionIdentifier, component_id: ComponentIdentifier, attributes: AttributeContainer) -> ResolutionResult {
		let mut builder = Self::new();
		builder.set_requested_attributes(attributes);
		let mut component = ResolvedGraphComponent::new(root, module_version, component_id);
		component.selection_reason = ComponentSelectionReason::root();
		let root = builder.registry.get_or_create(component);
		builder.finish(root)
	}

	/// The attributes the resolution was performed with. Stored for consumers, never interpreted.
	pub fn set_requested_attributes(&mut self, attributes: AttributeContainer) {
		self.requested_attributes = attributes;
	}

	/// Registers a selected component. Visiting an id again has no effect.
	pub fn visit_component(&mut self, component: ResolvedGraphComponent) -> Result<()> {
		self.check_usable()?;
		self.registry.get_or_create(component);
		Ok(())
	}

	/// Adds the outgoing edges of `from`.
	///
	/// # Errors
	/// All of these are fatal and leave the builder unusable.
	/// - [`Error::UnknownComponent`] if `from` was never visited.
	/// - [`Error::CorruptResult`] if an edge selects a component that was never visited.
	/// - [`Error::InvalidDependency`] if an edge has both or neither of a selection and a failure.
	pub fn visit_outgoing_edges(&mut self, from: ResultId, dependencies: impl IntoIterator<Item = ResolvedGraphDependency>) -> Result<()> {
		self.check_usable()?;
		let from_index = match self.registry.lookup(from) {
			Some(i) => i,
			None => return Err(self.poison(Error::UnknownComponent(from))),
		};

		for d in dependencies {
			log::trace!("Visiting edge {} -> {}", from, d.requested);
			let index = match (d.selected, d.failure) {
				(None, Some(failure)) => {
					self.dependency_results.create_unresolved(d.requested, from_index, d.constraint, d.reason, failure)
				},
				(Some(selected), None) => {
					let Some(selected_index) = self.registry.lookup(selected) else {
						return Err(self.poison(Error::CorruptResult {
							selected,
							from,
							from_variant: d.from_variant.map(|v| v.display_name),
							requested: d.requested.to_string(),
							constraint: d.constraint,
						}));
					};
					self.dependency_results.create_resolved(&mut self.registry, d.requested, from_index, selected_index, d.selected_variant, d.constraint)
				},
				_ => {
					return Err(self.poison(Error::InvalidDependency { from, requested: d.requested.to_string() }));
				},
			};

			self.registry.add_dependency(from_index, index);
			if let Some(variant) = d.from_variant {
				let variant_name = variant.display_name.clone();
				if !self.registry.associate_dependency_to_variant(from_index, variant, index) && self.options.warn_on_unknown_variants() {
					log::warn!("Component {} does not declare variant {}", from, variant_name);
				}
			}
		}

		Ok(())
	}

	/// Adds an unresolved constraint edge to the root for every failure.
	///
	/// These report lock state that no longer matches the graph. They all carry the dependency locking
	/// selection reason so they can be told apart from genuine resolution failures.
	pub fn add_extra_failures(&mut self, root: ResultId, failures: impl IntoIterator<Item = UnresolvedDependency>) -> Result<()> {
		self.check_usable()?;
		let root_index = match self.registry.lookup(root) {
			Some(i) => i,
			None => return Err(self.poison(Error::UnknownComponent(root))),
		};

		for f in failures {
			let requested = ComponentSelector::Module(ModuleComponentSelector::from(&f.selector));
			log::debug!("Adding lock state failure for {}", requested);
			let failure = ResolveFailure::new(LOCK_STATE_OUT_OF_DATE)
				.with_selector(requested.clone())
				.with_cause(f.problem);
			let index = self.dependency_results.create_unresolved(requested, root_index, true, ComponentSelectionReason::dependency_locking(), failure);
			self.registry.add_dependency(root_index, index);
		}

		Ok(())
	}

	/// Finishes assembly and returns the graph rooted at `root`.
	pub fn complete(self, root: ResultId) -> Result<ResolutionResult> {
		self.check_usable()?;
		let root_index = self.registry.lookup(root).ok_or(Error::UnknownComponent(root))?;
		Ok(self.finish(root_index))
	}

	fn finish(self, root: ComponentIndex) -> ResolutionResult {
		log::info!("Completed resolution result with {} components and {} dependency results", self.registry.len(), self.dependency_results.len());
		ResolutionResult::new(self.registry, self.dependency_results.into_results(), root, self.requested_attributes)
	}

	fn check_usable(&self) -> Result<()> {
		if self.poisoned { Err(Error::Poisoned) } else { Ok(()) }
	}

	fn poison(&mut self, error: Error) -> Error {
		log::warn!("Abandoning resolution result: {}", error);
		self.poisoned = true;
		error
	}
}
