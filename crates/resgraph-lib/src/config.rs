/// Options controlling how a [`crate::resolution_result::ResolutionResultBuilder`] assembles a graph.
#[derive(Debug, Clone)]
pub struct ResgraphOptions {
	cache_dependency_results: bool,
	warn_on_unknown_variants: bool,
}

impl Default for ResgraphOptions {
	fn default() -> Self {
		Self {
			cache_dependency_results: true,
			warn_on_unknown_variants: true,
		}
	}
}

impl ResgraphOptions {
	/// When set, structurally identical dependency results are stored once.
	pub fn cache_dependency_results(&self) -> bool {
		self.cache_dependency_results
	}
	pub fn set_cache_dependency_results(&mut self, cache_dependency_results: bool) {
		self.cache_dependency_results = cache_dependency_results;
	}

	/// When set, associating an edge with a variant the component does not declare logs a warning.
	pub fn warn_on_unknown_variants(&self) -> bool {
		self.warn_on_unknown_variants
	}
	pub fn set_warn_on_unknown_variants(&mut self, warn_on_unknown_variants: bool) {
		self.warn_on_unknown_variants = warn_on_unknown_variants;
	}
}
