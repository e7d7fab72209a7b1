//! Various helper functions for testing
//!
//! Fixtures describe small graphs the way the solver would report them.
//! Functions here panic on bad input, they are only meant to be called with literals.

use std::io::Write;

use resgraph::events::*;
use resgraph::model::*;

/// Initialises logging once per test binary. Safe to call from every test.
pub fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// Parses `group:module:version` notation.
pub fn selector(notation: &str) -> ComponentSelector {
	ComponentSelector::module(notation).expect("invalid selector notation in test")
}

/// A module component selected because it was requested.
pub fn module(id: u64, group: &str, name: &str, version: &str) -> ResolvedGraphComponent {
	ResolvedGraphComponent::new(
		ResultId(id),
		ModuleVersionIdentifier::new(group, name, version),
		ComponentIdentifier::Module(ModuleComponentIdentifier::new(group, name, version)),
	).with_repository("central")
}

/// The root project component.
pub fn root(id: u64) -> ResolvedGraphComponent {
	ResolvedGraphComponent::new(
		ResultId(id),
		ModuleVersionIdentifier::new("com.example", "app", "unspecified"),
		ComponentIdentifier::Project { build: ":".into(), path: ":app".into() },
	).with_selection_reason(ComponentSelectionReason::root())
}

pub fn resolved(notation: &str, selected: u64) -> ResolvedGraphDependency {
	ResolvedGraphDependency::resolved(selector(notation), ResultId(selected))
}

pub fn failed(notation: &str, message: &str) -> ResolvedGraphDependency {
	let requested = selector(notation);
	ResolvedGraphDependency::failed(requested.clone(), ResolveFailure::new(message).with_selector(requested))
}

pub fn lock_failure(group: &str, name: &str, version: &str) -> UnresolvedDependency {
	UnresolvedDependency {
		selector: ModuleVersionSelector { group: group.into(), name: name.into(), version: Some(version.into()) },
		problem: ResolveFailure::new(format!("Did not resolve '{}:{}:{}' which is part of the dependency lock state", group, name, version)),
	}
}

/// `root(1) -> a(2) -> b(3)` plus `root(1) -> b(3)` and a failed `root -> com.x:missing:1.0`.
pub fn chain_events() -> ResolutionEvents {
	ResolutionEvents {
		root: ResultId(1),
		requested_attributes: AttributeContainer::empty().with("org.gradle.usage", "java-runtime"),
		components: vec![
			root(1),
			module(2, "com.x", "a", "1.0"),
			module(3, "com.x", "b", "2.0"),
		],
		edges: vec![
			OutgoingEdges {
				from: ResultId(1),
				dependencies: vec![
					resolved("com.x:a:1.0", 2),
					resolved("com.x:b:2.0", 3),
					failed("com.x:missing:1.0", "Could not find com.x:missing:1.0."),
				],
			},
			OutgoingEdges {
				from: ResultId(2),
				dependencies: vec![resolved("com.x:b:1.5", 3)],
			},
		],
		extra_failures: vec![],
	}
}

/// Writes `events` as JSON to a temporary file that lives as long as the returned handle.
pub fn write_events(events: &ResolutionEvents) -> tempfile::NamedTempFile {
	let mut f = tempfile::NamedTempFile::new().expect("failed to create temporary file");
	let json = serde_json::to_vec_pretty(events).expect("failed to serialize events");
	f.write_all(&json).expect("failed to write events");
	f
}
