use resgraph::events::*;
use resgraph::model::*;
use resgraph::{Error, ResgraphOptions, ResolutionResultBuilder};
use resgraph_test_utils::*;

#[test]
fn single_edge_round_trip() {
	init_logging();
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2)]).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	let deps = result.root().dependencies();
	assert_eq!(deps.len(), 1);
	let edge = deps[0];
	assert!(edge.is_resolved());
	assert!(!edge.is_constraint());
	assert_eq!(edge.requested().to_string(), "com.x:a:1.0");

	let a = result.component(ResultId(2)).unwrap();
	assert_eq!(edge.selected(), Some(a));
	assert_eq!(edge.from(), result.root());

	let dependents = a.dependents();
	assert_eq!(dependents.len(), 1);
	assert_eq!(dependents[0], edge);
}

#[test]
fn edge_symmetry() {
	init_logging();
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();
	builder.visit_component(module(3, "com.x", "b", "1.0")).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2), resolved("com.x:b:1.0", 3)]).unwrap();
	builder.visit_outgoing_edges(ResultId(2), vec![resolved("com.x:b:0.9", 3)]).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	/* Every resolved edge is found again among the dependents of its target */
	for component in result.all_components() {
		for edge in component.dependencies() {
			let selected = edge.selected().unwrap();
			assert!(selected.dependents().contains(&edge), "{} missing from dependents of {}", edge, selected);
		}
	}

	let b = result.component(ResultId(3)).unwrap();
	let dependents = b.dependents();
	assert_eq!(dependents.len(), 2);
	let sources: Vec<_> = dependents.iter().map(|d| d.from().id()).collect();
	assert_eq!(sources, vec![ResultId(1), ResultId(2)]);
	assert!(result.root().dependents().is_empty());
}

#[test]
fn visiting_twice_keeps_first() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();
	builder.visit_component(module(2, "com.x", "a", "9.9")).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	assert_eq!(result.component_count(), 2);
	let a = result.component(ResultId(2)).unwrap();
	assert_eq!(a.module_version().version, "1.0");
	assert_eq!(result.component(ResultId(2)), Some(a));
}

#[test]
fn missing_target_is_fatal() {
	init_logging();
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();

	let err = builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2)]).unwrap_err();
	match err {
		Error::CorruptResult { selected, from, ref from_variant, ref requested, constraint } => {
			assert_eq!(selected, ResultId(2));
			assert_eq!(from, ResultId(1));
			assert_eq!(from_variant, &None);
			assert_eq!(requested, "com.x:a:1.0");
			assert!(!constraint);
		},
		ref e => panic!("unexpected error {:?}", e),
	}
	assert!(err.is_fatal());

	/* No placeholder was created and the builder refuses to continue */
	assert!(matches!(builder.visit_component(module(2, "com.x", "a", "1.0")), Err(Error::Poisoned)));
	assert!(matches!(builder.complete(ResultId(1)), Err(Error::Poisoned)));
}

#[test]
fn missing_target_names_source_variant() {
	let runtime = ResolvedVariant::new("runtimeElements");
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1).with_variant(runtime.clone())).unwrap();

	let err = builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2).as_constraint().with_from_variant(runtime)]).unwrap_err();
	assert!(matches!(err, Error::CorruptResult { ref from_variant, constraint: true, .. } if from_variant.as_deref() == Some("runtimeElements")));
	assert_eq!(err.to_string(), "corrupt serialized resolution result. cannot find selected module (2) for constraint 1 (runtimeElements) -> com.x:a:1.0");
}

#[test]
fn unknown_source_is_fatal() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	assert!(matches!(builder.visit_outgoing_edges(ResultId(5), vec![]), Err(Error::UnknownComponent(ResultId(5)))));
	assert!(matches!(builder.complete(ResultId(1)), Err(Error::Poisoned)));
}

#[test]
fn edge_needs_exactly_one_outcome() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();

	let mut both = resolved("com.x:a:1.0", 2);
	both.failure = Some(ResolveFailure::new("boom"));
	assert!(matches!(builder.visit_outgoing_edges(ResultId(1), vec![both]), Err(Error::InvalidDependency { .. })));
}

#[test]
fn edge_without_outcome_is_fatal() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();

	let mut neither = resolved("com.x:a:1.0", 2);
	neither.selected = None;
	let err = builder.visit_outgoing_edges(ResultId(1), vec![neither]).unwrap_err();
	match err {
		Error::InvalidDependency { from, ref requested } => {
			assert_eq!(from, ResultId(1));
			assert_eq!(requested, "com.x:a:1.0");
		},
		ref e => panic!("unexpected error {:?}", e),
	}
	assert!(err.is_fatal());
	assert!(matches!(builder.complete(ResultId(1)), Err(Error::Poisoned)));
}

#[test]
fn unknown_root_on_complete() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	assert!(matches!(builder.complete(ResultId(9)), Err(Error::UnknownComponent(ResultId(9)))));
}

#[test]
fn failures_do_not_stop_siblings() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();
	builder.visit_component(module(3, "com.x", "b", "1.0")).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![
		resolved("com.x:a:1.0", 2),
		failed("com.x:missing:1.0", "Could not find com.x:missing:1.0."),
		resolved("com.x:b:1.0", 3),
	]).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	let deps = result.root().dependencies();
	assert_eq!(deps.len(), 3);
	assert!(deps[0].is_resolved());
	assert!(!deps[1].is_resolved());
	assert!(deps[2].is_resolved());

	let failure = deps[1].failure().unwrap();
	assert_eq!(failure.message, "Could not find com.x:missing:1.0.");
	assert!(deps[1].selected().is_none());
	assert!(deps[1].selection_reason().unwrap().is_requested());
	assert_eq!(result.unresolved_dependencies(), vec![deps[1]]);
	assert!(result.lock_state_failures().is_empty());
}

#[test]
fn leaf_components_have_no_edges() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "leaf", "1.0")).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:leaf:1.0", 2)]).unwrap();
	builder.visit_outgoing_edges(ResultId(2), vec![]).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	let leaf = result.component(ResultId(2)).unwrap();
	assert!(leaf.dependencies().is_empty());
	assert_eq!(leaf.dependents().len(), 1);
}

#[test]
fn variant_partitioning() {
	let compile = ResolvedVariant::new("apiElements").with_attributes(AttributeContainer::empty().with("org.gradle.usage", "java-api"));
	let runtime = ResolvedVariant::new("runtimeElements").with_attributes(AttributeContainer::empty().with("org.gradle.usage", "java-runtime"));

	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "lib", "1.0").with_variant(compile.clone()).with_variant(runtime.clone())).unwrap();
	builder.visit_component(module(3, "com.x", "api", "1.0")).unwrap();
	builder.visit_component(module(4, "com.x", "impl", "1.0")).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:lib:1.0", 2).with_selected_variant(runtime.clone())]).unwrap();
	builder.visit_outgoing_edges(ResultId(2), vec![
		resolved("com.x:api:1.0", 3).with_from_variant(compile.clone()),
		resolved("com.x:impl:1.0", 4).with_from_variant(runtime.clone()),
	]).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	let lib = result.component(ResultId(2)).unwrap();
	assert_eq!(lib.variants(), &[compile.clone(), runtime.clone()]);
	assert_eq!(lib.dependencies().len(), 2);

	let compile_deps = lib.dependencies_for_variant(&compile);
	let runtime_deps = lib.dependencies_for_variant(&runtime);
	assert_eq!(compile_deps.len(), 1);
	assert_eq!(runtime_deps.len(), 1);
	assert_eq!(compile_deps[0].selected().unwrap().id(), ResultId(3));
	assert_eq!(runtime_deps[0].selected().unwrap().id(), ResultId(4));
	assert!(!runtime_deps.contains(&compile_deps[0]));

	assert_eq!(result.root().dependencies()[0].selected_variant(), Some(&runtime));
	assert!(lib.dependencies_for_variant(&ResolvedVariant::new("sources")).is_empty());
}

#[test]
fn wide_fanout_from_root() {
	let count = 20_000u64;
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(0)).unwrap();
	for i in 1..=count {
		builder.visit_component(module(i, "com.x", &format!("m{i}"), "1.0")).unwrap();
	}
	builder.visit_outgoing_edges(ResultId(0), (1..=count).map(|i| resolved(&format!("com.x:m{i}:1.0"), i))).unwrap();
	let result = builder.complete(ResultId(0)).unwrap();

	let deps = result.root().dependencies();
	assert_eq!(deps.len(), count as usize);
	assert_eq!(deps[0].selected().unwrap().id(), ResultId(1));
	assert_eq!(deps[deps.len() - 1].selected().unwrap().id(), ResultId(count));
	assert_eq!(result.all_components().len(), count as usize + 1);
	assert_eq!(result.component(ResultId(7)).unwrap().dependents().len(), 1);
}

#[test]
fn undeclared_source_variant_is_still_associated() {
	let ghost = ResolvedVariant::new("ghostElements");
	for warn in [true, false] {
		let mut options = ResgraphOptions::default();
		options.set_warn_on_unknown_variants(warn);

		let mut builder = ResolutionResultBuilder::with_options(&options);
		builder.visit_component(root(1)).unwrap();
		builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();
		builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2).with_from_variant(ghost.clone())]).unwrap();
		let result = builder.complete(ResultId(1)).unwrap();

		let root = result.root();
		assert!(root.variants().is_empty());
		let deps = root.dependencies_for_variant(&ghost);
		assert_eq!(deps.len(), 1);
		assert_eq!(deps[0], root.dependencies()[0]);
	}
}

#[test]
fn repeated_edges_are_interned() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2)]).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2)]).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	assert_eq!(result.root().dependencies().len(), 1);
	assert_eq!(result.component(ResultId(2)).unwrap().dependents().len(), 1);
}

#[test]
fn repeated_edges_without_interning() {
	let mut options = ResgraphOptions::default();
	options.set_cache_dependency_results(false);

	let mut builder = ResolutionResultBuilder::with_options(&options);
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2)]).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2)]).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	/* Two allocations holding the same value */
	let deps = result.root().dependencies();
	assert_eq!(deps.len(), 2);
	assert_ne!(deps[0], deps[1]);
	assert_eq!(deps[0].value(), deps[1].value());
}

#[test]
fn constraint_flag_is_kept() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![
		resolved("com.x:a:1.0", 2),
		resolved("com.x:a:[1.0,2.0)", 2).as_constraint(),
	]).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	let deps = result.root().dependencies();
	assert_eq!(deps.iter().map(|d| d.is_constraint()).collect::<Vec<_>>(), vec![false, true]);
	assert_eq!(result.component(ResultId(2)).unwrap().dependents().len(), 2);
}

#[test]
fn unreachable_components_are_not_traversed() {
	let mut builder = ResolutionResultBuilder::new();
	builder.visit_component(root(1)).unwrap();
	builder.visit_component(module(2, "com.x", "a", "1.0")).unwrap();
	builder.visit_component(module(3, "com.x", "orphan", "1.0")).unwrap();
	builder.visit_component(module(4, "com.x", "b", "1.0")).unwrap();
	builder.visit_outgoing_edges(ResultId(1), vec![resolved("com.x:a:1.0", 2)]).unwrap();
	builder.visit_outgoing_edges(ResultId(2), vec![resolved("com.x:b:1.0", 4)]).unwrap();
	builder.visit_outgoing_edges(ResultId(3), vec![failed("com.x:gone:1.0", "gone")]).unwrap();
	let result = builder.complete(ResultId(1)).unwrap();

	let ids: Vec<_> = result.all_components().iter().map(|c| c.id()).collect();
	assert_eq!(ids, vec![ResultId(1), ResultId(2), ResultId(4)]);
	assert_eq!(result.all_dependencies().len(), 2);
	assert!(result.unresolved_dependencies().is_empty());

	/* Still reachable by id */
	assert_eq!(result.component(ResultId(3)).unwrap().dependencies().len(), 1);
	assert_eq!(result.component_count(), 4);
}

#[test]
fn finished_result_is_shared_between_threads() {
	let result = chain_events().replay(&ResgraphOptions::default()).unwrap();

	let handles: Vec<_> = (0..4).map(|_| {
		let result = result.clone();
		std::thread::spawn(move || {
			(result.all_components().len(), result.all_dependencies().len())
		})
	}).collect();

	for h in handles {
		assert_eq!(h.join().unwrap(), (3, 4));
	}
}
