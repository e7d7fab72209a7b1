//! Assembles the result of a dependency resolution into a graph that can be queried.
//!
//! The solver that picks versions is not part of this crate. It reports what it decided as a stream of
//! component visits and edge visits which are turned into a graph of [`ResolvedComponentResult`]s
//! connected by [`DependencyResult`]s.
//!
//! # Usage
//! 1. Create a [`ResolutionResultBuilder`].
//! 1. [`ResolutionResultBuilder::visit_component()`] for every selected component.
//! 1. [`ResolutionResultBuilder::visit_outgoing_edges()`] for every component with dependencies.
//! Every component an edge points at must have been visited first.
//! 1. Optionally [`ResolutionResultBuilder::add_extra_failures()`] to report stale lock state on the root.
//! 1. [`ResolutionResultBuilder::complete()`] to get a [`ResolutionResult`] to query.
//!
//! Completing consumes the builder, a finished result can't be mutated and may be shared between threads.
//!
//! ## Failures
//! A dependency that could not be resolved is not an error, it is recorded as an unresolved edge.
//! An edge pointing at a component that was never visited means the event stream is corrupt,
//! the call returns [`crate::Error::CorruptResult`] and the builder refuses any further work.

use petgraph::prelude::*;
use serde::{Serialize, Deserialize};

mod registry;
pub use registry::ComponentRegistry;
pub use registry::ResolvedComponent;
mod dependency_result;
pub use dependency_result::*;
mod builder;
pub use builder::ResolutionResultBuilder;
pub use builder::LOCK_STATE_OUT_OF_DATE;
mod finalized;
pub use finalized::*;

/// Index of a component inside one resolution graph.
///
/// Only meaningful for the graph it was created by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentIndex(NodeIndex);

/// Index of a dependency result inside one resolution graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyIndex(usize);
