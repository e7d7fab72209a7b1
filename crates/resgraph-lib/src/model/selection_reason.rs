use serde::{Serialize, Deserialize};

/// The kind of decision that led to a component version being selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentSelectionCause {
	Requested,
	Root,
	Forced,
	ConflictResolution,
	SelectedByRule,
	CompositeBuild,
	Constraint,
	Rejection,
	ByAncestor,
}

impl ComponentSelectionCause {
	pub fn default_reason(&self) -> &'static str {
		match self {
			ComponentSelectionCause::Requested => "requested",
			ComponentSelectionCause::Root => "root",
			ComponentSelectionCause::Forced => "forced",
			ComponentSelectionCause::ConflictResolution => "conflict resolution",
			ComponentSelectionCause::SelectedByRule => "selected by rule",
			ComponentSelectionCause::CompositeBuild => "composite build substitution",
			ComponentSelectionCause::Constraint => "constraint",
			ComponentSelectionCause::Rejection => "rejection",
			ComponentSelectionCause::ByAncestor => "by ancestor",
		}
	}
}

/// One cause plus the human readable text explaining it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentSelectionDescriptor {
	pub cause: ComponentSelectionCause,
	pub description: String,
}

impl ComponentSelectionDescriptor {
	pub const DEPENDENCY_LOCKING: &'static str = "Dependency locking";

	pub fn new(cause: ComponentSelectionCause, description: impl Into<String>) -> Self {
		Self { cause, description: description.into() }
	}

	/// Describes a selection using the cause's default text.
	pub fn of(cause: ComponentSelectionCause) -> Self {
		Self::new(cause, cause.default_reason())
	}

	/// The descriptor attached to every lock state failure.
	pub fn dependency_locking() -> Self {
		Self::new(ComponentSelectionCause::Constraint, Self::DEPENDENCY_LOCKING)
	}

	pub fn has_custom_description(&self) -> bool {
		self.description != self.cause.default_reason()
	}
}

impl std::fmt::Display for ComponentSelectionDescriptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.has_custom_description() {
			write!(f, "{}: {}", self.cause.default_reason(), self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// Why a particular version won, as an ordered list of descriptors.
///
/// An empty list means "requested".
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentSelectionReason {
	descriptions: Vec<ComponentSelectionDescriptor>,
}

impl ComponentSelectionReason {
	pub fn root() -> Self {
		Self::of([ComponentSelectionDescriptor::of(ComponentSelectionCause::Root)])
	}

	pub fn requested() -> Self {
		Self::of([ComponentSelectionDescriptor::of(ComponentSelectionCause::Requested)])
	}

	pub fn of(descriptions: impl IntoIterator<Item = ComponentSelectionDescriptor>) -> Self {
		Self { descriptions: descriptions.into_iter().collect() }
	}

	pub fn dependency_locking() -> Self {
		Self::of([ComponentSelectionDescriptor::dependency_locking()])
	}

	/// Adds a descriptor unless an equal one is already present.
	pub fn add_cause(&mut self, descriptor: ComponentSelectionDescriptor) {
		if !self.descriptions.contains(&descriptor) {
			self.descriptions.push(descriptor);
		}
	}

	pub fn descriptions(&self) -> &[ComponentSelectionDescriptor] {
		&self.descriptions
	}

	fn has_cause(&self, cause: ComponentSelectionCause) -> bool {
		self.descriptions.iter().any(|d| d.cause == cause)
	}

	pub fn is_root(&self) -> bool {
		self.has_cause(ComponentSelectionCause::Root)
	}
	pub fn is_requested(&self) -> bool {
		self.descriptions.is_empty() || self.has_cause(ComponentSelectionCause::Requested)
	}
	pub fn is_forced(&self) -> bool {
		self.has_cause(ComponentSelectionCause::Forced)
	}
	pub fn is_conflict_resolution(&self) -> bool {
		self.has_cause(ComponentSelectionCause::ConflictResolution)
	}
	pub fn is_constrained(&self) -> bool {
		self.has_cause(ComponentSelectionCause::Constraint)
	}

	/// True for the reason given to failures injected because the lock state no longer matches the graph.
	pub fn is_dependency_locking(&self) -> bool {
		self.descriptions.contains(&ComponentSelectionDescriptor::dependency_locking())
	}
}

impl std::fmt::Display for ComponentSelectionReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.descriptions.is_empty() {
			return write!(f, "{}", ComponentSelectionCause::Requested.default_reason());
		}
		for (i, d) in self.descriptions.iter().enumerate() {
			if i > 0 { write!(f, ", ")?; }
			write!(f, "{}", d)?;
		}
		Ok(())
	}
}
