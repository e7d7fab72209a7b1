use serde::{Serialize, Deserialize};

/// A module without a version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleIdentifier {
	pub group: String,
	pub name: String,
}

impl std::fmt::Display for ModuleIdentifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.group, self.name)
	}
}

/// The group/name/version coordinate a component was selected at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleVersionIdentifier {
	pub group: String,
	pub name: String,
	pub version: String,
}

impl ModuleVersionIdentifier {
	pub fn new(group: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
		Self {
			group: group.into(),
			name: name.into(),
			version: version.into(),
		}
	}

	pub fn module(&self) -> ModuleIdentifier {
		ModuleIdentifier { group: self.group.clone(), name: self.name.clone() }
	}
}

impl std::fmt::Display for ModuleVersionIdentifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}:{}", self.group, self.name, self.version)
	}
}

/// Identifies a component published by a repository.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleComponentIdentifier {
	pub group: String,
	pub module: String,
	pub version: String,
}

impl ModuleComponentIdentifier {
	pub fn new(group: impl Into<String>, module: impl Into<String>, version: impl Into<String>) -> Self {
		Self {
			group: group.into(),
			module: module.into(),
			version: version.into(),
		}
	}
}

impl std::fmt::Display for ModuleComponentIdentifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}:{}", self.group, self.module, self.version)
	}
}

/// Where a resolved component came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentIdentifier {
	/// A component published to a repository.
	Module(ModuleComponentIdentifier),
	/// A project of the build itself.
	Project {
		build: String,
		path: String,
	},
	/// A synthetic component with no backing project or module, such as a detached configuration root.
	Detached {
		display_name: String,
	},
}

impl std::fmt::Display for ComponentIdentifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ComponentIdentifier::Module(m) => write!(f, "{}", m),
			ComponentIdentifier::Project { build, path } => {
				if build == ":" || build.is_empty() {
					write!(f, "project {}", path)
				} else {
					write!(f, "project :{}{}", build, path)
				}
			},
			ComponentIdentifier::Detached { display_name } => write!(f, "{}", display_name),
		}
	}
}
