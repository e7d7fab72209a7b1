use serde::{Serialize, Deserialize};

/// A requested module coordinate before resolution picked a concrete version.
///
/// `version` is the raw requested version or range and is never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleComponentSelector {
	pub group: String,
	pub module: String,
	pub version: String,
}

impl ModuleComponentSelector {
	pub fn new(group: impl Into<String>, module: impl Into<String>, version: impl Into<String>) -> Self {
		Self {
			group: group.into(),
			module: module.into(),
			version: version.into(),
		}
	}
}

impl std::fmt::Display for ModuleComponentSelector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.version.is_empty() {
			write!(f, "{}:{}", self.group, self.module)
		} else {
			write!(f, "{}:{}:{}", self.group, self.module, self.version)
		}
	}
}

impl std::str::FromStr for ModuleComponentSelector {
	type Err = crate::Error;

	/// Parses `group:module` or `group:module:version`.
	fn from_str(s: &str) -> crate::Result<Self> {
		let parts: Vec<&str> = s.split(':').collect();
		match parts.as_slice() {
			[group, module] if !group.is_empty() && !module.is_empty() => Ok(Self::new(*group, *module, "")),
			[group, module, version] if !group.is_empty() && !module.is_empty() => Ok(Self::new(*group, *module, *version)),
			_ => Err(crate::Error::Parse(format!("invalid module selector notation: \"{}\"", s))),
		}
	}
}

/// The requested side of a dependency edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentSelector {
	Module(ModuleComponentSelector),
	Project {
		build: String,
		path: String,
	},
}

impl ComponentSelector {
	/// Convenience for `"group:module:version"` notation.
	pub fn module(notation: &str) -> crate::Result<Self> {
		Ok(ComponentSelector::Module(notation.parse()?))
	}
}

impl std::fmt::Display for ComponentSelector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ComponentSelector::Module(m) => write!(f, "{}", m),
			ComponentSelector::Project { path, .. } => write!(f, "project {}", path),
		}
	}
}

impl From<ModuleComponentSelector> for ComponentSelector {
	fn from(value: ModuleComponentSelector) -> Self {
		ComponentSelector::Module(value)
	}
}

/// The older group/name/version selector shape, used by unresolved dependency reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleVersionSelector {
	pub group: String,
	pub name: String,
	pub version: Option<String>,
}

impl From<&ModuleVersionSelector> for ModuleComponentSelector {
	fn from(value: &ModuleVersionSelector) -> Self {
		ModuleComponentSelector::new(value.group.clone(), value.name.clone(), value.version.clone().unwrap_or_default())
	}
}
