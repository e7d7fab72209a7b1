//! Capabilities published by variants.
//!
//! A [`Capability::Shadowed`] derives its name and id from the capability it wraps by appending a suffix.
//! It has no group or version of its own. The appendix is not validated, so a shadowed capability
//! may produce the same id as some unrelated plain capability.

use std::borrow::Cow;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
	Plain(PlainCapability),
	Shadowed(ShadowedCapability),
}

/// A capability declared directly by a variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlainCapability {
	pub group: String,
	pub name: String,
	pub version: Option<String>,
}

/// A capability derived from `shadowed` for a feature variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShadowedCapability {
	shadowed: Box<Capability>,
	appendix: String,
}

impl PlainCapability {
	pub fn new(group: impl Into<String>, name: impl Into<String>, version: Option<impl Into<String>>) -> Self {
		Self {
			group: group.into(),
			name: name.into(),
			version: version.map(Into::into),
		}
	}

	pub fn capability_id(&self) -> String {
		format!("{}:{}", self.group, self.name)
	}

	pub fn shadow(self, appendix: impl Into<String>) -> ShadowedCapability {
		ShadowedCapability::new(Capability::Plain(self), appendix)
	}
}

impl ShadowedCapability {
	pub fn new(shadowed: impl Into<Capability>, appendix: impl Into<String>) -> Self {
		Self {
			shadowed: Box::new(shadowed.into()),
			appendix: appendix.into(),
		}
	}

	pub fn shadowed_capability(&self) -> &Capability {
		&self.shadowed
	}

	pub fn appendix(&self) -> &str {
		&self.appendix
	}
}

impl Capability {
	pub fn group(&self) -> &str {
		match self {
			Capability::Plain(c) => &c.group,
			Capability::Shadowed(c) => c.shadowed.group(),
		}
	}

	pub fn name(&self) -> Cow<'_, str> {
		match self {
			Capability::Plain(c) => Cow::Borrowed(&c.name),
			Capability::Shadowed(c) => Cow::Owned(c.shadowed.name().into_owned() + &c.appendix),
		}
	}

	pub fn version(&self) -> Option<&str> {
		match self {
			Capability::Plain(c) => c.version.as_deref(),
			Capability::Shadowed(c) => c.shadowed.version(),
		}
	}

	/// `group:name` for plain capabilities, the shadowed id plus the appendix otherwise.
	pub fn capability_id(&self) -> String {
		match self {
			Capability::Plain(c) => c.capability_id(),
			Capability::Shadowed(c) => c.shadowed.capability_id() + &c.appendix,
		}
	}
}

impl From<PlainCapability> for Capability {
	fn from(value: PlainCapability) -> Self {
		Capability::Plain(value)
	}
}

impl From<ShadowedCapability> for Capability {
	fn from(value: ShadowedCapability) -> Self {
		Capability::Shadowed(value)
	}
}

impl std::fmt::Display for Capability {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.version() {
			Some(v) => write!(f, "capability group='{}' name='{}' version='{}'", self.group(), self.name(), v),
			None => write!(f, "capability group='{}' name='{}'", self.group(), self.name()),
		}
	}
}
