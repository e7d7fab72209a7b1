//! Verification metadata: what checksums and signing keys each artifact of a component is expected to have.
//!
//! This is read-only data populated by a trust store loader and handed to an artifact verifier.
//! Nothing here downloads or reads artifacts.

use std::collections::{BTreeSet, HashMap};
use serde::{Serialize, Deserialize};

use crate::model::ModuleComponentIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumKind {
	Md5,
	Sha1,
	Sha256,
	Sha512,
}

impl std::fmt::Display for ChecksumKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			ChecksumKind::Md5 => "md5",
			ChecksumKind::Sha1 => "sha1",
			ChecksumKind::Sha256 => "sha256",
			ChecksumKind::Sha512 => "sha512",
		};
		write!(f, "{}", s)
	}
}

/// An expected checksum, optionally with alternative accepted values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
	pub kind: ChecksumKind,
	pub value: String,
	#[serde(default)]
	pub alternatives: BTreeSet<String>,
	#[serde(default)]
	pub origin: Option<String>,
	#[serde(default)]
	pub reason: Option<String>,
}

impl Checksum {
	pub fn new(kind: ChecksumKind, value: impl Into<String>) -> Self {
		Self {
			kind,
			value: value.into(),
			alternatives: Default::default(),
			origin: None,
			reason: None,
		}
	}

	/// Checks a hex digest against the value and alternatives, ignoring case.
	pub fn accepts(&self, digest: &str) -> bool {
		self.value.eq_ignore_ascii_case(digest) || self.alternatives.iter().any(|a| a.eq_ignore_ascii_case(digest))
	}

	/// Digests `content` and checks it.
	///
	/// `None` when this checksum kind can't be computed in process (only sha256 can).
	pub fn matches_content(&self, content: &[u8]) -> Option<bool> {
		match self.kind {
			ChecksumKind::Sha256 => Some(self.accepts(&sha256::digest(content))),
			ChecksumKind::Md5 | ChecksumKind::Sha1 | ChecksumKind::Sha512 => None,
		}
	}
}

/// A PGP key that should be ignored, with an optional reason.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IgnoredKey {
	pub key_id: String,
	#[serde(default)]
	pub reason: Option<String>,
}

/// Trust records for one artifact of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactVerificationMetadata {
	pub artifact_name: String,
	#[serde(default)]
	pub checksums: Vec<Checksum>,
	#[serde(default)]
	pub trusted_pgp_keys: BTreeSet<String>,
	#[serde(default)]
	pub ignored_pgp_keys: BTreeSet<IgnoredKey>,
}

impl ArtifactVerificationMetadata {
	pub fn checksum(&self, kind: ChecksumKind) -> Option<&Checksum> {
		self.checksums.iter().find(|c| c.kind == kind)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentVerificationMetadata {
	pub component_id: ModuleComponentIdentifier,
	#[serde(default)]
	pub artifact_verifications: Vec<ArtifactVerificationMetadata>,
}

impl ComponentVerificationMetadata {
	pub fn artifact(&self, artifact_name: &str) -> Option<&ArtifactVerificationMetadata> {
		self.artifact_verifications.iter().find(|a| a.artifact_name == artifact_name)
	}
}

/// Lookup of verification metadata by component.
///
/// Immutable once built, so it can be shared between threads freely.
#[derive(Debug, Default, Clone)]
pub struct VerificationMetadataStore {
	components: HashMap<ModuleComponentIdentifier, ComponentVerificationMetadata>,
}

impl VerificationMetadataStore {
	/// Later entries for the same component replace earlier ones.
	pub fn new(components: impl IntoIterator<Item = ComponentVerificationMetadata>) -> Self {
		let mut map = HashMap::new();
		for c in components {
			if map.contains_key(&c.component_id) {
				log::debug!("Replacing verification metadata for {}", c.component_id);
			}
			map.insert(c.component_id.clone(), c);
		}
		Self { components: map }
	}

	/// Reads a JSON array of [`ComponentVerificationMetadata`].
	pub fn from_json_reader(reader: impl std::io::Read) -> crate::Result<Self> {
		let components: Vec<ComponentVerificationMetadata> = serde_json::from_reader(reader)?;
		Ok(Self::new(components))
	}

	pub fn lookup(&self, component_id: &ModuleComponentIdentifier) -> Option<&ComponentVerificationMetadata> {
		self.components.get(component_id)
	}

	pub fn len(&self) -> usize {
		self.components.len()
	}

	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}
}
