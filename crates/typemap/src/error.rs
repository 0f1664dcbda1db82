use std::path::PathBuf;

use crate::options::DuplicatePolicy;

/// A handler-providing component could not be enumerated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
	#[error("failed to load type maps from component '{component}': {reason}")]
	ComponentLoad { component: String, reason: String },
}

impl DiscoveryError {
	pub fn component_load(component: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::ComponentLoad {
			component: component.into(),
			reason: reason.into(),
		}
	}
}

/// Registration rejected by the active [`DuplicatePolicy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("ambiguous type map registration for '{name}': registered by {existing}, rejected from {incoming}")]
	Ambiguous { name: String, existing: String, incoming: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read binding options from {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid binding options: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Two registrations claimed the same canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
	pub name: Box<str>,
	/// Origin of the handler that was registered first.
	pub existing: Box<str>,
	/// Origin of the handler that arrived second.
	pub incoming: Box<str>,
	pub policy: DuplicatePolicy,
}

impl core::fmt::Display for Collision {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		let winner = match self.policy {
			DuplicatePolicy::LastWins => &self.incoming,
			DuplicatePolicy::Reject => &self.existing,
		};
		write!(f, "'{}' claimed by {} and {} ({} kept)", self.name, self.existing, self.incoming, winner)
	}
}
