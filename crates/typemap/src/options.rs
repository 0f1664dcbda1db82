//! Binding session options and the shared context handed to handlers.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::generator::GeneratorKind;

/// What to do when two handlers claim the same canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
	/// Overwrite with the later registration and log a warning.
	#[default]
	LastWins,
	/// Keep the earlier registration and report the later one as an error.
	Reject,
}

/// User-facing options for one binding session.
///
/// ```toml
/// generator = "csharp"
/// disabled_type_maps = ["std::wstring"]
/// duplicate_policy = "reject"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BindingOptions {
	pub generator: GeneratorKind,
	/// Canonical names whose handlers start disabled.
	pub disabled_type_maps: Vec<String>,
	pub duplicate_policy: DuplicatePolicy,
}

impl BindingOptions {
	pub fn for_generator(generator: GeneratorKind) -> Self {
		Self {
			generator,
			..Self::default()
		}
	}

	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&text)
	}

	pub fn is_disabled(&self, name: &str) -> bool {
		self.disabled_type_maps.iter().any(|disabled| disabled == name)
	}
}

/// Read-only view of the session shared by the registry and every handler.
#[derive(Debug, Clone, Default)]
pub struct BindingContext {
	options: Arc<BindingOptions>,
}

impl BindingContext {
	pub fn new(options: BindingOptions) -> Self {
		Self { options: Arc::new(options) }
	}

	#[inline]
	pub fn options(&self) -> &BindingOptions {
		&self.options
	}

	#[inline]
	pub fn generator(&self) -> GeneratorKind {
		self.options.generator
	}
}
