use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registry::DuplicatePolicy;

/// Registry behaviour, usually loaded from a `[registry]` TOML table.
///
/// ```toml
/// duplicates = "first-wins"
/// suggestions = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistryConfig {
	/// How imports treat keys that are already registered.
	pub duplicates: DuplicatePolicy,
	/// Whether lookup errors carry a "did you mean" suggestion.
	pub suggestions: bool,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			duplicates: DuplicatePolicy::default(),
			suggestions: true,
		}
	}
}

impl RegistryConfig {
	pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
		self.duplicates = policy;
		self
	}
}
