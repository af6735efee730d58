use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ResourceError;

/// Loader configuration.
///
/// ```toml
/// dirs = ["overrides", "/usr/share/app"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ResourceConfig {
	/// Directories registered as bundles, searched in order.
	pub dirs: Vec<PathBuf>,
}

impl ResourceConfig {
	pub fn from_toml(input: &str) -> Result<Self, ResourceError> {
		Ok(toml::from_str(input)?)
	}
}
