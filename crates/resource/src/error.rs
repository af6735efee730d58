/// Failure to load a resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
	/// No registered bundle contains the path.
	#[error("resource '{path}' not found")]
	NotFound { path: String },
	/// The path is not a clean, slash-separated relative path.
	#[error("invalid resource path '{path}'")]
	InvalidPath { path: String },
	/// A bundle failed to read a file it contains.
	#[error("cannot read resource '{path}' from {bundle}: {source}")]
	Io {
		path: String,
		bundle: String,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid resource config: {0}")]
	Config(#[from] toml::de::Error),
}

impl ResourceError {
	/// Returns true for [`ResourceError::NotFound`].
	pub fn is_not_found(&self) -> bool {
		matches!(self, ResourceError::NotFound { .. })
	}
}
