//! Ordered lookup of static resources.
//!
//! [`Resources`] holds bundles in registration order; [`Resources::load`]
//! returns the file from the first bundle that has it. There is no caching
//! and no merging across bundles.
//!
//! ```
//! use stagehand_resource::{MemoryBundle, Resources};
//!
//! let mut resources = Resources::new();
//! resources.register(MemoryBundle::new("base").with("a.txt", "one"));
//! resources.register(MemoryBundle::new("overlay").with("a.txt", "two"));
//!
//! assert_eq!(resources.load("a.txt").unwrap().bytes(), b"one");
//! ```

mod bundle;
mod config;
mod error;


use std::sync::LazyLock;

pub use bundle::{Bundle, DirBundle, EmbeddedBundle, File, MemoryBundle, valid_path};
pub use config::ResourceConfig;
pub use error::ResourceError;
#[doc(hidden)]
pub use inventory;

/// Registered bundles searched in order.
#[derive(Default)]
pub struct Resources {
	bundles: Vec<Box<dyn Bundle>>,
}

impl Resources {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a directory bundle for each configured directory, in order.
	pub fn from_config(config: &ResourceConfig) -> Self {
		let mut resources = Self::new();
		for dir in &config.dirs {
			resources.register(DirBundle::new(dir));
		}
		resources
	}

	/// Appends a bundle; earlier bundles take precedence.
	pub fn register(&mut self, bundle: impl Bundle + 'static) -> &mut Self {
		tracing::debug!(bundle = bundle.name(), position = self.bundles.len(), "register bundle");
		self.bundles.push(Box::new(bundle));
		self
	}

	pub fn len(&self) -> usize {
		self.bundles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bundles.is_empty()
	}

	/// Loads `path` from the first bundle that contains it.
	///
	/// A bundle that fails with anything other than absence stops the search.
	pub fn load(&self, path: &str) -> Result<File, ResourceError> {
		if !valid_path(path) {
			return Err(ResourceError::InvalidPath {
				path: path.to_string(),
			});
		}
		for bundle in &self.bundles {
			if let Some(file) = bundle.open(path)? {
				tracing::trace!(path, bundle = bundle.name(), "resource loaded");
				return Ok(file);
			}
		}
		Err(ResourceError::NotFound {
			path: path.to_string(),
		})
	}
}

impl std::fmt::Debug for Resources {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.bundles.iter().map(|b| b.name()))
			.finish()
	}
}

/// Inventory item contributing a bundle to [`global`].
pub struct BundleReg {
	pub name: &'static str,
	/// Higher priorities are searched first.
	pub priority: i16,
	pub bundle: fn() -> Box<dyn Bundle>,
}

inventory::collect!(BundleReg);

/// Submits a bundle to the [`global`] loader.
///
/// ```ignore
/// static ASSETS: EmbeddedBundle = EmbeddedBundle::new("assets", &[
///     ("logo.svg", include_bytes!("../assets/logo.svg")),
/// ]);
/// stagehand_resource::submit_bundle!("assets", &ASSETS);
/// ```
#[macro_export]
macro_rules! submit_bundle {
	($name:expr, $bundle:expr) => {
		$crate::submit_bundle!($name, $bundle, priority = 0);
	};
	($name:expr, $bundle:expr, priority = $priority:expr) => {
		$crate::inventory::submit! {
			$crate::BundleReg {
				name: $name,
				priority: $priority,
				bundle: || ::std::boxed::Box::new($bundle),
			}
		}
	};
}

static GLOBAL: LazyLock<Resources> = LazyLock::new(|| {
	let mut regs: Vec<&BundleReg> = inventory::iter::<BundleReg>.into_iter().collect();
	regs.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(b.name)));
	let mut resources = Resources::new();
	for reg in regs {
		resources.bundles.push((reg.bundle)());
	}
	tracing::debug!(bundles = resources.len(), "global resources ready");
	resources
});

/// Returns the process-wide loader built from `submit_bundle!` items, highest
/// priority first and then by name.
pub fn global() -> &'static Resources {
	&GLOBAL
}
