//! Copy-on-write registry for imports after startup.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::{Candidate, Registry};
use crate::config::RegistryConfig;
use crate::error::ImportError;

/// Registry that accepts imports while readers hold snapshots.
///
/// Readers [`load`](Self::load) an immutable `Arc<Registry>`; an import
/// clones the current snapshot, imports into the clone and publishes it with
/// compare-and-swap, retrying if another import won the race.
pub struct SharedRegistry {
	snap: ArcSwap<Registry>,
}

impl SharedRegistry {
	pub fn new(config: RegistryConfig) -> Self {
		Self::from_registry(Registry::with_config(config))
	}

	pub fn from_registry(registry: Registry) -> Self {
		Self {
			snap: ArcSwap::from_pointee(registry),
		}
	}

	/// Returns the current snapshot.
	pub fn load(&self) -> Arc<Registry> {
		self.snap.load_full()
	}

	/// Imports into a new snapshot and publishes it.
	///
	/// Fails, leaving the published snapshot unchanged, under the same rules
	/// as [`Registry::import`].
	pub fn import<I>(&self, items: I) -> Result<(), ImportError>
	where
		I: IntoIterator<Item = Candidate>,
	{
		let items: Vec<Candidate> = items.into_iter().collect();
		loop {
			let old = self.snap.load_full();
			let mut next = Registry::clone(&old);
			next.import(items.iter().cloned())?;

			let prev = self.snap.compare_and_swap(&old, Arc::new(next));
			if Arc::ptr_eq(&prev, &old) {
				return Ok(());
			}
			tracing::trace!("registry snapshot changed during import; retrying");
		}
	}
}

impl Default for SharedRegistry {
	fn default() -> Self {
		Self::new(RegistryConfig::default())
	}
}
