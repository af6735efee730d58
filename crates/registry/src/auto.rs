//! Link-time auto-import via `inventory`.
//!
//! `submit_import!` in any crate linked into the binary contributes a batch
//! of candidates; [`Registry::from_inventory`] imports every batch.

use std::sync::LazyLock;

use crate::config::RegistryConfig;
use crate::registry::{Candidate, Registry};

/// Inventory item carrying one batch of candidates.
pub struct ImportReg {
	/// Module that submitted the batch.
	pub module: &'static str,
	pub line: u32,
	pub candidates: fn() -> Vec<Candidate>,
}

inventory::collect!(ImportReg);

impl Registry {
	/// Builds a registry from every `submit_import!` batch.
	///
	/// Batches are imported in order of module path, then line, so a key
	/// submitted twice resolves the same way on every run. A batch that fails
	/// to import is logged and skipped; the others still land.
	pub fn from_inventory(config: RegistryConfig) -> Self {
		let mut registry = Registry::with_config(config);
		for reg in batches() {
			if let Err(err) = registry.import((reg.candidates)()) {
				tracing::warn!(module = reg.module, line = reg.line, error = %err, "skipping auto-import batch");
			}
		}
		tracing::debug!(entries = registry.len(), "auto-import complete");
		registry
	}
}

fn batches() -> Vec<&'static ImportReg> {
	let mut batches: Vec<_> = inventory::iter::<ImportReg>.into_iter().collect();
	batches.sort_by_key(|reg| (reg.module, reg.line));
	batches
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| Registry::from_inventory(RegistryConfig::default()));

/// Returns the process-wide registry built from `submit_import!` batches.
pub fn global() -> &'static Registry {
	&GLOBAL
}
