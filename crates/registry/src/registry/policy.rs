//! Duplicate key handling.

use serde::{Deserialize, Serialize};

/// What an import does when a key is already registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
	/// Overwrite with the last definition seen.
	#[default]
	LastWins,
	/// Keep the first definition seen for a key.
	FirstWins,
	/// Fail the whole import.
	Reject,
}

/// Outcome of inserting one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAction {
	/// Key was new; entry inserted.
	InsertedNew,
	/// Key existed; kept the existing entry.
	KeptExisting,
	/// Key existed; replaced with the new entry.
	ReplacedExisting,
}

/// A duplicate key seen during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
	pub key: String,
	pub policy: DuplicatePolicy,
	pub action: InsertAction,
}

impl DuplicatePolicy {
	/// Decides the action for a key that is `present` already.
	///
	/// Returns `None` when the policy rejects the duplicate.
	pub(crate) fn resolve(self, present: bool) -> Option<InsertAction> {
		if !present {
			return Some(InsertAction::InsertedNew);
		}
		match self {
			DuplicatePolicy::LastWins => Some(InsertAction::ReplacedExisting),
			DuplicatePolicy::FirstWins => Some(InsertAction::KeptExisting),
			DuplicatePolicy::Reject => None,
		}
	}
}
