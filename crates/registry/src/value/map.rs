use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter};
use serde::{Deserialize, Serialize};

use super::Value;
use crate::convert::IntoValue;
use crate::error::ConfigError;

/// Insertion-ordered map from field name to [`Value`].
///
/// Used for keyed struct construction and option synthesis. Deserializes from
/// any serde format, so configuration files can feed it directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(IndexMap<String, Value>);

impl FieldMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Creates an empty map with room for `capacity` entries.
	pub fn with_capacity(capacity: usize) -> Self {
		Self(IndexMap::with_capacity(capacity))
	}

	/// Parses a map from a TOML document.
	pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
		toml::from_str(input).map_err(ConfigError::from)
	}

	/// Inserts a field, returning the previous value for that name.
	pub fn insert(&mut self, name: impl Into<String>, value: impl IntoValue) -> Option<Value> {
		self.0.insert(name.into(), value.into_value())
	}

	/// Returns the value stored under `name`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	/// Returns true if `name` is present.
	pub fn contains_key(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Removes `name`, preserving the order of the remaining entries.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.0.shift_remove(name)
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates entries in insertion order.
	pub fn iter(&self) -> Iter<'_, String, Value> {
		self.0.iter()
	}

	/// Iterates field names in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Moves all entries of `other` into `self`, later entries overwriting earlier ones.
	pub fn merge(&mut self, other: FieldMap) {
		self.0.extend(other.0);
	}
}

impl<K: Into<String>> FromIterator<(K, Value)> for FieldMap {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}
}

impl<K: Into<String>> Extend<(K, Value)> for FieldMap {
	fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
		self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
	}
}

impl IntoIterator for FieldMap {
	type Item = (String, Value);
	type IntoIter = IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a FieldMap {
	type Item = (&'a String, &'a Value);
	type IntoIter = Iter<'a, String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
