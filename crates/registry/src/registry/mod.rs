//! The name-keyed catalog of factories and record types.
//!
//! Imports take `&mut self` and are all-or-nothing: every candidate is
//! validated, and duplicate keys are checked against the policy, before the
//! table is touched. After building, a `Registry` is shared read-only.

mod invoke;
mod policy;
mod snapshot;


use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

pub use policy::{Collision, DuplicatePolicy, InsertAction};
pub use snapshot::SharedRegistry;

use crate::config::RegistryConfig;
use crate::error::ImportError;
use crate::factory::{FunctionFactory, IntoFactory, function_key};
use crate::handle::Handle;
use crate::reflect::{Methods, Record, TypeInfo};
use crate::value::Value;

/// Template for a record type constructed by name.
#[derive(Debug, Clone, Copy)]
pub struct TypeTemplate {
	pub info: &'static TypeInfo,
	zero: fn() -> Handle,
}

impl TypeTemplate {
	pub fn of<T: Record + Methods + Default>() -> Self {
		fn zero<T: Record + Methods + Default>() -> Handle {
			Handle::new(T::default())
		}
		Self {
			info: T::type_info(),
			zero: zero::<T>,
		}
	}

	/// Returns a handle to a fresh `Default` instance.
	pub fn instantiate(&self) -> Handle {
		(self.zero)()
	}
}

/// What a registry key resolves to.
#[derive(Debug, Clone)]
pub enum Descriptor {
	Function(Arc<FunctionFactory>),
	Type(TypeTemplate),
}

impl Descriptor {
	pub fn is_function(&self) -> bool {
		matches!(self, Descriptor::Function(_))
	}

	/// Returns true if `field` is an exported field of the configured record.
	///
	/// For a function this is the record targeted by its first option
	/// parameter.
	pub fn has_field(&self, field: &str) -> bool {
		let info = match self {
			Descriptor::Type(template) => Some(template.info),
			Descriptor::Function(factory) => factory.signature().option_target(),
		};
		info.is_some_and(|info| info.has_exported(field))
	}
}

/// Something offered to [`Registry::import`].
#[derive(Debug, Clone)]
pub enum Candidate {
	Function(Arc<FunctionFactory>),
	Type(TypeTemplate),
	/// Any other value; importing it fails.
	Value(Value),
}

impl Candidate {
	/// A factory keyed by its Rust path.
	pub fn function<F, M>(factory: F) -> Self
	where
		F: IntoFactory<M>,
	{
		let key = function_key(&factory);
		Self::named_function(key, factory)
	}

	/// A factory under an explicit key, for closures.
	pub fn named_function<F, M>(key: impl Into<String>, factory: F) -> Self
	where
		F: IntoFactory<M>,
	{
		Candidate::Function(Arc::new(FunctionFactory::new(key, factory)))
	}

	/// A record type keyed by `<module_path>::<Name>`.
	pub fn record<T: Record + Methods + Default>() -> Self {
		Candidate::Type(TypeTemplate::of::<T>())
	}

	/// Validates the candidate and returns its key and descriptor.
	fn validate(self) -> Result<(String, Descriptor), ImportError> {
		match self {
			Candidate::Function(factory) => {
				let key = factory.key().to_string();
				match factory.signature().returns.as_slice() {
					[shape] if shape.is_wrappable() => Ok((key, Descriptor::Function(factory))),
					[shape] => Err(ImportError::ReturnShape { key, shape: *shape }),
					shapes => Err(ImportError::ReturnArity {
						key,
						count: shapes.len(),
					}),
				}
			}
			Candidate::Type(template) => Ok((template.info.key(), Descriptor::Type(template))),
			Candidate::Value(Value::Null) => Err(ImportError::Nil),
			Candidate::Value(other) => Err(ImportError::Unsupported { kind: other.kind() }),
		}
	}
}

impl From<Value> for Candidate {
	fn from(value: Value) -> Self {
		Candidate::Value(value)
	}
}

/// Name-keyed catalog of factories and record types.
#[derive(Debug, Clone, Default)]
pub struct Registry {
	entries: FxHashMap<Box<str>, Descriptor>,
	/// Latest collision per key.
	collisions: IndexMap<String, Collision>,
	config: RegistryConfig,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: RegistryConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Registers factories and record types.
	///
	/// Fails without changing the registry if any candidate is invalid or, under
	/// [`DuplicatePolicy::Reject`], if any key is already taken.
	pub fn import<I>(&mut self, items: I) -> Result<(), ImportError>
	where
		I: IntoIterator<Item = Candidate>,
	{
		let validated = items
			.into_iter()
			.map(Candidate::validate)
			.collect::<Result<Vec<_>, _>>()?;
		if validated.is_empty() {
			return Err(ImportError::Empty);
		}

		let policy = self.config.duplicates;
		if policy == DuplicatePolicy::Reject {
			let mut seen = rustc_hash::FxHashSet::default();
			for (key, _) in &validated {
				if self.entries.contains_key(key.as_str()) || !seen.insert(key.as_str()) {
					return Err(ImportError::Duplicate { key: key.clone() });
				}
			}
		}

		for (key, descriptor) in validated {
			let present = self.entries.contains_key(key.as_str());
			let Some(action) = policy.resolve(present) else {
				return Err(ImportError::Duplicate { key });
			};
			match action {
				InsertAction::InsertedNew => {
					tracing::debug!(key = %key, function = descriptor.is_function(), "import");
					self.entries.insert(key.into_boxed_str(), descriptor);
				}
				InsertAction::ReplacedExisting => {
					tracing::debug!(key = %key, ?policy, "import replaced existing entry");
					self.record_collision(Collision {
						key: key.clone(),
						policy,
						action,
					});
					self.entries.insert(key.into_boxed_str(), descriptor);
				}
				InsertAction::KeptExisting => {
					tracing::debug!(key = %key, ?policy, "import kept existing entry");
					self.record_collision(Collision { key, policy, action });
				}
			}
		}
		Ok(())
	}

	fn record_collision(&mut self, collision: Collision) {
		self.collisions.insert(collision.key.clone(), collision);
	}

	pub fn get(&self, key: &str) -> Option<&Descriptor> {
		self.entries.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns every registered key in sorted order.
	pub fn keys(&self) -> Vec<&str> {
		let mut keys: Vec<&str> = self.entries.keys().map(|k| &**k).collect();
		keys.sort_unstable();
		keys
	}

	/// Returns the latest collision for each duplicate key seen by past
	/// imports, in order of each key's first collision.
	pub fn collisions(&self) -> impl ExactSizeIterator<Item = &Collision> {
		self.collisions.values()
	}

	/// Returns the latest collision recorded for `key`.
	pub fn collision(&self, key: &str) -> Option<&Collision> {
		self.collisions.get(key)
	}

	/// Suggests the registered key closest to `key`, if any is close enough.
	pub fn suggest(&self, key: &str) -> Option<String> {
		if !self.config.suggestions {
			return None;
		}
		self.entries
			.keys()
			.map(|k| (strsim::levenshtein(key, k), k))
			.filter(|(distance, _)| *distance <= 3)
			.min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
			.map(|(_, k)| k.to_string())
	}

	/// Returns true if `key` configures a record with an exported `field`.
	///
	/// Never fails; unknown keys report false.
	pub fn has_field(&self, key: &str, field: &str) -> bool {
		self.get(key).is_some_and(|d| d.has_field(field))
	}
}
