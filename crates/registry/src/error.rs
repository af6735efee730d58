//! Error types for registry, invocation and decoding failures.

use std::sync::Arc;

use crate::factory::Shape;
use crate::value::Kind;

/// Boxed error produced by user factories and methods.
pub type BoxError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Formats an optional "did you mean" hint.
fn hint(suggestion: &Option<String>) -> String {
	suggestion
		.as_deref()
		.map(|s| format!(" (did you mean '{s}'?)"))
		.unwrap_or_default()
}

/// Failure to convert a [`Value`](crate::Value) into a Rust type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
	/// The value has a different kind than the target.
	#[error("expected {expected}, got {got}")]
	Mismatch { expected: Kind, got: Kind },
	/// The value does not fit the target type.
	#[error("{value} is out of range for {target}")]
	OutOfRange { value: String, target: &'static str },
	/// A string could not be parsed as the target kind.
	#[error("cannot parse '{input}' as {target}")]
	Parse { input: String, target: Kind },
	/// A map names a field the record does not expose.
	#[error("unknown field '{field}'")]
	UnknownField { field: String },
	/// A list element failed to convert.
	#[error("element {index}: {source}")]
	Element {
		index: usize,
		#[source]
		source: Box<ConvertError>,
	},
	/// A map entry failed to convert.
	#[error("entry '{key}': {source}")]
	Entry {
		key: String,
		#[source]
		source: Box<ConvertError>,
	},
	/// An option applier targets a different record type.
	#[error("option for '{got}' cannot be used where '{expected}' is expected")]
	OptionTarget {
		expected: &'static str,
		got: &'static str,
	},
	/// A handle or opaque value holds a different Rust type.
	#[error("value does not hold a {expected}")]
	Downcast { expected: &'static str },
}

/// Failure to import a candidate into the registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
	#[error("nothing to import")]
	Empty,
	#[error("cannot import nil")]
	Nil,
	/// The factory does not produce exactly one value.
	#[error("factory '{key}' must return exactly one value, returns {count}")]
	ReturnArity { key: String, count: usize },
	/// The factory's single return cannot back a handle.
	#[error("factory '{key}' returns {shape}; expected a pointer, reference or interface")]
	ReturnShape { key: String, shape: Shape },
	/// The candidate is neither a factory nor a record type.
	#[error("only func or struct type supported, got {kind}")]
	Unsupported { kind: Kind },
	/// The key already exists and the registry rejects duplicates.
	#[error("duplicate key '{key}'")]
	Duplicate { key: String },
}

/// Failure to resolve a registry key.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
	#[error("no entry for key '{key}'{}", hint(.suggestion))]
	NoEntry {
		key: String,
		suggestion: Option<String>,
	},
	#[error("no type found for '{key}'{}", hint(.suggestion))]
	NoType {
		key: String,
		suggestion: Option<String>,
	},
	/// The key names a factory where a record type is required.
	#[error("'{key}' is not a struct type")]
	NotStructType { key: String },
}

/// Failure to invoke a factory or method.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvokeError {
	#[error("func '{method}' not found on '{type_name}'")]
	MethodNotFound {
		method: String,
		type_name: &'static str,
	},
	#[error("{callee}: missing argument {index}")]
	MissingArgument { callee: String, index: usize },
	#[error("{callee}: expected {expected} argument(s), got {got}")]
	TooManyArguments {
		callee: String,
		expected: usize,
		got: usize,
	},
	#[error("{callee}: argument {index}: {source}")]
	Argument {
		callee: String,
		index: usize,
		#[source]
		source: ConvertError,
	},
	/// An argument aliases the instance the method is called on.
	#[error("{callee}: argument {index} is the receiver itself")]
	Reentrant { callee: String, index: usize },
	#[error("args should be a map when using struct '{key}'")]
	StructArgs { key: String },
	/// The factory or method returned an error of its own.
	#[error("{callee} failed: {source}")]
	Failed {
		callee: String,
		#[source]
		source: BoxError,
	},
	/// The produced value cannot be wrapped in a handle.
	#[error("{callee} returned {shape}, which cannot back a handle")]
	Unwrappable { callee: String, shape: Shape },
}

impl InvokeError {
	/// Builds a [`InvokeError::MethodNotFound`].
	pub fn method_not_found(method: &str, type_name: &'static str) -> Self {
		Self::MethodNotFound {
			method: method.to_string(),
			type_name,
		}
	}

	/// Builds a [`InvokeError::Failed`] for a callee's own error.
	pub fn failed(callee: impl Into<String>, source: BoxError) -> Self {
		Self::Failed {
			callee: callee.into(),
			source,
		}
	}
}

/// Failure to assign a field by name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssignError {
	/// The handle is frozen and cannot be mutated.
	#[error("'{type_name}' is not pointer-like and cannot be mutated")]
	NotPointer { type_name: &'static str },
	#[error("cannot find field '{field}' in '{type_name}'")]
	FieldNotFound {
		field: String,
		type_name: &'static str,
	},
	#[error("field '{field}' of '{type_name}' is not exported")]
	NotExported {
		field: String,
		type_name: &'static str,
	},
	#[error("field '{field}' cannot be set with {got} (declared {expected})")]
	KindMismatch {
		field: String,
		expected: Kind,
		got: Kind,
	},
	#[error("field '{field}': {source}")]
	Convert {
		field: String,
		#[source]
		source: ConvertError,
	},
	/// An option applier was applied to an instance of another type.
	#[error("option for '{expected}' cannot be applied to '{got}'")]
	TargetMismatch {
		expected: &'static str,
		got: &'static str,
	},
}

/// Failure to weakly decode a field map entry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
	#[error("cannot decode field '{field}' of '{type_name}': {source}")]
	Field {
		field: String,
		type_name: &'static str,
		#[source]
		source: ConvertError,
	},
}

/// Failure to parse configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid TOML: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Any failure surfaced by construction and option synthesis.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Import(#[from] ImportError),
	#[error(transparent)]
	Lookup(#[from] LookupError),
	#[error(transparent)]
	Invoke(#[from] InvokeError),
	#[error(transparent)]
	Assign(#[from] AssignError),
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
