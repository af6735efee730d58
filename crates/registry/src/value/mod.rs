//! Dynamically typed values exchanged with registered factories and records.
//!
//! A [`Value`] is what crosses the string-keyed boundary: positional factory
//! arguments, method arguments and results, and the entries of a [`FieldMap`].
//! Every value reports a [`Kind`], and kinds are what assignment checks compare.

mod codec;
mod map;


use std::any::Any;
use std::sync::Arc;

pub use map::FieldMap;

use crate::handle::Handle;
use crate::options::OptionFunction;

/// The basic kind of a [`Value`] or of a declared field or parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Absence of a value.
	Null,
	/// Boolean.
	Bool,
	/// Signed integer of any width.
	Int,
	/// Unsigned integer of any width.
	Uint,
	/// Floating point number.
	Float,
	/// UTF-8 string.
	String,
	/// Ordered list of values.
	List,
	/// String-keyed map of values (also the kind of nested records).
	Map,
	/// Handle to a constructed instance.
	Object,
	/// Option applier bound to a record type.
	Func,
	/// Arbitrary Rust value carried without interpretation.
	Opaque,
	/// Declared-only kind accepting every value.
	Any,
}

impl Kind {
	/// Returns the lowercase name used in error messages.
	pub fn name(self) -> &'static str {
		match self {
			Kind::Null => "null",
			Kind::Bool => "bool",
			Kind::Int => "int",
			Kind::Uint => "uint",
			Kind::Float => "float",
			Kind::String => "string",
			Kind::List => "list",
			Kind::Map => "map",
			Kind::Object => "object",
			Kind::Func => "func",
			Kind::Opaque => "opaque",
			Kind::Any => "any",
		}
	}

	/// Returns true if a value of kind `value` may be stored where `self` is declared.
	#[inline]
	pub fn accepts(self, value: Kind) -> bool {
		self == Kind::Any || self == value
	}

	/// Returns true for the scalar kinds that weak decoding converts between.
	#[inline]
	pub fn is_scalar(self) -> bool {
		matches!(
			self,
			Kind::Bool | Kind::Int | Kind::Uint | Kind::Float | Kind::String
		)
	}
}

impl std::fmt::Display for Kind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
	/// Absence of a value.
	#[default]
	Null,
	/// Boolean value.
	Bool(bool),
	/// Signed integer value.
	Int(i64),
	/// Unsigned integer value.
	Uint(u64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
	/// List of values.
	List(Vec<Value>),
	/// Field map.
	Map(FieldMap),
	/// Handle to a constructed instance.
	Object(Handle),
	/// Option applier.
	Func(OptionFunction),
	/// Uninterpreted Rust value.
	Opaque(Opaque),
}

impl Value {
	/// Wraps an arbitrary Rust value.
	pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
		Value::Opaque(Opaque::new(value))
	}

	/// Returns the kind of this value.
	pub fn kind(&self) -> Kind {
		match self {
			Value::Null => Kind::Null,
			Value::Bool(_) => Kind::Bool,
			Value::Int(_) => Kind::Int,
			Value::Uint(_) => Kind::Uint,
			Value::Float(_) => Kind::Float,
			Value::String(_) => Kind::String,
			Value::List(_) => Kind::List,
			Value::Map(_) => Kind::Map,
			Value::Object(_) => Kind::Object,
			Value::Func(_) => Kind::Func,
			Value::Opaque(_) => Kind::Opaque,
		}
	}

	/// Returns the kind name of this value.
	pub fn type_name(&self) -> &'static str {
		self.kind().name()
	}

	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the unsigned value if this is a `Uint` variant.
	pub fn as_uint(&self) -> Option<u64> {
		match self {
			Value::Uint(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the elements if this is a `List` variant.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the field map if this is a `Map` variant.
	pub fn as_map(&self) -> Option<&FieldMap> {
		match self {
			Value::Map(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the handle if this is an `Object` variant.
	pub fn as_object(&self) -> Option<&Handle> {
		match self {
			Value::Object(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the option applier if this is a `Func` variant.
	pub fn as_func(&self) -> Option<&OptionFunction> {
		match self {
			Value::Func(v) => Some(v),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Uint(a), Value::Uint(b)) => a == b,
			(Value::Float(a), Value::Float(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::List(a), Value::List(b)) => a == b,
			(Value::Map(a), Value::Map(b)) => a == b,
			(Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
			(Value::Func(a), Value::Func(b)) => a.ptr_eq(b),
			(Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(&a.value, &b.value),
			_ => false,
		}
	}
}

/// An arbitrary `Send + Sync` Rust value carried inside a [`Value`].
#[derive(Clone)]
pub struct Opaque {
	type_name: &'static str,
	value: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
	/// Wraps `value`, remembering its type name for diagnostics.
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self {
			type_name: std::any::type_name::<T>(),
			value: Arc::new(value),
		}
	}

	/// Wraps an already shared value.
	pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
		Self {
			type_name: std::any::type_name::<T>(),
			value,
		}
	}

	/// Returns the Rust type name of the wrapped value.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Borrows the wrapped value as `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.value.downcast_ref::<T>()
	}

	/// Returns a shared pointer to the wrapped value as `T`.
	pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		self.value.clone().downcast::<T>().ok()
	}
}

impl std::fmt::Debug for Opaque {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Opaque").field(&self.type_name).finish()
	}
}
