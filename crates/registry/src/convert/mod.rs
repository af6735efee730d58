//! Conversions between Rust types and [`Value`].
//!
//! [`FromValue::from_value`] is strict: the value must already have the
//! declared [`Kind`] and fit the target's range. [`FromValue::decode`] runs
//! weak coercion first and is what field maps go through.

#[cfg(test)]
mod tests;

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::ops::Deref;
use std::sync::Arc;

use crate::coerce;
use crate::error::ConvertError;
use crate::handle::Handle;
use crate::options::{OptionFn, OptionFunction};
use crate::reflect::{Object, Record, TypeInfo};
use crate::shared::Shared;
use crate::value::{FieldMap, Kind, Opaque, Value};

/// Builds a Rust value out of a [`Value`].
pub trait FromValue: Sized {
	/// Kind a value must have to convert strictly.
	const KIND: Kind;

	/// Whether `Null` is a meaningful value for this type.
	const NULLABLE: bool = false;

	/// Record type targeted by option parameters of this type.
	fn target() -> Option<&'static TypeInfo> {
		None
	}

	/// Converts a value of exactly [`Self::KIND`].
	fn from_value(value: Value) -> Result<Self, ConvertError>;

	/// Converts after weak coercion towards [`Self::KIND`].
	fn decode(value: Value) -> Result<Self, ConvertError> {
		Self::from_value(coerce::weak(value, Self::KIND)?)
	}
}

/// Turns a Rust value into a [`Value`].
pub trait IntoValue {
	fn into_value(self) -> Value;
}

/// Arbitrary shared Rust value passed through the registry untouched.
///
/// Converts to and from [`Value::Opaque`]; use it for parameters and fields
/// whose type has no value representation, such as clients or callbacks.
#[derive(Debug)]
pub struct Extern<T>(pub Arc<T>);

impl<T> Extern<T> {
	pub fn new(value: T) -> Self {
		Self(Arc::new(value))
	}
}

impl<T> Clone for Extern<T> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}

impl<T> Deref for Extern<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.0
	}
}

impl<T: Default> Default for Extern<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

/// Identity comparison, like [`Value::Opaque`].
impl<T> PartialEq for Extern<T> {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

fn mismatch(expected: Kind, value: &Value) -> ConvertError {
	ConvertError::Mismatch {
		expected,
		got: value.kind(),
	}
}

fn out_of_range(value: impl ToString, target: &'static str) -> ConvertError {
	ConvertError::OutOfRange {
		value: value.to_string(),
		target,
	}
}

impl FromValue for Value {
	const KIND: Kind = Kind::Any;
	const NULLABLE: bool = true;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		Ok(value)
	}

	fn decode(value: Value) -> Result<Self, ConvertError> {
		Ok(value)
	}
}

impl IntoValue for Value {
	fn into_value(self) -> Value {
		self
	}
}

impl FromValue for bool {
	const KIND: Kind = Kind::Bool;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Bool(v) => Ok(v),
			other => Err(mismatch(Kind::Bool, &other)),
		}
	}
}

impl IntoValue for bool {
	fn into_value(self) -> Value {
		Value::Bool(self)
	}
}

macro_rules! int_values {
	($($ty:ty),* $(,)?) => {$(
		impl FromValue for $ty {
			const KIND: Kind = Kind::Int;

			fn from_value(value: Value) -> Result<Self, ConvertError> {
				match value {
					Value::Int(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, stringify!($ty))),
					other => Err(mismatch(Kind::Int, &other)),
				}
			}
		}

		impl IntoValue for $ty {
			fn into_value(self) -> Value {
				Value::Int(self as i64)
			}
		}
	)*};
}

macro_rules! uint_values {
	($($ty:ty),* $(,)?) => {$(
		impl FromValue for $ty {
			const KIND: Kind = Kind::Uint;

			fn from_value(value: Value) -> Result<Self, ConvertError> {
				match value {
					Value::Uint(v) => <$ty>::try_from(v).map_err(|_| out_of_range(v, stringify!($ty))),
					other => Err(mismatch(Kind::Uint, &other)),
				}
			}
		}

		impl IntoValue for $ty {
			fn into_value(self) -> Value {
				Value::Uint(self as u64)
			}
		}
	)*};
}

int_values!(i8, i16, i32, i64, isize);
uint_values!(u8, u16, u32, u64, usize);

impl FromValue for f64 {
	const KIND: Kind = Kind::Float;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Float(v) => Ok(v),
			other => Err(mismatch(Kind::Float, &other)),
		}
	}
}

impl FromValue for f32 {
	const KIND: Kind = Kind::Float;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Float(v) if v.is_finite() && v.abs() > f32::MAX as f64 => {
				Err(out_of_range(v, "f32"))
			}
			Value::Float(v) => Ok(v as f32),
			other => Err(mismatch(Kind::Float, &other)),
		}
	}
}

impl IntoValue for f64 {
	fn into_value(self) -> Value {
		Value::Float(self)
	}
}

impl IntoValue for f32 {
	fn into_value(self) -> Value {
		Value::Float(self as f64)
	}
}

impl FromValue for String {
	const KIND: Kind = Kind::String;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::String(v) => Ok(v),
			other => Err(mismatch(Kind::String, &other)),
		}
	}
}

impl IntoValue for String {
	fn into_value(self) -> Value {
		Value::String(self)
	}
}

impl IntoValue for &str {
	fn into_value(self) -> Value {
		Value::String(self.to_string())
	}
}

impl<T: FromValue> FromValue for Option<T> {
	const KIND: Kind = T::KIND;
	const NULLABLE: bool = true;

	fn target() -> Option<&'static TypeInfo> {
		T::target()
	}

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Null => Ok(None),
			other => T::from_value(other).map(Some),
		}
	}

	fn decode(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Null => Ok(None),
			other => T::decode(other).map(Some),
		}
	}
}

impl<T: IntoValue> IntoValue for Option<T> {
	fn into_value(self) -> Value {
		self.map_or(Value::Null, IntoValue::into_value)
	}
}

fn convert_items<T>(
	items: Vec<Value>,
	convert: fn(Value) -> Result<T, ConvertError>,
) -> Result<Vec<T>, ConvertError> {
	items
		.into_iter()
		.enumerate()
		.map(|(index, item)| {
			convert(item).map_err(|source| ConvertError::Element {
				index,
				source: Box::new(source),
			})
		})
		.collect()
}

fn convert_entries<T, C: FromIterator<(String, T)>>(
	fields: FieldMap,
	convert: fn(Value) -> Result<T, ConvertError>,
) -> Result<C, ConvertError> {
	fields
		.into_iter()
		.map(|(key, value)| match convert(value) {
			Ok(v) => Ok((key, v)),
			Err(source) => Err(ConvertError::Entry {
				key,
				source: Box::new(source),
			}),
		})
		.collect()
}

impl<T: FromValue> FromValue for Vec<T> {
	const KIND: Kind = Kind::List;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::List(items) => convert_items(items, T::from_value),
			other => Err(mismatch(Kind::List, &other)),
		}
	}

	fn decode(value: Value) -> Result<Self, ConvertError> {
		match coerce::weak(value, Kind::List)? {
			Value::List(items) => convert_items(items, T::decode),
			other => Err(mismatch(Kind::List, &other)),
		}
	}
}

impl<T: IntoValue> IntoValue for Vec<T> {
	fn into_value(self) -> Value {
		Value::List(self.into_iter().map(IntoValue::into_value).collect())
	}
}

macro_rules! map_values {
	($($map:ident),*) => {$(
		impl<T: FromValue> FromValue for $map<String, T> {
			const KIND: Kind = Kind::Map;

			fn from_value(value: Value) -> Result<Self, ConvertError> {
				match value {
					Value::Map(fields) => convert_entries(fields, T::from_value),
					other => Err(mismatch(Kind::Map, &other)),
				}
			}

			fn decode(value: Value) -> Result<Self, ConvertError> {
				match coerce::weak(value, Kind::Map)? {
					Value::Map(fields) => convert_entries(fields, T::decode),
					other => Err(mismatch(Kind::Map, &other)),
				}
			}
		}

		impl<T: IntoValue> IntoValue for $map<String, T> {
			fn into_value(self) -> Value {
				Value::Map(self.into_iter().map(|(k, v)| (k, v.into_value())).collect())
			}
		}
	)*};
}

map_values!(HashMap, BTreeMap);

impl FromValue for FieldMap {
	const KIND: Kind = Kind::Map;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Map(fields) => Ok(fields),
			other => Err(mismatch(Kind::Map, &other)),
		}
	}
}

impl IntoValue for FieldMap {
	fn into_value(self) -> Value {
		Value::Map(self)
	}
}

impl FromValue for Handle {
	const KIND: Kind = Kind::Object;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Object(handle) => Ok(handle),
			other => Err(mismatch(Kind::Object, &other)),
		}
	}
}

impl IntoValue for Handle {
	fn into_value(self) -> Value {
		Value::Object(self)
	}
}

impl<T: Object> FromValue for Shared<T> {
	const KIND: Kind = Kind::Object;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Object(handle) => handle.downcast::<T>().ok_or(ConvertError::Downcast {
				expected: std::any::type_name::<T>(),
			}),
			other => Err(mismatch(Kind::Object, &other)),
		}
	}
}

impl<T: Object> IntoValue for Shared<T> {
	fn into_value(self) -> Value {
		Value::Object(Handle::from_shared(self))
	}
}

impl FromValue for OptionFunction {
	const KIND: Kind = Kind::Func;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Func(option) => Ok(option),
			other => Err(mismatch(Kind::Func, &other)),
		}
	}
}

impl IntoValue for OptionFunction {
	fn into_value(self) -> Value {
		Value::Func(self)
	}
}

impl<T: Record> FromValue for OptionFn<T> {
	const KIND: Kind = Kind::Func;

	fn target() -> Option<&'static TypeInfo> {
		Some(T::type_info())
	}

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Func(option) => OptionFn::from_function(option),
			other => Err(mismatch(Kind::Func, &other)),
		}
	}
}

impl<T> IntoValue for OptionFn<T> {
	fn into_value(self) -> Value {
		Value::Func(self.into_inner())
	}
}

impl<T: Any + Send + Sync> FromValue for Extern<T> {
	const KIND: Kind = Kind::Opaque;

	fn from_value(value: Value) -> Result<Self, ConvertError> {
		match value {
			Value::Opaque(opaque) => opaque.downcast::<T>().map(Extern).ok_or(ConvertError::Downcast {
				expected: std::any::type_name::<T>(),
			}),
			other => Err(mismatch(Kind::Opaque, &other)),
		}
	}
}

impl<T: Any + Send + Sync> IntoValue for Extern<T> {
	fn into_value(self) -> Value {
		Value::Opaque(Opaque::from_arc(self.0))
	}
}

macro_rules! value_from {
	($($ty:ty),* $(,)?) => {$(
		impl From<$ty> for Value {
			fn from(value: $ty) -> Self {
				IntoValue::into_value(value)
			}
		}
	)*};
}

value_from!(
	bool,
	i8,
	i16,
	i32,
	i64,
	isize,
	u8,
	u16,
	u32,
	u64,
	usize,
	f32,
	f64,
	String,
	&str,
	FieldMap,
	Handle,
	OptionFunction,
	Vec<Value>,
);
