//! Runtime type metadata and the object-safe view of records.
//!
//! `#[derive(Record)]` produces a static [`TypeInfo`] plus name-keyed field
//! access; `#[methods]` produces name-keyed method dispatch. [`Object`] ties
//! both together behind a trait object so handles can hold any record.

use std::any::{Any, TypeId};

use crate::error::{ConvertError, InvokeError};
use crate::value::{FieldMap, Kind, Value};

/// Decoder that weakly converts a value into the declared field type.
pub type DecodeFn = fn(Value) -> Result<Value, ConvertError>;

/// Static description of a record type.
#[derive(Debug)]
pub struct TypeInfo {
	/// Type name as written in source.
	pub name: &'static str,
	/// `module_path!()` of the declaring module.
	pub module_path: &'static str,
	pub type_id: fn() -> TypeId,
	/// All fields in declaration order, exported or not.
	pub fields: &'static [FieldInfo],
}

impl TypeInfo {
	/// Returns the registry key of this type.
	pub fn key(&self) -> String {
		format!("{}::{}", self.module_path, self.name)
	}

	/// Returns true if this describes `T`.
	#[inline]
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		(self.type_id)() == TypeId::of::<T>()
	}

	/// Returns true if both describe the same Rust type.
	#[inline]
	pub fn same_type(&self, other: &TypeInfo) -> bool {
		(self.type_id)() == (other.type_id)()
	}

	/// Looks up a field by its exact name.
	pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
		self.fields.iter().find(|f| f.name == name)
	}

	/// Looks up a field by exact name, then ignoring ASCII case.
	pub fn resolve_field(&self, name: &str) -> Option<&'static FieldInfo> {
		self.field(name).or_else(|| {
			self.fields
				.iter()
				.find(|f| f.name.eq_ignore_ascii_case(name))
		})
	}

	/// Returns true if `name` is an exported field.
	pub fn has_exported(&self, name: &str) -> bool {
		self.field(name).is_some_and(|f| f.exported)
	}
}

/// Static description of a record field.
#[derive(Debug)]
pub struct FieldInfo {
	pub name: &'static str,
	pub kind: Kind,
	pub exported: bool,
	/// Whether the field accepts `Null` (an `Option` or a raw [`Value`]).
	pub nullable: bool,
	decode: Option<DecodeFn>,
}

impl FieldInfo {
	/// Describes a field that can be read and set by name.
	pub const fn exported(name: &'static str, kind: Kind, nullable: bool, decode: DecodeFn) -> Self {
		Self {
			name,
			kind,
			exported: true,
			nullable,
			decode: Some(decode),
		}
	}

	/// Describes a private or skipped field.
	pub const fn hidden(name: &'static str) -> Self {
		Self {
			name,
			kind: Kind::Any,
			exported: false,
			nullable: false,
			decode: None,
		}
	}

	/// Weakly decodes `value` into a value that [`Record::set_field`] accepts.
	pub fn decode(&self, value: Value) -> Result<Value, ConvertError> {
		match self.decode {
			Some(decode) => decode(value),
			None => Err(ConvertError::UnknownField {
				field: self.name.to_string(),
			}),
		}
	}

	/// Returns true if `value` may be assigned without conversion across kinds.
	pub fn accepts(&self, value: &Value) -> bool {
		match value {
			Value::Null => self.nullable,
			other => self.kind.accepts(other.kind()),
		}
	}
}

/// Receiver of a method exposed through `#[methods]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
	/// `&self`; callable on every handle.
	Ref,
	/// `&mut self`; callable only on shared handles.
	Mut,
}

/// Static description of a callable method.
#[derive(Debug, Clone, Copy)]
pub struct MethodInfo {
	pub name: &'static str,
	pub receiver: Receiver,
	/// Number of declared parameters, not counting the receiver.
	pub arity: usize,
}

/// A struct whose fields can be read and written by name.
///
/// Implemented by `#[derive(Record)]`.
pub trait Record: Sized + Send + Sync + 'static {
	fn type_info() -> &'static TypeInfo;

	/// Reads an exported field.
	fn get_field(&self, name: &str) -> Option<Value>;

	/// Writes an exported field. `value` must already have the field's kind.
	fn set_field(&mut self, name: &str, value: Value) -> Result<(), ConvertError>;
}

/// Name-keyed method dispatch.
///
/// Implemented by `#[methods]` on an inherent impl block, or left empty by
/// `#[derive(Record)]` when the type has no callable methods.
pub trait Methods: Record {
	fn methods() -> &'static [MethodInfo] {
		&[]
	}

	/// Calls any method, `&self` or `&mut self`.
	fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, InvokeError> {
		let _ = args;
		Err(InvokeError::method_not_found(name, Self::type_info().name))
	}

	/// Calls a `&self` method.
	fn call_ref(&self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, InvokeError> {
		let _ = args;
		Err(InvokeError::method_not_found(name, Self::type_info().name))
	}
}

/// Object-safe view of a record with methods.
pub trait Object: Send + Sync + 'static {
	fn info(&self) -> &'static TypeInfo;

	fn field(&self, name: &str) -> Option<Value>;

	fn set(&mut self, name: &str, value: Value) -> Result<(), ConvertError>;

	fn method_table(&self) -> &'static [MethodInfo];

	fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, InvokeError>;

	fn invoke_ref(&self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, InvokeError>;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Record + Methods> Object for T {
	fn info(&self) -> &'static TypeInfo {
		T::type_info()
	}

	fn field(&self, name: &str) -> Option<Value> {
		Record::get_field(self, name)
	}

	fn set(&mut self, name: &str, value: Value) -> Result<(), ConvertError> {
		Record::set_field(self, name, value)
	}

	fn method_table(&self) -> &'static [MethodInfo] {
		T::methods()
	}

	fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, InvokeError> {
		Methods::call(self, name, args)
	}

	fn invoke_ref(&self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, InvokeError> {
		Methods::call_ref(self, name, args)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Owns a boxed object so interface returns can live in a handle.
pub struct Boxed(pub Box<dyn Object>);

impl Object for Boxed {
	fn info(&self) -> &'static TypeInfo {
		self.0.info()
	}

	fn field(&self, name: &str) -> Option<Value> {
		self.0.field(name)
	}

	fn set(&mut self, name: &str, value: Value) -> Result<(), ConvertError> {
		self.0.set(name, value)
	}

	fn method_table(&self) -> &'static [MethodInfo] {
		self.0.method_table()
	}

	fn invoke(&mut self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, InvokeError> {
		self.0.invoke(name, args)
	}

	fn invoke_ref(&self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, InvokeError> {
		self.0.invoke_ref(name, args)
	}

	fn as_any(&self) -> &dyn Any {
		self.0.as_any()
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self.0.as_any_mut()
	}
}

/// Weakly decodes `fields` into `target`, resolving keys exactly and then
/// case-insensitively.
///
/// `Null` leaves non-nullable fields untouched. Used by derived
/// [`FromValue`](crate::FromValue) impls for nested records.
pub fn decode_map(target: &mut dyn Object, fields: FieldMap) -> Result<(), ConvertError> {
	let info = target.info();
	for (key, value) in fields {
		let Some(field) = info.resolve_field(&key).filter(|f| f.exported) else {
			return Err(ConvertError::UnknownField { field: key });
		};
		if value.is_null() && !field.nullable {
			continue;
		}
		let entry = |source| ConvertError::Entry {
			key: key.clone(),
			source: Box::new(source),
		};
		let value = field.decode(value).map_err(entry)?;
		target.set(field.name, value).map_err(entry)?;
	}
	Ok(())
}
