//! Handles to constructed instances.

#[cfg(test)]
mod tests;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::convert::IntoValue;
use crate::error::{AssignError, InvokeError};
use crate::reflect::{Boxed, Object, Receiver, TypeInfo};
use crate::shared::Shared;
use crate::value::Value;

/// Erased instance behind a [`Handle`].
#[derive(Clone)]
pub enum Instance {
	/// Pointer-like instance; mutable and aliased by every clone.
	Shared(Arc<RwLock<dyn Object>>),
	/// Immutable instance produced from an `Arc` return.
	Frozen(Arc<dyn Object>),
}

impl Instance {
	/// Returns true for a frozen instance.
	pub fn is_frozen(&self) -> bool {
		matches!(self, Instance::Frozen(_))
	}
}

/// Uniform wrapper around a value produced by the registry.
///
/// Cloning a handle is cheap and aliases the same instance.
#[derive(Clone)]
pub struct Handle {
	instance: Instance,
	any: Arc<dyn Any + Send + Sync>,
	info: &'static TypeInfo,
}

impl Handle {
	/// Wraps a fresh value in a shared instance.
	pub fn new<T: Object>(value: T) -> Self {
		Self::from_shared(Shared::new(value))
	}

	/// Wraps an existing shared instance without copying it.
	pub fn from_shared<T: Object>(shared: Shared<T>) -> Self {
		let info = shared.read().info();
		Self {
			instance: Instance::Shared(shared.erase()),
			any: shared.0,
			info,
		}
	}

	/// Wraps an immutable instance.
	pub fn frozen<T: Object>(value: Arc<T>) -> Self {
		let info = value.info();
		Self {
			instance: Instance::Frozen(value.clone()),
			any: value,
			info,
		}
	}

	/// Wraps a boxed trait object in a shared instance.
	pub fn from_boxed(value: Box<dyn Object>) -> Self {
		Self::from_shared(Shared::new(Boxed(value)))
	}

	/// Returns the metadata of the wrapped type.
	pub fn info(&self) -> &'static TypeInfo {
		self.info
	}

	pub fn type_name(&self) -> &'static str {
		self.info.name
	}

	/// Returns true if the instance is immutable.
	pub fn is_frozen(&self) -> bool {
		self.instance.is_frozen()
	}

	/// Returns true if both handles wrap the same instance.
	pub fn ptr_eq(&self, other: &Handle) -> bool {
		Arc::ptr_eq(&self.any, &other.any)
	}

	/// Calls a method by name.
	///
	/// Frozen handles resolve `&self` methods only. A shared handle is locked
	/// for the duration of the call, so passing the handle to its own method
	/// fails with [`InvokeError::Reentrant`].
	pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, InvokeError> {
		tracing::trace!(type_name = self.info.name, method = name, args = args.len(), "call");
		match &self.instance {
			Instance::Shared(cell) => {
				if let Some(index) = args.iter().position(|arg| self.aliased_by(arg)) {
					return Err(InvokeError::Reentrant {
						callee: format!("{}.{name}", self.info.name),
						index,
					});
				}
				cell.write().invoke(name, args)
			}
			Instance::Frozen(value) => value.invoke_ref(name, args),
		}
	}

	/// Returns true if `value` holds this handle, at any depth.
	fn aliased_by(&self, value: &Value) -> bool {
		match value {
			Value::Object(handle) => self.ptr_eq(handle),
			Value::List(items) => items.iter().any(|item| self.aliased_by(item)),
			Value::Map(fields) => fields.iter().any(|(_, item)| self.aliased_by(item)),
			_ => false,
		}
	}

	/// Assigns an exported field by exact name.
	///
	/// The value must have the field's kind; range checks within the kind
	/// still apply.
	pub fn assign(&self, name: &str, value: impl IntoValue) -> Result<(), AssignError> {
		let type_name = self.info.name;
		let Instance::Shared(cell) = &self.instance else {
			return Err(AssignError::NotPointer { type_name });
		};
		let field = self.info.field(name).ok_or_else(|| AssignError::FieldNotFound {
			field: name.to_string(),
			type_name,
		})?;
		if !field.exported {
			return Err(AssignError::NotExported {
				field: name.to_string(),
				type_name,
			});
		}

		let value = value.into_value();
		if !field.accepts(&value) {
			return Err(AssignError::KindMismatch {
				field: name.to_string(),
				expected: field.kind,
				got: value.kind(),
			});
		}
		cell.write()
			.set(field.name, value)
			.map_err(|source| AssignError::Convert {
				field: name.to_string(),
				source,
			})
	}

	/// Reports whether `name` is an exported field or a callable method.
	pub fn exported(&self, name: &str) -> bool {
		if let Some(field) = self.info.field(name) {
			return field.exported;
		}
		let frozen = self.is_frozen();
		self.method_table()
			.iter()
			.any(|m| m.name == name && (!frozen || m.receiver == Receiver::Ref))
	}

	/// Reads an exported field by exact name.
	pub fn get(&self, name: &str) -> Option<Value> {
		if !self.info.has_exported(name) {
			return None;
		}
		match &self.instance {
			Instance::Shared(cell) => cell.read().field(name),
			Instance::Frozen(value) => value.field(name),
		}
	}

	/// Returns the erased instance.
	pub fn unwrap(&self) -> Instance {
		self.instance.clone()
	}

	/// Returns the shared instance as `T`, if it is one.
	pub fn downcast<T: Object>(&self) -> Option<Shared<T>> {
		match self.instance {
			Instance::Shared(_) => self.any.clone().downcast::<RwLock<T>>().ok().map(Shared),
			Instance::Frozen(_) => None,
		}
	}

	/// Returns the frozen instance as `T`, if it is one.
	pub fn downcast_frozen<T: Object>(&self) -> Option<Arc<T>> {
		match self.instance {
			Instance::Frozen(_) => self.any.clone().downcast::<T>().ok(),
			Instance::Shared(_) => None,
		}
	}

	/// Borrows the instance as `T`.
	///
	/// Works for every handle, including boxed and frozen ones.
	pub fn with<T: Any, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
		match &self.instance {
			Instance::Shared(cell) => cell.read().as_any().downcast_ref::<T>().map(f),
			Instance::Frozen(value) => value.as_any().downcast_ref::<T>().map(f),
		}
	}

	/// Mutably borrows a shared instance as `T`.
	pub fn with_mut<T: Any, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
		match &self.instance {
			Instance::Shared(cell) => cell.write().as_any_mut().downcast_mut::<T>().map(f),
			Instance::Frozen(_) => None,
		}
	}

	fn method_table(&self) -> &'static [crate::reflect::MethodInfo] {
		match &self.instance {
			Instance::Shared(cell) => cell.read().method_table(),
			Instance::Frozen(value) => value.method_table(),
		}
	}
}

impl fmt::Debug for Handle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Handle")
			.field("type", &self.info.name)
			.field("frozen", &self.is_frozen())
			.finish()
	}
}
