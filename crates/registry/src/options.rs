//! Option appliers for functional-options construction.
//!
//! An [`OptionFunction`] mutates one record type. It is either synthesized
//! from a field map by [`Registry::make_option`](crate::Registry::make_option),
//! with every value decoded up front, or wraps a native closure built with
//! [`OptionFn::new`]. Factories take them as `OptionFn<T>` or
//! `Variadic<OptionFn<T>>` parameters.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{AssignError, ConvertError, DecodeError, Error};
use crate::handle::{Handle, Instance};
use crate::reflect::{Object, Record, TypeInfo};
use crate::value::FieldMap;
use crate::value::Value;

type NativeFn = dyn Fn(&mut dyn Object) + Send + Sync;

#[derive(Clone)]
enum Applier {
	/// Field names resolved and values decoded against the target type.
	Fields(Arc<[(&'static str, Value)]>),
	Native(Arc<NativeFn>),
}

/// Callable that populates an instance of one record type.
#[derive(Clone)]
pub struct OptionFunction {
	target: &'static TypeInfo,
	applier: Applier,
}

impl OptionFunction {
	/// Resolves and decodes `fields` against `target`.
	///
	/// Every key is resolved before any value is decoded, so an unknown or
	/// unexported name wins over a bad value. Keys match exactly, then
	/// case-insensitively. `Null` for a non-nullable field is dropped so the
	/// field keeps its current value.
	pub fn from_fields(target: &'static TypeInfo, fields: FieldMap) -> Result<Self, Error> {
		let mut matched = Vec::with_capacity(fields.len());
		for (key, value) in fields {
			let Some(field) = target.resolve_field(&key) else {
				return Err(AssignError::FieldNotFound {
					field: key,
					type_name: target.name,
				}
				.into());
			};
			if !field.exported {
				return Err(AssignError::NotExported {
					field: key,
					type_name: target.name,
				}
				.into());
			}
			matched.push((key, field, value));
		}

		let mut resolved = Vec::with_capacity(matched.len());
		for (key, field, value) in matched {
			if value.is_null() && !field.nullable {
				continue;
			}
			let value = field.decode(value).map_err(|source| DecodeError::Field {
				field: key,
				type_name: target.name,
				source,
			})?;
			resolved.push((field.name, value));
		}
		Ok(Self {
			target,
			applier: Applier::Fields(resolved.into()),
		})
	}

	/// Returns the record type this option applies to.
	pub fn target(&self) -> &'static TypeInfo {
		self.target
	}

	/// Applies the option to an instance of the target type.
	pub fn apply_to(&self, object: &mut dyn Object) -> Result<(), AssignError> {
		let info = object.info();
		if !info.same_type(self.target) {
			return Err(AssignError::TargetMismatch {
				expected: self.target.name,
				got: info.name,
			});
		}
		match &self.applier {
			Applier::Fields(fields) => {
				for (name, value) in fields.iter() {
					object
						.set(name, value.clone())
						.map_err(|source| AssignError::Convert {
							field: name.to_string(),
							source,
						})?;
				}
			}
			Applier::Native(apply) => apply(object),
		}
		Ok(())
	}

	/// Applies the option to the instance behind a shared handle.
	pub fn apply_handle(&self, handle: &Handle) -> Result<(), AssignError> {
		match handle.unwrap() {
			Instance::Shared(cell) => self.apply_to(&mut *cell.write()),
			Instance::Frozen(_) => Err(AssignError::NotPointer {
				type_name: handle.type_name(),
			}),
		}
	}

	/// Returns true if both are clones of the same option.
	pub fn ptr_eq(&self, other: &OptionFunction) -> bool {
		match (&self.applier, &other.applier) {
			(Applier::Fields(a), Applier::Fields(b)) => Arc::ptr_eq(a, b),
			(Applier::Native(a), Applier::Native(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl fmt::Debug for OptionFunction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("OptionFunction");
		s.field("target", &self.target.name);
		match &self.applier {
			Applier::Fields(fields) => s.field("fields", &fields.iter().map(|(n, _)| n).collect::<Vec<_>>()),
			Applier::Native(_) => s.field("native", &true),
		};
		s.finish()
	}
}

/// Typed view of an [`OptionFunction`] targeting `T`.
pub struct OptionFn<T> {
	inner: OptionFunction,
	_marker: PhantomData<fn(&mut T)>,
}

impl<T> OptionFn<T> {
	pub fn into_inner(self) -> OptionFunction {
		self.inner
	}

	pub fn as_function(&self) -> &OptionFunction {
		&self.inner
	}
}

impl<T: Record> OptionFn<T> {
	/// Wraps a native closure.
	pub fn new(apply: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
		let native = move |object: &mut dyn Object| {
			if let Some(target) = object.as_any_mut().downcast_mut::<T>() {
				apply(target);
			}
		};
		Self {
			inner: OptionFunction {
				target: T::type_info(),
				applier: Applier::Native(Arc::new(native)),
			},
			_marker: PhantomData,
		}
	}

	/// Checks that `option` targets `T`.
	pub fn from_function(option: OptionFunction) -> Result<Self, ConvertError> {
		let expected = T::type_info();
		if !option.target.same_type(expected) {
			return Err(ConvertError::OptionTarget {
				expected: expected.name,
				got: option.target.name,
			});
		}
		Ok(Self {
			inner: option,
			_marker: PhantomData,
		})
	}
}

impl<T: Object + Record> OptionFn<T> {
	/// Applies the option, logging instead of failing.
	///
	/// Synthesized options are decoded when created, so this only fails if a
	/// field's setter rejects the value.
	pub fn apply(&self, target: &mut T) {
		if let Err(err) = self.try_apply(target) {
			tracing::warn!(
				target_type = self.inner.target.name,
				error = %err,
				"option failed to apply"
			);
		}
	}

	pub fn try_apply(&self, target: &mut T) -> Result<(), AssignError> {
		self.inner.apply_to(target)
	}
}

impl<T> Clone for OptionFn<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
			_marker: PhantomData,
		}
	}
}

impl<T> fmt::Debug for OptionFn<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.inner.fmt(f)
	}
}
