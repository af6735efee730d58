use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::reflect::Object;

/// Shared, mutable instance: the pointer return of a factory.
///
/// Every clone aliases the same value, so a field assigned through a handle
/// is visible through every `Shared` obtained from it.
pub struct Shared<T: ?Sized>(pub(crate) Arc<RwLock<T>>);

impl<T> Shared<T> {
	pub fn new(value: T) -> Self {
		Self(Arc::new(RwLock::new(value)))
	}
}

impl<T: ?Sized> Shared<T> {
	pub fn read(&self) -> RwLockReadGuard<'_, T> {
		self.0.read()
	}

	pub fn write(&self) -> RwLockWriteGuard<'_, T> {
		self.0.write()
	}

	/// Returns true if both point to the same instance.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl<T: Object> Shared<T> {
	/// Erases the concrete type, keeping the allocation.
	pub fn erase(&self) -> Arc<RwLock<dyn Object>> {
		self.0.clone()
	}
}

impl<T: ?Sized> Clone for Shared<T> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}

impl<T: Default> Default for Shared<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Shared<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Shared").field(&self.0).finish()
	}
}
