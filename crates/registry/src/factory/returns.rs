use std::fmt;
use std::sync::Arc;

use crate::convert::IntoValue;
use crate::error::{BoxError, InvokeError};
use crate::handle::Handle;
use crate::reflect::Object;
use crate::shared::Shared;
use crate::value::{Kind, Value};

/// How a single factory return relates to the produced instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
	/// `Shared<T>` or `Box<T>`: a mutable, addressable instance.
	Pointer,
	/// `Arc<T>`: an immutable shared instance.
	Reference,
	/// `Box<dyn Object>` or an existing [`Handle`].
	Interface,
	/// A record returned by value.
	Value,
	/// A plain data value.
	Primitive(Kind),
}

impl Shape {
	/// Returns true if a handle can be built from this shape.
	pub fn is_wrappable(self) -> bool {
		matches!(self, Shape::Pointer | Shape::Reference | Shape::Interface)
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Shape::Pointer => f.write_str("pointer"),
			Shape::Reference => f.write_str("reference"),
			Shape::Interface => f.write_str("interface"),
			Shape::Value => f.write_str("struct value"),
			Shape::Primitive(kind) => write!(f, "{kind}"),
		}
	}
}

/// Return type of a registered factory.
///
/// [`shapes`](Self::shapes) lists one entry per produced value; import
/// accepts a factory only when that is a single wrappable shape.
pub trait IntoReturn: Sized + 'static {
	fn shapes() -> Vec<Shape>;

	fn into_handle(self, callee: &str) -> Result<Handle, InvokeError>;
}

fn unwrappable(callee: &str, shape: Shape) -> InvokeError {
	InvokeError::Unwrappable {
		callee: callee.to_string(),
		shape,
	}
}

fn boxed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> BoxError {
	let err: Box<dyn std::error::Error + Send + Sync> = err.into();
	Arc::from(err)
}

impl<T: Object> IntoReturn for Shared<T> {
	fn shapes() -> Vec<Shape> {
		vec![Shape::Pointer]
	}

	fn into_handle(self, _callee: &str) -> Result<Handle, InvokeError> {
		Ok(Handle::from_shared(self))
	}
}

impl<T: Object> IntoReturn for Box<T> {
	fn shapes() -> Vec<Shape> {
		vec![Shape::Pointer]
	}

	fn into_handle(self, _callee: &str) -> Result<Handle, InvokeError> {
		Ok(Handle::new(*self))
	}
}

impl<T: Object> IntoReturn for Arc<T> {
	fn shapes() -> Vec<Shape> {
		vec![Shape::Reference]
	}

	fn into_handle(self, _callee: &str) -> Result<Handle, InvokeError> {
		Ok(Handle::frozen(self))
	}
}

impl IntoReturn for Box<dyn Object> {
	fn shapes() -> Vec<Shape> {
		vec![Shape::Interface]
	}

	fn into_handle(self, _callee: &str) -> Result<Handle, InvokeError> {
		Ok(Handle::from_boxed(self))
	}
}

impl IntoReturn for Handle {
	fn shapes() -> Vec<Shape> {
		vec![Shape::Interface]
	}

	fn into_handle(self, _callee: &str) -> Result<Handle, InvokeError> {
		Ok(self)
	}
}

impl<R, E> IntoReturn for Result<R, E>
where
	R: IntoReturn,
	E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
{
	fn shapes() -> Vec<Shape> {
		R::shapes()
	}

	fn into_handle(self, callee: &str) -> Result<Handle, InvokeError> {
		match self {
			Ok(value) => value.into_handle(callee),
			Err(err) => Err(InvokeError::failed(callee, boxed(err))),
		}
	}
}

macro_rules! primitive_returns {
	($($ty:ty => $kind:expr),* $(,)?) => {$(
		impl IntoReturn for $ty {
			fn shapes() -> Vec<Shape> {
				vec![Shape::Primitive($kind)]
			}

			fn into_handle(self, callee: &str) -> Result<Handle, InvokeError> {
				Err(unwrappable(callee, Shape::Primitive($kind)))
			}
		}
	)*};
}

primitive_returns!(
	bool => Kind::Bool,
	i8 => Kind::Int,
	i16 => Kind::Int,
	i32 => Kind::Int,
	i64 => Kind::Int,
	isize => Kind::Int,
	u8 => Kind::Uint,
	u16 => Kind::Uint,
	u32 => Kind::Uint,
	u64 => Kind::Uint,
	usize => Kind::Uint,
	f32 => Kind::Float,
	f64 => Kind::Float,
	String => Kind::String,
	&'static str => Kind::String,
	Value => Kind::Any,
);

impl IntoReturn for () {
	fn shapes() -> Vec<Shape> {
		Vec::new()
	}

	fn into_handle(self, callee: &str) -> Result<Handle, InvokeError> {
		Err(InvokeError::Unwrappable {
			callee: callee.to_string(),
			shape: Shape::Primitive(Kind::Null),
		})
	}
}

macro_rules! tuple_returns {
	($($name:ident),+) => {
		impl<$($name: IntoReturn),+> IntoReturn for ($($name,)+) {
			fn shapes() -> Vec<Shape> {
				let mut shapes = Vec::new();
				$(shapes.extend($name::shapes());)+
				shapes
			}

			fn into_handle(self, callee: &str) -> Result<Handle, InvokeError> {
				let shape = Self::shapes().first().copied().unwrap_or(Shape::Primitive(Kind::Null));
				Err(unwrappable(callee, shape))
			}
		}
	};
}

tuple_returns!(A, B);
tuple_returns!(A, B, C);
tuple_returns!(A, B, C, D);

/// Return type of a method exposed through `#[methods]`.
pub trait IntoResults {
	fn into_results(self, callee: &str) -> Result<Vec<Value>, InvokeError>;
}

impl IntoResults for () {
	fn into_results(self, _callee: &str) -> Result<Vec<Value>, InvokeError> {
		Ok(Vec::new())
	}
}

impl<T: IntoValue> IntoResults for T {
	fn into_results(self, _callee: &str) -> Result<Vec<Value>, InvokeError> {
		Ok(vec![self.into_value()])
	}
}

impl<T, E> IntoResults for Result<T, E>
where
	T: IntoResults,
	E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
	fn into_results(self, callee: &str) -> Result<Vec<Value>, InvokeError> {
		match self {
			Ok(value) => value.into_results(callee),
			Err(err) => Err(InvokeError::failed(callee, boxed(err))),
		}
	}
}

macro_rules! tuple_results {
	($($name:ident),+) => {
		impl<$($name: IntoValue),+> IntoResults for ($($name,)+) {
			#[allow(non_snake_case)]
			fn into_results(self, _callee: &str) -> Result<Vec<Value>, InvokeError> {
				let ($($name,)+) = self;
				Ok(vec![$($name.into_value()),+])
			}
		}
	};
}

tuple_results!(A, B);
tuple_results!(A, B, C);
tuple_results!(A, B, C, D);
