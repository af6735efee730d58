use crate::convert::FromValue;
use crate::error::InvokeError;
use crate::value::Value;

use super::Param;

/// Positional arguments being consumed by a factory or method.
pub struct Args {
	callee: String,
	values: std::vec::IntoIter<Value>,
	total: usize,
	consumed: usize,
}

impl Args {
	pub fn new(callee: impl Into<String>, values: Vec<Value>) -> Self {
		Self {
			callee: callee.into(),
			total: values.len(),
			values: values.into_iter(),
			consumed: 0,
		}
	}

	pub fn callee(&self) -> &str {
		&self.callee
	}

	/// Converts the next argument strictly.
	pub fn next<T: FromValue>(&mut self) -> Result<T, InvokeError> {
		let index = self.consumed;
		let value = self
			.values
			.next()
			.ok_or_else(|| InvokeError::MissingArgument {
				callee: self.callee.clone(),
				index,
			})?;
		self.consumed += 1;
		T::from_value(value).map_err(|source| InvokeError::Argument {
			callee: self.callee.clone(),
			index,
			source,
		})
	}

	/// Converts every remaining argument.
	pub fn rest<T: FromValue>(&mut self) -> Result<Vec<T>, InvokeError> {
		let mut out = Vec::with_capacity(self.values.len());
		while !self.values.as_slice().is_empty() {
			out.push(self.next()?);
		}
		Ok(out)
	}

	/// Fails if arguments remain; returns the callee name.
	pub fn finish(self) -> Result<String, InvokeError> {
		if !self.values.as_slice().is_empty() {
			return Err(InvokeError::TooManyArguments {
				callee: self.callee,
				expected: self.consumed,
				got: self.total,
			});
		}
		Ok(self.callee)
	}
}

/// Trailing parameter that collects all remaining arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Variadic<T>(pub Vec<T>);

impl<T> Variadic<T> {
	pub fn into_inner(self) -> Vec<T> {
		self.0
	}
}

impl<T> std::ops::Deref for Variadic<T> {
	type Target = [T];

	fn deref(&self) -> &[T] {
		&self.0
	}
}

impl<T> IntoIterator for Variadic<T> {
	type Item = T;
	type IntoIter = std::vec::IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// A factory or method parameter.
pub trait FromArgs: Sized {
	fn param() -> Param;

	fn from_args(args: &mut Args) -> Result<Self, InvokeError>;
}

impl<T: FromValue> FromArgs for T {
	fn param() -> Param {
		Param {
			kind: T::KIND,
			variadic: false,
			option_target: T::target(),
		}
	}

	fn from_args(args: &mut Args) -> Result<Self, InvokeError> {
		args.next()
	}
}

impl<T: FromValue> FromArgs for Variadic<T> {
	fn param() -> Param {
		Param {
			kind: T::KIND,
			variadic: true,
			option_target: T::target(),
		}
	}

	fn from_args(args: &mut Args) -> Result<Self, InvokeError> {
		args.rest().map(Variadic)
	}
}
