//! Factory adapters.
//!
//! Any `Fn(A, B, ..) -> R` whose parameters implement [`FromArgs`] and whose
//! return implements [`IntoReturn`] becomes a [`FunctionFactory`]: a
//! signature describing it plus an erased call taking positional values.

mod args;
mod returns;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

pub use args::{Args, FromArgs, Variadic};
pub use returns::{IntoResults, IntoReturn, Shape};

use crate::error::InvokeError;
use crate::handle::Handle;
use crate::reflect::TypeInfo;
use crate::value::{Kind, Value};

/// A declared factory parameter.
#[derive(Debug, Clone, Copy)]
pub struct Param {
	pub kind: Kind,
	/// Collects all remaining arguments.
	pub variadic: bool,
	/// Record type configured by this parameter when it takes options.
	pub option_target: Option<&'static TypeInfo>,
}

/// Parameter and return description of a factory.
#[derive(Debug, Clone)]
pub struct Signature {
	pub params: Vec<Param>,
	/// One shape per produced value.
	pub returns: Vec<Shape>,
}

impl Signature {
	/// Returns the record type targeted by the first option parameter.
	pub fn option_target(&self) -> Option<&'static TypeInfo> {
		self.params.iter().find_map(|p| p.option_target)
	}

	/// Returns true if the last parameter is variadic.
	pub fn is_variadic(&self) -> bool {
		self.params.last().is_some_and(|p| p.variadic)
	}
}

type ErasedCall = dyn Fn(Args) -> Result<Handle, InvokeError> + Send + Sync;

/// Conversion of a function into an erased factory.
///
/// `Marker` only disambiguates the blanket impls per arity.
pub trait IntoFactory<Marker>: Send + Sync + 'static {
	fn signature() -> Signature;

	fn into_call(self) -> Arc<ErasedCall>;
}

macro_rules! impl_into_factory {
	($($arg:ident),*) => {
		impl<Func, Ret, $($arg,)*> IntoFactory<fn($($arg,)*) -> Ret> for Func
		where
			Func: Fn($($arg),*) -> Ret + Send + Sync + 'static,
			Ret: IntoReturn,
			$($arg: FromArgs + 'static,)*
		{
			fn signature() -> Signature {
				Signature {
					params: vec![$(<$arg as FromArgs>::param()),*],
					returns: Ret::shapes(),
				}
			}

			#[allow(non_snake_case, unused_mut)]
			fn into_call(self) -> Arc<ErasedCall> {
				Arc::new(move |mut args: Args| {
					$(let $arg = <$arg as FromArgs>::from_args(&mut args)?;)*
					let callee = args.finish()?;
					(self)($($arg),*).into_handle(&callee)
				})
			}
		}
	};
}

impl_into_factory!();
impl_into_factory!(A);
impl_into_factory!(A, B);
impl_into_factory!(A, B, C);
impl_into_factory!(A, B, C, D);
impl_into_factory!(A, B, C, D, E);
impl_into_factory!(A, B, C, D, E, F);

/// Returns the registry key of a function item or closure.
pub fn function_key<F>(_: &F) -> &'static str {
	std::any::type_name::<F>()
}

/// An erased factory ready to be invoked with positional values.
#[derive(Clone)]
pub struct FunctionFactory {
	key: String,
	signature: Signature,
	call: Arc<ErasedCall>,
}

impl FunctionFactory {
	pub fn new<F, M>(key: impl Into<String>, factory: F) -> Self
	where
		F: IntoFactory<M>,
	{
		Self {
			key: key.into(),
			signature: F::signature(),
			call: factory.into_call(),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn signature(&self) -> &Signature {
		&self.signature
	}

	/// Invokes the factory with strict positional conversion.
	pub fn invoke(&self, args: Vec<Value>) -> Result<Handle, InvokeError> {
		(self.call)(Args::new(self.key.as_str(), args))
	}
}

impl fmt::Debug for FunctionFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FunctionFactory")
			.field("key", &self.key)
			.field("signature", &self.signature)
			.finish()
	}
}
