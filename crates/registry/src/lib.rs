//! Name-keyed registry of factories and record types.
//!
//! The registry bridges a dynamic, string-keyed world with statically typed
//! construction:
//!
//! - [`Registry::import`] catalogs factory functions and `#[derive(Record)]`
//!   types under their Rust paths.
//! - [`Registry::construct`] builds an instance by key from positional
//!   arguments, or a record from a [`FieldMap`], and returns a [`Handle`].
//! - [`Handle::call`], [`Handle::assign`] and [`Handle::exported`] operate on
//!   the instance by name.
//! - [`Registry::make_option`] turns a [`FieldMap`] into an
//!   [`OptionFunction`] that factories accept as `OptionFn<T>` parameters.
//!
//! ```
//! use stagehand_registry::{Candidate, Registry, Record, Shared, args, fields, methods};
//!
//! #[derive(Debug, Default, Record)]
//! #[record(methods)]
//! pub struct Counter {
//! 	pub step: i64,
//! 	total: i64,
//! }
//!
//! #[methods]
//! impl Counter {
//! 	pub fn tick(&mut self) -> i64 {
//! 		self.total += self.step;
//! 		self.total
//! 	}
//! }
//!
//! fn new_counter(step: i64) -> Shared<Counter> {
//! 	Shared::new(Counter { step, total: 0 })
//! }
//!
//! let mut registry = Registry::new();
//! registry
//! 	.import([Candidate::function(new_counter), Candidate::record::<Counter>()])
//! 	.unwrap();
//!
//! let key = stagehand_registry::function_key(&new_counter);
//! let counter = registry.construct(key, args![2]).unwrap();
//! assert_eq!(counter.call("tick", args![]).unwrap(), args![2]);
//!
//! let from_map = registry
//! 	.construct(&Counter::type_info().key(), vec![fields! { "step" => 5 }.into()])
//! 	.unwrap();
//! assert_eq!(from_map.get("step"), Some(5.into()));
//! ```

extern crate self as stagehand_registry;

mod auto;
mod coerce;
mod config;
mod convert;
mod error;
mod factory;
mod handle;
mod macros;
mod options;
mod reflect;
mod registry;
mod shared;
mod value;

#[doc(hidden)]
pub use inventory;
pub use stagehand_macros::{Record, methods};

pub use auto::{ImportReg, global};
pub use coerce::{normalize, parse_bool, parse_int, parse_uint, weak};
pub use config::RegistryConfig;
pub use convert::{Extern, FromValue, IntoValue};
pub use error::{
	AssignError, BoxError, ConfigError, ConvertError, DecodeError, Error, ImportError,
	InvokeError, LookupError,
};
pub use factory::{
	Args, FromArgs, FunctionFactory, IntoFactory, IntoResults, IntoReturn, Param, Shape,
	Signature, Variadic, function_key,
};
pub use handle::{Handle, Instance};
pub use options::{OptionFn, OptionFunction};
pub use reflect::{
	Boxed, DecodeFn, FieldInfo, MethodInfo, Methods, Object, Receiver, Record, TypeInfo,
	decode_map,
};
pub use registry::{
	Candidate, Collision, Descriptor, DuplicatePolicy, InsertAction, Registry, SharedRegistry,
	TypeTemplate,
};
pub use shared::Shared;
pub use value::{FieldMap, Kind, Opaque, Value};
