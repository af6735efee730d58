//! Construction by name and option synthesis.

use super::{Descriptor, Registry};
use crate::error::{Error, InvokeError, LookupError};
use crate::handle::Handle;
use crate::options::OptionFunction;
use crate::value::{FieldMap, Value};

impl Registry {
	/// Constructs an instance of the entry registered under `key`.
	///
	/// A function entry receives `args` positionally. A record entry takes
	/// either no arguments, yielding a `Default` instance, or a single map
	/// that is decoded into a fresh instance.
	pub fn construct(&self, key: &str, args: Vec<Value>) -> Result<Handle, Error> {
		let descriptor = self.get(key).ok_or_else(|| LookupError::NoEntry {
			key: key.to_string(),
			suggestion: self.suggest(key),
		})?;
		tracing::trace!(key, args = args.len(), "construct");

		match descriptor {
			Descriptor::Function(factory) => Ok(factory.invoke(args)?),
			Descriptor::Type(template) => {
				let handle = template.instantiate();
				let mut args = args.into_iter();
				match (args.next(), args.next()) {
					(None, _) => Ok(handle),
					(Some(Value::Map(fields)), None) => {
						let option = OptionFunction::from_fields(template.info, fields)?;
						option.apply_handle(&handle)?;
						Ok(handle)
					}
					_ => Err(InvokeError::StructArgs {
						key: key.to_string(),
					}
					.into()),
				}
			}
		}
	}

	/// Synthesizes an option that sets `fields` on the record registered under
	/// `key`.
	///
	/// Field names are validated and values decoded now, so a bad map fails
	/// here rather than when the option is applied.
	pub fn make_option(&self, key: &str, fields: FieldMap) -> Result<OptionFunction, Error> {
		match self.get(key) {
			Some(Descriptor::Type(template)) => OptionFunction::from_fields(template.info, fields),
			Some(Descriptor::Function(_)) => Err(LookupError::NotStructType {
				key: key.to_string(),
			}
			.into()),
			None => Err(LookupError::NoType {
				key: key.to_string(),
				suggestion: self.suggest(key),
			}
			.into()),
		}
	}
}
