//! Weak coercion between value kinds.
//!
//! Field maps usually come from loosely typed sources (configuration files,
//! JSON, user input), so decoding them accepts a value of a neighbouring kind
//! and converts it:
//!
//! - bools and numbers convert into each other (`true` is `1`)
//! - strings parse into bools and numbers; `""` is zero
//! - bools and numbers format into strings; bools become `"1"` / `"0"`
//! - floats truncate into integers when they fit
//! - any single value lifts into a one-element list
//! - an empty map becomes an empty list and vice versa
//! - a list of maps merges into one map

#[cfg(test)]
mod tests;

use crate::convert::{FromValue, IntoValue};
use crate::error::ConvertError;
use crate::value::{FieldMap, Kind, Value};

/// Coerces `value` towards `target`.
///
/// Values already of the target kind, and `Null`, pass through unchanged.
pub fn weak(value: Value, target: Kind) -> Result<Value, ConvertError> {
	if target.accepts(value.kind()) || value.is_null() {
		return Ok(value);
	}

	match target {
		Kind::Bool => to_bool(value),
		Kind::Int => to_int(value),
		Kind::Uint => to_uint(value),
		Kind::Float => to_float(value),
		Kind::String => to_string(value),
		Kind::List => Ok(to_list(value)),
		Kind::Map => to_map(value),
		_ => Err(mismatch(target, &value)),
	}
}

/// Weakly decodes `value` as `T` and converts it back, yielding a value that
/// converts strictly into `T`.
pub fn normalize<T: FromValue + IntoValue>(value: Value) -> Result<Value, ConvertError> {
	T::decode(value).map(IntoValue::into_value)
}

/// Parses a boolean from common string representations.
pub fn parse_bool(input: &str) -> Option<bool> {
	match input.trim().to_ascii_lowercase().as_str() {
		"true" | "t" | "1" | "yes" | "on" => Some(true),
		"false" | "f" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}

/// Splits an optional sign and radix prefix off an integer literal.
fn split_radix(input: &str) -> (bool, u32, &str) {
	let (negative, rest) = match input.as_bytes().first() {
		Some(b'-') => (true, &input[1..]),
		Some(b'+') => (false, &input[1..]),
		_ => (false, input),
	};
	let lower = rest.get(..2).map(str::to_ascii_lowercase);
	match lower.as_deref() {
		Some("0x") => (negative, 16, &rest[2..]),
		Some("0o") => (negative, 8, &rest[2..]),
		Some("0b") => (negative, 2, &rest[2..]),
		_ => (negative, 10, rest),
	}
}

/// Parses a signed integer, accepting `0x`, `0o` and `0b` prefixes and `_`
/// digit separators.
pub fn parse_int(input: &str) -> Option<i64> {
	let (negative, radix, digits) = split_radix(input.trim());
	let digits = digits.replace('_', "");
	if digits.is_empty() || digits.starts_with(['+', '-']) {
		return None;
	}
	let magnitude = u64::from_str_radix(&digits, radix).ok()?;
	if negative {
		0i64.checked_sub_unsigned(magnitude)
	} else {
		i64::try_from(magnitude).ok()
	}
}

/// Parses an unsigned integer with the same prefixes as [`parse_int`].
pub fn parse_uint(input: &str) -> Option<u64> {
	let (negative, radix, digits) = split_radix(input.trim());
	let digits = digits.replace('_', "");
	if negative || digits.is_empty() || digits.starts_with(['+', '-']) {
		return None;
	}
	u64::from_str_radix(&digits, radix).ok()
}

fn mismatch(expected: Kind, value: &Value) -> ConvertError {
	ConvertError::Mismatch {
		expected,
		got: value.kind(),
	}
}

fn parse_error(input: String, target: Kind) -> ConvertError {
	ConvertError::Parse { input, target }
}

fn to_bool(value: Value) -> Result<Value, ConvertError> {
	let v = match value {
		Value::Int(v) => v != 0,
		Value::Uint(v) => v != 0,
		Value::Float(v) => v != 0.0,
		Value::String(s) if s.is_empty() => false,
		Value::String(s) => parse_bool(&s).ok_or_else(|| parse_error(s, Kind::Bool))?,
		other => return Err(mismatch(Kind::Bool, &other)),
	};
	Ok(Value::Bool(v))
}

/// Truncates a float towards zero when the result fits in `[min, max)`.
fn truncate(v: f64, min: f64, max: f64, target: &'static str) -> Result<f64, ConvertError> {
	let t = v.trunc();
	if t.is_nan() || t < min || t >= max {
		return Err(ConvertError::OutOfRange {
			value: v.to_string(),
			target,
		});
	}
	Ok(t)
}

fn to_int(value: Value) -> Result<Value, ConvertError> {
	let v = match value {
		Value::Bool(v) => i64::from(v),
		Value::Uint(v) => i64::try_from(v).map_err(|_| ConvertError::OutOfRange {
			value: v.to_string(),
			target: "int",
		})?,
		Value::Float(v) => truncate(v, i64::MIN as f64, i64::MAX as f64, "int")? as i64,
		Value::String(s) if s.is_empty() => 0,
		Value::String(s) => parse_int(&s).ok_or_else(|| parse_error(s, Kind::Int))?,
		other => return Err(mismatch(Kind::Int, &other)),
	};
	Ok(Value::Int(v))
}

fn to_uint(value: Value) -> Result<Value, ConvertError> {
	let v = match value {
		Value::Bool(v) => u64::from(v),
		Value::Int(v) => u64::try_from(v).map_err(|_| ConvertError::OutOfRange {
			value: v.to_string(),
			target: "uint",
		})?,
		Value::Float(v) => truncate(v, 0.0, u64::MAX as f64, "uint")? as u64,
		Value::String(s) if s.is_empty() => 0,
		Value::String(s) => parse_uint(&s).ok_or_else(|| parse_error(s, Kind::Uint))?,
		other => return Err(mismatch(Kind::Uint, &other)),
	};
	Ok(Value::Uint(v))
}

fn to_float(value: Value) -> Result<Value, ConvertError> {
	let v = match value {
		Value::Bool(v) => f64::from(u8::from(v)),
		Value::Int(v) => v as f64,
		Value::Uint(v) => v as f64,
		Value::String(s) if s.is_empty() => 0.0,
		Value::String(s) => s
			.trim()
			.parse::<f64>()
			.map_err(|_| parse_error(s, Kind::Float))?,
		other => return Err(mismatch(Kind::Float, &other)),
	};
	Ok(Value::Float(v))
}

fn to_string(value: Value) -> Result<Value, ConvertError> {
	let v = match value {
		Value::Bool(true) => "1".to_string(),
		Value::Bool(false) => "0".to_string(),
		Value::Int(v) => v.to_string(),
		Value::Uint(v) => v.to_string(),
		Value::Float(v) => v.to_string(),
		other => return Err(mismatch(Kind::String, &other)),
	};
	Ok(Value::String(v))
}

fn to_list(value: Value) -> Value {
	match value {
		Value::Map(fields) if fields.is_empty() => Value::List(Vec::new()),
		other => Value::List(vec![other]),
	}
}

fn to_map(value: Value) -> Result<Value, ConvertError> {
	let items = match value {
		Value::List(items) => items,
		other => return Err(mismatch(Kind::Map, &other)),
	};
	let mut merged = FieldMap::new();
	for (index, item) in items.into_iter().enumerate() {
		match item {
			Value::Map(fields) => merged.merge(fields),
			other => {
				return Err(ConvertError::Element {
					index,
					source: Box::new(mismatch(Kind::Map, &other)),
				});
			}
		}
	}
	Ok(Value::Map(merged))
}
