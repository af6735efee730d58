//! Serde support for [`Value`].
//!
//! Only data kinds round-trip. Handles, option appliers and opaque values are
//! process-local and refuse to serialize.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{FieldMap, Value};

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Null => serializer.serialize_unit(),
			Value::Bool(v) => serializer.serialize_bool(*v),
			Value::Int(v) => serializer.serialize_i64(*v),
			Value::Uint(v) => serializer.serialize_u64(*v),
			Value::Float(v) => serializer.serialize_f64(*v),
			Value::String(v) => serializer.serialize_str(v),
			Value::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Value::Map(fields) => {
				let mut map = serializer.serialize_map(Some(fields.len()))?;
				for (k, v) in fields {
					map.serialize_entry(k, v)?;
				}
				map.end()
			}
			other => Err(ser::Error::custom(format_args!(
				"cannot serialize {} value",
				other.type_name()
			))),
		}
	}
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a bool, number, string, list or map")
	}

	fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
		Ok(Value::Bool(v))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
		Ok(Value::Int(v))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
		Ok(i64::try_from(v).map_or(Value::Uint(v), Value::Int))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
		Ok(Value::Float(v))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
		Ok(Value::String(v.to_string()))
	}

	fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
		Ok(Value::String(v))
	}

	fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_none<E: de::Error>(self) -> Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
		Value::deserialize(deserializer)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(Value::List(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
		let mut fields = FieldMap::with_capacity(access.size_hint().unwrap_or(0));
		while let Some((key, value)) = access.next_entry::<String, Value>()? {
			fields.insert(key, value);
		}
		Ok(Value::Map(fields))
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(ValueVisitor)
	}
}
