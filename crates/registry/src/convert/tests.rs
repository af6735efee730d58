use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[test]
fn strict_conversion_checks_kind() {
	assert_eq!(i32::from_value(Value::Int(4)), Ok(4));
	assert_eq!(
		i32::from_value(Value::Uint(4)),
		Err(ConvertError::Mismatch {
			expected: Kind::Int,
			got: Kind::Uint,
		})
	);
	assert_eq!(
		String::from_value(Value::Bool(true)),
		Err(ConvertError::Mismatch {
			expected: Kind::String,
			got: Kind::Bool,
		})
	);
}

#[rstest]
#[case(Value::Int(128))]
#[case(Value::Int(-129))]
fn narrow_ints_range_check(#[case] value: Value) {
	assert!(matches!(i8::from_value(value), Err(ConvertError::OutOfRange { target: "i8", .. })));
}

#[test]
fn f32_rejects_overflow() {
	assert_eq!(f32::from_value(Value::Float(1.5)), Ok(1.5));
	assert!(matches!(f32::from_value(Value::Float(1e300)), Err(ConvertError::OutOfRange { .. })));
	assert!(f32::from_value(Value::Float(f64::INFINITY)).unwrap().is_infinite());
}

#[test]
fn decode_goes_through_weak_coercion() {
	assert_eq!(u32::decode(Value::String("7".into())), Ok(7));
	assert_eq!(bool::decode(Value::Int(1)), Ok(true));
	assert_eq!(String::decode(Value::Uint(9)), Ok("9".to_string()));
}

#[test]
fn option_maps_null() {
	assert_eq!(Option::<i64>::from_value(Value::Null), Ok(None));
	assert_eq!(Option::<i64>::from_value(Value::Int(1)), Ok(Some(1)));
	assert_eq!(Option::<i64>::decode(Value::String("2".into())), Ok(Some(2)));
	assert!(Option::<i64>::NULLABLE);
	assert!(!i64::NULLABLE);
	assert_eq!(Option::<i64>::KIND, Kind::Int);
	assert_eq!(Some(3i64).into_value(), Value::Int(3));
	assert_eq!(None::<i64>.into_value(), Value::Null);
}

#[test]
fn vec_reports_failing_element() {
	let err = Vec::<i64>::from_value(Value::List(vec![Value::Int(1), Value::Bool(false)])).unwrap_err();
	assert_eq!(
		err,
		ConvertError::Element {
			index: 1,
			source: Box::new(ConvertError::Mismatch {
				expected: Kind::Int,
				got: Kind::Bool,
			}),
		}
	);
}

#[test]
fn vec_decode_lifts_scalar() {
	assert_eq!(Vec::<String>::decode(Value::String("a".into())), Ok(vec!["a".to_string()]));
}

#[test]
fn maps_convert_entries() {
	let mut fields = FieldMap::new();
	fields.insert("a", 1i64);
	fields.insert("b", 2i64);

	let map = BTreeMap::<String, i64>::from_value(Value::Map(fields.clone())).unwrap();
	assert_eq!(map.get("b"), Some(&2));

	let hash = HashMap::<String, i64>::from_value(Value::Map(fields)).unwrap();
	assert_eq!(hash.len(), 2);

	let mut bad = FieldMap::new();
	bad.insert("x", "nope");
	let err = BTreeMap::<String, i64>::decode(Value::Map(bad)).unwrap_err();
	assert!(matches!(err, ConvertError::Entry { ref key, .. } if key == "x"));
}

#[test]
fn map_round_trips_into_value() {
	let map: BTreeMap<String, bool> = [("on".to_string(), true)].into_iter().collect();
	let value = map.into_value();
	assert_eq!(value.as_map().and_then(|m| m.get("on")), Some(&Value::Bool(true)));
}

#[test]
fn extern_carries_shared_value() {
	struct Client {
		url: &'static str,
	}

	let client = Extern::new(Client { url: "mem://" });
	let value = client.clone().into_value();
	assert_eq!(value.kind(), Kind::Opaque);

	let back = Extern::<Client>::from_value(value.clone()).unwrap();
	assert_eq!(back.url, "mem://");
	assert!(Arc::ptr_eq(&back.0, &client.0));

	assert!(matches!(Extern::<String>::from_value(value), Err(ConvertError::Downcast { .. })));
}

#[test]
fn from_impls_build_values() {
	assert_eq!(Value::from(3u8), Value::Uint(3));
	assert_eq!(Value::from(-3i16), Value::Int(-3));
	assert_eq!(Value::from("s"), Value::String("s".into()));
	assert_eq!(Value::from(vec![Value::Null]), Value::List(vec![Value::Null]));
}

#[test]
fn value_passes_through_unchanged() {
	let value = Value::List(vec![Value::Int(1)]);
	assert_eq!(Value::decode(value.clone()), Ok(value.clone()));
	assert_eq!(Value::KIND, Kind::Any);
}
