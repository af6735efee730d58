use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[rstest]
#[case("true", Some(true))]
#[case(" Yes ", Some(true))]
#[case("ON", Some(true))]
#[case("1", Some(true))]
#[case("f", Some(false))]
#[case("off", Some(false))]
#[case("0", Some(false))]
#[case("maybe", None)]
#[case("", None)]
fn bool_parsing(#[case] input: &str, #[case] expected: Option<bool>) {
	assert_eq!(parse_bool(input), expected);
}

#[rstest]
#[case("42", Some(42))]
#[case("-42", Some(-42))]
#[case("+7", Some(7))]
#[case("0x1F", Some(31))]
#[case("-0b101", Some(-5))]
#[case("0o17", Some(15))]
#[case("1_000", Some(1000))]
#[case("-9223372036854775808", Some(i64::MIN))]
#[case("9223372036854775808", None)]
#[case("--1", None)]
#[case("0x", None)]
#[case("12a", None)]
fn int_parsing(#[case] input: &str, #[case] expected: Option<i64>) {
	assert_eq!(parse_int(input), expected);
}

#[rstest]
#[case("18446744073709551615", Some(u64::MAX))]
#[case("0xff", Some(255))]
#[case("-1", None)]
#[case("+3", Some(3))]
fn uint_parsing(#[case] input: &str, #[case] expected: Option<u64>) {
	assert_eq!(parse_uint(input), expected);
}

#[rstest]
#[case(Value::Bool(true), Kind::Int, Value::Int(1))]
#[case(Value::String("".into()), Kind::Int, Value::Int(0))]
#[case(Value::String("0x10".into()), Kind::Int, Value::Int(16))]
#[case(Value::Float(3.9), Kind::Int, Value::Int(3))]
#[case(Value::Float(-3.9), Kind::Int, Value::Int(-3))]
#[case(Value::Uint(5), Kind::Int, Value::Int(5))]
#[case(Value::Int(5), Kind::Uint, Value::Uint(5))]
#[case(Value::Float(2.5), Kind::Uint, Value::Uint(2))]
#[case(Value::Int(0), Kind::Bool, Value::Bool(false))]
#[case(Value::Float(0.1), Kind::Bool, Value::Bool(true))]
#[case(Value::String("".into()), Kind::Bool, Value::Bool(false))]
#[case(Value::String("yes".into()), Kind::Bool, Value::Bool(true))]
#[case(Value::Int(2), Kind::Float, Value::Float(2.0))]
#[case(Value::Bool(true), Kind::Float, Value::Float(1.0))]
#[case(Value::String(" 1.5 ".into()), Kind::Float, Value::Float(1.5))]
#[case(Value::Bool(true), Kind::String, Value::String("1".into()))]
#[case(Value::Bool(false), Kind::String, Value::String("0".into()))]
#[case(Value::Int(-4), Kind::String, Value::String("-4".into()))]
#[case(Value::Float(1.5), Kind::String, Value::String("1.5".into()))]
#[case(Value::Int(1), Kind::List, Value::List(vec![Value::Int(1)]))]
#[case(Value::Map(FieldMap::new()), Kind::List, Value::List(vec![]))]
#[case(Value::List(vec![]), Kind::Map, Value::Map(FieldMap::new()))]
#[case(Value::Null, Kind::Int, Value::Null)]
#[case(Value::Int(9), Kind::Any, Value::Int(9))]
fn weak_conversions(#[case] value: Value, #[case] target: Kind, #[case] expected: Value) {
	assert_eq!(weak(value, target).unwrap(), expected);
}

#[test]
fn list_of_maps_merges() {
	let first: FieldMap = [("a", Value::Int(1)), ("b", Value::Int(2))].into_iter().collect();
	let second: FieldMap = [("b", Value::Int(3))].into_iter().collect();

	let merged = weak(Value::List(vec![Value::Map(first), Value::Map(second)]), Kind::Map).unwrap();
	let expected: FieldMap = [("a", Value::Int(1)), ("b", Value::Int(3))].into_iter().collect();
	assert_eq!(merged, Value::Map(expected));
}

#[test]
fn list_with_non_map_does_not_merge() {
	let err = weak(
		Value::List(vec![Value::Map(FieldMap::new()), Value::Int(1)]),
		Kind::Map,
	)
	.unwrap_err();
	assert_eq!(
		err,
		ConvertError::Element {
			index: 1,
			source: Box::new(ConvertError::Mismatch {
				expected: Kind::Map,
				got: Kind::Int,
			}),
		}
	);
}

#[rstest]
#[case(Value::String("abc".into()), Kind::Int)]
#[case(Value::String("-1".into()), Kind::Uint)]
#[case(Value::String("nope".into()), Kind::Bool)]
#[case(Value::String("x".into()), Kind::Float)]
fn unparsable_strings(#[case] value: Value, #[case] target: Kind) {
	assert!(matches!(weak(value, target), Err(ConvertError::Parse { target: t, .. }) if t == target));
}

#[rstest]
#[case(Value::Int(-1), Kind::Uint)]
#[case(Value::Uint(u64::MAX), Kind::Int)]
#[case(Value::Float(f64::NAN), Kind::Int)]
#[case(Value::Float(1e20), Kind::Int)]
#[case(Value::Float(-0.5 - 1.0), Kind::Uint)]
fn out_of_range_numbers(#[case] value: Value, #[case] target: Kind) {
	assert!(matches!(weak(value, target), Err(ConvertError::OutOfRange { .. })));
}

#[rstest]
#[case(Value::List(vec![]), Kind::Int)]
#[case(Value::Map(FieldMap::new()), Kind::String)]
#[case(Value::Int(1), Kind::Map)]
#[case(Value::Int(1), Kind::Object)]
fn incompatible_kinds(#[case] value: Value, #[case] target: Kind) {
	let got = value.kind();
	assert_eq!(weak(value, target), Err(ConvertError::Mismatch { expected: target, got }));
}

#[test]
fn normalize_produces_strict_value() {
	assert_eq!(normalize::<u16>(Value::String("12".into())), Ok(Value::Uint(12)));
	assert_eq!(
		normalize::<Vec<i32>>(Value::String("3".into())),
		Ok(Value::List(vec![Value::Int(3)]))
	);
	assert!(matches!(
		normalize::<u8>(Value::Int(300)),
		Err(ConvertError::OutOfRange { target: "u8", .. })
	));
}
