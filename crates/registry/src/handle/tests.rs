use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::{Methods, Record, args, methods};

#[derive(Debug, Default, Record)]
#[record(methods)]
pub struct Lamp {
	pub label: String,
	pub watts: u32,
	pub dimmer: Option<f64>,
	on: bool,
}

#[methods]
impl Lamp {
	pub fn toggle(&mut self) -> bool {
		self.on = !self.on;
		self.on
	}

	pub fn describe(&self, prefix: String) -> String {
		format!("{prefix}{} ({}W)", self.label, self.watts)
	}

	pub fn is_on(&self) -> bool {
		self.on
	}

	pub fn borrow_watts(&mut self, other: Shared<Lamp>) -> u32 {
		self.watts += other.read().watts;
		self.watts
	}

	#[allow(dead_code)]
	fn secret(&self) {}
}

fn lamp() -> Handle {
	Handle::new(Lamp {
		label: "desk".into(),
		watts: 40,
		..Lamp::default()
	})
}

#[test]
fn call_dispatches_by_name() {
	let handle = lamp();
	assert_eq!(handle.call("toggle", args![]).unwrap(), args![true]);
	assert_eq!(handle.call("is_on", args![]).unwrap(), args![true]);
	assert_eq!(
		handle.call("describe", args!["> "]).unwrap(),
		args!["> desk (40W)"]
	);
}

#[test]
fn unknown_method_is_reported() {
	let err = lamp().call("secret", args![]).unwrap_err();
	assert!(matches!(
		err,
		InvokeError::MethodNotFound { ref method, type_name: "Lamp" } if method == "secret"
	));
	assert_eq!(err.to_string(), "func 'secret' not found on 'Lamp'");
}

#[rstest]
#[case(args![], "Lamp.describe: missing argument 0")]
#[case(args!["a", "b"], "Lamp.describe: expected 1 argument(s), got 2")]
#[case(args![1], "Lamp.describe: argument 0: expected string, got int")]
fn method_argument_errors(#[case] args: Vec<Value>, #[case] message: &str) {
	assert_eq!(lamp().call("describe", args).unwrap_err().to_string(), message);
}

#[test]
fn assign_updates_every_alias() {
	let shared = Shared::new(Lamp::default());
	let handle = Handle::from_shared(shared.clone());

	handle.assign("label", "hall").unwrap();
	handle.assign("watts", 60u32).unwrap();
	handle.assign("dimmer", 0.5).unwrap();

	let lamp = shared.read();
	assert_eq!(lamp.label, "hall");
	assert_eq!(lamp.watts, 60);
	assert_eq!(lamp.dimmer, Some(0.5));
}

#[test]
fn assign_null_to_nullable_field() {
	let handle = lamp();
	handle.assign("dimmer", 0.25).unwrap();
	handle.assign("dimmer", Value::Null).unwrap();
	assert_eq!(handle.get("dimmer"), Some(Value::Null));
}

#[rstest]
#[case("missing", Value::Int(1), "cannot find field 'missing' in 'Lamp'")]
#[case("on", Value::Bool(true), "field 'on' of 'Lamp' is not exported")]
#[case("watts", Value::Int(3), "field 'watts' cannot be set with int (declared uint)")]
#[case("label", Value::Null, "field 'label' cannot be set with null (declared string)")]
#[case("Label", Value::String("x".into()), "cannot find field 'Label' in 'Lamp'")]
fn assign_errors(#[case] field: &str, #[case] value: Value, #[case] message: &str) {
	assert_eq!(lamp().assign(field, value).unwrap_err().to_string(), message);
}

#[test]
fn assign_range_checks_within_kind() {
	let err = lamp().assign("watts", u64::MAX).unwrap_err();
	assert!(matches!(
		err,
		AssignError::Convert {
			source: crate::ConvertError::OutOfRange { target: "u32", .. },
			..
		}
	));
}

#[test]
fn exported_reports_fields_and_methods() {
	let handle = lamp();
	assert!(handle.exported("label"));
	assert!(!handle.exported("on"));
	assert!(handle.exported("toggle"));
	assert!(handle.exported("describe"));
	assert!(!handle.exported("secret"));
	assert!(!handle.exported("nothing"));
}

#[test]
fn frozen_handles_are_read_only() {
	let handle = Handle::frozen(Arc::new(Lamp {
		label: "porch".into(),
		..Lamp::default()
	}));

	assert!(handle.is_frozen());
	assert_eq!(
		handle.assign("label", "x"),
		Err(AssignError::NotPointer { type_name: "Lamp" })
	);
	assert!(handle.exported("is_on"));
	assert!(!handle.exported("toggle"));
	assert!(matches!(
		handle.call("toggle", args![]),
		Err(InvokeError::MethodNotFound { .. })
	));
	assert_eq!(handle.call("is_on", args![]).unwrap(), args![false]);
	assert_eq!(handle.get("label"), Some(Value::String("porch".into())));
	assert!(handle.downcast::<Lamp>().is_none());
	assert_eq!(handle.downcast_frozen::<Lamp>().map(|l| l.label.clone()), Some("porch".into()));
}

#[test]
fn downcast_aliases_instance() {
	let handle = lamp();
	let shared = handle.downcast::<Lamp>().unwrap();
	shared.write().watts = 7;
	assert_eq!(handle.get("watts"), Some(Value::Uint(7)));
	assert!(Handle::from_shared(shared).ptr_eq(&handle));
	assert!(!handle.ptr_eq(&lamp()));
}

#[test]
fn get_hides_unexported_fields() {
	let handle = lamp();
	assert_eq!(handle.get("on"), None);
	assert_eq!(handle.get("label"), Some(Value::String("desk".into())));
}

#[test]
fn boxed_objects_forward_through_handle() {
	let handle = Handle::from_boxed(Box::new(Lamp::default()));
	assert_eq!(handle.type_name(), "Lamp");
	assert_eq!(handle.call("toggle", args![]).unwrap(), args![true]);
	assert_eq!(handle.with(|lamp: &Lamp| lamp.on), Some(true));
	handle.with_mut(|lamp: &mut Lamp| lamp.watts = 9);
	assert_eq!(handle.get("watts"), Some(Value::Uint(9)));
}

#[test]
fn unwrap_exposes_instance() {
	let handle = lamp();
	let Instance::Shared(cell) = handle.unwrap() else {
		panic!("expected a shared instance");
	};
	assert_eq!(cell.read().info().name, "Lamp");
	assert!(Lamp::methods().iter().any(|m| m.name == "toggle"));
}

#[test]
fn debug_names_type() {
	assert_eq!(format!("{:?}", lamp()), r#"Handle { type: "Lamp", frozen: false }"#);
}

#[test]
fn call_with_another_instance_borrows_it() {
	let handle = lamp();
	let other = lamp();
	assert_eq!(handle.call("borrow_watts", args![other]).unwrap(), args![80u32]);
}

#[rstest]
#[case::direct(|h: &Handle| args![h.clone()], 0)]
#[case::in_list(|h: &Handle| args![vec![Value::Object(h.clone())]], 0)]
#[case::in_map(|h: &Handle| args![1, crate::fields! { "lamp" => h.clone() }], 1)]
fn call_rejects_receiver_as_argument(#[case] build: fn(&Handle) -> Vec<Value>, #[case] index: usize) {
	let handle = lamp();
	let err = handle.call("borrow_watts", build(&handle)).unwrap_err();
	assert!(matches!(err, InvokeError::Reentrant { index: i, .. } if i == index));
	assert_eq!(
		err.to_string(),
		format!("Lamp.borrow_watts: argument {index} is the receiver itself")
	);
	assert_eq!(handle.get("watts"), Some(Value::Uint(40)));
}
