use pretty_assertions::assert_eq;
use stagehand_registry::{
	Candidate, DuplicatePolicy, Record, Registry, RegistryConfig, Shared, Value, args, function_key,
	submit_import,
};

#[derive(Debug, Default, Record)]
pub struct Widget {
	pub name: String,
}

pub fn new_widget(name: String) -> Shared<Widget> {
	Shared::new(Widget { name })
}

submit_import!(Candidate::function(new_widget), Candidate::record::<Widget>());
submit_import!(Value::Null);

pub fn early_widget() -> Shared<Widget> {
	Shared::new(Widget { name: "early".into() })
}

pub fn late_widget() -> Shared<Widget> {
	Shared::new(Widget { name: "late".into() })
}

submit_import!(Candidate::named_function("widget::pick", early_widget));
submit_import!(Candidate::named_function("widget::pick", late_widget));

fn picked(registry: &Registry) -> Option<Value> {
	registry.construct("widget::pick", args![]).unwrap().get("name")
}

#[test]
fn inventory_batches_are_imported() {
	let registry = Registry::from_inventory(RegistryConfig::default());

	assert_eq!(registry.len(), 3);
	assert!(registry.contains(function_key(&new_widget)));
	assert!(registry.contains(&Widget::type_info().key()));

	let widget = registry
		.construct(function_key(&new_widget), args!["gear"])
		.unwrap();
	assert_eq!(widget.get("name"), Some(Value::String("gear".into())));
}

#[test]
fn global_registry_is_built_once() {
	let first = stagehand_registry::global();
	let second = stagehand_registry::global();

	assert!(std::ptr::eq(first, second));
	assert!(first.contains(&Widget::type_info().key()));
}

#[test]
fn later_batches_win_by_default() {
	for _ in 0..3 {
		let registry = Registry::from_inventory(RegistryConfig::default());
		assert_eq!(picked(&registry), Some(Value::String("late".into())));
	}
}

#[test]
fn reject_policy_skips_the_later_batch() {
	let config = RegistryConfig::default().with_duplicates(DuplicatePolicy::Reject);
	let registry = Registry::from_inventory(config);
	assert_eq!(registry.keys().len(), 3);
	assert_eq!(picked(&registry), Some(Value::String("early".into())));
}
