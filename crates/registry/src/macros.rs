/// Builds a positional argument list.
///
/// ```
/// use stagehand_registry::{Value, args};
///
/// let args = args![1, "two", 3.0];
/// assert_eq!(args[1], Value::String("two".into()));
/// ```
#[macro_export]
macro_rules! args {
	() => {
		::std::vec::Vec::<$crate::Value>::new()
	};
	($($value:expr),+ $(,)?) => {
		::std::vec![$($crate::IntoValue::into_value($value)),+]
	};
}

/// Builds a [`FieldMap`](crate::FieldMap).
///
/// ```
/// use stagehand_registry::fields;
///
/// let fields = fields! { "name" => "widget", "size" => 3 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
	() => {
		$crate::FieldMap::new()
	};
	($($name:expr => $value:expr),+ $(,)?) => {{
		let mut fields = $crate::FieldMap::new();
		$(fields.insert($name, $value);)+
		fields
	}};
}

/// Submits candidates for [`Registry::from_inventory`](crate::Registry::from_inventory)
/// and [`global`](crate::global).
///
/// Each argument converts into a [`Candidate`](crate::Candidate).
#[macro_export]
macro_rules! submit_import {
	($($candidate:expr),+ $(,)?) => {
		const _: () = {
			fn candidates() -> ::std::vec::Vec<$crate::Candidate> {
				::std::vec![$(::std::convert::Into::<$crate::Candidate>::into($candidate)),+]
			}

			$crate::inventory::submit! {
				$crate::ImportReg {
					module: ::std::module_path!(),
					line: ::std::line!(),
					candidates,
				}
			}
		};
	};
}
