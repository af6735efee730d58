use std::fmt;

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::{OptionFn, Record, Shared, args};

#[derive(Debug, Default, Record)]
pub struct Server {
	pub host: String,
	pub port: u16,
	pub tags: Vec<String>,
}

fn new_server(host: String, port: u16) -> Shared<Server> {
	Shared::new(Server {
		host,
		port,
		..Server::default()
	})
}

fn with_options(host: String, options: Variadic<OptionFn<Server>>) -> Shared<Server> {
	let mut server = Server {
		host,
		..Server::default()
	};
	for option in options {
		option.apply(&mut server);
	}
	Shared::new(server)
}

#[derive(Debug)]
struct Refused;

impl fmt::Display for Refused {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("refused")
	}
}

impl std::error::Error for Refused {}

fn fallible(ok: bool) -> Result<Arc<Server>, Refused> {
	if ok { Ok(Arc::new(Server::default())) } else { Err(Refused) }
}

#[test]
fn signature_describes_params_and_returns() {
	let factory = FunctionFactory::new("new_server", new_server);
	let signature = factory.signature();

	let kinds: Vec<_> = signature.params.iter().map(|p| p.kind).collect();
	assert_eq!(kinds, [Kind::String, Kind::Uint]);
	assert_eq!(signature.returns, [Shape::Pointer]);
	assert!(!signature.is_variadic());
	assert!(signature.option_target().is_none());
}

#[test]
fn variadic_options_report_target() {
	let factory = FunctionFactory::new("with_options", with_options);
	let signature = factory.signature();

	assert!(signature.is_variadic());
	assert_eq!(signature.params[1].kind, Kind::Func);
	assert_eq!(signature.option_target().map(|t| t.name), Some("Server"));
}

#[test]
fn invoke_converts_positional_args() {
	let factory = FunctionFactory::new("new_server", new_server);
	let handle = factory.invoke(args!["localhost", 8080u16]).unwrap();

	assert_eq!(handle.type_name(), "Server");
	assert_eq!(handle.get("port"), Some(Value::Uint(8080)));
}

#[rstest]
#[case(args!["h"], "new_server: missing argument 1")]
#[case(args!["h", 1u16, 2u16], "new_server: expected 2 argument(s), got 3")]
#[case(args!["h", -1], "new_server: argument 1: expected uint, got int")]
#[case(args!["h", 70000u32], "new_server: argument 1: 70000 is out of range for u16")]
fn invoke_rejects_bad_args(#[case] args: Vec<Value>, #[case] message: &str) {
	let factory = FunctionFactory::new("new_server", new_server);
	assert_eq!(factory.invoke(args).unwrap_err().to_string(), message);
}

#[test]
fn variadic_collects_remaining_args() {
	let factory = FunctionFactory::new("with_options", with_options);
	let port = OptionFn::<Server>::new(|s| s.port = 1);
	let tags = OptionFn::<Server>::new(|s| s.tags.push("edge".into()));

	let handle = factory.invoke(args!["h", port, tags]).unwrap();
	assert_eq!(handle.get("port"), Some(Value::Uint(1)));
	assert_eq!(
		handle.get("tags"),
		Some(Value::List(vec![Value::String("edge".into())]))
	);

	let bare = factory.invoke(args!["h"]).unwrap();
	assert_eq!(bare.get("port"), Some(Value::Uint(0)));
}

#[test]
fn variadic_rejects_wrong_element() {
	let factory = FunctionFactory::new("with_options", with_options);
	let err = factory.invoke(args!["h", 3]).unwrap_err();
	assert!(matches!(err, InvokeError::Argument { index: 1, .. }));
}

#[test]
fn result_returns_map_errors_to_failed() {
	let factory = FunctionFactory::new("fallible", fallible);
	assert_eq!(factory.signature().returns, [Shape::Reference]);

	assert!(factory.invoke(args![true]).unwrap().is_frozen());
	let err = factory.invoke(args![false]).unwrap_err();
	assert_eq!(err.to_string(), "fallible failed: refused");
}

#[test]
fn closures_become_factories() {
	let prefix = String::from("svc-");
	let factory = FunctionFactory::new("named", move |name: String| {
		Box::new(Server {
			host: format!("{prefix}{name}"),
			..Server::default()
		})
	});

	let handle = factory.invoke(args!["a"]).unwrap();
	assert_eq!(handle.get("host"), Some(Value::String("svc-a".into())));
}

#[test]
fn interface_returns_box_into_handle() {
	let factory = FunctionFactory::new("iface", || -> Box<dyn crate::Object> { Box::new(Server::default()) });
	assert_eq!(factory.signature().returns, [Shape::Interface]);
	assert_eq!(factory.invoke(args![]).unwrap().type_name(), "Server");
}

#[rstest]
#[case(<i64 as IntoReturn>::shapes(), vec![Shape::Primitive(Kind::Int)])]
#[case(<Server as IntoReturn>::shapes(), vec![Shape::Value])]
#[case(<() as IntoReturn>::shapes(), vec![])]
#[case(<(Shared<Server>, String) as IntoReturn>::shapes(), vec![Shape::Pointer, Shape::Primitive(Kind::String)])]
#[case(<Handle as IntoReturn>::shapes(), vec![Shape::Interface])]
fn return_shapes(#[case] shapes: Vec<Shape>, #[case] expected: Vec<Shape>) {
	assert_eq!(shapes, expected);
}

#[test]
fn unwrappable_return_fails_at_invoke() {
	let factory = FunctionFactory::new("plain", || 3i64);
	let err = factory.invoke(args![]).unwrap_err();
	assert!(matches!(err, InvokeError::Unwrappable { shape: Shape::Primitive(Kind::Int), .. }));
}

#[test]
fn function_key_names_the_item() {
	assert!(function_key(&new_server).ends_with("::new_server"));
}
