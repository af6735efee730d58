//! Procedural macros for stagehand records.
//!
//! - `#[derive(Record)]` - name-keyed field access and type metadata
//! - `#[methods]` - name-keyed dispatch for the `pub` methods of an impl block

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

mod methods;
mod record;

/// Derives `Record`, `FromValue`, `IntoValue` and `IntoReturn` for a struct
/// with named fields.
///
/// `pub` fields are exported. The struct must implement `Default`, and every
/// exported field type must implement `FromValue`, `IntoValue` and `Clone`.
///
/// Attributes:
/// - `#[record(methods)]` - methods come from a `#[methods]` impl block
/// - `#[record(name = "Name")]` - type name used in the registry key
/// - `#[record(rename = "name")]` on a field - exported field name
/// - `#[record(skip)]` on a field - hide a `pub` field
///
/// ```ignore
/// #[derive(Default, Record)]
/// pub struct ServerConfig {
///     pub host: String,
///     pub port: u16,
///     #[record(skip)]
///     pub cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	record::derive_record(input)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}

/// Implements `Methods` for the `pub fn` items of an impl block that take
/// `&self` or `&mut self`.
///
/// Parameters must implement `FromArgs`; returns must implement `IntoResults`.
///
/// ```ignore
/// #[methods]
/// impl Counter {
///     pub fn add(&mut self, by: i64) -> i64 { .. }
///     pub fn total(&self) -> i64 { .. }
/// }
/// ```
#[proc_macro_attribute]
pub fn methods(attr: TokenStream, item: TokenStream) -> TokenStream {
	if !attr.is_empty() {
		return syn::Error::new(
			proc_macro2::Span::call_site(),
			"#[methods] takes no arguments",
		)
		.to_compile_error()
		.into();
	}
	let item = parse_macro_input!(item as ItemImpl);
	methods::methods(item)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}
