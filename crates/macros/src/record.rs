//! `#[derive(Record)]` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, Visibility};

struct RecordField<'a> {
	ident: &'a Ident,
	ty: &'a Type,
	name: String,
	exported: bool,
}

#[derive(Default)]
struct RecordAttrs {
	methods: bool,
	name: Option<String>,
}

fn record_attrs(input: &DeriveInput) -> syn::Result<RecordAttrs> {
	let mut attrs = RecordAttrs::default();
	for attr in input.attrs.iter().filter(|a| a.path().is_ident("record")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("methods") {
				attrs.methods = true;
				Ok(())
			} else if meta.path.is_ident("name") {
				let value: LitStr = meta.value()?.parse()?;
				attrs.name = Some(value.value());
				Ok(())
			} else {
				Err(meta.error("unknown record attribute; expected `methods` or `name`"))
			}
		})?;
	}
	Ok(attrs)
}

fn record_field(field: &syn::Field) -> syn::Result<RecordField<'_>> {
	let Some(ident) = field.ident.as_ref() else {
		return Err(syn::Error::new_spanned(field, "Record fields must be named"));
	};
	let mut name = ident.to_string();
	let mut skip = false;
	for attr in field.attrs.iter().filter(|a| a.path().is_ident("record")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("skip") {
				skip = true;
				Ok(())
			} else if meta.path.is_ident("rename") {
				let value: LitStr = meta.value()?.parse()?;
				name = value.value();
				Ok(())
			} else {
				Err(meta.error("unknown field attribute; expected `skip` or `rename`"))
			}
		})?;
	}
	Ok(RecordField {
		ident,
		ty: &field.ty,
		name,
		exported: matches!(field.vis, Visibility::Public(_)) && !skip,
	})
}

pub fn derive_record(input: DeriveInput) -> syn::Result<TokenStream> {
	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"Record cannot be derived for generic types",
		));
	}
	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			&input.ident,
			"Record can only be derived for structs",
		));
	};
	let fields = match &data.fields {
		Fields::Named(named) => named
			.named
			.iter()
			.map(record_field)
			.collect::<syn::Result<Vec<_>>>()?,
		Fields::Unit => Vec::new(),
		Fields::Unnamed(_) => {
			return Err(syn::Error::new_spanned(
				&input.ident,
				"Record requires named fields",
			));
		}
	};

	let attrs = record_attrs(&input)?;
	let ident = &input.ident;
	let type_name = attrs.name.unwrap_or_else(|| ident.to_string());
	let krate = quote!(::stagehand_registry);

	let field_infos = fields.iter().map(|f| {
		let name = &f.name;
		let ty = f.ty;
		if f.exported {
			quote! {
				#krate::FieldInfo::exported(
					#name,
					<#ty as #krate::FromValue>::KIND,
					<#ty as #krate::FromValue>::NULLABLE,
					#krate::normalize::<#ty>,
				)
			}
		} else {
			quote!(#krate::FieldInfo::hidden(#name))
		}
	});

	let exported: Vec<_> = fields.iter().filter(|f| f.exported).collect();
	let names: Vec<_> = exported.iter().map(|f| &f.name).collect();
	let idents: Vec<_> = exported.iter().map(|f| f.ident).collect();
	let types: Vec<_> = exported.iter().map(|f| f.ty).collect();

	let methods_impl = if attrs.methods {
		quote!()
	} else {
		quote!(impl #krate::Methods for #ident {})
	};

	Ok(quote! {
		impl #krate::Record for #ident {
			fn type_info() -> &'static #krate::TypeInfo {
				static INFO: #krate::TypeInfo = #krate::TypeInfo {
					name: #type_name,
					module_path: ::core::module_path!(),
					type_id: ::core::any::TypeId::of::<#ident>,
					fields: &[#(#field_infos),*],
				};
				&INFO
			}

			fn get_field(&self, name: &str) -> ::core::option::Option<#krate::Value> {
				match name {
					#(#names => ::core::option::Option::Some(
						#krate::IntoValue::into_value(::core::clone::Clone::clone(&self.#idents)),
					),)*
					_ => ::core::option::Option::None,
				}
			}

			fn set_field(
				&mut self,
				name: &str,
				value: #krate::Value,
			) -> ::core::result::Result<(), #krate::ConvertError> {
				match name {
					#(#names => {
						self.#idents = <#types as #krate::FromValue>::from_value(value)?;
						::core::result::Result::Ok(())
					})*
					_ => {
						let _ = value;
						::core::result::Result::Err(#krate::ConvertError::UnknownField {
							field: ::std::string::ToString::to_string(name),
						})
					}
				}
			}
		}

		#methods_impl

		impl #krate::FromValue for #ident {
			const KIND: #krate::Kind = #krate::Kind::Map;

			fn from_value(value: #krate::Value) -> ::core::result::Result<Self, #krate::ConvertError> {
				match value {
					#krate::Value::Map(fields) => {
						let mut out = <Self as ::core::default::Default>::default();
						#krate::decode_map(&mut out, fields)?;
						::core::result::Result::Ok(out)
					}
					other => ::core::result::Result::Err(#krate::ConvertError::Mismatch {
						expected: #krate::Kind::Map,
						got: other.kind(),
					}),
				}
			}
		}

		impl #krate::IntoValue for #ident {
			#[allow(unused_mut)]
			fn into_value(self) -> #krate::Value {
				let mut fields = #krate::FieldMap::new();
				#(fields.insert(#names, ::core::clone::Clone::clone(&self.#idents));)*
				#krate::Value::Map(fields)
			}
		}

		impl #krate::IntoReturn for #ident {
			fn shapes() -> ::std::vec::Vec<#krate::Shape> {
				::std::vec![#krate::Shape::Value]
			}

			fn into_handle(self, callee: &str) -> ::core::result::Result<#krate::Handle, #krate::InvokeError> {
				::core::result::Result::Err(#krate::InvokeError::Unwrappable {
					callee: ::std::string::ToString::to_string(callee),
					shape: #krate::Shape::Value,
				})
			}
		}
	})
}
