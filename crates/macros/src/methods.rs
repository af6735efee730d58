//! `#[methods]` implementation.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, Type, Visibility};

struct Method<'a> {
	item: &'a ImplItemFn,
	mutable: bool,
	params: Vec<&'a Type>,
}

/// Returns the method if it is callable by name: `pub`, non-generic,
/// synchronous, and taking `&self` or `&mut self`.
fn callable(item: &ImplItemFn) -> Option<Method<'_>> {
	if !matches!(item.vis, Visibility::Public(_)) {
		return None;
	}
	let sig = &item.sig;
	if !sig.generics.params.is_empty() || sig.asyncness.is_some() || sig.unsafety.is_some() {
		return None;
	}
	let mut inputs = sig.inputs.iter();
	let Some(FnArg::Receiver(receiver)) = inputs.next() else {
		return None;
	};
	if receiver.reference.is_none() || receiver.colon_token.is_some() {
		return None;
	}
	let params = inputs
		.filter_map(|arg| match arg {
			FnArg::Typed(pat) => Some(&*pat.ty),
			FnArg::Receiver(_) => None,
		})
		.collect();
	Some(Method {
		item,
		mutable: receiver.mutability.is_some(),
		params,
	})
}

/// Generates the match arm dispatching `name` to one method.
fn dispatch_arm(method: &Method<'_>, krate: &TokenStream) -> TokenStream {
	let ident = &method.item.sig.ident;
	let name = ident.to_string();
	let bindings: Vec<_> = (0..method.params.len())
		.map(|i| format_ident!("arg{}", i))
		.collect();
	let types = &method.params;
	let args_binding = if bindings.is_empty() {
		quote!(args)
	} else {
		quote!(mut args)
	};

	quote! {
		#name => {
			let #args_binding = #krate::Args::new(
				::std::format!("{}.{}", <Self as #krate::Record>::type_info().name, #name),
				args,
			);
			#(let #bindings = <#types as #krate::FromArgs>::from_args(&mut args)?;)*
			let callee = args.finish()?;
			#krate::IntoResults::into_results(self.#ident(#(#bindings),*), &callee)
		}
	}
}

pub fn methods(item: ItemImpl) -> syn::Result<TokenStream> {
	if item.trait_.is_some() {
		return Err(syn::Error::new_spanned(
			&item.self_ty,
			"#[methods] applies to inherent impl blocks",
		));
	}
	if !item.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&item.generics,
			"#[methods] cannot be used on generic impl blocks",
		));
	}

	let krate = quote!(::stagehand_registry);
	let self_ty = &item.self_ty;
	let methods: Vec<_> = item
		.items
		.iter()
		.filter_map(|i| match i {
			ImplItem::Fn(f) => callable(f),
			_ => None,
		})
		.collect();

	let infos = methods.iter().map(|m| {
		let name = m.item.sig.ident.to_string();
		let arity = m.params.len();
		let receiver = if m.mutable {
			quote!(#krate::Receiver::Mut)
		} else {
			quote!(#krate::Receiver::Ref)
		};
		quote! {
			#krate::MethodInfo { name: #name, receiver: #receiver, arity: #arity }
		}
	});
	let all_arms: Vec<_> = methods.iter().map(|m| dispatch_arm(m, &krate)).collect();
	let ref_arms: Vec<_> = methods
		.iter()
		.filter(|m| !m.mutable)
		.map(|m| dispatch_arm(m, &krate))
		.collect();

	Ok(quote! {
		#item

		impl #krate::Methods for #self_ty {
			fn methods() -> &'static [#krate::MethodInfo] {
				static METHODS: &[#krate::MethodInfo] = &[#(#infos),*];
				METHODS
			}

			fn call(
				&mut self,
				name: &str,
				args: ::std::vec::Vec<#krate::Value>,
			) -> ::core::result::Result<::std::vec::Vec<#krate::Value>, #krate::InvokeError> {
				match name {
					#(#all_arms)*
					_ => {
						let _ = args;
						::core::result::Result::Err(#krate::InvokeError::method_not_found(
							name,
							<Self as #krate::Record>::type_info().name,
						))
					}
				}
			}

			fn call_ref(
				&self,
				name: &str,
				args: ::std::vec::Vec<#krate::Value>,
			) -> ::core::result::Result<::std::vec::Vec<#krate::Value>, #krate::InvokeError> {
				match name {
					#(#ref_arms)*
					_ => {
						let _ = args;
						::core::result::Result::Err(#krate::InvokeError::method_not_found(
							name,
							<Self as #krate::Record>::type_info().name,
						))
					}
				}
			}
		}
	})
}
