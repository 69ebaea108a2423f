//! Implementation of the #[interceptor] attribute.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, Attribute, FnArg, ImplItem, ItemImpl, Visibility};

/// Marker attribute name and the `Category` variant it maps to.
const MARKERS: &[(&str, &str)] = &[
    ("around_invoke", "AroundInvoke"),
    ("post_construct", "PostConstruct"),
    ("pre_destroy", "PreDestroy"),
    ("post_activate", "PostActivate"),
    ("pre_passivate", "PrePassivate"),
    ("after_begin", "AfterBegin"),
    ("before_completion", "BeforeCompletion"),
    ("after_completion", "AfterCompletion"),
    ("around_timeout", "AroundTimeout"),
];

pub fn interceptor_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    // Parse #[interceptor(extends = Parent)]
    let mut parent: Option<syn::Path> = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("extends") {
            parent = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported interceptor property, expected `extends`"))
        }
    });
    parse_macro_input!(attr with parser);

    let mut item_impl = parse_macro_input!(item as ItemImpl);

    if let Some((_, path, _)) = &item_impl.trait_ {
        return syn::Error::new_spanned(
            path,
            "interceptor can only be applied to inherent impl blocks",
        )
        .to_compile_error()
        .into();
    }

    if !item_impl.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &item_impl.generics,
            "interceptor cannot be applied to generic impl blocks",
        )
        .to_compile_error()
        .into();
    }

    let self_ty = item_impl.self_ty.clone();

    // A class cannot be its own superclass
    if let Some(path) = parent.as_ref().filter(|path| names_self(path, &self_ty)) {
        return syn::Error::new_spanned(path, "an interceptor cannot extend itself")
            .to_compile_error()
            .into();
    }

    // Collect one MethodDecl per fn, stripping marker attributes as we go
    let mut decls = Vec::new();
    for impl_item in &mut item_impl.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let mut markers = Vec::new();
        method.attrs.retain(|attr| match marker_variant(attr) {
            Some(variant) => {
                markers.push(syn::Ident::new(variant, Span::call_site()));
                false
            }
            None => true,
        });

        let name = method.sig.ident.to_string();
        let params: Vec<String> = method
            .sig
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                FnArg::Typed(pat) => {
                    let ty = &pat.ty;
                    Some(quote!(#ty).to_string())
                }
                FnArg::Receiver(_) => None,
            })
            .collect();
        let visibility = visibility_tokens(&method.vis);

        decls.push(quote! {
            ::interceptor_scan::MethodDecl::new(#name)
                #(.param(#params))*
                .visibility(#visibility)
                #(.marker(::interceptor_scan::Category::#markers))*
        });
    }

    let extends = parent.map(|path| {
        quote! {
            .extends(&<#path as ::interceptor_scan::Interceptor>::class())
        }
    });

    let expanded = quote! {
        #item_impl

        impl ::interceptor_scan::Interceptor for #self_ty {
            fn class() -> ::interceptor_scan::Class {
                static CLASS: ::interceptor_scan::__private::OnceCell<::interceptor_scan::Class> =
                    ::interceptor_scan::__private::OnceCell::new();

                CLASS
                    .get_or_init(|| {
                        ::interceptor_scan::Class::builder(::std::any::type_name::<Self>())
                            #extends
                            #(.method(#decls))*
                            .build()
                    })
                    .clone()
            }
        }
    };

    TokenStream::from(expanded)
}

/// True if `parent` names the type the impl block is for.
fn names_self(parent: &syn::Path, self_ty: &syn::Type) -> bool {
    if parent.is_ident("Self") {
        return true;
    }
    match self_ty {
        syn::Type::Path(ty) if ty.qself.is_none() => {
            quote!(#parent).to_string() == quote!(#ty).to_string()
        }
        _ => false,
    }
}

fn marker_variant(attr: &Attribute) -> Option<&'static str> {
    if !matches!(attr.meta, syn::Meta::Path(_)) {
        return None;
    }
    let ident = attr.path().get_ident()?;
    MARKERS
        .iter()
        .find(|(marker, _)| ident == marker)
        .map(|(_, variant)| *variant)
}

fn visibility_tokens(vis: &Visibility) -> proc_macro2::TokenStream {
    match vis {
        Visibility::Public(_) => quote!(::interceptor_scan::Visibility::Public),
        Visibility::Restricted(_) => quote!(::interceptor_scan::Visibility::Crate),
        Visibility::Inherited => quote!(::interceptor_scan::Visibility::Private),
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn test_names_self() {
        let self_ty: syn::Type = parse_quote!(AuditInterceptor);

        assert!(names_self(&parse_quote!(Self), &self_ty));
        assert!(names_self(&parse_quote!(AuditInterceptor), &self_ty));
        assert!(!names_self(&parse_quote!(BaseInterceptor), &self_ty));
        assert!(!names_self(&parse_quote!(audit::AuditInterceptor), &self_ty));
    }

    #[test]
    fn test_marker_variant() {
        let marker: Attribute = parse_quote!(#[around_timeout]);
        let other: Attribute = parse_quote!(#[allow(dead_code)]);

        assert_eq!(marker_variant(&marker), Some("AroundTimeout"));
        assert_eq!(marker_variant(&other), None);
    }
}
