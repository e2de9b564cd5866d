use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields, parse_macro_input};

/// 取第一行非空文档作为摘要。
fn extract_summary(attrs: &[syn::Attribute]) -> String {
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let syn::Meta::NameValue(nv) = &attr.meta
            && let syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(s), .. }) = &nv.value
        {
            let line = s.value();
            let line = line.trim();
            if !line.is_empty() {
                return line.to_owned();
            }
        }
    }
    String::new()
}

/// `FlatMap` -> `flat_map`
fn snake_case(ident: &str) -> String {
    let mut name = String::with_capacity(ident.len() + 4);
    for (idx, c) in ident.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if idx > 0 {
                name.push('_');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

#[proc_macro_derive(StageDoc)]
pub fn stage_doc_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_name = &input.ident;

    let Data::Enum(DataEnum { variants, .. }) = &input.data else {
        panic!("StageDoc can only be derived on enums");
    };

    let patterns = variants
        .iter()
        .map(|v| {
            let variant_name = &v.ident;
            match &v.fields {
                Fields::Unit => quote! { #variant_name },
                Fields::Unnamed(fields) => {
                    let wildcards = std::iter::repeat_n(quote! { _ }, fields.unnamed.len());
                    quote! { #variant_name(#(#wildcards),*) }
                }
                Fields::Named(_) => quote! { #variant_name { .. } },
            }
        })
        .collect::<Vec<_>>();
    let names = variants.iter().map(|v| snake_case(&v.ident.to_string())).collect::<Vec<_>>();
    let summaries = variants.iter().map(|v| extract_summary(&v.attrs)).collect::<Vec<_>>();

    let expanded = quote! {
        impl #enum_name {
            /// 操作名称，蛇形命名。
            pub fn name(&self) -> &'static str {
                match self {
                    #(Self::#patterns => #names,)*
                }
            }

            /// 操作说明，取自文档首行。
            pub fn summary(&self) -> &'static str {
                match self {
                    #(Self::#patterns => #summaries,)*
                }
            }

            /// 全部操作：[(name, summary), ...]
            pub fn all_docs() -> &'static [(&'static str, &'static str)] {
                &[
                    #((#names, #summaries)),*
                ]
            }
        }
    };

    TokenStream::from(expanded)
}
