use crate::util::{FieldShape, row_fields};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

// derive_row_kind
pub fn derive_row_kind(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let ident = &input.ident;
    let ident_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match row_fields(&input, "RowKind") {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error(),
    };

    let field_models = fields.iter().map(|field| {
        let name = &field.name;

        match field.kind {
            FieldShape::Scalar => quote! {
                ::icypage::model::FieldModel {
                    name: #name,
                    kind: ::icypage::model::FieldKind::Scalar,
                    nested: None,
                }
            },
            FieldShape::Nested { inner, .. } => quote! {
                ::icypage::model::FieldModel {
                    name: #name,
                    kind: ::icypage::model::FieldKind::Nested,
                    nested: Some(<#inner as ::icypage::traits::RowKind>::MODEL),
                }
            },
        }
    });

    quote! {
        impl #impl_generics ::icypage::traits::RowKind for #ident #ty_generics #where_clause {
            const MODEL: &'static ::icypage::model::RowModel = &::icypage::model::RowModel {
                path: concat!(module_path!(), "::", #ident_name),
                fields: &[
                    #(#field_models),*
                ],
            };
        }
    }
}
