use crate::util::{FieldShape, row_fields};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

// derive_field_values
pub fn derive_field_values(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match row_fields(&input, "FieldValues") {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error(),
    };

    let value_arms = fields.iter().filter_map(|field| {
        let FieldShape::Scalar = field.kind else {
            return None;
        };
        let field_ident = field.ident;
        let field_name = &field.name;

        Some(quote! {
            #field_name => Some(::icypage::traits::FieldValue::to_value(&self.#field_ident)),
        })
    });

    let nested_arms: Vec<TokenStream> = fields
        .iter()
        .filter_map(|field| {
            let FieldShape::Nested { optional, .. } = field.kind else {
                return None;
            };
            let field_ident = field.ident;
            let field_name = &field.name;

            Some(if optional {
                quote! {
                    #field_name => self
                        .#field_ident
                        .as_ref()
                        .map(|nested| nested as &dyn ::icypage::traits::FieldValues),
                }
            } else {
                quote! {
                    #field_name => Some(&self.#field_ident as &dyn ::icypage::traits::FieldValues),
                }
            })
        })
        .collect();

    // rows without nested fields keep the default `get_nested`
    let get_nested = if nested_arms.is_empty() {
        quote!()
    } else {
        quote! {
            fn get_nested(&self, field: &str) -> Option<&dyn ::icypage::traits::FieldValues> {
                match field {
                    #(#nested_arms)*
                    _ => None,
                }
            }
        }
    };

    quote! {
        impl #impl_generics ::icypage::traits::FieldValues for #ident #ty_generics #where_clause {
            fn get_value(&self, field: &str) -> Option<::icypage::value::Value> {
                match field {
                    #(#value_arms)*
                    _ => None,
                }
            }

            #get_nested
        }
    }
}
