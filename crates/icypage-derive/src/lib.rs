use proc_macro::TokenStream;

mod field_values;
mod row_kind;
mod util;

/// Name-addressed field reads for a struct with named fields.
///
/// Fields marked `#[icypage(nested)]` are exposed through `get_nested`;
/// `#[icypage(skip)]` hides a field entirely.
#[proc_macro_derive(FieldValues, attributes(icypage))]
pub fn derive_field_values(input: TokenStream) -> TokenStream {
    field_values::derive_field_values(input.into()).into()
}

/// Static `RowModel` for a struct, honouring the same `#[icypage(..)]`
/// field attributes as `FieldValues`.
#[proc_macro_derive(RowKind, attributes(icypage))]
pub fn derive_row_kind(input: TokenStream) -> TokenStream {
    row_kind::derive_row_kind(input.into()).into()
}
