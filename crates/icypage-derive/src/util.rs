use syn::{Data, DeriveInput, Error, Fields, GenericArgument, Ident, PathArguments, Type, ext::IdentExt};

///
/// RowField
///
/// One addressable field after attribute parsing.
///

pub struct RowField<'a> {
    pub ident: &'a Ident,
    pub name: String,
    pub kind: FieldShape<'a>,
}

///
/// FieldShape
///

pub enum FieldShape<'a> {
    Scalar,
    Nested { inner: &'a Type, optional: bool },
}

/// Collect the named, non-skipped fields of a struct.
pub fn row_fields<'a>(input: &'a DeriveInput, derive: &str) -> Result<Vec<RowField<'a>>, Error> {
    let message = format!("{derive} can only be derived for structs with named fields");

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(&input.ident, message));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new_spanned(&data.fields, message));
    };

    let mut out = Vec::with_capacity(named.named.len());

    for field in &named.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        let mut nested = false;
        let mut skip = false;

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("icypage")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("nested") {
                    nested = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `nested` or `skip`"))
                }
            })?;
        }

        if nested && skip {
            return Err(Error::new_spanned(ident, "a field cannot be both `nested` and `skip`"));
        }
        if skip {
            continue;
        }

        let kind = if nested {
            match option_inner(&field.ty) {
                Some(inner) => FieldShape::Nested {
                    inner,
                    optional: true,
                },
                None => FieldShape::Nested {
                    inner: &field.ty,
                    optional: false,
                },
            }
        } else {
            if is_path_ident(&field.ty, "Vec") {
                return Err(Error::new_spanned(
                    &field.ty,
                    "collection fields are not orderable; mark them `#[icypage(skip)]`",
                ));
            }
            FieldShape::Scalar
        };

        out.push(RowField {
            ident,
            name: ident.unraw().to_string(),
            kind,
        });
    }

    Ok(out)
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn is_path_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ident)
}
