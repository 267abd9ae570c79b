//! Runtime row model definitions.
//!
//! Types in `model` are the runtime representation of a row type's shape:
//! which fields exist, which of them are orderable scalars, and which lead
//! into nested rows. They are normally emitted by `#[derive(FieldValues)]`.
//!
//! In general:
//! - derive code defines *what exists*
//! - `model` defines *what can be addressed by name*


/// Nested rows deeper than this are not addressable by path.
pub const MAX_PATH_DEPTH: usize = 4;

///
/// RowModel
/// Minimal, macro-generated runtime model for one row type.
///

#[derive(Debug)]
pub struct RowModel {
    /// Fully-qualified Rust type path (for cache keys and diagnostics).
    pub path: &'static str,
    /// Ordered field list.
    pub fields: &'static [FieldModel],
}

///
/// FieldModel
/// Runtime field metadata used by ordering validation and accessor compilation.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as used in ordering strings.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Model of the related row when `kind` is `Nested`.
    pub nested: Option<&'static RowModel>,
}

///
/// FieldKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// Orderable scalar.
    Scalar,
    /// Related row reachable through a dotted path.
    Nested,
}

impl RowModel {
    /// Look up a direct field by normalized, case-insensitive name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        let wanted = normalize_segment(name);

        self.fields
            .iter()
            .find(|field| normalize_segment(field.name).eq_ignore_ascii_case(&wanted))
    }

    /// Resolve a dotted path to its canonical segment names.
    ///
    /// Every segment but the last must be a nested field; the last must be a
    /// scalar. Returns `None` for unknown or non-orderable paths.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> Option<Vec<&'static str>> {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.is_empty() || segments.len() > MAX_PATH_DEPTH {
            return None;
        }

        let mut model = self;
        let mut resolved = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            let field = model.field(segment)?;
            let is_last = index + 1 == segments.len();

            match (field.kind, is_last) {
                (FieldKind::Scalar, true) => resolved.push(field.name),
                (FieldKind::Nested, false) => {
                    model = field.nested?;
                    resolved.push(field.name);
                }
                _ => return None,
            }
        }

        Some(resolved)
    }

    /// Every addressable scalar path, nested ones in dotted form.
    #[must_use]
    pub fn field_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_paths(self, "", 1, &mut out);

        out
    }
}

fn collect_paths(model: &RowModel, prefix: &str, depth: usize, out: &mut Vec<String>) {
    for field in model.fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };

        match (field.kind, field.nested) {
            (FieldKind::Scalar, _) => out.push(path),
            (FieldKind::Nested, Some(nested)) if depth < MAX_PATH_DEPTH => {
                collect_paths(nested, &path, depth + 1, out);
            }
            (FieldKind::Nested, _) => {}
        }
    }
}

/// Deterministic casing normalization: lower-case the leading character of
/// every path segment (`Address.City` → `address.city`).
#[must_use]
pub fn normalize_field_path(path: &str) -> String {
    path.split('.')
        .map(normalize_segment)
        .collect::<Vec<_>>()
        .join(".")
}

fn normalize_segment(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
