//! Shared row fixtures for unit tests.

use crate::{
    db::{access::FieldAccessor, order::SortSpec},
    model::{FieldKind, FieldModel, RowModel},
    traits::{FieldValue, FieldValues, RowKind},
    value::Value,
};

///
/// Label
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Label {
    pub(crate) name: String,
    pub(crate) country: Option<String>,
}

impl FieldValues for Label {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "name" => Some(self.name.to_value()),
            "country" => Some(self.country.to_value()),
            _ => None,
        }
    }
}

impl RowKind for Label {
    const MODEL: &'static RowModel = &RowModel {
        path: "test_fixtures::Label",
        fields: &[
            FieldModel {
                name: "name",
                kind: FieldKind::Scalar,
                nested: None,
            },
            FieldModel {
                name: "country",
                kind: FieldKind::Scalar,
                nested: None,
            },
        ],
    };
}

///
/// Release
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Release {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) year: i64,
    pub(crate) rating: Option<i32>,
    pub(crate) label: Option<Label>,
}

impl Release {
    pub(crate) fn new(id: i64, name: &str, year: i64) -> Self {
        Self {
            id,
            name: name.to_string(),
            year,
            rating: None,
            label: None,
        }
    }

    pub(crate) fn rated(mut self, rating: Option<i32>) -> Self {
        self.rating = rating;
        self
    }

    pub(crate) fn labelled(mut self, name: &str, country: Option<&str>) -> Self {
        self.label = Some(Label {
            name: name.to_string(),
            country: country.map(str::to_string),
        });
        self
    }
}

impl FieldValues for Release {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            "year" => Some(self.year.to_value()),
            "rating" => Some(self.rating.to_value()),
            _ => None,
        }
    }

    fn get_nested(&self, field: &str) -> Option<&dyn FieldValues> {
        match field {
            "label" => self.label.as_ref().map(|label| label as &dyn FieldValues),
            _ => None,
        }
    }
}

impl RowKind for Release {
    const MODEL: &'static RowModel = &RowModel {
        path: "test_fixtures::Release",
        fields: &[
            FieldModel {
                name: "id",
                kind: FieldKind::Scalar,
                nested: None,
            },
            FieldModel {
                name: "name",
                kind: FieldKind::Scalar,
                nested: None,
            },
            FieldModel {
                name: "year",
                kind: FieldKind::Scalar,
                nested: None,
            },
            FieldModel {
                name: "rating",
                kind: FieldKind::Scalar,
                nested: None,
            },
            FieldModel {
                name: "label",
                kind: FieldKind::Nested,
                nested: Some(Label::MODEL),
            },
        ],
    };
}

// ---- accessors ---------------------------------------------------------

pub(crate) fn id() -> FieldAccessor<Release> {
    FieldAccessor::new("id", |row: &Release| Value::Int64(row.id))
}

pub(crate) fn name() -> FieldAccessor<Release> {
    FieldAccessor::new("name", |row: &Release| Value::Text(row.name.clone()))
}

pub(crate) fn year() -> FieldAccessor<Release> {
    FieldAccessor::new("year", |row: &Release| Value::Int64(row.year))
}

pub(crate) fn rating() -> FieldAccessor<Release> {
    FieldAccessor::new("rating", |row: &Release| row.rating.to_value())
}

/// `name asc, year desc, id desc`
pub(crate) fn name_year_id_spec() -> SortSpec<Release> {
    SortSpec::asc(name()).then_desc(year()).then_desc(id())
}

/// Rows `A(2022, 1)`, `B(2024, 2)`, `C(2023, 3)`.
pub(crate) fn three_releases() -> Vec<Release> {
    vec![
        Release::new(1, "A", 2022),
        Release::new(2, "B", 2024),
        Release::new(3, "C", 2023),
    ]
}
