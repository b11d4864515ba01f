//! Typed field selectors.
//!
//! Search and sort are parameterized by a record field. Instead of looking
//! fields up by name at runtime (and silently skipping typos), callers pick
//! a [`Field`] variant; unknown names are rejected once, at the string
//! boundary, with [`SimakError::UnknownField`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::SimakError;
use crate::model::{timestamp, Mahasiswa};

/// A selectable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Nim,
    Nama,
    Jurusan,
    Email,
    Telepon,
    Ipk,
    CreatedAt,
    UpdatedAt,
}

/// Runtime representation of a single field's value.
///
/// Comparison is partial: values of different kinds do not compare, and
/// neither does NaN. The sort algorithms treat an incomparable pair as a
/// no-op instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Time(NaiveDateTime),
}

impl PartialOrd for FieldValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.partial_cmp(b),
            (FieldValue::Time(a), FieldValue::Time(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Nim,
        Field::Nama,
        Field::Jurusan,
        Field::Email,
        Field::Telepon,
        Field::Ipk,
        Field::CreatedAt,
        Field::UpdatedAt,
    ];

    /// Typed accessor for this field on a record.
    pub fn value_of<'a>(self, record: &'a Mahasiswa) -> FieldValue<'a> {
        match self {
            Field::Nim => FieldValue::Text(record.nim()),
            Field::Nama => FieldValue::Text(record.nama()),
            Field::Jurusan => FieldValue::Text(record.jurusan()),
            Field::Email => FieldValue::Text(record.email()),
            Field::Telepon => FieldValue::Text(record.telepon()),
            Field::Ipk => FieldValue::Number(record.ipk()),
            Field::CreatedAt => FieldValue::Time(record.created_at()),
            Field::UpdatedAt => FieldValue::Time(record.updated_at()),
        }
    }

    /// String form of this field, as shown to users and searched against.
    pub fn text_of(self, record: &Mahasiswa) -> String {
        match self {
            Field::Nim => record.nim().to_string(),
            Field::Nama => record.nama().to_string(),
            Field::Jurusan => record.jurusan().to_string(),
            Field::Email => record.email().to_string(),
            Field::Telepon => record.telepon().to_string(),
            Field::Ipk => format!("{:.2}", record.ipk()),
            Field::CreatedAt => record.created_at().format(timestamp::FORMAT).to_string(),
            Field::UpdatedAt => record.updated_at().format(timestamp::FORMAT).to_string(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Nim => "nim",
            Field::Nama => "nama",
            Field::Jurusan => "jurusan",
            Field::Email => "email",
            Field::Telepon => "telepon",
            Field::Ipk => "ipk",
            Field::CreatedAt => "created_at",
            Field::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = SimakError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "nim" => Ok(Field::Nim),
            "nama" => Ok(Field::Nama),
            "jurusan" => Ok(Field::Jurusan),
            "email" => Ok(Field::Email),
            "telepon" => Ok(Field::Telepon),
            "ipk" => Ok(Field::Ipk),
            "created_at" => Ok(Field::CreatedAt),
            "updated_at" => Ok(Field::UpdatedAt),
            other => Err(SimakError::UnknownField(other.to_string())),
        }
    }
}

/// Natural-order comparison of two records on one field.
///
/// `None` means the pair cannot be ordered; callers skip rather than fail.
pub(crate) fn compare(a: &Mahasiswa, b: &Mahasiswa, field: Field) -> Option<Ordering> {
    field.value_of(a).partial_cmp(&field.value_of(b))
}
