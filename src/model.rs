//! # Domain Model: the Student Record
//!
//! [`Mahasiswa`] is the single entity this crate manages. Its fields are
//! private: every mutation goes through a validated setter, which is how the
//! store keeps its invariants (unique NIM, IPK in range, monotonic
//! timestamps) without defensive checks everywhere else.
//!
//! ## Mutation contract
//!
//! Setters are all-or-nothing. A failed validation returns
//! [`SimakError::Validation`] and leaves both the field and `updated_at`
//! untouched; a successful one stores the value and refreshes `updated_at`.
//! `created_at` is fixed at construction.
//!
//! ## Wire format
//!
//! Records serialize with the legacy Indonesian keys (`nim`, `nama`,
//! `jurusan`, `email`, `telepon`, `ipk`) and `%Y-%m-%d %H:%M:%S`
//! timestamps. Deserialization tolerates documents written by older
//! versions: missing keys default to empty/zero, and stored timestamps are
//! kept as-is rather than regenerated. Restoring from a file deliberately
//! bypasses setter validation, matching what the original system persisted.
//!
//! Timestamps are truncated to whole seconds at construction so a record
//! survives a save/load cycle without drifting.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimakError};
use crate::validate;

/// Current wall-clock time at second resolution.
pub(crate) fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Serde adapter for the `%Y-%m-%d %H:%M:%S` wire format.
pub(crate) mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A validated student record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mahasiswa {
    nim: String,
    nama: String,
    jurusan: String,
    email: String,
    telepon: String,
    ipk: f64,
    #[serde(with = "timestamp")]
    created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    updated_at: NaiveDateTime,
}

// Custom deserializer to handle legacy data where fields may be missing.
// Missing scalar fields default to empty/zero; missing timestamps default
// to now. Stored timestamps are accepted without regeneration.
impl<'de> Deserialize<'de> for Mahasiswa {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = MahasiswaHelper::deserialize(deserializer)?;

        let parse = |raw: Option<String>| -> std::result::Result<NaiveDateTime, D::Error> {
            match raw {
                Some(raw) => NaiveDateTime::parse_from_str(&raw, timestamp::FORMAT)
                    .map_err(serde::de::Error::custom),
                None => Ok(now()),
            }
        };

        Ok(Mahasiswa {
            nim: helper.nim,
            nama: helper.nama,
            jurusan: helper.jurusan,
            email: helper.email,
            telepon: helper.telepon,
            ipk: helper.ipk,
            created_at: parse(helper.created_at)?,
            updated_at: parse(helper.updated_at)?,
        })
    }
}

#[derive(Deserialize)]
struct MahasiswaHelper {
    #[serde(default)]
    nim: String,
    #[serde(default)]
    nama: String,
    #[serde(default)]
    jurusan: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    telepon: String,
    #[serde(default)]
    ipk: f64,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl Default for Mahasiswa {
    fn default() -> Self {
        Self::new()
    }
}

impl Mahasiswa {
    /// An empty record with fresh timestamps. The form collaborator fills
    /// it in field by field through the setters.
    pub fn new() -> Self {
        let created = now();
        Self {
            nim: String::new(),
            nama: String::new(),
            jurusan: String::new(),
            email: String::new(),
            telepon: String::new(),
            ipk: 0.0,
            created_at: created,
            updated_at: created,
        }
    }

    /// Validated construction: runs every setter, failing on the first
    /// field that does not pass.
    pub fn try_new(
        nim: &str,
        nama: &str,
        jurusan: &str,
        email: &str,
        telepon: &str,
        ipk: f64,
    ) -> Result<Self> {
        let mut record = Self::new();
        record.set_nim(nim)?;
        record.set_nama(nama)?;
        record.set_jurusan(jurusan);
        record.set_email(email)?;
        record.set_telepon(telepon)?;
        record.set_ipk(ipk)?;
        Ok(record)
    }

    pub fn nim(&self) -> &str {
        &self.nim
    }

    pub fn nama(&self) -> &str {
        &self.nama
    }

    pub fn jurusan(&self) -> &str {
        &self.jurusan
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn telepon(&self) -> &str {
        &self.telepon
    }

    pub fn ipk(&self) -> f64 {
        self.ipk
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub fn set_nim(&mut self, value: &str) -> Result<()> {
        if !validate::is_valid_nim(value) {
            return Err(SimakError::Validation(
                "NIM must be exactly 12 digits".to_string(),
            ));
        }
        self.nim = value.to_string();
        self.touch();
        Ok(())
    }

    pub fn set_nama(&mut self, value: &str) -> Result<()> {
        if !validate::is_valid_nama(value) {
            return Err(SimakError::Validation(
                "Nama may only contain letters, spaces, periods, commas, and hyphens (3-50 characters)"
                    .to_string(),
            ));
        }
        self.nama = value.to_string();
        self.touch();
        Ok(())
    }

    /// Jurusan is free-form; no format constraint.
    pub fn set_jurusan(&mut self, value: &str) {
        self.jurusan = value.to_string();
        self.touch();
    }

    pub fn set_email(&mut self, value: &str) -> Result<()> {
        if !validate::is_valid_email(value) {
            return Err(SimakError::Validation("invalid email format".to_string()));
        }
        self.email = value.to_string();
        self.touch();
        Ok(())
    }

    pub fn set_telepon(&mut self, value: &str) -> Result<()> {
        if !validate::is_valid_telepon(value) {
            return Err(SimakError::Validation(
                "Telepon must start with 08 and be 10-13 digits".to_string(),
            ));
        }
        self.telepon = value.to_string();
        self.touch();
        Ok(())
    }

    pub fn set_ipk(&mut self, value: f64) -> Result<()> {
        if !validate::is_valid_ipk(value) {
            return Err(SimakError::Validation(
                "IPK must be between 0.0 and 4.0".to_string(),
            ));
        }
        self.ipk = value;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

impl fmt::Display for Mahasiswa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - IPK: {:.2}",
            self.nim, self.nama, self.jurusan, self.ipk
        )
    }
}
