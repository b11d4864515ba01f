//! # Persistence
//!
//! Records persist as a versioned JSON document:
//!
//! ```text
//! {
//!   "metadata": { "saved_at": "...", "total_records": N, "version": "2.0" },
//!   "data": [ { "nim": ..., "nama": ..., ... }, ... ]
//! }
//! ```
//!
//! Loading also accepts the legacy shape — a bare array of the same record
//! objects — so files written before the wrapper was introduced keep
//! working. A missing file is not an error; it means "no prior data" and is
//! reported as such, distinct from a corrupt file.
//!
//! Writes go to a temporary file in the same directory and are renamed into
//! place, so a crash mid-write never leaves a truncated document behind.
//!
//! ## Autosave
//!
//! [`Autosaver`] is a single worker thread fed by a channel. Each dispatch
//! carries an owned snapshot of the record list taken at that moment, so a
//! mutation that happens while a write is in flight cannot bleed into it.
//! Worker failures are logged at `warn` and swallowed: autosave trades
//! durability guarantees for caller responsiveness, and the synchronous
//! [`save`] path exists for anyone who needs the result.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{now, timestamp, Mahasiswa};

/// Default data file, next to the working directory like the original tool.
pub const DEFAULT_DATA_PATH: &str = "data_mahasiswa.json";

/// Version stamp written into the metadata wrapper.
pub const FILE_VERSION: &str = "2.0";

/// Column header of the CSV export.
pub const CSV_HEADER: &str = "NIM,Nama,Jurusan,Email,Telepon,IPK,Created At,Updated At";

#[derive(Serialize)]
struct SaveFile<'a> {
    metadata: FileMetadata,
    data: &'a [Mahasiswa],
}

#[derive(Serialize)]
struct FileMetadata {
    #[serde(with = "timestamp")]
    saved_at: NaiveDateTime,
    total_records: usize,
    version: String,
}

// The wrapped shape is tried first; anything that is a bare array falls
// through to the legacy variant. Unknown keys (like "metadata") are ignored
// by serde, which is all the original reader ever did with them.
#[derive(Deserialize)]
#[serde(untagged)]
enum FileShape {
    Wrapped { data: Vec<Mahasiswa> },
    Legacy(Vec<Mahasiswa>),
}

/// Serialize `records` with a fresh metadata wrapper and write them
/// atomically to `path`. Output is pretty-printed UTF-8; non-ASCII text is
/// preserved as-is.
pub fn save(records: &[Mahasiswa], path: &Path) -> Result<()> {
    let document = SaveFile {
        metadata: FileMetadata {
            saved_at: now(),
            total_records: records.len(),
            version: FILE_VERSION.to_string(),
        },
        data: records,
    };
    let json = serde_json::to_string_pretty(&document)?;
    write_atomic(path, &json)
}

/// Read records from `path`. Returns `Ok(None)` when the file does not
/// exist; a file that exists but cannot be read or parsed is an error.
pub fn load(path: &Path) -> Result<Option<Vec<Mahasiswa>>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    let records = match serde_json::from_str::<FileShape>(&raw)? {
        FileShape::Wrapped { data } => data,
        FileShape::Legacy(records) => {
            log::debug!("{}: legacy bare-array data file", path.display());
            records
        }
    };
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(Some(records))
}

/// Export `records` as CSV: fixed column order, IPK with two decimals,
/// CRLF row endings, UTF-8.
pub fn export_csv(records: &[Mahasiswa], path: &Path) -> Result<()> {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push_str("\r\n");
    for record in records {
        let row = [
            csv_field(record.nim()),
            csv_field(record.nama()),
            csv_field(record.jurusan()),
            csv_field(record.email()),
            csv_field(record.telepon()),
            format!("{:.2}", record.ipk()),
            record.created_at().format(timestamp::FORMAT).to_string(),
            record.updated_at().format(timestamp::FORMAT).to_string(),
        ];
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }
    write_atomic(path, &out)
}

/// Quote a CSV field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains(|c| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// Write to a sibling temp file, then rename into place.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

struct Snapshot {
    records: Vec<Mahasiswa>,
    path: PathBuf,
}

/// Background save worker. One thread drains a channel of snapshots and
/// writes each in turn; the thread exits when the owning store drops the
/// sender, after finishing whatever is queued.
pub(crate) struct Autosaver {
    tx: mpsc::Sender<Snapshot>,
}

impl Autosaver {
    pub(crate) fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Snapshot>();
        thread::spawn(move || {
            for job in rx {
                if let Err(err) = save(&job.records, &job.path) {
                    // Best-effort by contract: the caller must not pay for
                    // a failed background save.
                    log::warn!("autosave to {} failed: {}", job.path.display(), err);
                }
            }
        });
        Self { tx }
    }

    pub(crate) fn dispatch(&self, records: Vec<Mahasiswa>, path: PathBuf) {
        let _ = self.tx.send(Snapshot { records, path });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_plain_value_unquoted() {
        assert_eq!(csv_field("Teknik Informatika"), "Teknik Informatika");
    }

    #[test]
    fn test_csv_field_quotes_delimiters() {
        assert_eq!(csv_field("Hukum, Bisnis"), "\"Hukum, Bisnis\"");
        assert_eq!(csv_field("a\"b"), "\"a\"\"b\"");
        assert_eq!(csv_field("a\nb"), "\"a\nb\"");
    }

    #[test]
    fn test_save_writes_wrapped_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let records =
            vec![Mahasiswa::try_new("230411100001", "Siti Rahayu", "Teknik Informatika", "", "", 3.5).unwrap()];

        save(&records, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["version"], FILE_VERSION);
        assert_eq!(value["metadata"]["total_records"], 1);
        assert_eq!(value["data"][0]["nim"], "230411100001");
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        save(&[], &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("data.tmp").exists());
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load_legacy_bare_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"[{"nim": "230411100001", "nama": "Siti Rahayu"}]"#,
        )
        .unwrap();

        let records = load(&path).unwrap().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].nim(), "230411100001");
    }

    #[test]
    fn test_save_preserves_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let records = vec![Mahasiswa::try_new(
            "230411100001",
            "Nur Aisyah",
            "Sastra Jepang 日本文学",
            "",
            "",
            3.0,
        )
        .unwrap()];

        save(&records, &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("日本文学"));
        assert!(!raw.contains("\\u"));
    }
}
