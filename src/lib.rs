//! # simak
//!
//! A library core for managing student records: validated entities, CRUD
//! with duplicate-key enforcement, cursor navigation, classic search and
//! sort algorithms, aggregate statistics, and versioned JSON persistence
//! with CSV export and background autosave.
//!
//! The crate is UI-agnostic. A GUI (or any other collaborator) constructs
//! records through the validated [`Mahasiswa`] API, mutates the collection
//! through [`MahasiswaStore`], and depends on the [`DataOperations`] trait
//! for display/save/load.
//!
//! ```no_run
//! use simak::{DataOperations, Field, Mahasiswa, MahasiswaStore};
//!
//! # fn main() -> simak::Result<()> {
//! let mut store = MahasiswaStore::new().with_autosave();
//!
//! let record = Mahasiswa::try_new(
//!     "230411100001",
//!     "Siti Rahayu",
//!     "Teknik Informatika",
//!     "siti@kampus.ac.id",
//!     "081234567890",
//!     3.75,
//! )?;
//! store.add(record)?;
//!
//! store.quick_sort(Field::Ipk, false);
//! let best = store.linear_search("rahayu", Field::Nama);
//! store.save_to_file()?;
//! # let _ = best;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod field;
pub mod model;
pub mod persist;
pub mod search;
pub mod sort;
pub mod stats;
pub mod store;
pub mod validate;

pub use error::{Result, SimakError};
pub use field::{Field, FieldValue};
pub use model::Mahasiswa;
pub use persist::{CSV_HEADER, DEFAULT_DATA_PATH, FILE_VERSION};
pub use stats::Statistics;
pub use store::{DataOperations, MahasiswaStore, SortAlgorithm, SortEntry};
