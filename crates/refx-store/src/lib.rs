//! Read-only access to the reference library's SQLite store.
//!
//! A library is addressed by its `.enl` file; the actual database lives next
//! to it under `<name>.Data/sdb/sdb.eni`. Two tables matter here: `refs`
//! (one row per reference, with a trash flag) and `file_res` (attachment
//! paths keyed by reference id).

mod library;
mod source;

pub use library::Library;
pub use source::SourceStore;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(
        "library database not found at '{0}'; make sure the .Data folder exists next to the library file"
    )]
    Missing(PathBuf),
    #[error("failed to open the reference store: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
