use std::path::{Path, PathBuf};

use crate::{Result, SourceStore, StoreError};

/// Filesystem layout of one reference library.
#[derive(Debug, Clone)]
pub struct Library {
    enl_path: PathBuf,
    data_dir: PathBuf,
    db_path: PathBuf,
}

impl Library {
    /// Resolve the library layout from the `.enl` file path.
    ///
    /// Fails with [`StoreError::Missing`] when the sidecar database does not
    /// exist; nothing is created on disk.
    pub fn locate(enl_path: &Path) -> Result<Self> {
        let base = enl_path.parent().unwrap_or_else(|| Path::new("."));
        let stem = enl_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data_dir = base.join(format!("{stem}.Data"));
        let db_path = data_dir.join("sdb").join("sdb.eni");
        if !db_path.exists() {
            return Err(StoreError::Missing(db_path));
        }
        Ok(Self {
            enl_path: enl_path.to_path_buf(),
            data_dir,
            db_path,
        })
    }

    pub fn open(&self) -> Result<SourceStore> {
        SourceStore::open(&self.db_path)
    }

    /// Folder holding attachment files referenced by the `file_res` table.
    pub fn pdf_dir(&self) -> PathBuf {
        self.data_dir.join("PDF")
    }

    /// Default export document path, next to the library file.
    pub fn default_export_path(&self) -> PathBuf {
        let base = self.enl_path.parent().unwrap_or_else(|| Path::new("."));
        let stem = self
            .enl_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        base.join(format!("{stem}_export.xml"))
    }

    /// Default audit sidecar path, next to the export document.
    pub fn default_audit_path(&self) -> PathBuf {
        let base = self.enl_path.parent().unwrap_or_else(|| Path::new("."));
        let stem = self
            .enl_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        base.join(format!("{stem}_export_audit.jsonl"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_requires_the_sidecar_database() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let enl = dir.path().join("Papers.enl");
        std::fs::write(&enl, b"").expect("touch enl");

        let missing = Library::locate(&enl);
        assert!(matches!(missing, Err(StoreError::Missing(_))));

        let sdb_dir = dir.path().join("Papers.Data").join("sdb");
        std::fs::create_dir_all(&sdb_dir).expect("create sdb dir");
        std::fs::write(sdb_dir.join("sdb.eni"), b"").expect("touch db");

        let library = Library::locate(&enl).expect("locate library");
        assert!(library.pdf_dir().ends_with("Papers.Data/PDF"));
        assert!(
            library
                .default_export_path()
                .ends_with("Papers_export.xml")
        );
    }
}
