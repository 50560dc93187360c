use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use refx_model::{AttachmentMap, RawRecord, RawValue};

use crate::Result;

/// Open connection to one library database. Dropped at the end of an export,
/// which closes the connection on every exit path.
pub struct SourceStore {
    conn: Connection,
}

impl SourceStore {
    /// Open the database read-only.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// All non-deleted reference rows, as column-name → value maps.
    pub fn fetch_references(&self) -> Result<Vec<RawRecord>> {
        let mut stmt = self.conn.prepare("SELECT * FROM refs WHERE trash_state = 0")?;
        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = RawRecord::new();
            for (idx, name) in column_names.iter().enumerate() {
                record.insert(name.clone(), raw_value(row.get_ref(idx)?));
            }
            records.push(record);
        }
        debug!(count = records.len(), "fetched reference rows");
        Ok(records)
    }

    /// Attachment paths per reference id, preserving row order.
    pub fn fetch_attachments(&self) -> Result<AttachmentMap> {
        let mut stmt = self
            .conn
            .prepare("SELECT refs_id, file_path FROM file_res")?;
        let mut rows = stmt.query([])?;
        let mut map = AttachmentMap::new();
        while let Some(row) = rows.next()? {
            let refs_id: i64 = row.get(0)?;
            let file_path: String = row.get(1)?;
            map.entry(refs_id).or_default().push(file_path);
        }
        debug!(records = map.len(), "fetched attachment map");
        Ok(map)
    }
}

fn raw_value(value: ValueRef<'_>) -> RawValue {
    match value {
        ValueRef::Null => RawValue::Null,
        ValueRef::Integer(value) => RawValue::Int(value),
        ValueRef::Real(value) => RawValue::Real(value),
        ValueRef::Text(bytes) => RawValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        // Blob columns carry binary payloads the export has no use for.
        ValueRef::Blob(_) => RawValue::Null,
    }
}
