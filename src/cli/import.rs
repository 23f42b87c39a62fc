use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::StringRecord;
use tracing::debug;

use crate::db::Database;
use crate::error::{StoreError, StoreResult};
use crate::models::ImportRow;

const FIELDS_PER_ROW: usize = 4;

/// Execute the import command. Returns the ids of the new contacts.
pub fn run_import(db: &Database, file: &Path) -> Result<Vec<i64>> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let rows = read_import_file(file)
        .with_context(|| format!("Failed to read CSV file {}", file.display()))?;

    let ids = db.import_contacts(&rows)?;
    println!("Imported {} contacts", ids.len());
    Ok(ids)
}

/// Read every data record of an import file at `path`.
pub fn read_import_file(path: &Path) -> StoreResult<Vec<ImportRow>> {
    read_import_rows(File::open(path)?)
}

/// Parse CSV from `reader`. The first record is a header and is dropped
/// whatever it contains; every other record must have exactly four fields,
/// and a blank line between records counts as a record with none.
/// Any bad record fails the whole read, so nothing partial reaches the store.
pub fn read_import_rows<R: Read>(mut reader: R) -> StoreResult<Vec<ImportRow>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut idx = 0usize;
    while csv_reader.read_record(&mut record)? {
        let start = record_start(&data, record.position().map_or(0, |p| p.byte() as usize));
        idx += 1;
        if idx == 1 {
            debug!(header = ?record, "skipping header");
            continue;
        }

        // csv skips empty lines silently; the bytes it skipped are still
        // at the front of the record
        if matches!(data.get(start), Some(b'\n' | b'\r')) {
            return Err(StoreError::MalformedRow {
                line: line_at(&data, start),
                found: 0,
            });
        }

        if record.len() != FIELDS_PER_ROW {
            return Err(StoreError::MalformedRow {
                line: line_at(&data, start),
                found: record.len(),
            });
        }

        let row: ImportRow = record.deserialize(None)?;
        rows.push(row);
    }

    Ok(rows)
}

/// Offset where a record read from `offset` begins. With CRLF endings the
/// previous record stops after the CR, leaving its LF in front of this one.
fn record_start(data: &[u8], offset: usize) -> usize {
    let crlf_tail = offset > 0
        && data.get(offset - 1) == Some(&b'\r')
        && data.get(offset) == Some(&b'\n');
    if crlf_tail {
        offset + 1
    } else {
        offset
    }
}

/// 1-based line number of byte `offset`
fn line_at(data: &[u8], offset: usize) -> u64 {
    let end = offset.min(data.len());
    data[..end].iter().filter(|&&b| b == b'\n').count() as u64 + 1
}
