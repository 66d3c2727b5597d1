//! Per-word JSON output.

use std::path::Path;

use serde::Serialize;

use etymon_lookup::EtymologyRecord;

use crate::error::{EtymonError, Result};

/// A finalised record plus its condensed gloss, as written to disk.
#[derive(Debug, Serialize)]
struct RecordDocument<'a> {
    #[serde(flatten)]
    record: &'a EtymologyRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    meaning: Option<String>,
}

/// Render `record` as a JSON document.
///
/// # Errors
///
/// Returns [`EtymonError::Serialization`] if encoding fails.
pub fn render_record(record: &EtymologyRecord, pretty: bool) -> Result<String> {
    let document = RecordDocument {
        record,
        meaning: record.short_meaning(),
    };
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}

/// Render `record` and write it to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`EtymonError::Output`] if the file cannot be written.
pub fn write_record(path: &Path, record: &EtymologyRecord, pretty: bool) -> Result<()> {
    let json = render_record(record, pretty)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| EtymonError::Output(format!("cannot create {}: {e}", parent.display())))?;
    }
    std::fs::write(path, json)
        .map_err(|e| EtymonError::Output(format!("cannot write {}: {e}", path.display())))?;
    tracing::trace!(path = %path.display(), word = %record.word, "record written");
    Ok(())
}
