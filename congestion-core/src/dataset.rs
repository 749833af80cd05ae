//! Dataset shape detection and the pure analysis pipeline.

use crate::error::Error;
use crate::record::{NormalizedRoute, RawRecord, extract};
use crate::report::{Report, assemble};
use crate::selector::select_slowest;
use serde_json::Value;
use tracing::debug;

/// Find the records array in a provider document.
///
/// Tried in order: `result.records`, `records`, `data`, the document itself.
/// Only arrays match; the first one found is used even if empty.
pub fn records_from_document(doc: &Value) -> Result<Vec<RawRecord>, Error> {
    if doc.is_null() {
        return Err(Error::InvalidResponse);
    }

    let candidates = [
        doc.get("result").and_then(|r| r.get("records")),
        doc.get("records"),
        doc.get("data"),
        Some(doc),
    ];
    let (shape, items) = candidates
        .into_iter()
        .zip(["result.records", "records", "data", "<root>"])
        .find_map(|(v, shape)| v.and_then(Value::as_array).map(|a| (shape, a)))
        .ok_or(Error::NoRecordsFound)?;

    if items.is_empty() {
        return Err(Error::NoRecordsFound);
    }
    debug!(shape, count = items.len(), "Records located");

    Ok(items
        .iter()
        .map(|item| match item {
            Value::Object(m) => m.clone(),
            _ => RawRecord::new(),
        })
        .collect())
}

/// Normalize every record, in order.
pub fn normalize(records: &[RawRecord]) -> Vec<NormalizedRoute> {
    records.iter().map(extract).collect()
}

/// Document → records → routes → slowest → report.
pub fn analyze(doc: &Value) -> Result<Report, Error> {
    let records = records_from_document(doc)?;
    let routes = normalize(&records);
    let selection = select_slowest(&routes)?;
    Ok(assemble(&selection))
}
