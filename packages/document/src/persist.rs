//! Persisted document shape.
//!
//! The whole document (pages, current-page pointer, id counter) serializes
//! as one JSON value; there are no partial updates. Collaborator stores
//! treat the payload as opaque text.

use crate::document::SiteDocument;
use pagecraft_common::CommonResult;

/// Serialize the full document for a key-value store.
pub fn document_to_json(doc: &SiteDocument) -> CommonResult<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Deserialize a document previously produced by [`document_to_json`].
pub fn document_from_json(payload: &str) -> CommonResult<SiteDocument> {
    Ok(serde_json::from_str(payload)?)
}
