use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use forms::{DocumentMetadata, FormData};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// An in-progress form as persisted. Uploads are reduced to their metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedForm {
    pub form_type: String,
    pub form_data: FormData,
    #[serde(default)]
    pub document_metadata: BTreeMap<String, Vec<DocumentMetadata>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    pub saved_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl SavedForm {
    /// Page to resume on; snapshots without one start at the beginning.
    pub fn resume_page(&self) -> u32 {
        self.current_page.unwrap_or(1)
    }
}

/// Just enough of a snapshot to prove it is well formed. `formData` is
/// skipped rather than decoded into values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SnapshotHeader {
    pub form_type: String,
    #[allow(dead_code)]
    pub form_data: IgnoredAny,
    pub saved_at: DateTime<Utc>,
}
