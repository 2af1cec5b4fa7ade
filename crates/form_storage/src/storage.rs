//! Snapshot service.
//!
//! Each form type owns exactly one slot, `<prefix><form_type>`, holding the
//! JSON of a `SavedForm`. Saves overwrite the slot. Slots of different form
//! types never interact.
//!
//! Corrupt slots are reported as absent (and logged) instead of failing the
//! caller; backend failures still surface as `StorageError`.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use forms::{DocumentStore, FormData};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::backend::KeyValueStore;
use crate::snapshot::{SavedForm, SnapshotHeader};
use crate::StorageError;

pub const DEFAULT_KEY_PREFIX: &str = "tango_saved_form_";

#[derive(Clone)]
pub struct FormStorage {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl FormStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn key_for(&self, form_type: &str) -> String {
        format!("{}{}", self.prefix, form_type)
    }

    /// Write the current state of a form. `savedAt` is kept from an earlier
    /// save of the same form type; `lastModified` is always now.
    pub fn save(
        &self,
        form_type: &str,
        data: &FormData,
        documents: &DocumentStore,
        current_page: u32,
    ) -> Result<SavedForm, StorageError> {
        let key = self.key_for(form_type);
        let now = Utc::now();
        let saved_at = self
            .header(&key)?
            .map(|header| header.saved_at)
            .unwrap_or(now);

        let snapshot = SavedForm {
            form_type: form_type.to_string(),
            form_data: data.clone(),
            document_metadata: documents.metadata(),
            current_page: Some(current_page),
            saved_at,
            last_modified: now,
        };
        self.store.set(&key, &serde_json::to_string(&snapshot)?)?;
        info!(form_type, page = current_page, "form progress saved");
        Ok(snapshot)
    }

    /// The saved snapshot, or `None` when absent or unreadable.
    pub fn load(&self, form_type: &str) -> Result<Option<SavedForm>, StorageError> {
        let key = self.key_for(form_type);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<SavedForm>(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                warn!(%key, error = %err, "ignoring corrupt saved form");
                Ok(None)
            }
        }
    }

    /// Whether a readable snapshot exists. Only the header is decoded.
    pub fn exists(&self, form_type: &str) -> Result<bool, StorageError> {
        Ok(self.header(&self.key_for(form_type))?.is_some())
    }

    pub fn delete(&self, form_type: &str) -> Result<(), StorageError> {
        self.store.remove(&self.key_for(form_type))?;
        info!(form_type, "saved form deleted");
        Ok(())
    }

    /// Bump `lastModified` without rewriting any other stored content.
    /// Returns `false` when there is nothing (readable) to touch.
    pub fn touch(&self, form_type: &str) -> Result<bool, StorageError> {
        let key = self.key_for(form_type);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(false);
        };
        let mut value = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                warn!(%key, "cannot touch corrupt saved form");
                return Ok(false);
            }
        };
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::AutoSi, true);
        value.insert("lastModified".to_string(), Value::String(stamp));
        self.store.set(&key, &serde_json::to_string(&value)?)?;
        debug!(form_type, "saved form touched");
        Ok(true)
    }

    /// Readable snapshots among `form_types`, in the given order.
    pub fn all_saved<'a>(
        &self,
        form_types: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<SavedForm>, StorageError> {
        let mut saved = Vec::new();
        for form_type in form_types {
            if let Some(snapshot) = self.load(form_type)? {
                saved.push(snapshot);
            }
        }
        Ok(saved)
    }

    fn header(&self, key: &str) -> Result<Option<SnapshotHeader>, StorageError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<SnapshotHeader>(&raw) {
            Ok(header) => {
                debug!(%key, form_type = %header.form_type, "saved form header read");
                Ok(Some(header))
            }
            Err(err) => {
                warn!(%key, error = %err, "saved form header unreadable");
                Ok(None)
            }
        }
    }
}
