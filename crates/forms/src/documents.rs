//! Uploaded files, kept apart from `FormData`.
//!
//! Files are keyed by field `id` (not `key`). Only their metadata ever leaves
//! this store: snapshots and submissions carry `DocumentMetadata`, never bytes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::FormError;
use crate::field::FieldDescriptor;

/// An uploaded file held in memory for the lifetime of the form.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn metadata(&self) -> DocumentMetadata {
        DocumentMetadata {
            name: self.name.clone(),
            size: self.size(),
            content_type: self.content_type.clone(),
        }
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

/// Serializable description of an uploaded file (no content).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStore {
    files: BTreeMap<String, Vec<UploadedFile>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to an upload field after checking its type and size limits.
    pub fn attach(&mut self, field: &FieldDescriptor, file: UploadedFile) -> Result<(), FormError> {
        if !field.kind.is_upload() {
            return Err(FormError::NotAnUploadField(field.id.clone()));
        }
        if !accepts(&field.accepted_types, &file.content_type) {
            return Err(FormError::UnsupportedFileType {
                field: field.id.clone(),
                file: file.name,
                content_type: file.content_type,
            });
        }
        if let Some(max_size) = field.max_size {
            if file.size() > max_size {
                return Err(FormError::FileTooLarge {
                    field: field.id.clone(),
                    file: file.name.clone(),
                    size: file.size(),
                    max_size,
                });
            }
        }
        self.insert(&field.id, file);
        Ok(())
    }

    /// Record a file without any checks.
    pub fn insert(&mut self, field_id: &str, file: UploadedFile) {
        self.files.entry(field_id.to_string()).or_default().push(file);
    }

    pub fn remove(&mut self, field_id: &str, index: usize) -> Option<UploadedFile> {
        let list = self.files.get_mut(field_id)?;
        if index >= list.len() {
            return None;
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.files.remove(field_id);
        }
        Some(removed)
    }

    pub fn files(&self, field_id: &str) -> &[UploadedFile] {
        self.files.get(field_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_files(&self, field_id: &str) -> bool {
        !self.files(field_id).is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.files.values().all(Vec::is_empty)
    }

    /// Metadata-only projection, keyed by field id.
    pub fn metadata(&self) -> BTreeMap<String, Vec<DocumentMetadata>> {
        self.files
            .iter()
            .map(|(id, files)| (id.clone(), files.iter().map(UploadedFile::metadata).collect()))
            .collect()
    }
}

fn accepts(accepted: &[String], content_type: &str) -> bool {
    if accepted.is_empty() {
        return true;
    }
    accepted.iter().any(|pattern| match pattern.strip_suffix("/*") {
        Some(prefix) => content_type
            .split_once('/')
            .is_some_and(|(major, _)| major.eq_ignore_ascii_case(prefix)),
        None => pattern.eq_ignore_ascii_case(content_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn id_upload() -> FieldDescriptor {
        FieldDescriptor::new("idDocument", "ID Upload", FieldKind::Document)
            .accept(["image/jpeg", "image/png", "application/pdf"])
            .max_size(8)
    }

    #[test]
    fn attach_accepts_listed_type_within_limit() {
        let mut store = DocumentStore::new();
        store
            .attach(&id_upload(), UploadedFile::new("id.png", "image/png", vec![0; 8]))
            .expect("attach");
        assert!(store.has_files("idDocument"));
        assert_eq!(store.files("idDocument")[0].size(), 8);
    }

    #[test]
    fn attach_rejects_unlisted_type() {
        let mut store = DocumentStore::new();
        let err = store
            .attach(&id_upload(), UploadedFile::new("id.gif", "image/gif", vec![0; 2]))
            .unwrap_err();
        assert!(matches!(err, FormError::UnsupportedFileType { .. }));
        assert!(!store.has_files("idDocument"));
    }

    #[test]
    fn attach_rejects_oversize_file() {
        let mut store = DocumentStore::new();
        let err = store
            .attach(&id_upload(), UploadedFile::new("id.pdf", "application/pdf", vec![0; 9]))
            .unwrap_err();
        assert!(matches!(err, FormError::FileTooLarge { size: 9, max_size: 8, .. }));
    }

    #[test]
    fn attach_rejects_non_upload_field() {
        let mut store = DocumentStore::new();
        let field = FieldDescriptor::new("notes", "Notes", FieldKind::Textarea);
        let err = store
            .attach(&field, UploadedFile::new("a.txt", "text/plain", vec![]))
            .unwrap_err();
        assert!(matches!(err, FormError::NotAnUploadField(id) if id == "notes"));
    }

    #[test]
    fn wildcard_and_empty_accept_lists() {
        assert!(accepts(&["image/*".to_string()], "image/heic"));
        assert!(!accepts(&["image/*".to_string()], "application/pdf"));
        assert!(accepts(&[], "anything/at-all"));
    }

    #[test]
    fn metadata_drops_content() {
        let mut store = DocumentStore::new();
        store.insert("photos", UploadedFile::new("a.jpg", "image/jpeg", vec![1, 2, 3]));
        let meta = store.metadata();
        assert_eq!(
            meta["photos"],
            vec![DocumentMetadata {
                name: "a.jpg".into(),
                size: 3,
                content_type: "image/jpeg".into(),
            }]
        );
        let json = serde_json::to_value(&meta).expect("serialize");
        assert_eq!(json["photos"][0]["type"], "image/jpeg");
    }

    #[test]
    fn removing_last_file_clears_the_slot() {
        let mut store = DocumentStore::new();
        store.insert("photos", UploadedFile::new("a.jpg", "image/jpeg", vec![]));
        assert!(store.remove("photos", 1).is_none());
        assert!(store.remove("photos", 0).is_some());
        assert!(!store.has_files("photos"));
        assert!(store.is_empty());
    }
}
