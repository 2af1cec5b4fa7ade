//! One form being filled in.
//!
//! `FormSession` owns the mutable pieces (values, uploads, page cursor) and
//! shares the immutable schema. Derived views such as the current page's rows
//! or its validity are recomputed from those on every call; nothing derived is
//! cached, so they cannot drift out of sync with the raw state.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::documents::{DocumentMetadata, DocumentStore, UploadedFile};
use crate::errors::FormError;
use crate::field::FieldDescriptor;
use crate::layout::Row;
use crate::navigation::{Navigator, Transition};
use crate::review::ReviewSection;
use crate::schema::FormSchema;
use crate::state::{FieldValue, FormData};
use crate::validation::{self, ValidationIssue};

#[derive(Debug, Clone)]
pub struct FormSession {
    schema: Arc<FormSchema>,
    data: FormData,
    documents: DocumentStore,
    navigator: Navigator,
}

impl FormSession {
    pub fn new(schema: Arc<FormSchema>) -> Self {
        let data = FormData::initialized(schema.fields());
        let navigator = Navigator::new(schema.total_pages());
        Self {
            schema,
            data,
            documents: DocumentStore::new(),
            navigator,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn current_page(&self) -> u32 {
        self.navigator.current_page()
    }

    pub fn total_pages(&self) -> u32 {
        self.navigator.total_pages()
    }

    pub fn is_review(&self) -> bool {
        self.navigator.is_review()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.navigator.error_message()
    }

    pub fn set_bypass_validation(&mut self, bypass: bool) {
        self.navigator.set_bypass_validation(bypass);
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.data.set(key, value);
    }

    /// Attach a file to the upload field with the given id.
    pub fn attach_document(&mut self, field_id: &str, file: UploadedFile) -> Result<(), FormError> {
        let field = self
            .schema
            .field_by_id(field_id)
            .ok_or_else(|| FormError::UnknownField(field_id.to_string()))?;
        self.documents.attach(field, file)
    }

    pub fn remove_document(&mut self, field_id: &str, index: usize) -> Option<UploadedFile> {
        self.documents.remove(field_id, index)
    }

    pub fn current_page_fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.schema.page_fields(self.navigator.current_page())
    }

    pub fn current_page_rows(&self) -> Vec<Row<'_>> {
        self.schema.page_rows(self.navigator.current_page())
    }

    pub fn is_current_page_valid(&self) -> bool {
        self.navigator.bypass_validation()
            || validation::is_page_valid(self.current_page_fields(), &self.data, &self.documents)
    }

    pub fn next_page(&mut self) -> Transition {
        let valid = self.is_current_page_valid();
        self.navigator.advance(valid)
    }

    pub fn previous_page(&mut self) -> Transition {
        self.navigator.retreat()
    }

    pub fn edit_section(&mut self, page: u32) -> Transition {
        self.navigator.edit_section(page)
    }

    /// First failing field across the whole form, without touching the
    /// error message.
    pub fn first_issue(&self) -> Option<ValidationIssue> {
        if self.navigator.bypass_validation() {
            return None;
        }
        validation::validate_all(self.schema.fields(), &self.data, &self.documents).err()
    }

    /// Whole-form check before submission. A failure is also stored as the
    /// session's error message.
    pub fn validate_form(&mut self) -> Result<(), ValidationIssue> {
        match self.first_issue() {
            Some(issue) => {
                debug!(field = issue.field(), "form validation failed");
                self.navigator.set_error(issue.to_string());
                Err(issue)
            }
            None => {
                self.navigator.clear_error();
                Ok(())
            }
        }
    }

    /// Back to the freshly opened state: initial values, no uploads, page 1.
    pub fn reset(&mut self) {
        self.data.reset(self.schema.fields());
        self.documents.clear();
        self.navigator.restore(1);
        info!(form = %self.schema.title, "form reset");
    }

    /// Load previously saved values and page. Uploads cannot be restored
    /// (only their metadata was saved), so the document store starts empty.
    pub fn restore(&mut self, saved: FormData, page: u32) {
        self.data = FormData::initialized(self.schema.fields());
        self.data.merge(saved);
        self.documents.clear();
        self.navigator.restore(page);
        info!(form = %self.schema.title, page = self.navigator.current_page(), "form restored");
    }

    pub fn document_metadata(&self) -> BTreeMap<String, Vec<DocumentMetadata>> {
        self.documents.metadata()
    }

    pub fn review(&self, title_for: impl FnMut(u32) -> String) -> Vec<ReviewSection> {
        ReviewSection::collect(&self.schema, &self.data, &self.documents, title_for)
    }
}
