//! Form schema definition.
//!
//! `FormSchema` is the ordered field list of one form plus its page index.
//! The index is built once on construction; schemas never change afterwards,
//! so every derived view (page fields, rows, validity) can be recomputed from
//! it on demand without going stale.
//!
//! Variants that share fields are built by composition rather than by
//! copying lists around:
//! ```ignore
//! let schema = FormSchema::builder("Agent Onboarding")
//!     .extend(base_fields())
//!     .extend(agent_fields())
//!     .push(signature_field())
//!     .build();
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use tracing::warn;

use crate::errors::FormError;
use crate::field::FieldDescriptor;
use crate::layout::{pack_rows, Row};
use crate::pagination::PageIndex;

#[derive(Debug, Clone)]
pub struct FormSchema {
    pub title: String,
    pub description: Option<String>,
    fields: Vec<FieldDescriptor>,
    index: PageIndex,
}

impl FormSchema {
    pub fn new(title: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        warn_duplicate_ids(&fields);
        let index = PageIndex::build(&fields);
        Self {
            title: title.into(),
            description: None,
            fields,
            index,
        }
    }

    pub fn builder(title: impl Into<String>) -> FormSchemaBuilder {
        FormSchemaBuilder {
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Parse a schema from JSON: either a bare field array or
    /// `{ "title": ..., "description": ..., "fields": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Fields(Vec<FieldDescriptor>),
            Document {
                #[serde(default)]
                title: String,
                #[serde(default)]
                description: Option<String>,
                fields: Vec<FieldDescriptor>,
            },
        }

        let schema = match serde_json::from_str::<Raw>(json)? {
            Raw::Fields(fields) => Self::new("", fields),
            Raw::Document {
                title,
                description,
                fields,
            } => {
                let mut schema = Self::new(title, fields);
                schema.description = description;
                schema
            }
        };
        Ok(schema)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn page_index(&self) -> &PageIndex {
        &self.index
    }

    pub fn total_pages(&self) -> u32 {
        self.index.total_pages()
    }

    /// Page number of the implicit review step that follows the last page.
    pub fn review_page(&self) -> u32 {
        self.total_pages().saturating_add(1)
    }

    /// Pages with at least one field, ascending (what the review step lists).
    pub fn review_pages(&self) -> Vec<u32> {
        self.index.page_numbers().collect()
    }

    /// Fields on `page` in schema order.
    pub fn page_fields(&self, page: u32) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.index
            .positions(page)
            .iter()
            .map(move |&pos| &self.fields[pos])
    }

    /// Fields on `page` packed into layout rows.
    pub fn page_rows(&self, page: u32) -> Vec<Row<'_>> {
        pack_rows(self.page_fields(page))
    }

    pub fn field_by_id(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// First field bound to `key` (keys may repeat across merged lists).
    pub fn field_by_key(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// `section_title` of the first field on `page` that declares one.
    pub fn declared_section_title(&self, page: u32) -> Option<&str> {
        self.page_fields(page)
            .find_map(|f| f.section_title.as_deref())
    }
}

/// Accumulates ordered field lists into a `FormSchema`.
pub struct FormSchemaBuilder {
    title: String,
    description: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl FormSchemaBuilder {
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn extend(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn push(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> FormSchema {
        let mut schema = FormSchema::new(self.title, self.fields);
        schema.description = self.description;
        schema
    }
}

fn warn_duplicate_ids(fields: &[FieldDescriptor]) {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.id.as_str()) {
            warn!(id = %field.id, "duplicate field id in form schema");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn sample() -> FormSchema {
        FormSchema::builder("Sample")
            .extend(vec![
                FieldDescriptor::new("firstName", "First Name", FieldKind::Text).span(4),
                FieldDescriptor::new("email", "Email", FieldKind::Email).on_page(2),
            ])
            .extend(vec![
                FieldDescriptor::new("idDocument", "ID Upload", FieldKind::Document).on_page(2),
            ])
            .push(FieldDescriptor::new("eSignature", "Signature", FieldKind::Signature).on_page(3))
            .build()
    }

    #[test]
    fn composition_keeps_order() {
        let schema = sample();
        let keys: Vec<_> = schema.fields().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["firstName", "email", "idDocument", "eSignature"]);
        assert_eq!(schema.total_pages(), 3);
        assert_eq!(schema.review_page(), 4);
    }

    #[test]
    fn page_fields_follow_schema_order() {
        let schema = sample();
        let page2: Vec<_> = schema.page_fields(2).map(|f| f.id.as_str()).collect();
        assert_eq!(page2, vec!["email", "idDocument"]);
        assert_eq!(schema.page_fields(9).count(), 0);
    }

    #[test]
    fn parses_bare_field_array() {
        let json = r#"[
            { "id": "a", "key": "a", "type": "text", "page": 2 },
            { "id": "b", "key": "b", "type": "checkbox" }
        ]"#;
        let schema = FormSchema::from_json(json).expect("parse schema");
        assert_eq!(schema.field_count(), 2);
        assert_eq!(schema.total_pages(), 2);
        assert_eq!(schema.review_pages(), vec![1, 2]);
    }

    #[test]
    fn parses_titled_document() {
        let json = r#"{
            "title": "Visit",
            "fields": [{ "id": "notes", "key": "notes", "type": "textarea", "sectionTitle": "Notes" }]
        }"#;
        let schema = FormSchema::from_json(json).expect("parse schema");
        assert_eq!(schema.title, "Visit");
        assert_eq!(schema.declared_section_title(1), Some("Notes"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            FormSchema::from_json("{ not json"),
            Err(FormError::Schema(_))
        ));
    }

    #[test]
    fn largest_page_number_does_not_overflow() {
        let json = r#"[{ "id": "a", "key": "a", "type": "text", "page": 4294967295 }]"#;
        let schema = FormSchema::from_json(json).expect("parse schema");
        assert_eq!(schema.total_pages(), u32::MAX);
        assert_eq!(schema.review_page(), u32::MAX);

        let mut session = crate::session::FormSession::new(schema.into());
        assert!(!session.is_review());
        session.restore(crate::state::FormData::new(), u32::MAX);
        assert_eq!(session.current_page(), u32::MAX);
        assert_eq!(session.next_page(), crate::navigation::Transition::Unchanged);
    }
}
