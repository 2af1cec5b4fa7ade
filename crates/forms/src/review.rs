//! Review step summary.
//!
//! One `ReviewSection` per page that holds fields, each listing the page's
//! fields as `(label, display value)` pairs. Section titles come from the
//! caller so variant-specific title tables stay outside this crate.

use serde::Serialize;

use crate::documents::DocumentStore;
use crate::field::{FieldDescriptor, FieldKind, OTHER_OPTION};
use crate::schema::FormSchema;
use crate::state::{FieldValue, FormData};

/// Shown for fields left empty.
pub const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntry {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSection {
    pub page: u32,
    pub title: String,
    pub entries: Vec<ReviewEntry>,
}

impl ReviewSection {
    /// Build every section of `schema` in page order.
    pub fn collect(
        schema: &FormSchema,
        data: &FormData,
        documents: &DocumentStore,
        mut title_for: impl FnMut(u32) -> String,
    ) -> Vec<ReviewSection> {
        schema
            .review_pages()
            .into_iter()
            .map(|page| ReviewSection {
                page,
                title: title_for(page),
                entries: schema
                    .page_fields(page)
                    .map(|field| ReviewEntry {
                        label: field.label.clone(),
                        value: display_value(field, data, documents),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Human readable value of one field.
pub fn display_value(field: &FieldDescriptor, data: &FormData, documents: &DocumentStore) -> String {
    let value = data.get(&field.key).unwrap_or(&FieldValue::Null);
    let shown = match &field.kind {
        FieldKind::Document | FieldKind::Camera => documents
            .files(&field.id)
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        FieldKind::Checkbox => match value.as_bool() {
            Some(true) => "Yes".to_string(),
            _ => "No".to_string(),
        },
        FieldKind::Signature => value
            .as_signature()
            .map(|sig| sig.typed_name.trim().to_string())
            .unwrap_or_default(),
        FieldKind::Select => {
            let raw = value.to_scalar_string().unwrap_or_default();
            field.option_label(&raw).map(str::to_string).unwrap_or(raw)
        }
        FieldKind::Multiselect => multiselect_value(field, value, data),
        _ => value.to_scalar_string().unwrap_or_default(),
    };
    if shown.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        shown
    }
}

fn multiselect_value(field: &FieldDescriptor, value: &FieldValue, data: &FormData) -> String {
    let other = data.text(&field.other_key()).map(str::trim).unwrap_or("");
    value
        .as_list()
        .unwrap_or(&[])
        .iter()
        .map(|selected| {
            let label = field.option_label(selected).unwrap_or(selected.as_str());
            if selected == OTHER_OPTION && !other.is_empty() {
                format!("{label}: {other}")
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
