//! Field kinds & descriptors.
//!
//! This module defines the declarative pieces of a form:
//! - `FieldKind`: enumeration of supported input types
//! - `FieldOption`: value/label pair for select-like fields
//! - `FieldDescriptor`: metadata for a single field (page, layout, validation)
//!
//! Descriptors are pure data. They deserialize from the camelCase JSON shape
//! used by schema files, and can be built in code with the builder setters:
//!
//! ```ignore
//! use forms::{FieldDescriptor, FieldKind};
//!
//! let field = FieldDescriptor::new("phoneNumber", "Phone Number", FieldKind::Tel)
//!     .placeholder("Enter your phone number")
//!     .pattern("^[0-9]{10}$")
//!     .span(6)
//!     .on_page(2)
//!     .required();
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel option value that asks for a free-text "other" entry.
pub const OTHER_OPTION: &str = "other";

/// Input type of a field.
///
/// Schemas are data, so any type name this engine does not know about is kept
/// as `Unknown` and treated like a plain scalar field everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Time,
    Select,
    Multiselect,
    Document,
    Signature,
    Checkbox,
    Textarea,
    Camera,
    Payment,
    Unknown(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::Select => "select",
            FieldKind::Multiselect => "multiselect",
            FieldKind::Document => "document",
            FieldKind::Signature => "signature",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Textarea => "textarea",
            FieldKind::Camera => "camera",
            FieldKind::Payment => "payment",
            FieldKind::Unknown(name) => name,
        }
    }

    /// Files are kept in the `DocumentStore` (keyed by field id) for these kinds.
    pub fn is_upload(&self) -> bool {
        matches!(self, FieldKind::Document | FieldKind::Camera)
    }

    /// Kinds whose value is picked from `FieldDescriptor::options`.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Multiselect)
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            "number" => FieldKind::Number,
            "date" => FieldKind::Date,
            "time" => FieldKind::Time,
            "select" => FieldKind::Select,
            "multiselect" => FieldKind::Multiselect,
            "document" => FieldKind::Document,
            "signature" => FieldKind::Signature,
            "checkbox" => FieldKind::Checkbox,
            "textarea" => FieldKind::Textarea,
            "camera" => FieldKind::Camera,
            "payment" => FieldKind::Payment,
            _ => FieldKind::Unknown(value),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative description of a form field.
///
/// `id` identifies the field (and its uploads); `key` names the entry in
/// `FormData` the field binds to. They are usually equal but need not be.
///
/// Layout values follow the 12 column grid: `column_span` defaults to the full
/// width, `row_span` to a single row, and `page` to the first page. A zero in
/// any of them counts as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, rename = "minlength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepted_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
}

impl FieldDescriptor {
    /// Create a field whose `id` and `key` are both `key`.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            key,
            label: label.into(),
            kind,
            placeholder: String::new(),
            required: false,
            pattern: None,
            min_length: None,
            options: Vec::new(),
            column_span: None,
            row_span: None,
            page: None,
            section_title: None,
            description: None,
            accepted_types: Vec::new(),
            max_size: None,
        }
    }

    /// Override the field id (defaults to the key).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn pattern(mut self, source: impl Into<String>) -> Self {
        self.pattern = Some(source.into());
        self
    }

    pub fn options<V, L>(mut self, options: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(value, label)| FieldOption::new(value, label))
            .collect();
        self
    }

    pub fn span(mut self, columns: u32) -> Self {
        self.column_span = Some(columns);
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.row_span = Some(rows);
        self
    }

    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn section_title(mut self, title: impl Into<String>) -> Self {
        self.section_title = Some(title.into());
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Restrict uploads to these MIME types (`image/*` style wildcards allowed).
    pub fn accept<T: Into<String>>(mut self, types: impl IntoIterator<Item = T>) -> Self {
        self.accepted_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Page number with the default applied.
    pub fn page_number(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }

    /// Column span with the full-width default applied.
    pub fn column_span(&self) -> u32 {
        self.column_span.filter(|s| *s > 0).unwrap_or(12)
    }

    pub fn row_span(&self) -> u32 {
        self.row_span.filter(|s| *s > 0).unwrap_or(1)
    }

    /// `FormData` key of the free-text companion of a multiselect.
    pub fn other_key(&self) -> String {
        format!("{}Other", self.key)
    }

    /// Label of the option with the given value.
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_layout_is_unset() {
        let field = FieldDescriptor::new("firstName", "First Name", FieldKind::Text);
        assert_eq!(field.page_number(), 1);
        assert_eq!(field.column_span(), 12);
        assert_eq!(field.row_span(), 1);
        assert_eq!(field.id, "firstName");
    }

    #[test]
    fn zero_layout_values_count_as_unset() {
        let field = FieldDescriptor::new("x", "X", FieldKind::Text)
            .on_page(0)
            .span(0)
            .rows(0);
        assert_eq!(field.page_number(), 1);
        assert_eq!(field.column_span(), 12);
        assert_eq!(field.row_span(), 1);
    }

    #[test]
    fn deserializes_schema_json() {
        let json = r#"{
            "id": "eWallets",
            "key": "eWallet",
            "label": "eWallet",
            "type": "multiselect",
            "required": true,
            "page": 3,
            "options": [
                { "value": "gcash", "label": "GCash" },
                { "value": "other", "label": "Other" }
            ]
        }"#;
        let field: FieldDescriptor = serde_json::from_str(json).expect("parse field");
        assert_eq!(field.kind, FieldKind::Multiselect);
        assert_eq!(field.id, "eWallets");
        assert_eq!(field.key, "eWallet");
        assert_eq!(field.other_key(), "eWalletOther");
        assert_eq!(field.page_number(), 3);
        assert_eq!(field.option_label("gcash"), Some("GCash"));
    }

    #[test]
    fn unknown_type_is_preserved() {
        let json = r#"{ "id": "rating", "key": "rating", "type": "stars" }"#;
        let field: FieldDescriptor = serde_json::from_str(json).expect("parse field");
        assert_eq!(field.kind, FieldKind::Unknown("stars".into()));
        assert_eq!(field.kind.as_str(), "stars");

        let back = serde_json::to_value(&field).expect("serialize");
        assert_eq!(back["type"], "stars");
    }

    #[test]
    fn upload_kinds() {
        assert!(FieldKind::Document.is_upload());
        assert!(FieldKind::Camera.is_upload());
        assert!(!FieldKind::Textarea.is_upload());
    }
}
