//! Entered form values.
//!
//! `FormData` maps a field's `key` to its current `FieldValue`. The value shape
//! depends on the field kind:
//!   * scalar kinds hold `Text` (numbers may arrive as `Number` from JSON)
//!   * checkboxes hold `Bool`
//!   * multiselects hold `List`, plus a `Text` sibling under `"{key}Other"`
//!   * signatures hold `Null` until captured, then `Signature`
//!
//! `initialize` and `reset` run the same per-kind dispatch, so a reset form is
//! indistinguishable from a freshly opened one. Keys not in the schema (for
//! example from an older saved snapshot) are left alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{FieldDescriptor, FieldKind};

/// Captured electronic signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureData {
    /// Drawn signature (typically a data URL).
    pub signature_image: Option<String>,
    pub typed_name: String,
    pub consent_given: bool,
}

impl SignatureData {
    pub fn is_complete(&self) -> bool {
        self.consent_given
            && self.signature_image.as_deref().is_some_and(|s| !s.is_empty())
            && !self.typed_name.trim().is_empty()
    }
}

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Signature(SignatureData),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn list<T: Into<String>>(values: impl IntoIterator<Item = T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }

    /// Presence check used by `required`: empty text, `false`, zero, null and
    /// empty lists are all absent.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Signature(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_signature(&self) -> Option<&SignatureData> {
        match self {
            FieldValue::Signature(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String form used for pattern matching and display. `None` for values
    /// that have no scalar form (null, signatures).
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            FieldValue::Null | FieldValue::Signature(_) => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(format_number(*n)),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::List(items) => Some(items.join(",")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<SignatureData> for FieldValue {
    fn from(value: SignatureData) -> Self {
        FieldValue::Signature(value)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl FieldKind {
    /// Value a field of this kind starts with.
    pub fn initial_value(&self) -> FieldValue {
        match self {
            FieldKind::Multiselect => FieldValue::List(Vec::new()),
            FieldKind::Checkbox => FieldValue::Bool(false),
            FieldKind::Signature => FieldValue::Null,
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Tel
            | FieldKind::Number
            | FieldKind::Date
            | FieldKind::Time
            | FieldKind::Select
            | FieldKind::Document
            | FieldKind::Textarea
            | FieldKind::Camera
            | FieldKind::Payment
            | FieldKind::Unknown(_) => FieldValue::Text(String::new()),
        }
    }
}

/// Values captured while filling in a form, keyed by field `key`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    values: BTreeMap<String, FieldValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh data with every schema key set to its kind's initial value.
    pub fn initialized(fields: &[FieldDescriptor]) -> Self {
        let mut data = Self::new();
        data.initialize(fields);
        data
    }

    /// Write the initial value of every field (and multiselect sibling).
    pub fn initialize(&mut self, fields: &[FieldDescriptor]) {
        for field in fields {
            if field.kind == FieldKind::Multiselect {
                self.values
                    .insert(field.other_key(), FieldValue::Text(String::new()));
            }
            self.values
                .insert(field.key.clone(), field.kind.initial_value());
        }
    }

    /// Same as `initialize`; kept separate so call sites read naturally.
    pub fn reset(&mut self, fields: &[FieldDescriptor]) {
        self.initialize(fields);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FieldValue::as_list)
    }

    pub fn signature(&self, key: &str) -> Option<&SignatureData> {
        self.get(key).and_then(FieldValue::as_signature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay every entry of `other` onto `self`.
    pub fn merge(&mut self, other: FormData) {
        self.values.extend(other.values);
    }
}
