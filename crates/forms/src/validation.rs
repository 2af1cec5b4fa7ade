//! Field, page and form validation.
//!
//! One predicate (`check_field`) decides whether a single field is complete.
//! It is shared by two scopes:
//! - `is_page_valid`: every field of one page, plain boolean, no message.
//!   It runs on every recomputation, so it stays side-effect free and
//!   compiles each regex pattern once.
//! - `validate_all`: every field of the schema in order, stopping at the
//!   first failure and returning it as a `ValidationIssue` whose `Display`
//!   is the message shown to the user.
//!
//! Both scopes apply the same rules, including the multiselect "other" text
//! and the signature sub-checks.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::documents::DocumentStore;
use crate::field::{FieldDescriptor, FieldKind, OTHER_OPTION};
use crate::state::{FieldValue, FormData};

/// Why a field is not complete. `Display` is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Please upload {label}")]
    MissingUpload { field_id: String, label: String },

    #[error("Please select at least one option for {label}")]
    NothingSelected { key: String, label: String },

    #[error("Please specify your other option for {label}")]
    MissingOtherText { key: String, label: String },

    #[error("Please provide your electronic signature and consent.")]
    MissingConsent { key: String },

    #[error("Please draw your signature.")]
    MissingSignatureImage { key: String },

    #[error("Please type your full legal name.")]
    MissingTypedName { key: String },

    #[error("Please fill in {label}")]
    MissingValue { key: String, label: String },

    #[error("{label} format is invalid. Please check the format and try again.")]
    InvalidFormat { key: String, label: String },
}

impl ValidationIssue {
    /// Field id for uploads, field key for everything else.
    pub fn field(&self) -> &str {
        match self {
            ValidationIssue::MissingUpload { field_id, .. } => field_id,
            ValidationIssue::NothingSelected { key, .. }
            | ValidationIssue::MissingOtherText { key, .. }
            | ValidationIssue::MissingConsent { key }
            | ValidationIssue::MissingSignatureImage { key }
            | ValidationIssue::MissingTypedName { key }
            | ValidationIssue::MissingValue { key, .. }
            | ValidationIssue::InvalidFormat { key, .. } => key,
        }
    }
}

/// Test `value` against an optional regex source.
///
/// Absent patterns and empty values pass (presence is the `required` check's
/// job). A pattern that does not compile passes as well and is logged, so a
/// broken schema never blocks submission.
pub fn validate_pattern(value: &FieldValue, pattern: Option<&str>) -> bool {
    let Some(pattern) = pattern.filter(|p| !p.is_empty()) else {
        return true;
    };
    let Some(text) = value.to_scalar_string().filter(|s| !s.is_empty()) else {
        return true;
    };
    compiled(pattern).is_none_or(|regex| regex.is_match(&text))
}

/// Compiled patterns keyed by source. Sources that fail to compile are
/// stored as `None` and logged once.
type PatternCache = HashMap<String, Option<Regex>>;

fn pattern_cache() -> &'static Mutex<PatternCache> {
    static CACHE: OnceLock<Mutex<PatternCache>> = OnceLock::new();
    CACHE.get_or_init(Default::default)
}

fn compiled(pattern: &str) -> Option<Regex> {
    let mut cache = pattern_cache()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(entry) = cache.get(pattern) {
        return entry.clone();
    }
    let entry = match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            warn!(%pattern, error = %err, "invalid regex pattern in form schema; skipping check");
            None
        }
    };
    cache.insert(pattern.to_string(), entry.clone());
    entry
}

/// Check one field against the entered data and uploads.
pub fn check_field(
    field: &FieldDescriptor,
    data: &FormData,
    documents: &DocumentStore,
) -> Result<(), ValidationIssue> {
    match &field.kind {
        FieldKind::Document | FieldKind::Camera => {
            if field.required && !documents.has_files(&field.id) {
                return Err(ValidationIssue::MissingUpload {
                    field_id: field.id.clone(),
                    label: field.label.clone(),
                });
            }
        }
        FieldKind::Multiselect => {
            let selected = data.list(&field.key).unwrap_or(&[]);
            if field.required && selected.is_empty() {
                return Err(ValidationIssue::NothingSelected {
                    key: field.key.clone(),
                    label: field.label.clone(),
                });
            }
            if selected.iter().any(|v| v == OTHER_OPTION) {
                let other = data
                    .get(&field.other_key())
                    .and_then(FieldValue::to_scalar_string)
                    .unwrap_or_default();
                if other.trim().is_empty() {
                    return Err(ValidationIssue::MissingOtherText {
                        key: field.key.clone(),
                        label: field.label.clone(),
                    });
                }
            }
        }
        FieldKind::Signature => {
            if field.required {
                check_signature(field, data)?;
            }
        }
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Tel
        | FieldKind::Number
        | FieldKind::Date
        | FieldKind::Time
        | FieldKind::Select
        | FieldKind::Checkbox
        | FieldKind::Textarea
        | FieldKind::Payment
        | FieldKind::Unknown(_) => {
            let value = data.get(&field.key).unwrap_or(&FieldValue::Null);
            if !value.is_present() {
                if field.required {
                    return Err(ValidationIssue::MissingValue {
                        key: field.key.clone(),
                        label: field.label.clone(),
                    });
                }
                return Ok(());
            }
            if !validate_pattern(value, field.pattern.as_deref()) {
                return Err(ValidationIssue::InvalidFormat {
                    key: field.key.clone(),
                    label: field.label.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_signature(field: &FieldDescriptor, data: &FormData) -> Result<(), ValidationIssue> {
    let key = || field.key.clone();
    let Some(signature) = data.signature(&field.key).filter(|s| s.consent_given) else {
        return Err(ValidationIssue::MissingConsent { key: key() });
    };
    if signature.signature_image.as_deref().is_none_or(str::is_empty) {
        return Err(ValidationIssue::MissingSignatureImage { key: key() });
    }
    if signature.typed_name.trim().is_empty() {
        return Err(ValidationIssue::MissingTypedName { key: key() });
    }
    Ok(())
}

/// True when every field passes. No message is produced.
pub fn is_page_valid<'a>(
    fields: impl IntoIterator<Item = &'a FieldDescriptor>,
    data: &FormData,
    documents: &DocumentStore,
) -> bool {
    fields
        .into_iter()
        .all(|field| check_field(field, data, documents).is_ok())
}

/// First failing field in iteration order; later fields are not evaluated.
pub fn validate_all<'a>(
    fields: impl IntoIterator<Item = &'a FieldDescriptor>,
    data: &FormData,
    documents: &DocumentStore,
) -> Result<(), ValidationIssue> {
    fields
        .into_iter()
        .try_for_each(|field| check_field(field, data, documents))
}
