use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use catalog::{monitoring_schema, monitoring_section_title, FormVariant};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use forms::FormSchema;

/// The form a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Onboarding(FormVariant),
    Monitoring,
    /// A schema JSON file, keyed in storage by its file stem with characters
    /// outside `[A-Za-z0-9_.-]` replaced by `_`.
    File(PathBuf),
}

pub const MONITORING_TAG: &str = "monitoring";

impl FormTarget {
    /// Storage and endpoint tag.
    pub fn tag(&self) -> String {
        match self {
            FormTarget::Onboarding(variant) => variant.tag().to_string(),
            FormTarget::Monitoring => MONITORING_TAG.to_string(),
            FormTarget::File(path) => path
                .file_stem()
                .map(|stem| storage_safe(&stem.to_string_lossy()))
                .filter(|tag| !tag.is_empty())
                .unwrap_or_else(|| "custom".to_string()),
        }
    }

    pub fn variant(&self) -> Option<FormVariant> {
        match self {
            FormTarget::Onboarding(variant) => Some(*variant),
            _ => None,
        }
    }

    pub fn schema(&self) -> Result<FormSchema> {
        match self {
            FormTarget::Onboarding(variant) => Ok(variant.schema()),
            FormTarget::Monitoring => Ok(monitoring_schema()),
            FormTarget::File(path) => {
                let json = fs::read_to_string(path)
                    .wrap_err_with(|| format!("reading schema {}", path.display()))?;
                FormSchema::from_json(&json)
                    .wrap_err_with(|| format!("parsing schema {}", path.display()))
            }
        }
    }

    /// Header for a page; schema files fall back to the titles their fields declare.
    pub fn section_title(&self, schema: &FormSchema, page: u32) -> String {
        match self {
            FormTarget::Onboarding(variant) => variant.section_title(page),
            FormTarget::Monitoring => monitoring_section_title(page),
            FormTarget::File(_) => schema
                .declared_section_title(page)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Page {page}")),
        }
    }
}

impl FromStr for FormTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(MONITORING_TAG) {
            return Ok(FormTarget::Monitoring);
        }
        if s.ends_with(".json") {
            return Ok(FormTarget::File(PathBuf::from(s)));
        }
        FormVariant::from_str(&s.to_ascii_lowercase())
            .map(FormTarget::Onboarding)
            .map_err(|_| format!("unknown form `{s}`"))
    }
}

impl fmt::Display for FormTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormTarget::File(path) => write!(f, "{}", path.display()),
            other => f.write_str(&other.tag()),
        }
    }
}

/// Replace characters saved-form keys cannot hold with `_` and drop leading dots.
fn storage_safe(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

/// Error out unless the target is an onboarding variant.
pub fn require_variant(target: &FormTarget) -> Result<FormVariant> {
    target
        .variant()
        .ok_or_else(|| eyre!("`{target}` is not an onboarding form"))
}
