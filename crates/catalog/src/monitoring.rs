//! Site-visit monitoring form.

use chrono::{DateTime, Utc};
use forms::{FieldDescriptor, FieldKind, FormData, FormSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
pub const PHONE_PATTERN: &str = r"^[0-9]{10}$";

const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

const SECTION_TITLES: [&str; 4] = ["Basic Information", "Payment", "Proof of Visit", "Signature"];

pub fn monitoring_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("email", "Email", FieldKind::Text)
            .pattern(EMAIL_PATTERN)
            .required(),
        FieldDescriptor::new("customerPhoneNumber", "Customer Phone Number", FieldKind::Tel)
            .id("customer-phone-number")
            .span(8)
            .pattern(PHONE_PATTERN)
            .required(),
        FieldDescriptor::new("customerQR", "Customer QR Code", FieldKind::Text)
            .id("customer-qr-code")
            .span(4)
            .required(),
        FieldDescriptor::new("visitDate", "Visit Date", FieldKind::Date)
            .id("borrower-visit-date")
            .span(6)
            .required(),
        FieldDescriptor::new("visitTime", "Visit Time", FieldKind::Time)
            .id("borrower-visit-time")
            .span(6)
            .required(),
        FieldDescriptor::new("payment", "Payment", FieldKind::Payment)
            .on_page(2)
            .required(),
        FieldDescriptor::new("photosTaken", "Proof of Visit", FieldKind::Camera)
            .id("photos-taken")
            .describe("Take photos on-site or upload from your device")
            .accept(["image/*"])
            .max_size(MAX_PHOTO_BYTES)
            .on_page(3)
            .required(),
        FieldDescriptor::new("notes", "Additional Notes", FieldKind::Textarea)
            .placeholder("Enter any additional observations or notes...")
            .on_page(3),
        FieldDescriptor::new("signature", "Signature", FieldKind::Signature)
            .on_page(4)
            .required(),
    ]
}

pub fn monitoring_schema() -> FormSchema {
    FormSchema::builder("Site Visit Monitoring")
        .extend(monitoring_fields())
        .build()
}

pub fn monitoring_section_title(page: u32) -> String {
    match page {
        1..=4 => SECTION_TITLES[(page - 1) as usize].to_string(),
        _ => format!("Page {page}"),
    }
}

/// Where the visit was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSubmission {
    pub id: Uuid,
    pub borrower_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower_name: Option<String>,
    pub agent_id: String,
    pub form_data: FormData,
    pub location: LocationData,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_number: Option<u32>,
}

impl MonitoringSubmission {
    /// New submission with a fresh id, stamped now.
    pub fn new(
        borrower_id: impl Into<String>,
        agent_id: impl Into<String>,
        form_data: FormData,
        location: LocationData,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            borrower_id: borrower_id.into(),
            borrower_name: None,
            agent_id: agent_id.into(),
            form_data,
            location,
            submitted_at: Utc::now(),
            visit_number: None,
        }
    }

    pub fn with_borrower_name(mut self, name: impl Into<String>) -> Self {
        self.borrower_name = Some(name.into());
        self
    }

    pub fn with_visit_number(mut self, visit: u32) -> Self {
        self.visit_number = Some(visit);
        self
    }
}
