//! Form definitions: the onboarding variants and the site-visit monitoring
//! form, plus the payloads they are submitted as.

pub mod monitoring;
pub mod onboarding;
pub mod submission;

pub use monitoring::{
    monitoring_schema, monitoring_section_title, LocationData, MonitoringSubmission,
};
pub use onboarding::{base_fields, signature_field, FormVariant, SIGNATURE_PAGE};
pub use submission::OnboardingSubmission;
